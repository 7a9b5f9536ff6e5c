//! rethue: an interpreter for a small Thue-style string-rewriting language.
//!
//! A program rewrites one working string.  Literals replace it, scoped
//! rewrites edit the first regex match in place, and `{ }` / `[ ]` groups
//! try alternatives until something changes.
//!
//! - [`script`] turns source text into a [`engine::Program`].
//! - [`engine`] runs it.
//! - [`cli`] and [`config`] back the `rethue` binary.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod script;

pub use engine::Program;
pub use error::{CompileError, RuntimeError};
pub use script::compile;
