//! The production-tree execution engine.
//!
//! A program is a tree of [`Production`]s plus a [`Registry`] of named
//! definitions.  Running it threads one [`Context`] (the working string and
//! its last match) through the tree; each production reports whether it
//! changed the string, and that signal alone drives alternation and
//! repetition.
//!
//! # Quick start
//!
//! ```rust
//! use rethue::engine::{BufferHost, Production, Program, Registry};
//!
//! // { /ab/ ::= "ba" } sorts every `a` after every `b`.
//! let swap = Production::scoped("ab", false, Production::literal("ba").unwrap()).unwrap();
//! let pgm = Program::new(Production::repeat(vec![swap]), Registry::new());
//! let mut host = BufferHost::new();
//! assert_eq!(pgm.run_with("abab", &mut host).unwrap(), "bbaa");
//! ```

pub mod context;
pub mod host;
pub mod machine;
pub mod observer;
pub mod production;
pub mod program;
pub mod registry;
pub mod template;

// Re-exports for convenience.
pub use context::Context;
pub use host::{BufferHost, Host, StreamHost};
pub use machine::Machine;
pub use observer::{Observer, Silent, StepLimit, Trace};
pub use production::Production;
pub use program::Program;
pub use registry::Registry;
pub use template::Template;
