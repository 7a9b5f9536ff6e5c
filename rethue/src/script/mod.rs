//! rethue source language front end.
//!
//! Turns program text into an [`engine::Program`](crate::engine::Program):
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `"text"` or `'text'` | literal, with `\1` and `\g<name>` back-references |
//! | `/regex/ ::= p` | rewrite the first match of `regex` with `p` |
//! | `a => b` | sequence |
//! | `{ p q … }` | repeat the alternation until nothing changes |
//! | `[ p q … ]` | apply the alternation once |
//! | `name = p` | named production |
//! | `name` | reference |
//! | `:::` | read a line of input |
//! | `~ p` | print what `p` produces |
//!
//! # Quick start
//!
//! ```rust
//! use rethue::engine::BufferHost;
//!
//! let pgm = rethue::script::compile(r#"[ /(\d)\+(\d)/ ::= "\2+\1" ]"#).unwrap();
//! let mut host = BufferHost::new();
//! assert_eq!(pgm.run_with("1+2", &mut host).unwrap(), "2+1");
//! ```

pub mod lexer;
pub mod parser;

pub use parser::compile;
