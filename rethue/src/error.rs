//! Error types shared by the front end and the engine.
//!
//! Compilation and execution fail differently: a [`CompileError`] is raised
//! before any run begins, a [`RuntimeError`] aborts the run that hit it.
//! Neither is ever recovered from inside the engine.

use std::io;

use thiserror::Error;

use crate::pattern::PatternError;

/// Failure to turn source text into a runnable program.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{line}:{col}: {message}")]
    Syntax {
        line: usize,
        col: usize,
        message: String,
    },
    #[error("bad pattern /{src}/: {source}")]
    Pattern {
        src: String,
        #[source]
        source: PatternError,
    },
    #[error("bad literal {src:?}: {message}")]
    Template { src: String, message: String },
    #[error("production `{0}` is defined more than once")]
    DuplicateName(String),
}

/// Failure while applying productions.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("undefined production `{0}`")]
    UnresolvedReference(String),
    #[error("input exhausted")]
    InputExhausted,
    #[error("no such group {0} in the last match")]
    BadGroup(String),
    #[error("step limit of {0} exceeded")]
    StepLimit(u64),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}
