//! Hooks around every production application.
//!
//! The engine calls [`Observer::before`] as it enters a production and
//! [`Observer::after`] once that production has committed.  An observer may
//! abort the run by returning an error; nothing else in the engine ever
//! stops a `{ ... }` loop.

use std::io::Write;

use super::context::Context;
use super::production::Production;
use crate::error::RuntimeError;

pub trait Observer {
    fn before(&mut self, depth: usize, prod: &Production, ctx: &Context) -> Result<(), RuntimeError> {
        let _ = (depth, prod, ctx);
        Ok(())
    }

    fn after(
        &mut self,
        depth: usize,
        prod: &Production,
        ctx: &Context,
        changed: bool,
    ) -> Result<(), RuntimeError> {
        let _ = (depth, prod, ctx, changed);
        Ok(())
    }
}

/// Observes nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Observer for Silent {}

/// Both observers, first `A` then `B`.
impl<A: Observer, B: Observer> Observer for (A, B) {
    fn before(&mut self, depth: usize, prod: &Production, ctx: &Context) -> Result<(), RuntimeError> {
        self.0.before(depth, prod, ctx)?;
        self.1.before(depth, prod, ctx)
    }

    fn after(
        &mut self,
        depth: usize,
        prod: &Production,
        ctx: &Context,
        changed: bool,
    ) -> Result<(), RuntimeError> {
        self.0.after(depth, prod, ctx, changed)?;
        self.1.after(depth, prod, ctx, changed)
    }
}

/// An observer that may be switched off.
impl<O: Observer> Observer for Option<O> {
    fn before(&mut self, depth: usize, prod: &Production, ctx: &Context) -> Result<(), RuntimeError> {
        match self {
            Some(o) => o.before(depth, prod, ctx),
            None => Ok(()),
        }
    }

    fn after(
        &mut self,
        depth: usize,
        prod: &Production,
        ctx: &Context,
        changed: bool,
    ) -> Result<(), RuntimeError> {
        match self {
            Some(o) => o.after(depth, prod, ctx, changed),
            None => Ok(()),
        }
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn before(&mut self, depth: usize, prod: &Production, ctx: &Context) -> Result<(), RuntimeError> {
        (**self).before(depth, prod, ctx)
    }

    fn after(
        &mut self,
        depth: usize,
        prod: &Production,
        ctx: &Context,
        changed: bool,
    ) -> Result<(), RuntimeError> {
        (**self).after(depth, prod, ctx, changed)
    }
}

// ── Trace ─────────────────────────────────────────────────────────────────────

/// Writes an indented line per application, and the new string whenever a
/// production changed it.
///
/// ```text
/// Alt(2) "aab"
///   Part[/b/] "aab"
///     Lit["c"] "b"
///     => "c"
///   => "aac"
/// => "aac"
/// ```
pub struct Trace<W> {
    out: W,
}

impl<W: Write> Trace<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Observer for Trace<W> {
    fn before(&mut self, depth: usize, prod: &Production, ctx: &Context) -> Result<(), RuntimeError> {
        writeln!(self.out, "{:indent$}{} {:?}", "", prod.label(), ctx.string(), indent = depth * 2)?;
        Ok(())
    }

    fn after(
        &mut self,
        depth: usize,
        _prod: &Production,
        ctx: &Context,
        changed: bool,
    ) -> Result<(), RuntimeError> {
        if changed {
            writeln!(self.out, "{:indent$}=> {:?}", "", ctx.string(), indent = depth * 2)?;
        }
        Ok(())
    }
}

// ── Step limit ────────────────────────────────────────────────────────────────

/// Aborts the run once more than `limit` productions have been applied.
#[derive(Debug, Clone)]
pub struct StepLimit {
    limit: u64,
    steps: u64,
}

impl StepLimit {
    pub fn new(limit: u64) -> Self {
        Self { limit, steps: 0 }
    }

    /// Applications seen so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl Observer for StepLimit {
    fn before(&mut self, _depth: usize, _prod: &Production, _ctx: &Context) -> Result<(), RuntimeError> {
        self.steps += 1;
        if self.steps > self.limit {
            return Err(RuntimeError::StepLimit(self.limit));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
