//! Per-run execution state.
//!
//! A [`Machine`] bundles what a production needs besides its [`Context`]:
//! the name registry to resolve references against, the host for `:::` and
//! `~`, and the observer notified around each application.  It lives for
//! exactly one run.

use super::context::Context;
use super::host::Host;
use super::observer::Observer;
use super::production::Production;
use super::registry::Registry;
use crate::error::RuntimeError;

pub struct Machine<'a> {
    registry: &'a Registry,
    host: &'a mut dyn Host,
    observer: &'a mut dyn Observer,
    depth: usize,
}

impl<'a> Machine<'a> {
    pub fn new(registry: &'a Registry, host: &'a mut dyn Host, observer: &'a mut dyn Observer) -> Self {
        Self {
            registry,
            host,
            observer,
            depth: 0,
        }
    }

    /// Apply `prod` to `ctx`, reporting whether the string changed.
    pub fn apply(&mut self, prod: &Production, ctx: &mut Context) -> Result<bool, RuntimeError> {
        self.observer.before(self.depth, prod, ctx)?;
        self.depth += 1;
        let result = prod.effect(ctx, self);
        self.depth -= 1;
        let changed = result?;
        self.observer.after(self.depth, prod, ctx, changed)?;
        Ok(changed)
    }

    /// A machine over a different registry that shares this one's host,
    /// observer and depth.
    pub fn nested<'b>(&'b mut self, registry: &'b Registry) -> Machine<'b> {
        Machine {
            registry,
            host: &mut *self.host,
            observer: &mut *self.observer,
            depth: self.depth,
        }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub(crate) fn read_line(&mut self) -> Result<String, RuntimeError> {
        self.host.read_line()?.ok_or(RuntimeError::InputExhausted)
    }

    pub(crate) fn write_line(&mut self, line: &str) -> Result<(), RuntimeError> {
        self.host.write_line(line)?;
        Ok(())
    }
}
