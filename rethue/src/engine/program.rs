//! Runtime entry point.

use std::fmt;

use super::context::Context;
use super::host::Host;
use super::machine::Machine;
use super::observer::{Observer, Silent};
use super::production::Production;
use super::registry::Registry;
use crate::error::RuntimeError;

/// A compiled program: its root production and the names it can reach.
///
/// Immutable once built; every [`Program::run`] starts from a fresh
/// [`Context`], so one program can be run any number of times.
#[derive(Debug)]
pub struct Program {
    root: Production,
    registry: Registry,
}

impl Program {
    pub fn new(root: Production, registry: Registry) -> Self {
        Self { root, registry }
    }

    pub fn root(&self) -> &Production {
        &self.root
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Apply the root once, starting from `initial`, and return the final
    /// string.  There is no implicit loop at this level.
    pub fn run(
        &self,
        initial: &str,
        host: &mut dyn Host,
        observer: &mut dyn Observer,
    ) -> Result<String, RuntimeError> {
        let mut ctx = Context::new(initial);
        let mut m = Machine::new(&self.registry, host, observer);
        m.apply(&self.root, &mut ctx)?;
        Ok(ctx.string().to_owned())
    }

    /// [`Program::run`] with nothing observing.
    pub fn run_with(&self, initial: &str, host: &mut dyn Host) -> Result<String, RuntimeError> {
        self.run(initial, host, &mut Silent)
    }

    /// Apply the whole program as a single production inside a running
    /// machine, so one program can be embedded in another run.
    pub fn apply(&self, ctx: &mut Context, m: &mut Machine<'_>) -> Result<bool, RuntimeError> {
        let mut local = ctx.enter();
        m.nested(&self.registry).apply(&self.root, &mut local)?;
        Ok(ctx.commit(local))
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Program[{}]", self.root)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::host::BufferHost;

    fn lit(s: &str) -> Production {
        Production::literal(s).unwrap()
    }

    #[test]
    fn run_defaults_to_empty_string() {
        let pgm = Program::new(lit(r"[\0]"), Registry::new());
        let mut host = BufferHost::new();
        assert_eq!(pgm.run_with("", &mut host).unwrap(), "[]");
    }

    #[test]
    fn run_applies_root_once() {
        let root = Production::scoped("a", false, lit("")).unwrap();
        let pgm = Program::new(root, Registry::new());
        let mut host = BufferHost::new();
        assert_eq!(pgm.run_with("aaa", &mut host).unwrap(), "aa");
    }

    #[test]
    fn runs_are_independent() {
        let pgm = Program::new(Production::sequence(Production::Input, lit(r"\0!")), Registry::new());
        let mut host = BufferHost::with_input(["one", "two"]);
        assert_eq!(pgm.run_with("", &mut host).unwrap(), "one!");
        assert_eq!(pgm.run_with("", &mut host).unwrap(), "two!");
    }

    #[test]
    fn errors_abort_without_result() {
        let pgm = Program::new(Production::reference("nowhere"), Registry::new());
        let mut host = BufferHost::new();
        assert!(matches!(
            pgm.run_with("x", &mut host),
            Err(RuntimeError::UnresolvedReference(_))
        ));
    }

    #[test]
    fn program_embeds_as_production() {
        let mut reg = Registry::new();
        reg.define("inner", lit("from inner")).unwrap();
        let embedded = Program::new(Production::reference("inner"), reg);

        let outer_reg = Registry::new();
        let mut host = BufferHost::new();
        let mut observer = Silent;
        let mut m = Machine::new(&outer_reg, &mut host, &mut observer);
        let mut ctx = Context::new("start");
        assert!(embedded.apply(&mut ctx, &mut m).unwrap());
        assert_eq!(ctx.string(), "from inner");
    }

    #[test]
    fn program_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Program>();
    }

    #[test]
    fn display() {
        let pgm = Program::new(lit("x"), Registry::new());
        assert_eq!(pgm.to_string(), r#"Program[Lit["x"]]"#);
    }
}
