//! Named production table.
//!
//! Recursion between productions is expressed through names: the tree only
//! ever holds a [`Production::Reference`] or [`Production::Alias`] node, and
//! the definition lives here.  Lookups happen when a node is applied, so a
//! name may be used before (or without) being defined; only exercising an
//! undefined name is an error.

use std::collections::HashMap;

use super::production::Production;
use crate::error::{CompileError, RuntimeError};

/// Name → production table, filled before a run and read-only during it.
#[derive(Debug, Default)]
pub struct Registry {
    defs: HashMap<String, Production>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `prod`.  Each name may be bound once.
    pub fn define(&mut self, name: impl Into<String>, prod: Production) -> Result<(), CompileError> {
        let name = name.into();
        if self.defs.contains_key(&name) {
            return Err(CompileError::DuplicateName(name));
        }
        self.defs.insert(name, prod);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Production> {
        self.defs.get(name)
    }

    /// Look `name` up for application.
    pub fn resolve(&self, name: &str) -> Result<&Production, RuntimeError> {
        self.get(name)
            .ok_or_else(|| RuntimeError::UnresolvedReference(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    /// Iterate over all definitions (arbitrary order).
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Production)> {
        self.defs.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
