//! The working string and its most recent match.

use std::fmt;
use std::sync::Arc;

use crate::pattern::MatchRecord;

/// The single piece of state threaded through a run.
///
/// Both fields are reference-counted, so [`Context::enter`] is cheap: a
/// child transaction shares text with its parent until one of them writes.
#[derive(Clone)]
pub struct Context {
    string: Arc<str>,
    last_match: MatchRecord,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("string", &self.string)
            .field("last_match", &self.last_match)
            .finish()
    }
}

impl Context {
    /// A fresh context whose last match is the whole of `string`.
    pub fn new(string: impl Into<Arc<str>>) -> Self {
        let string = string.into();
        let last_match = MatchRecord::whole_string(Arc::clone(&string));
        Self { string, last_match }
    }

    /// A context scoped to a match: the string is the matched text and the
    /// last match is the record itself.
    pub fn scoped(m: MatchRecord) -> Self {
        Self {
            string: Arc::from(m.whole()),
            last_match: m,
        }
    }

    pub fn string(&self) -> &str {
        &self.string
    }

    /// The string as a shared handle, for building match records over it.
    pub fn shared_string(&self) -> &Arc<str> {
        &self.string
    }

    pub fn last_match(&self) -> &MatchRecord {
        &self.last_match
    }

    /// Replace the string and reset the last match to the whole of it.
    pub fn set(&mut self, string: impl Into<Arc<str>>) {
        *self = Self::new(string);
    }

    /// Replace the string but keep the current last match.
    pub fn set_string(&mut self, string: impl Into<Arc<str>>) {
        self.string = string.into();
    }

    pub fn set_match(&mut self, m: MatchRecord) {
        self.last_match = m;
    }

    /// Open a child transaction: an exact copy of this context.
    pub fn enter(&self) -> Context {
        self.clone()
    }

    /// Commit `child` into this context unconditionally.
    ///
    /// Returns `true` if the string differs from what it was before.
    pub fn commit(&mut self, child: Context) -> bool {
        let changed = self.string != child.string;
        *self = child;
        changed
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
