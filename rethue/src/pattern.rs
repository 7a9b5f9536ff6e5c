//! Regex patterns and the match records they produce.
//!
//! A [`Pattern`] is the compiled form of a `/.../` literal.  Searching with it
//! yields a [`MatchRecord`], which owns a shared handle to the text it was
//! taken from so that its spans remain valid after the working string has
//! moved on.
//!
//! ## Flags
//!
//! | Suffix | Effect |
//! |--------|--------|
//! | (none) | case-sensitive, `.` does not match `\n` |
//! | `i`    | case-insensitive |

use std::fmt;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

// ── Public types ─────────────────────────────────────────────────────────────

/// Error returned when a pattern cannot be compiled.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("regex error: {0}")]
    InvalidRegex(#[from] regex::Error),
}

/// A compiled pattern ready for searching.
///
/// The regex sits behind an `Arc` so clones (and the match records that keep
/// a handle for named-group lookup) never recompile.
#[derive(Clone)]
pub struct Pattern {
    src: String,
    case_insensitive: bool,
    regex: Arc<Regex>,
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("src", &self.src)
            .field("case_insensitive", &self.case_insensitive)
            .finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.src)?;
        if self.case_insensitive {
            f.write_str("i")?;
        }
        Ok(())
    }
}

impl Pattern {
    /// Compile `src`.
    ///
    /// Returns [`PatternError`] if the regex is syntactically invalid.
    pub fn new(src: &str, case_insensitive: bool) -> Result<Self, PatternError> {
        let regex = RegexBuilder::new(src)
            .case_insensitive(case_insensitive)
            .build()?;
        Ok(Self {
            src: src.to_owned(),
            case_insensitive,
            regex: Arc::new(regex),
        })
    }

    /// Search `subject` for the leftmost match.
    pub fn find(&self, subject: &Arc<str>) -> Option<MatchRecord> {
        let caps = self.regex.captures(subject)?;
        let groups = caps
            .iter()
            .map(|m| m.map(|m| (m.start(), m.end())))
            .collect();
        Some(MatchRecord {
            subject: Arc::clone(subject),
            groups,
            regex: Some(Arc::clone(&self.regex)),
        })
    }
}

/// The result of a match: a subject plus the byte spans of every group.
///
/// Group 0 is always present and is the whole match.
#[derive(Clone)]
pub struct MatchRecord {
    subject: Arc<str>,
    /// (start, end) byte offsets per group; `None` = group didn't participate.
    groups: Vec<Option<(usize, usize)>>,
    /// Kept for named-group lookup; `None` for whole-string records.
    regex: Option<Arc<Regex>>,
}

impl fmt::Debug for MatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<Option<&str>> = (1..self.groups.len()).map(|n| self.group(n)).collect();
        f.debug_struct("MatchRecord")
            .field("whole", &self.whole())
            .field("groups", &groups)
            .finish()
    }
}

impl MatchRecord {
    /// A record spanning all of `subject`, with no sub-groups.
    pub fn whole_string(subject: Arc<str>) -> Self {
        let len = subject.len();
        Self {
            subject,
            groups: vec![Some((0, len))],
            regex: None,
        }
    }

    /// The text the match was taken from.
    pub fn subject(&self) -> &Arc<str> {
        &self.subject
    }

    /// Byte offset of the start of the whole match.
    pub fn start(&self) -> usize {
        self.span().0
    }

    /// Byte offset one past the end of the whole match.
    pub fn end(&self) -> usize {
        self.span().1
    }

    fn span(&self) -> (usize, usize) {
        // Group 0 always participates.
        self.groups[0].unwrap_or((0, 0))
    }

    /// The entire matched substring (group 0).
    pub fn whole(&self) -> &str {
        let (s, e) = self.span();
        &self.subject[s..e]
    }

    /// Text of group `n`, or `None` if it doesn't exist or didn't participate.
    pub fn group(&self, n: usize) -> Option<&str> {
        self.groups
            .get(n)?
            .as_ref()
            .map(|&(s, e)| &self.subject[s..e])
    }

    /// Number of capture groups, excluding the overall match.
    pub fn group_count(&self) -> usize {
        self.groups.len() - 1
    }

    /// Index of the group called `name`, if the pattern declared one.
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.regex
            .as_ref()?
            .capture_names()
            .position(|n| n == Some(name))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
