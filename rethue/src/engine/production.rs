//! Production variants and their application semantics.
//!
//! Every variant is applied as a transaction: copy the context, run the
//! effect on the copy, commit the copy back, report whether the string
//! changed.  The commit happens whether or not anything changed, so the
//! returned `bool` only steers [`Production::Alternation`] and
//! [`Production::Repeat`]; it never rolls anything back.
//!
//! Two variants bend the protocol:
//!
//! - [`Production::ScopedRewrite`] opens no transaction when its pattern
//!   does not match.
//! - [`Production::Output`] discards its transaction instead of committing.

use std::fmt;

use super::context::Context;
use super::machine::Machine;
use super::template::Template;
use crate::error::{CompileError, RuntimeError};
use crate::pattern::Pattern;

/// One node of a program tree.
///
/// Operands are owned, except that [`Production::Reference`] and
/// [`Production::Alias`] name a definition held by the
/// [`Registry`](super::registry::Registry).
#[derive(Debug, Clone)]
pub enum Production {
    /// Replace the string with the expansion of a template.
    Literal(Template),
    /// `a => b`: apply both in one transaction.
    Sequence(Box<Production>, Box<Production>),
    /// `/re/ ::= inner`: rewrite the first match of `pattern` in place.
    ScopedRewrite {
        pattern: Pattern,
        inner: Box<Production>,
    },
    /// `{ ... }`: apply until nothing changes.
    Repeat(Box<Production>),
    /// `[ ... ]`: apply once; success is judged from the outside.
    Once(Box<Production>),
    /// The first candidate that changes the string wins.
    Alternation(Vec<Production>),
    /// Apply the production registered under this name.
    Reference(String),
    /// `name = ...`: a definition site; applies its own definition.
    Alias(String),
    /// `:::`: replace the string with a line of input.
    Input,
    /// `~ inner`: print what `inner` would produce, change nothing.
    Output(Box<Production>),
}

// ── Construction ──────────────────────────────────────────────────────────────

impl Production {
    pub fn literal(src: &str) -> Result<Self, CompileError> {
        Template::compile(src)
            .map(Production::Literal)
            .map_err(|message| CompileError::Template {
                src: src.to_owned(),
                message,
            })
    }

    pub fn sequence(first: Production, second: Production) -> Self {
        Production::Sequence(Box::new(first), Box::new(second))
    }

    /// Compile `regex` and scope `inner` to its first match.
    pub fn scoped(regex: &str, case_insensitive: bool, inner: Production) -> Result<Self, CompileError> {
        let pattern = Pattern::new(regex, case_insensitive).map_err(|source| CompileError::Pattern {
            src: regex.to_owned(),
            source,
        })?;
        Ok(Production::ScopedRewrite {
            pattern,
            inner: Box::new(inner),
        })
    }

    /// Repeat the alternation of `candidates`.
    pub fn repeat(candidates: Vec<Production>) -> Self {
        Production::Repeat(Box::new(Production::Alternation(candidates)))
    }

    /// Apply the alternation of `candidates` exactly once.
    pub fn once(candidates: Vec<Production>) -> Self {
        Production::Once(Box::new(Production::Alternation(candidates)))
    }

    pub fn alternation(candidates: Vec<Production>) -> Self {
        Production::Alternation(candidates)
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Production::Reference(name.into())
    }

    pub fn output(inner: Production) -> Self {
        Production::Output(Box::new(inner))
    }
}

// ── Application ───────────────────────────────────────────────────────────────

impl Production {
    /// Apply to `ctx`, reporting whether its string changed.
    pub fn apply(&self, ctx: &mut Context, m: &mut Machine<'_>) -> Result<bool, RuntimeError> {
        m.apply(self, ctx)
    }

    /// The variant's own effect.  Called by [`Machine::apply`], which wraps
    /// it with observer notifications.
    pub(crate) fn effect(&self, ctx: &mut Context, m: &mut Machine<'_>) -> Result<bool, RuntimeError> {
        match self {
            Production::Literal(template) => {
                let mut local = ctx.enter();
                let expanded = template.expand(local.last_match())?;
                local.set(expanded);
                Ok(ctx.commit(local))
            }

            Production::Sequence(first, second) => {
                let mut local = ctx.enter();
                m.apply(first, &mut local)?;
                m.apply(second, &mut local)?;
                Ok(ctx.commit(local))
            }

            Production::ScopedRewrite { pattern, inner } => {
                let Some(found) = pattern.find(ctx.shared_string()) else {
                    return Ok(false);
                };
                let (start, end) = (found.start(), found.end());
                let mut scoped = Context::scoped(found);
                m.apply(inner, &mut scoped)?;

                let whole = ctx.string();
                let mut spliced = String::with_capacity(whole.len() - (end - start) + scoped.string().len());
                spliced.push_str(&whole[..start]);
                spliced.push_str(scoped.string());
                spliced.push_str(&whole[end..]);

                let mut local = ctx.enter();
                local.set_string(spliced);
                local.set_match(scoped.last_match().clone());
                Ok(ctx.commit(local))
            }

            Production::Repeat(inner) => {
                let mut local = ctx.enter();
                let mut any = false;
                while m.apply(inner, &mut local)? {
                    any = true;
                }
                ctx.commit(local);
                Ok(any)
            }

            Production::Once(inner) => {
                let mut local = ctx.enter();
                m.apply(inner, &mut local)?;
                Ok(ctx.commit(local))
            }

            Production::Alternation(candidates) => {
                let mut local = ctx.enter();
                for candidate in candidates {
                    if m.apply(candidate, &mut local)? {
                        break;
                    }
                }
                Ok(ctx.commit(local))
            }

            Production::Reference(name) | Production::Alias(name) => {
                let def = m.registry().resolve(name)?;
                m.apply(def, ctx)
            }

            Production::Input => {
                let mut local = ctx.enter();
                let line = m.read_line()?;
                local.set(line);
                Ok(ctx.commit(local))
            }

            Production::Output(inner) => {
                let mut local = ctx.enter();
                m.apply(inner, &mut local)?;
                m.write_line(local.string())?;
                Ok(false)
            }
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

impl Production {
    /// A one-node summary, without children.
    pub fn label(&self) -> String {
        match self {
            Production::Literal(t) => format!("Lit[{t}]"),
            Production::Sequence(..) => "Seq".to_owned(),
            Production::ScopedRewrite { pattern, .. } => format!("Part[{pattern}]"),
            Production::Repeat(_) => "Cont".to_owned(),
            Production::Once(_) => "Sing".to_owned(),
            Production::Alternation(c) => format!("Alt({})", c.len()),
            Production::Reference(name) => format!("Ref[{name}]"),
            Production::Alias(name) => format!("Alias[{name}]"),
            Production::Input => "In".to_owned(),
            Production::Output(_) => "Out".to_owned(),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Production]) -> fmt::Result {
    for (i, p) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{p}")?;
    }
    Ok(())
}

/// Writes the alternation's members directly, so `{ a b }` renders as
/// `Cont[a b]` rather than `Cont[Alt[a b]]`.
fn write_group(f: &mut fmt::Formatter<'_>, tag: &str, inner: &Production) -> fmt::Result {
    write!(f, "{tag}[")?;
    match inner {
        Production::Alternation(items) => write_list(f, items)?,
        other => write!(f, "{other}")?,
    }
    f.write_str("]")
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Production::Literal(t) => write!(f, "Lit[{t}]"),
            Production::Sequence(a, b) => write!(f, "Seq[{a} => {b}]"),
            Production::ScopedRewrite { pattern, inner } => write!(f, "Part[{pattern} ::= {inner}]"),
            Production::Repeat(inner) => write_group(f, "Cont", inner),
            Production::Once(inner) => write_group(f, "Sing", inner),
            Production::Alternation(items) => {
                f.write_str("Alt[")?;
                write_list(f, items)?;
                f.write_str("]")
            }
            Production::Reference(name) => write!(f, "Ref[{name}]"),
            Production::Alias(name) => write!(f, "Alias[{name}]"),
            Production::Input => f.write_str("In"),
            Production::Output(inner) => write!(f, "Out[{inner}]"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
