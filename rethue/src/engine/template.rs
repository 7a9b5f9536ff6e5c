//! Back-reference expansion for literal productions.
//!
//! A literal's text is compiled once into a [`Template`] and expanded against
//! the context's last match every time the literal is applied:
//!
//! | Sequence        | Meaning                                         |
//! |-----------------|-------------------------------------------------|
//! | `\0`            | The whole last match                            |
//! | `\1` … `\99`    | Numbered group of the last match                |
//! | `\g<N>`         | Same, unambiguous form (`\g<1>0` = group 1, `0`) |
//! | `\g<name>`      | Named group of the last match                   |
//! | `\n` `\t` `\r`  | Newline, tab, carriage return                   |
//! | `\\` `\'` `\"`  | Literal backslash / quote                       |
//!
//! A backslash before any other non-letter is kept as written; before an
//! unknown letter, ASCII or not, it is a compile error.  A group that
//! exists but did not take part in the match expands to the empty string.

use std::fmt;

use crate::error::RuntimeError;
use crate::pattern::MatchRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Group(usize),
    Named(String),
}

/// A compiled literal.
#[derive(Debug, Clone)]
pub struct Template {
    src: String,
    segments: Vec<Segment>,
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.src)
    }
}

impl Template {
    /// Compile `src`, returning a description of the first bad escape.
    pub fn compile(src: &str) -> Result<Self, String> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = src.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '\\' {
                text.push(ch);
                continue;
            }
            let Some(esc) = chars.next() else {
                return Err("trailing backslash".to_owned());
            };
            let seg = match esc {
                'n' => {
                    text.push('\n');
                    continue;
                }
                't' => {
                    text.push('\t');
                    continue;
                }
                'r' => {
                    text.push('\r');
                    continue;
                }
                '\\' | '\'' | '"' => {
                    text.push(esc);
                    continue;
                }
                'g' => {
                    if chars.next() != Some('<') {
                        return Err("expected `<` after \\g".to_owned());
                    }
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('>') => break,
                            Some(c) => name.push(c),
                            None => return Err("unterminated \\g<...>".to_owned()),
                        }
                    }
                    parse_group_name(&name)?
                }
                d if d.is_ascii_digit() => {
                    let mut n = d.to_digit(10).unwrap_or(0) as usize;
                    // At most two digits, as in `\12`.
                    if let Some(d2) = chars.peek().and_then(|c| c.to_digit(10)) {
                        chars.next();
                        n = n * 10 + d2 as usize;
                    }
                    Segment::Group(n)
                }
                c if c.is_alphabetic() => {
                    return Err(format!("unknown escape \\{c}"));
                }
                c => {
                    text.push('\\');
                    text.push(c);
                    continue;
                }
            };
            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }
            segments.push(seg);
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self {
            src: src.to_owned(),
            segments,
        })
    }

    /// Expand against `m`.
    ///
    /// Fails with [`RuntimeError::BadGroup`] if the template names a group
    /// that the match's pattern does not have.
    pub fn expand(&self, m: &MatchRecord) -> Result<String, RuntimeError> {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Text(t) => out.push_str(t),
                Segment::Group(n) => {
                    if *n > m.group_count() {
                        return Err(RuntimeError::BadGroup(n.to_string()));
                    }
                    out.push_str(m.group(*n).unwrap_or(""));
                }
                Segment::Named(name) => {
                    let n = m
                        .group_index(name)
                        .ok_or_else(|| RuntimeError::BadGroup(name.clone()))?;
                    out.push_str(m.group(n).unwrap_or(""));
                }
            }
        }
        Ok(out)
    }
}

fn parse_group_name(name: &str) -> Result<Segment, String> {
    if name.is_empty() {
        return Err("empty group name in \\g<>".to_owned());
    }
    if name.bytes().all(|b| b.is_ascii_digit()) {
        return name
            .parse()
            .map(Segment::Group)
            .map_err(|_| format!("group number too large: {name}"));
    }
    let mut chars = name.chars();
    let valid_start = chars.next().is_some_and(|c| c == '_' || c.is_alphabetic());
    if valid_start && chars.all(|c| c == '_' || c.is_alphanumeric()) {
        Ok(Segment::Named(name.to_owned()))
    } else {
        Err(format!("bad group name {name:?}"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
