//! `.rethuerc` settings file parser.
//!
//! | Directive | Action |
//! |-----------|--------|
//! | `/set <name>=<value>` or `/set <name> <value>` | set a setting |
//! | Lines starting with `;` | comment, ignored |
//! | Any other `/command` | silently skipped |
//!
//! Recognised settings:
//!
//! | Name | Value | Default |
//! |------|-------|---------|
//! | `step_limit` | applications before aborting; `0` = unbounded | `0` |
//! | `trace` | `on`/`off` (also `1`/`0`, `true`/`false`) | `off` |
//! | `init` | initial working string | empty |

use std::path::Path;

use thiserror::Error;

// ── Public API ────────────────────────────────────────────────────────────────

/// A non-fatal error encountered while loading a settings file.
#[derive(Debug, Error)]
#[error("line {line}: {message}")]
pub struct ConfigError {
    pub line: usize,
    pub message: String,
}

/// Runtime settings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Abort after this many production applications.
    pub step_limit: Option<u64>,
    /// Trace every application to stderr.
    pub trace: bool,
    /// Initial working string when none is given on the command line.
    pub init: Option<String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a settings string.
    ///
    /// Returns the settings and a list of any errors on recognised lines;
    /// a bad line leaves the setting at its previous value.
    pub fn load_str(s: &str) -> (Self, Vec<ConfigError>) {
        let mut settings = Settings::new();
        let mut errors = Vec::new();

        for (i, raw) in s.lines().enumerate() {
            let lineno = i + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            let Some(rest) = line.strip_prefix('/') else {
                errors.push(ConfigError {
                    line: lineno,
                    message: format!("expected a /command, found {line:?}"),
                });
                continue;
            };

            let (cmd, args_str) = rest
                .split_once(|c: char| c.is_ascii_whitespace())
                .unwrap_or((rest, ""));

            if cmd == "set" {
                if let Err(message) = settings.apply_set(args_str.trim()) {
                    errors.push(ConfigError { line: lineno, message });
                }
            }
        }

        (settings, errors)
    }

    /// Read and parse a settings file from disk.
    pub fn load_file(path: &Path) -> std::io::Result<(Self, Vec<ConfigError>)> {
        let s = std::fs::read_to_string(path)?;
        Ok(Self::load_str(&s))
    }

    /// Apply one `/set` argument string: `name=value` or `name value`.
    pub fn apply_set(&mut self, args: &str) -> Result<(), String> {
        let (name, value) = match args.split_once('=') {
            Some((n, v)) if !n.contains(char::is_whitespace) => (n.to_owned(), unquote(v)),
            _ => {
                let mut tokens = split_args(args).into_iter();
                let name = tokens.next().ok_or("set: missing setting name")?;
                let value: Vec<String> = tokens.collect();
                (name, value.join(" "))
            }
        };

        match name.as_str() {
            "step_limit" => {
                let n: u64 = value
                    .parse()
                    .map_err(|_| format!("step_limit: not a number: {value:?}"))?;
                self.step_limit = (n > 0).then_some(n);
            }
            "trace" => self.trace = parse_bool(&value)?,
            "init" => self.init = Some(value),
            other => return Err(format!("unknown setting: {other}")),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "1" | "true" | "yes" => Ok(true),
        "off" | "0" | "false" | "no" => Ok(false),
        _ => Err(format!("expected on or off, found {value:?}")),
    }
}

/// Strip one pair of surrounding double quotes, if present.
fn unquote(v: &str) -> String {
    match split_args(v).as_slice() {
        [single] if v.trim_start().starts_with('"') => single.clone(),
        _ => v.to_owned(),
    }
}

// ── Argument tokenizer ────────────────────────────────────────────────────────

/// Split `s` into whitespace-delimited tokens, honouring double-quoted strings
/// and `\"` escapes within them.
fn split_args(s: &str) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            '\\' if in_quotes => {
                if let Some(escaped) = chars.next() {
                    cur.push(escaped);
                }
            }
            c if c.is_ascii_whitespace() && !in_quotes => {
                if !cur.is_empty() || quoted {
                    args.push(std::mem::take(&mut cur));
                }
                quoted = false;
            }
            c => cur.push(c),
        }
    }
    if !cur.is_empty() || quoted {
        args.push(cur);
    }
    args
}

// ── Tests ─────────────────────────────────────────────────────────────────────
