//! Command-line argument parsing.
//!
//! Usage:
//!   rethue [-f <rcfile> | -F] [-d] [--step-limit N] [--dump] <program> [<init>]

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "rethue", version, about = "Run a rethue string-rewriting program")]
pub struct CliArgs {
    /// Program source file.
    pub program: PathBuf,

    /// Initial working string (default: the `init` setting, else empty).
    pub init: Option<String>,

    /// Load settings from this file instead of searching for one.
    #[arg(short = 'f', long = "config", value_name = "FILE", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Don't load any settings file.
    #[arg(short = 'F', long = "no-config")]
    pub no_config: bool,

    /// Trace every production application to stderr.
    #[arg(short, long)]
    pub debug: bool,

    /// Abort after N production applications (0 = unbounded).
    #[arg(long, value_name = "N")]
    pub step_limit: Option<u64>,

    /// Print the compiled program and exit without running it.
    #[arg(long)]
    pub dump: bool,
}

/// How to choose the settings file.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigFile {
    /// Search the standard locations (default).
    Search,
    /// `-F`: no settings file.
    Skip,
    /// `-f <file>`: load this specific file.
    Explicit(PathBuf),
}

impl CliArgs {
    pub fn config_file(&self) -> ConfigFile {
        match (&self.config, self.no_config) {
            (_, true) => ConfigFile::Skip,
            (Some(p), false) => ConfigFile::Explicit(p.clone()),
            (None, false) => ConfigFile::Search,
        }
    }

    /// Let flags override what the settings file says.
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if self.debug {
            settings.trace = true;
        }
        if let Some(n) = self.step_limit {
            settings.step_limit = (n > 0).then_some(n);
        }
        if let Some(init) = &self.init {
            settings.init = Some(init.clone());
        }
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse a slice of argument strings, without the program name (exposed for
/// testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, clap::Error> {
    CliArgs::try_parse_from(std::iter::once("rethue".to_owned()).chain(argv.iter().cloned()))
}

// ── Path helpers ──────────────────────────────────────────────────────────────

/// Candidate settings files, most specific first:
/// `$XDG_CONFIG_HOME/rethue/rethuerc` (or the platform equivalent),
/// `~/.rethuerc`, `./.rethuerc`.
pub fn user_config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dirs) = directories::ProjectDirs::from("", "", "rethue") {
        candidates.push(dirs.config_dir().join("rethuerc"));
    }
    if let Some(base) = directories::BaseDirs::new() {
        candidates.push(base.home_dir().join(".rethuerc"));
    }
    candidates.push(PathBuf::from("./.rethuerc"));
    candidates
}

/// Search for the user settings file in the standard locations.
/// Returns the first path that exists, or `None`.
pub fn find_user_config() -> Option<PathBuf> {
    user_config_candidates().into_iter().find(|p| p.exists())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
