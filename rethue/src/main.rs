use std::io;
use std::path::Path;

use clap::Parser;

use rethue::cli::{self, CliArgs, ConfigFile};
use rethue::config::Settings;
use rethue::engine::{StepLimit, StreamHost, Trace};
use rethue::error::RuntimeError;
use rethue::script;

fn main() {
    let args = CliArgs::parse();

    // ── Settings file (flags override it) ────────────────────────────────────
    let mut settings = match args.config_file() {
        ConfigFile::Skip => Settings::new(),
        ConfigFile::Explicit(path) => load_settings(&path).unwrap_or_else(|e| {
            eprintln!("rethue: {}: {e}", path.display());
            std::process::exit(1);
        }),
        // A broken settings file found by searching is only a warning.
        ConfigFile::Search => cli::find_user_config()
            .map(|path| {
                load_settings(&path).unwrap_or_else(|e| {
                    eprintln!("rethue: warning: {}: {e}", path.display());
                    Settings::new()
                })
            })
            .unwrap_or_default(),
    };
    args.apply_overrides(&mut settings);

    // ── Compile ──────────────────────────────────────────────────────────────
    let src = match std::fs::read_to_string(&args.program) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("rethue: {}: {e}", args.program.display());
            std::process::exit(1);
        }
    };
    let program = match script::compile(&src) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("rethue: {}: {e}", args.program.display());
            std::process::exit(1);
        }
    };

    if args.dump {
        println!("{program}");
        let mut names: Vec<_> = program.registry().iter().collect();
        names.sort_by(|a, b| a.0.cmp(b.0));
        for (name, def) in names {
            println!("{name} = {def}");
        }
        return;
    }

    // ── Run ──────────────────────────────────────────────────────────────────
    let init = settings.init.clone().unwrap_or_default();
    let mut host = StreamHost::stdio();
    let mut observer = (
        settings.trace.then(|| Trace::new(io::stderr())),
        settings.step_limit.map(StepLimit::new),
    );

    match program.run(&init, &mut host, &mut observer) {
        Ok(result) => println!("{result}"),
        Err(e) => {
            eprintln!("rethue: {e}");
            if matches!(e, RuntimeError::StepLimit(_)) {
                eprintln!("rethue: raise or lift it with --step-limit (0 = unbounded)");
            }
            std::process::exit(1);
        }
    }
}

/// Load a settings file, reporting bad lines as warnings.
fn load_settings(path: &Path) -> io::Result<Settings> {
    let (settings, errors) = Settings::load_file(path)?;
    for e in errors {
        eprintln!("rethue: warning: {}: {e}", path.display());
    }
    Ok(settings)
}
