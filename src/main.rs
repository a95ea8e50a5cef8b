use std::{fs, io, path::PathBuf, process::ExitCode};

use azhar::{Session, repl, run_source};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// azhar runs scripts written in a small statically typed language, or starts
/// an interactive prompt when no script is given.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the script to run.
    script: Option<PathBuf>,

    /// Runs the given source code instead of a script file.
    #[arg(short, long, conflicts_with = "script")]
    eval: Option<String>,

    /// Log level for diagnostics written to stderr. `AZHAR_LOG` takes
    /// precedence when set.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_env("AZHAR_LOG").unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let (source, file) = match (args.eval, args.script) {
        (Some(source), _) => (source, "<eval>".to_string()),
        (None, Some(path)) => match fs::read_to_string(&path) {
            Ok(source) => (source, path.display().to_string()),
            Err(e) => {
                eprintln!("Failed to read the script '{}': {e}", path.display());
                return ExitCode::from(2);
            },
        },
        (None, None) => {
            let mut session = Session::stdio();
            return match repl::start(&mut session) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{e}");
                    ExitCode::FAILURE
                },
            };
        },
    };

    let mut session = Session::stdio();
    match run_source(&source, &file, &mut session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(diagnostic) => {
            eprintln!("{diagnostic}");
            ExitCode::FAILURE
        },
    }
}
