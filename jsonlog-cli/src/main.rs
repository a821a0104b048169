//! ## jsonlog-cli
//! **Command-line front end for the JSON line logger**
//!
//! `jsonlog emit` writes a single record, `jsonlog pipe` turns stdin lines into
//! records, `jsonlog parse` shows how a verbosity name resolves. Records go to
//! stdout or stderr by level; the tool's own diagnostics go to stderr through
//! `tracing`, filtered by `RUST_LOG` (default `warn`).

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::Cli;

fn init_diagnostics() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init()
}

fn main() -> ExitCode {
    init_diagnostics();
    let cli = Cli::parse();

    match commands::run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("jsonlog: {}", error);
            ExitCode::FAILURE
        }
    }
}
