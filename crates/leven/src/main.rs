//! Command-line interface for the `leven` approximate word lookup tool.

use std::{io, process::ExitCode};

use clap::Parser;
use leven::cli::{
    CommandContext,
    args::{Cli, Commands},
    commands,
};
use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber. `RUST_LOG` takes precedence over the verbosity flag.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // init must work even when an existing config is broken; check reports the breakage.
    let context = match cli.command {
        Commands::Init(_) | Commands::Check => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let mut ctx = match context {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &mut ctx)
}
