//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod distance;
pub mod init;
pub mod query;
pub mod stats;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &mut CommandContext) -> ExitCode {
    match command {
        Commands::Query(cmd) => query::run(ctx, &cmd),
        Commands::Distance(cmd) => distance::run(ctx, &cmd),
        Commands::Stats(cmd) => stats::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Check => check::run(ctx),
        Commands::Config => config::run(ctx),
    }
}
