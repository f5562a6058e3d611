//! Implementation of `leven distance`.

use std::process::ExitCode;

use leven_index::{Word, edit_distance};

use crate::cli::{args::DistanceCommand, context::CommandContext};

/// Prints the cost of turning the query into the candidate under the configured costs.
pub fn run(ctx: &CommandContext, cmd: &DistanceCommand) -> ExitCode {
    let (query, candidate) = match (Word::new(&cmd.query), Word::new(&cmd.candidate)) {
        (Ok(query), Ok(candidate)) => (query, candidate),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let costs = match ctx.cost_model() {
        Ok(costs) => costs,
        Err(code) => return code,
    };
    println!("{}", edit_distance(&query, &candidate, &costs));
    ExitCode::SUCCESS
}
