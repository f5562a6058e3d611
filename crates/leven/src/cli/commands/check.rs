//! Implementation of `leven check`.

use std::process::ExitCode;

use leven_config::{Config, ConfigWarning, discover_config_files};

use crate::cli::{context::CommandContext, output::warning};

/// Loads configuration from scratch, builds the cost model, and reports problems.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("Checking configuration...");
    println!();

    if config_files.is_empty() {
        println!("No configuration files found, using defaults.");
        println!();
        println!("Run 'leven init' to create a configuration file.");
    } else {
        println!("Config files:");
        for path in &config_files {
            println!("  {}", path.display());
        }
    }
    println!();

    let config = match Config::load_from_files(&config_files) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let warnings = config.validate();

    let model_ok = match config.cost_model() {
        Ok(model) => {
            println!("Cost model:");
            println!("  insertion {}", model.insertion_cost());
            println!("  deletion {}", model.deletion_cost());
            println!("  transpositions {}", on_off(model.transpositions()));
            println!("  pair overrides {}", model.num_overrides());
            println!("  letter groups {}", model.num_groups());
            println!();
            true
        }
        Err(e) => {
            eprintln!("error: invalid cost settings: {e}");
            false
        }
    };

    if warnings.is_empty() {
        if model_ok {
            println!("No issues found.");
            return ExitCode::SUCCESS;
        }
        return ExitCode::FAILURE;
    }

    println!("{}", warning(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("  - {w}");
    }
    println!();
    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Renders a flag for display.
fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

/// Suggests fixes for the warnings found.
fn print_hints(warnings: &[ConfigWarning]) {
    if warnings
        .iter()
        .any(|w| matches!(w, ConfigWarning::GroupLetterConflict { .. }))
    {
        println!("Hint: a letter may belong to one group only, including preset accent groups.");
    }
    if warnings
        .iter()
        .any(|w| matches!(w, ConfigWarning::BudgetBelowCosts { .. }))
    {
        println!("Hint: raise [search] max_error or lower the edit costs.");
    }
}
