//! Clap argument definitions for the `leven` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use leven_index::Cost;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "leven")]
#[command(about = "Find dictionary words within a weighted edit distance of a query")]
pub struct Cli {
    /// Increase log output on stderr (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Dictionary source shared by commands that build an index.
#[derive(Args, Debug, Clone)]
pub struct DictionaryArgs {
    /// Word list: whitespace separated words, `#` starts a comment line
    #[arg(short = 'd', long = "dict")]
    pub dict: PathBuf,
}

/// Arguments for `leven query`.
#[derive(Args, Debug, Clone)]
pub struct QueryCommand {
    /// Words to look up
    #[arg(required = true)]
    pub words: Vec<String>,

    #[command(flatten)]
    /// Dictionary to search.
    pub dictionary: DictionaryArgs,

    /// Largest total cost of a match [default: 100]
    #[arg(short = 'e', long)]
    pub max_error: Option<Cost>,

    /// Matches shown per query word [default: 10]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `leven distance`.
#[derive(Args, Debug, Clone)]
pub struct DistanceCommand {
    /// The query word
    pub query: String,

    /// The word it is compared against
    pub candidate: String,
}

/// Arguments for `leven stats`.
#[derive(Args, Debug, Clone)]
pub struct StatsCommand {
    #[command(flatten)]
    /// Dictionary to index.
    pub dictionary: DictionaryArgs,
}

/// Arguments for `leven init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.leven.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `leven` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Find dictionary words close to each query word
    Query(QueryCommand),

    /// Print the configured cost between two words
    Distance(DistanceCommand),

    /// Show statistics of the index built from a dictionary
    Stats(StatsCommand),

    /// Initialize leven configuration in current directory
    Init(InitCommand),

    /// Validate configuration and diagnose issues
    Check,

    /// Show effective configuration settings
    Config,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use leven_config::DEFAULT_LIMIT;
    use leven_index::DEFAULT_ERROR;

    use super::*;

    /// Gets help text for a subcommand's argument.
    fn get_arg_help(cmd: &clap::Command, subcmd: &str, arg: &str) -> String {
        cmd.get_subcommands()
            .find(|c| c.get_name() == subcmd)
            .and_then(|c| c.get_arguments().find(|a| a.get_id() == arg))
            .and_then(|a| a.get_help().map(|h| h.to_string()))
            .unwrap_or_default()
    }

    #[test]
    fn cli_help_defaults_match_constants() {
        let cmd = Cli::command();

        let max_error_help = get_arg_help(&cmd, "query", "max_error");
        assert!(
            max_error_help.contains(&format!("[default: {DEFAULT_ERROR}]")),
            "query --max-error help should contain default {DEFAULT_ERROR}: {max_error_help}"
        );

        let limit_help = get_arg_help(&cmd, "query", "limit");
        assert!(
            limit_help.contains(&format!("[default: {DEFAULT_LIMIT}]")),
            "query --limit help should contain default {DEFAULT_LIMIT}: {limit_help}"
        );
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["leven", "config", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Config));
    }

    #[test]
    fn query_arguments() {
        let cli =
            Cli::try_parse_from(["leven", "query", "--dict", "w.txt", "-e", "30", "abc", "def"])
                .unwrap();
        let Commands::Query(cmd) = cli.command else {
            panic!("expected query");
        };
        assert_eq!(cmd.words, vec!["abc", "def"]);
        assert_eq!(cmd.max_error, Some(30));
        assert_eq!(cmd.dictionary.dict, PathBuf::from("w.txt"));
        assert!(cmd.limit.is_none());
        assert!(!cmd.json);
    }
}
