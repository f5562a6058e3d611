//! Implementation of `leven stats`.

use std::process::ExitCode;

use crate::cli::{args::StatsCommand, context::CommandContext, output::key_value_table};

/// Builds the index for a dictionary and reports its size.
pub fn run(ctx: &CommandContext, cmd: &StatsCommand) -> ExitCode {
    let (dictionary, index) = match ctx.index(&cmd.dictionary.dict) {
        Ok(built) => built,
        Err(code) => return code,
    };
    let trie = index.trie();
    let rows = [
        ("Words", index.num_words().to_string()),
        ("Distinct ids", dictionary.len().to_string()),
        ("Nodes", index.num_nodes().to_string()),
        ("Most repeated word count", index.max_count().to_string()),
        ("Longest word", index.longest_word().to_string()),
        ("Region bytes used", trie.used_bytes().to_string()),
        ("Region capacity", trie.capacity().to_string()),
    ];
    println!("{}", key_value_table(&rows));
    ExitCode::SUCCESS
}
