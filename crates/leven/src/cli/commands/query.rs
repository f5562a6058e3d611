//! Implementation of `leven query`.

use std::process::ExitCode;

use leven_index::{Cost, IndexError, LevenshteinIndex, Word};
use tracing::debug;

use crate::cli::{
    args::QueryCommand,
    context::CommandContext,
    output::{MatchRow, QueryResults, output_query_results},
};

/// Looks up each query word in the dictionary index.
pub fn run(ctx: &CommandContext, cmd: &QueryCommand) -> ExitCode {
    let max_error = cmd.max_error.unwrap_or(ctx.config.search.max_error);
    let limit = cmd.limit.unwrap_or(ctx.config.search.limit);

    let queries = match cmd
        .words
        .iter()
        .map(|w| Word::new(w))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(queries) => queries,
        Err(e) => {
            eprintln!("error: invalid query: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (_, index) = match ctx.index(&cmd.dictionary.dict) {
        Ok(built) => built,
        Err(code) => return code,
    };

    let mut results = Vec::with_capacity(queries.len());
    for (text, query) in cmd.words.iter().zip(&queries) {
        match search(&index, text, query, max_error, limit) {
            Ok(result) => results.push(result),
            Err(e) => {
                eprintln!("error: search for '{text}' failed: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    output_query_results(&results, cmd.json)
}

/// Runs one query and keeps the `limit` cheapest matches.
fn search(
    index: &LevenshteinIndex,
    text: &str,
    query: &Word,
    max_error: Cost,
    limit: usize,
) -> Result<QueryResults, IndexError> {
    let matches = index.find_words(query, max_error)?;
    debug!(query = text, total = matches.len(), limit, "Query finished");

    let mut rows = Vec::with_capacity(limit.min(matches.len()));
    for (i, m) in matches.iter().enumerate().take(limit) {
        rows.push(MatchRow {
            word: index.matched_word(&matches, i)?.to_string(),
            id: m.id,
            error: m.error,
            count: index.word_count(m.id),
        });
    }

    Ok(QueryResults {
        query: text.to_string(),
        max_error,
        total_matches: matches.len(),
        matches: rows,
    })
}
