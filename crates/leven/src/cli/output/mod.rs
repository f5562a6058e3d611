//! Rendering and JSON serialization for CLI output.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL_CONDENSED};
use leven_index::{Cost, WordId};
use serde::Serialize;

/// ANSI bold.
const BOLD: &str = "\x1b[1m";
/// ANSI dim.
const DIM: &str = "\x1b[2m";
/// ANSI yellow.
const YELLOW: &str = "\x1b[33m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Wraps `text` in `code` when stdout is a terminal.
fn styled(code: &str, text: &str) -> String {
    if io::stdout().is_terminal() {
        format!("{code}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Section heading.
pub fn subheader(text: &str) -> String {
    styled(BOLD, text)
}

/// De-emphasized text.
pub fn dim(text: &str) -> String {
    styled(DIM, text)
}

/// Warning text.
pub fn warning(text: &str) -> String {
    styled(YELLOW, text)
}

/// One matched dictionary word.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRow {
    /// The dictionary word.
    pub word: String,
    /// Its id.
    pub id: WordId,
    /// Total edit cost from the query.
    pub error: Cost,
    /// Occurrences in the dictionary.
    pub count: usize,
}

/// Matches for one query word.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResults {
    /// The query as typed.
    pub query: String,
    /// Budget the search ran with.
    pub max_error: Cost,
    /// Matches within the budget, before the limit was applied.
    pub total_matches: usize,
    /// Matches shown, cheapest first.
    pub matches: Vec<MatchRow>,
}

/// JSON document for `leven query --json`.
#[derive(Serialize)]
struct JsonQueryOutput<'a> {
    /// Results grouped by query.
    queries: &'a [QueryResults],
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json_str) => {
            println!("{json_str}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints query results as JSON or as one table per query.
pub fn output_query_results(results: &[QueryResults], json: bool) -> ExitCode {
    if json {
        return print_json(&JsonQueryOutput { queries: results });
    }

    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let heading = format!("{} (max error {})", result.query, result.max_error);
        println!("{}", subheader(&heading));
        if result.matches.is_empty() {
            println!("{}", dim("no matches"));
            continue;
        }
        println!("{}", match_table(&result.matches));
        if result.total_matches > result.matches.len() {
            let more = result.total_matches - result.matches.len();
            println!("{}", dim(&format!("{more} more not shown")));
        }
    }
    ExitCode::SUCCESS
}

/// Table of matches with right-aligned numbers.
fn match_table(rows: &[MatchRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Word", "Error", "Id", "Count"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.word),
            Cell::new(row.error).set_alignment(CellAlignment::Right),
            Cell::new(row.id).set_alignment(CellAlignment::Right),
            Cell::new(row.count).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Two-column table of labelled values.
pub fn key_value_table(rows: &[(&str, String)]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Statistic", "Value"]);
    for (key, value) in rows {
        table.add_row(vec![
            Cell::new(key),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
