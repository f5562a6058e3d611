//! Distance between two words without building an index.

use crate::{
    Cost, CostModel, Word,
    row::{EdgeLetters, Row},
};

/// Cost of turning `query` into `candidate` under `costs`.
///
/// Uses the same recurrence as [`LevenshteinIndex`](crate::LevenshteinIndex), so
/// the result equals the error a search reports for `candidate`. Substring costs apply:
/// `query` is the searched text and `candidate` the stored word.
pub fn edit_distance(query: &Word, candidate: &Word, costs: &CostModel) -> Cost {
    let query = query.letters();
    let mut grandparent: Option<Row> = None;
    let mut parent = Row::root(query, costs);
    let mut previous = None;

    for &letter in candidate.letters() {
        let edge = EdgeLetters { letter, previous };
        let row = Row::derive(&parent, grandparent.as_ref(), query, edge, costs);
        grandparent = Some(parent);
        parent = row;
        previous = Some(letter);
    }
    parent.total()
}
