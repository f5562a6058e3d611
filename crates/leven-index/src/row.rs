//! One row of the edit distance matrix.
//!
//! Column `i` holds the cheapest cost of aligning the first `i` query letters against the
//! stored letters consumed so far. Each trie edge derives a new row from its parent's row.

use crate::{Cost, CostModel, Letter};

/// Letters of the edge that produced a row, used for the transposition term.
#[derive(Debug, Clone, Copy)]
pub struct EdgeLetters {
    /// Letter on the edge being followed.
    pub letter: Letter,
    /// Letter on the edge above it, if any.
    pub previous: Option<Letter>,
}

/// A row of costs, one cell per query prefix length `0..=query.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Cell values.
    values: Vec<Cost>,
}

impl Row {
    /// The row for zero consumed stored letters: `i` start insertions in column `i`.
    pub fn root(query: &[Letter], costs: &CostModel) -> Self {
        let insertion = costs.start_insertion_cost(query.len());
        let values = (0..=query.len())
            .map(|i| Cost::try_from(i).unwrap_or(Cost::MAX).saturating_mul(insertion))
            .collect();
        Self { values }
    }

    /// Derives the row reached by following one edge below `parent`.
    ///
    /// `grandparent` is the row above `parent`; it is only consulted when the cost model
    /// has transpositions enabled. The new row has one column per query prefix; columns
    /// missing from a shorter `parent` or `grandparent` count as unreachable.
    pub fn derive(
        parent: &Self,
        grandparent: Option<&Self>,
        query: &[Letter],
        edge: EdgeLetters,
        costs: &CostModel,
    ) -> Self {
        let mut values = Vec::with_capacity(query.len() + 1);
        let mut previous_cell = parent.cell(0).saturating_add(costs.deletion_cost());
        values.push(previous_cell);

        for (column, &query_letter) in query.iter().enumerate() {
            let i = column + 1;
            let deletion = if i == query.len() {
                costs.end_deletion_cost()
            } else {
                costs.deletion_cost()
            };
            let insert = previous_cell.saturating_add(costs.insertion_cost());
            let delete = parent.cell(i).saturating_add(deletion);
            let substitute = parent
                .cell(i - 1)
                .saturating_add(costs.substitution_cost(query_letter, edge.letter));
            let mut best = insert.min(delete).min(substitute);

            if costs.transpositions()
                && i > 1
                && let (Some(previous), Some(grandparent)) = (edge.previous, grandparent)
                && query_letter == previous
                && query[i - 2] == edge.letter
            {
                let transpose = grandparent
                    .cell(i - 2)
                    .saturating_add(costs.transposition_cost());
                best = best.min(transpose);
            }
            values.push(best);
            previous_cell = best;
        }

        Self { values }
    }

    /// Value in column `i`, or `Cost::MAX` past the end.
    fn cell(&self, i: usize) -> Cost {
        self.values.get(i).copied().unwrap_or(Cost::MAX)
    }

    /// Value in column `i`, if present.
    #[cfg(test)]
    fn value(&self, i: usize) -> Option<Cost> {
        self.values.get(i).copied()
    }

    /// Number of columns, one more than the query length.
    #[cfg(test)]
    fn len(&self) -> usize {
        self.values.len()
    }

    /// Cost of aligning the whole query, the rightmost cell.
    pub fn total(&self) -> Cost {
        self.values.last().copied().unwrap_or(0)
    }

    /// Smallest cell. No extension of this trie branch can cost less.
    pub fn min(&self) -> Cost {
        self.values.iter().copied().min().unwrap_or(0)
    }
}
