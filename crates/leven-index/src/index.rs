//! Error tolerant search over a trie of words.
//!
//! A query is compared against every stored word at once by walking the trie depth first and
//! deriving one row per edge. Every word below a node shares the row of that node, and a
//! subtree is skipped once no row below it can get back within the budget. Without
//! transpositions that is when the row minimum exceeds the budget; a transposition can
//! reach back one more level, so its cost is added to the parent row minimum as well.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    Cost, CostModel, IndexError, IndexMatches, Letter, NodeOffset, Trie, Word, WordId,
    row::{EdgeLetters, Row},
};

/// A word store answering "which words are within this cost of the query".
///
/// Build with `&mut self`, then query from any number of threads through `&self`.
#[derive(Debug)]
pub struct LevenshteinIndex {
    /// Stored words.
    trie: Trie,
    /// Costs used by [`find_words`](Self::find_words).
    costs: CostModel,
    /// How often each id has been inserted.
    word_counts: HashMap<WordId, usize>,
    /// Largest value in `word_counts`.
    max_count: usize,
    /// Letters in the longest inserted word.
    longest_word: usize,
}

/// One pending edge of the depth first walk.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Node the edge leads to.
    node: NodeOffset,
    /// Letters of the edge and of the edge above it.
    edge: EdgeLetters,
    /// Depth of `node`, the root being 0.
    depth: usize,
}

/// Whether any row below `row` can still be within `max_error`.
///
/// Rows never drop below their parent's minimum, except through a transposition, which
/// reaches back to the grandparent. With transpositions on, a child of `row` can therefore
/// cost as little as `parent.min() + transposition`.
fn subtree_reachable(row: &Row, parent: Option<&Row>, costs: &CostModel, max_error: Cost) -> bool {
    if row.min() <= max_error {
        return true;
    }
    costs.transpositions()
        && parent.is_some_and(|p| p.min().saturating_add(costs.transposition_cost()) <= max_error)
}

/// Counters reported once per query.
#[derive(Debug, Default)]
struct WalkStats {
    /// Nodes whose row was computed.
    visited: usize,
    /// Nodes whose children were skipped.
    pruned: usize,
}

impl LevenshteinIndex {
    /// Creates an empty index using `costs` for [`find_words`](Self::find_words).
    pub fn new(costs: CostModel) -> Result<Self, IndexError> {
        Ok(Self {
            trie: Trie::new()?,
            costs,
            word_counts: HashMap::new(),
            max_count: 0,
            longest_word: 0,
        })
    }

    /// The owned cost model.
    pub fn cost_model(&self) -> &CostModel {
        &self.costs
    }

    /// Mutable access to the owned cost model, for changes between queries.
    pub fn cost_model_mut(&mut self) -> &mut CostModel {
        &mut self.costs
    }

    /// The underlying trie.
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Stores `word` under `id`. The empty word is skipped.
    pub fn insert_word(&mut self, word: &Word, id: WordId) -> Result<(), IndexError> {
        if word.is_empty() {
            debug!(id, "Skipping empty word");
            return Ok(());
        }
        self.trie.insert_word(word, id)?;

        let count = self.word_counts.entry(id).or_insert(0);
        *count += 1;
        self.max_count = self.max_count.max(*count);
        self.longest_word = self.longest_word.max(word.len());
        Ok(())
    }

    /// Whether `word` was inserted.
    pub fn has_word(&self, word: &Word) -> Result<bool, IndexError> {
        self.trie.has_word(word)
    }

    /// All words within `max_error` of `query` under the owned cost model, best first.
    pub fn find_words(&self, query: &Word, max_error: Cost) -> Result<IndexMatches, IndexError> {
        let mut matches = IndexMatches::new();
        self.find_words_with(query, &self.costs, max_error, &mut matches)?;
        Ok(matches)
    }

    /// Appends every word within `max_error` of `query` under `costs` to `matches`, then sorts
    /// `matches` best first.
    pub fn find_words_with(
        &self,
        query: &Word,
        costs: &CostModel,
        max_error: Cost,
        matches: &mut IndexMatches,
    ) -> Result<(), IndexError> {
        let found_before = matches.len();
        let stats = self.walk(query.letters(), costs, max_error, matches)?;
        matches.sort();
        debug!(
            query = %query,
            max_error,
            visited = stats.visited,
            pruned = stats.pruned,
            matches = matches.len() - found_before,
            "Searched index"
        );
        Ok(())
    }

    /// Depth first walk with an explicit stack.
    ///
    /// `rows[d]` holds the row of the current node's ancestor at depth `d`. Children are
    /// pushed in reverse so they pop in sibling order, matching a recursive walk.
    fn walk(
        &self,
        query: &[Letter],
        costs: &CostModel,
        max_error: Cost,
        matches: &mut IndexMatches,
    ) -> Result<WalkStats, IndexError> {
        let mut stats = WalkStats::default();
        let mut rows = vec![Row::root(query, costs)];
        let mut stack = Vec::new();
        let mut children = Vec::new();
        self.push_children(self.trie.root(), None, 1, &mut stack, &mut children)?;

        while let Some(frame) = stack.pop() {
            rows.truncate(frame.depth);
            let row = match rows.as_slice() {
                [.., grandparent, parent] => {
                    Row::derive(parent, Some(grandparent), query, frame.edge, costs)
                }
                [parent] => Row::derive(parent, None, query, frame.edge, costs),
                [] => {
                    return Err(IndexError::corrupted(format!(
                        "no parent row for node {} at depth {}",
                        frame.node.get(),
                        frame.depth
                    )));
                }
            };
            stats.visited += 1;

            if let Some(id) = self.trie.word_id(frame.node)?
                && row.total() <= max_error
            {
                matches.add_match(id, frame.node, row.total());
            }

            if subtree_reachable(&row, rows.last(), costs, max_error) {
                rows.push(row);
                self.push_children(
                    frame.node,
                    Some(frame.edge.letter),
                    frame.depth + 1,
                    &mut stack,
                    &mut children,
                )?;
            } else {
                stats.pruned += 1;
            }
        }
        Ok(stats)
    }

    /// Pushes a frame for every edge of `node` so they pop in sibling order.
    fn push_children(
        &self,
        node: NodeOffset,
        previous: Option<Letter>,
        depth: usize,
        stack: &mut Vec<Frame>,
        children: &mut Vec<(Letter, NodeOffset)>,
    ) -> Result<(), IndexError> {
        children.clear();
        for edge in self.trie.edges(node) {
            children.push(edge?);
        }
        stack.extend(children.iter().rev().map(|&(letter, child)| Frame {
            node: child,
            edge: EdgeLetters { letter, previous },
            depth,
        }));
        Ok(())
    }

    /// Text of the `i`th match in `matches`.
    pub fn matched_word(&self, matches: &IndexMatches, i: usize) -> Result<Word, IndexError> {
        self.trie.word(matches.get_node(i)?)
    }

    /// How many times `id` has been inserted.
    pub fn word_count(&self, id: WordId) -> usize {
        self.word_counts.get(&id).copied().unwrap_or(0)
    }

    /// Largest insertion count of any id.
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Nodes in the trie, root included.
    pub fn num_nodes(&self) -> usize {
        self.trie.num_nodes()
    }

    /// Distinct words stored.
    pub fn num_words(&self) -> usize {
        self.trie.num_words()
    }

    /// Letters in the longest stored word.
    pub fn longest_word(&self) -> usize {
        self.longest_word
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CostConfig, edit_distance};

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    fn index(words: &[&str]) -> LevenshteinIndex {
        let mut index = LevenshteinIndex::new(CostModel::default()).unwrap();
        for (id, w) in words.iter().enumerate() {
            index.insert_word(&word(w), id as WordId).unwrap();
        }
        index
    }

    fn found(index: &LevenshteinIndex, query: &str, max: Cost) -> Vec<(WordId, Cost)> {
        index
            .find_words(&word(query), max)
            .unwrap()
            .iter()
            .map(|m| (m.id, m.error))
            .collect()
    }

    #[test]
    fn exact_and_single_edit() {
        let index = index(&["abc", "def"]);
        assert_eq!(found(&index, "abc", 0), vec![(0, 0)]);
        assert_eq!(found(&index, "abd", 100), vec![(0, 100)]);
        assert_eq!(found(&index, "abd", 99), vec![]);
    }

    #[test]
    fn matches_sorted_best_first() {
        let index = index(&["abcd", "abc", "ab"]);
        assert_eq!(found(&index, "abc", 100), vec![(1, 0), (2, 100), (0, 100)]);
    }

    #[test]
    fn empty_query_matches_short_words() {
        let index = index(&["a", "ab", "abc"]);
        assert_eq!(found(&index, "", 200), vec![(0, 100), (1, 200)]);
        assert_eq!(found(&index, "", 0), vec![]);
    }

    #[test]
    fn empty_index() {
        let index = index(&[]);
        assert_eq!(found(&index, "abc", Cost::MAX), vec![]);
        assert_eq!(index.num_nodes(), 1);
        assert_eq!(index.num_words(), 0);
    }

    #[test]
    fn empty_word_is_ignored() {
        let mut index = index(&["a"]);
        index.insert_word(&Word::default(), 9).unwrap();
        assert_eq!(index.word_count(9), 0);
        assert_eq!(index.num_words(), 1);
        assert!(!index.has_word(&Word::default()).unwrap());
    }

    #[test]
    fn counts_and_longest() {
        let mut index = index(&["abc"]);
        index.insert_word(&word("abc"), 0).unwrap();
        index.insert_word(&word("abcdef"), 1).unwrap();
        assert_eq!(index.word_count(0), 2);
        assert_eq!(index.word_count(1), 1);
        assert_eq!(index.word_count(5), 0);
        assert_eq!(index.max_count(), 2);
        assert_eq!(index.longest_word(), 6);
        assert_eq!(index.num_words(), 2);
    }

    #[test]
    fn conflicting_id_propagates() {
        let mut index = index(&["abc"]);
        assert!(matches!(
            index.insert_word(&word("abc"), 4),
            Err(IndexError::ConflictingWordId { .. })
        ));
        assert_eq!(index.word_count(4), 0);
    }

    #[test]
    fn matched_word_reconstructs_text() {
        let index = index(&["kissa", "kassa", "koira"]);
        let matches = index.find_words(&word("kisa"), 100).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(index.matched_word(&matches, 0).unwrap(), word("kissa"));
        assert!(index.matched_word(&matches, 1).is_err());
    }

    #[test]
    fn find_words_with_appends_and_sorts() {
        let index = index(&["abc", "xyz"]);
        let mut matches = IndexMatches::new();
        let costs = CostModel::new(CostConfig::uniform(1));
        index
            .find_words_with(&word("xyz"), &costs, 0, &mut matches)
            .unwrap();
        index
            .find_words_with(&word("abd"), &costs, 1, &mut matches)
            .unwrap();
        let got: Vec<(WordId, Cost)> = matches.iter().map(|m| (m.id, m.error)).collect();
        assert_eq!(got, vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn owned_cost_model_is_editable() {
        let mut index = index(&["abc"]);
        assert_eq!(found(&index, "adc", 1), vec![]);
        index.cost_model_mut().set_pair_override('b', 'd', 1);
        assert_eq!(found(&index, "adc", 1), vec![(0, 1)]);
        index.cost_model_mut().clear_overrides();
        assert_eq!(found(&index, "adc", 100), vec![(0, 100)]);
    }

    #[test]
    fn transposition_when_enabled() {
        let mut index = index(&["abcd"]);
        assert_eq!(found(&index, "bacd", 100), vec![]);
        index.cost_model_mut().set_transpositions(true);
        assert_eq!(found(&index, "bacd", 100), vec![(0, 100)]);
    }

    #[test]
    fn cheap_transposition_reaches_past_an_expensive_row() {
        let mut index = index(&["ab", "xabz"]);
        index.cost_model_mut().set_transpositions(true);
        index.cost_model_mut().set_transposition_cost(60);
        // The row after "a" has minimum 100, above the budget, yet "ab" is one swap away.
        assert_eq!(found(&index, "ba", 60), vec![(0, 60)]);
        assert_eq!(found(&index, "ba", 59), vec![]);
        assert_eq!(
            edit_distance(&word("ba"), &word("ab"), index.cost_model()),
            60
        );
    }

    #[test]
    fn poisoned_index_refuses_queries() {
        let mut index = index(&["abc", "abd"]);
        index.trie.poison();
        assert!(matches!(
            index.find_words(&word("abc"), 100),
            Err(IndexError::Unusable)
        ));
        assert!(matches!(index.has_word(&word("abc")), Err(IndexError::Unusable)));
        assert!(matches!(
            index.insert_word(&word("x"), 9),
            Err(IndexError::Unusable)
        ));
    }

    #[test]
    fn substring_mode_finds_prefixes() {
        let mut index = index(&["helsinki"]);
        index.cost_model_mut().set_substring_mode();
        // Five trailing deletions at the substring end cost.
        assert_eq!(found(&index, "hel", 75), vec![(0, 75)]);
        // One cheap start insertion, six cheap end deletions.
        assert_eq!(found(&index, "xhe", 105), vec![(0, 105)]);
        // Below three letters the start insertion is full price.
        assert_eq!(found(&index, "xh", 204), vec![]);
    }

    #[test]
    fn deep_words_do_not_overflow_the_stack() {
        let long = "a".repeat(50_000);
        let index = index(&[long.as_str()]);
        assert_eq!(found(&index, "a", Cost::MAX), vec![(0, 49_999 * 100)]);
    }
}
