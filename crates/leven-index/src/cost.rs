//! The cost model used when comparing a query against stored words.
//!
//! Substitution lookups sit on the hottest path of the search, so pair overrides and group
//! membership are plain hash lookups with no allocation.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{IndexError, Letter};

/// An edit cost. All cost arithmetic saturates.
pub type Cost = u32;

/// Identifier of an equivalence group inside one [`CostModel`].
pub type GroupId = usize;

/// Cost of any single edit when nothing more specific applies.
pub const DEFAULT_ERROR: Cost = 100;
/// Substitution cost between letters of the same accent group.
pub const DEFAULT_GROUP_ERROR: Cost = 30;
/// Substitution cost between keys adjacent on the keyboard.
pub const DEFAULT_TYPO_ERROR: Cost = 30;
/// Deletion cost for the last query column in substring mode.
pub const SUBSTRING_END_DELETION_ERROR: Cost = 15;
/// Insertion cost for the root row in substring mode.
pub const SUBSTRING_START_INSERTION_ERROR: Cost = 15;
/// Minimum query length for the cheap start insertion in substring mode.
pub const SUBSTRING_START_LENGTH: usize = 3;
/// Cost between a keypad digit and the letters of an adjacent key.
pub const NUMBERPAD_ADJACENT_ERROR: Cost = 50;

/// Base costs for a [`CostModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Cost of inserting a query letter.
    pub insertion: Cost,
    /// Cost of deleting a stored letter.
    pub deletion: Cost,
    /// Substitution cost when no override or group applies.
    pub substitution: Cost,
    /// Cost of swapping two adjacent letters.
    pub transposition: Cost,
    /// Deletion cost in the last query column.
    pub end_deletion: Cost,
    /// Insertion cost of the root row for queries of at least `substring_start_limit` letters.
    pub start_insertion: Cost,
    /// Query length from which `start_insertion` replaces `insertion` in the root row.
    pub substring_start_limit: usize,
    /// Whether the search considers adjacent transpositions as a single edit.
    pub transpositions: bool,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            insertion: DEFAULT_ERROR,
            deletion: DEFAULT_ERROR,
            substitution: DEFAULT_ERROR,
            transposition: DEFAULT_ERROR,
            end_deletion: DEFAULT_ERROR,
            start_insertion: DEFAULT_ERROR,
            substring_start_limit: 0,
            transpositions: false,
        }
    }
}

impl CostConfig {
    /// Every edit costs `cost`, with no substring or transposition handling.
    pub fn uniform(cost: Cost) -> Self {
        Self {
            insertion: cost,
            deletion: cost,
            substitution: cost,
            transposition: cost,
            end_deletion: cost,
            start_insertion: cost,
            substring_start_limit: 0,
            transpositions: false,
        }
    }
}

/// Built-in accented letter families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccentGroup {
    /// Latin letters with diacritics.
    Latin,
    /// Greek letters with tonos, dialytika and final forms.
    Greek,
}

impl AccentGroup {
    /// Each string is one group of interchangeable letters.
    fn families(self) -> &'static [&'static str] {
        match self {
            Self::Latin => &[
                "aàáâãäåāăą",
                "cçćĉċč",
                "dďđ",
                "eèéêëēĕėęě",
                "gĝğġģ",
                "hĥħ",
                "iìíîïĩīĭįı",
                "jĵ",
                "kķ",
                "lĺļľŀł",
                "nñńņňŉ",
                "oòóôõöøōŏő",
                "rŕŗř",
                "sśŝşšș",
                "tţťŧț",
                "uùúûüũūŭůűų",
                "wŵ",
                "yýÿŷ",
                "zźżž",
            ],
            Self::Greek => &["αά", "εέ", "ηή", "ιίϊΐ", "οό", "υύϋΰ", "ωώ", "σς"],
        }
    }
}

/// Nordic keyboard rows used for typo costs. Rows are offset by one key.
const KEYBOARD_ROWS: [&[char]; 4] = [
    &['1', '2', '3', '4', '5', '6', '7', '8', '9', '0', '+'],
    &['q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p', 'å'],
    &['a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'ö', 'ä', '\''],
    &['z', 'x', 'c', 'v', 'b', 'n', 'm', ',', '.', '-'],
];

/// Phone keypad layout: digit and the letters printed on the key.
const NUMBERPAD: [[(char, &str); 3]; 3] = [
    [('1', ""), ('2', "abc"), ('3', "def")],
    [('4', "ghi"), ('5', "jkl"), ('6', "mno")],
    [('7', "pqrs"), ('8', "tuv"), ('9', "wxyz")],
];

/// Substitution, insertion, deletion and transposition costs.
///
/// Substitution costs resolve in order: equal letters cost nothing, then an explicit pair
/// override, then a shared equivalence group, then the base substitution cost.
#[derive(Debug, Clone, Default)]
pub struct CostModel {
    /// Base costs.
    config: CostConfig,
    /// Pair overrides keyed by (smaller, larger) letter.
    pairs: HashMap<(Letter, Letter), Cost>,
    /// Group membership of each grouped letter.
    group_of: HashMap<Letter, GroupId>,
    /// Substitution cost of each group, indexed by `GroupId`.
    group_costs: Vec<Cost>,
}

/// Orders a pair so that lookups are symmetric.
fn pair_key(a: Letter, b: Letter) -> (Letter, Letter) {
    if a <= b { (a, b) } else { (b, a) }
}

impl CostModel {
    /// Creates a cost model with the given base costs and no overrides.
    pub fn new(config: CostConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The base costs.
    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    /// Mutable access to the base costs.
    pub fn config_mut(&mut self) -> &mut CostConfig {
        &mut self.config
    }

    /// Cost of inserting a query letter.
    pub fn insertion_cost(&self) -> Cost {
        self.config.insertion
    }

    /// Cost of deleting a stored letter.
    pub fn deletion_cost(&self) -> Cost {
        self.config.deletion
    }

    /// Deletion cost for the last query column.
    pub fn end_deletion_cost(&self) -> Cost {
        self.config.end_deletion
    }

    /// Insertion cost for the root row of a query of the given length.
    pub fn start_insertion_cost(&self, query_len: usize) -> Cost {
        if query_len >= self.config.substring_start_limit {
            self.config.start_insertion
        } else {
            self.config.insertion
        }
    }

    /// Cost of swapping two adjacent letters.
    pub fn transposition_cost(&self) -> Cost {
        self.config.transposition
    }

    /// Whether transpositions are a single edit.
    pub fn transpositions(&self) -> bool {
        self.config.transpositions
    }

    /// Sets the insertion cost.
    pub fn set_insertion_cost(&mut self, cost: Cost) {
        self.config.insertion = cost;
    }

    /// Sets the deletion cost.
    pub fn set_deletion_cost(&mut self, cost: Cost) {
        self.config.deletion = cost;
    }

    /// Sets the base substitution cost.
    pub fn set_substitution_cost(&mut self, cost: Cost) {
        self.config.substitution = cost;
    }

    /// Sets the transposition cost.
    pub fn set_transposition_cost(&mut self, cost: Cost) {
        self.config.transposition = cost;
    }

    /// Sets the end deletion cost.
    pub fn set_end_deletion_cost(&mut self, cost: Cost) {
        self.config.end_deletion = cost;
    }

    /// Sets the start insertion cost.
    pub fn set_start_insertion_cost(&mut self, cost: Cost) {
        self.config.start_insertion = cost;
    }

    /// Sets the query length from which the start insertion cost applies.
    pub fn set_substring_start_limit(&mut self, limit: usize) {
        self.config.substring_start_limit = limit;
    }

    /// Enables or disables transpositions.
    pub fn set_transpositions(&mut self, enabled: bool) {
        self.config.transpositions = enabled;
    }

    /// Cost of replacing query letter `a` with stored letter `b`.
    pub fn substitution_cost(&self, a: Letter, b: Letter) -> Cost {
        if a == b {
            return 0;
        }
        if let Some(&cost) = self.pairs.get(&pair_key(a, b)) {
            return cost;
        }
        if let (Some(ga), Some(gb)) = (self.group_of.get(&a), self.group_of.get(&b))
            && ga == gb
        {
            return self.group_costs[*ga];
        }
        self.config.substitution
    }

    /// Sets the substitution cost for the unordered pair {a, b}.
    pub fn set_pair_override(&mut self, a: Letter, b: Letter, cost: Cost) {
        self.pairs.insert(pair_key(a, b), cost);
    }

    /// Removes every pair override. Groups are kept.
    pub fn clear_overrides(&mut self) {
        self.pairs.clear();
    }

    /// Number of pair overrides.
    pub fn num_overrides(&self) -> usize {
        self.pairs.len()
    }

    /// Defines a new equivalence group whose letters substitute for each other at `cost`.
    ///
    /// Fails without modifying the model if any letter already belongs to another group.
    pub fn define_group(&mut self, letters: &[Letter], cost: Cost) -> Result<GroupId, IndexError> {
        if let Some(&letter) = letters.iter().find(|l| self.group_of.contains_key(l)) {
            return Err(IndexError::GroupConflict { letter });
        }
        let id = self.group_costs.len();
        self.group_costs.push(cost);
        for &letter in letters {
            self.group_of.insert(letter, id);
        }
        debug!(group = id, size = letters.len(), cost, "Added error group");
        Ok(id)
    }

    /// Removes every group.
    pub fn clear_groups(&mut self) {
        self.group_of.clear();
        self.group_costs.clear();
    }

    /// Number of groups.
    pub fn num_groups(&self) -> usize {
        self.group_costs.len()
    }

    /// Whether the letter belongs to any group.
    pub fn is_in_group(&self, letter: Letter) -> bool {
        self.group_of.contains_key(&letter)
    }

    /// Adds the built-in accented letter groups at [`DEFAULT_GROUP_ERROR`].
    pub fn add_accents(&mut self, group: AccentGroup) -> Result<(), IndexError> {
        for family in group.families() {
            let letters: Vec<Letter> = family.chars().collect();
            self.define_group(&letters, DEFAULT_GROUP_ERROR)?;
        }
        Ok(())
    }

    /// Makes keys adjacent on a Nordic keyboard cost [`DEFAULT_TYPO_ERROR`] to swap.
    pub fn add_keyboard_errors(&mut self) {
        for (row, next_row) in KEYBOARD_ROWS.iter().zip(KEYBOARD_ROWS.iter().skip(1)) {
            for (j, &key) in row.iter().enumerate() {
                if let Some(&right) = row.get(j + 1) {
                    self.set_pair_override(key, right, DEFAULT_TYPO_ERROR);
                }
                if j > 0
                    && let Some(&below_left) = next_row.get(j - 1)
                {
                    self.set_pair_override(key, below_left, DEFAULT_TYPO_ERROR);
                }
                if let Some(&below) = next_row.get(j) {
                    self.set_pair_override(key, below, DEFAULT_TYPO_ERROR);
                }
            }
        }
    }

    /// Makes a keypad digit equal to its own letters and close to those of adjacent keys.
    pub fn add_numberpad_errors(&mut self) {
        let neighbours: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        for (r, row) in NUMBERPAD.iter().enumerate() {
            for (c, &(digit, letters)) in row.iter().enumerate() {
                for letter in letters.chars() {
                    self.set_pair_override(digit, letter, 0);
                }
                for (dr, dc) in neighbours {
                    let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc))
                    else {
                        continue;
                    };
                    let Some(&(_, adjacent)) = NUMBERPAD.get(nr).and_then(|row| row.get(nc)) else {
                        continue;
                    };
                    for letter in adjacent.chars() {
                        self.set_pair_override(digit, letter, NUMBERPAD_ADJACENT_ERROR);
                    }
                }
            }
        }
    }

    /// Lowers start insertion and end deletion so queries can match inside longer words.
    pub fn set_substring_mode(&mut self) {
        self.config.start_insertion = SUBSTRING_START_INSERTION_ERROR;
        self.config.end_deletion = SUBSTRING_END_DELETION_ERROR;
        self.config.substring_start_limit = SUBSTRING_START_LENGTH;
    }

    /// Letters that appear in more than one of the given families.
    ///
    /// Used to report conflicts before any group is defined.
    pub fn overlapping_letters<'a>(families: impl IntoIterator<Item = &'a [Letter]>) -> Vec<Letter> {
        let mut seen = HashSet::new();
        let mut overlapping = Vec::new();
        for family in families {
            let unique: HashSet<Letter> = family.iter().copied().collect();
            for letter in unique {
                if !seen.insert(letter) && !overlapping.contains(&letter) {
                    overlapping.push(letter);
                }
            }
        }
        overlapping.sort_unstable();
        overlapping
    }
}
