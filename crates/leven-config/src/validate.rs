//! Configuration validation.
//!
//! Reports settings that load fine but are unlikely to be what the user meant.

use std::fmt;

use leven_index::{
    Cost, CostModel, DEFAULT_GROUP_ERROR, DEFAULT_TYPO_ERROR, Letter, NUMBERPAD_ADJACENT_ERROR,
    SUBSTRING_END_DELETION_ERROR, SUBSTRING_START_INSERTION_ERROR,
};

use crate::{Config, CostSettings, Preset};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A letter appears in more than one group; building the cost model will fail.
    GroupLetterConflict {
        /// The shared letter.
        letter: Letter,
    },
    /// A pair override names the same letter twice and never applies.
    SelfPair {
        /// The letters as written.
        letters: String,
    },
    /// The error budget is below every edit cost, so only exact matches are found.
    BudgetBelowCosts {
        /// Configured budget.
        max_error: Cost,
        /// Cheapest non-zero edit.
        cheapest: Cost,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GroupLetterConflict { letter } => {
                write!(f, "letter '{letter}' is listed in more than one group")
            }
            Self::SelfPair { letters } => {
                write!(f, "pair '{letters}' repeats the same letter and has no effect")
            }
            Self::BudgetBelowCosts {
                max_error,
                cheapest,
            } => write!(
                f,
                "max_error {max_error} is below the cheapest edit ({cheapest}), only exact matches will be found"
            ),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let costs = &config.costs;
    let mut warnings = Vec::new();

    let families: Vec<Vec<Letter>> = costs
        .groups
        .iter()
        .map(|g| g.letters.chars().collect())
        .collect();
    for letter in CostModel::overlapping_letters(families.iter().map(Vec::as_slice)) {
        warnings.push(ConfigWarning::GroupLetterConflict { letter });
    }

    for pair in &costs.pairs {
        let mut chars = pair.letters.chars();
        if let (Some(a), Some(b), None) = (chars.next(), chars.next(), chars.next())
            && a == b
        {
            warnings.push(ConfigWarning::SelfPair {
                letters: pair.letters.clone(),
            });
        }
    }

    if let Some(cheapest) = cheapest_edit(costs)
        && config.search.max_error < cheapest
    {
        warnings.push(ConfigWarning::BudgetBelowCosts {
            max_error: config.search.max_error,
            cheapest,
        });
    }

    warnings
}

/// Smallest non-zero cost any single edit can have under these settings.
fn cheapest_edit(costs: &CostSettings) -> Option<Cost> {
    let mut candidates = vec![
        costs.insertion,
        costs.deletion,
        costs.substitution,
        costs.end_deletion,
        costs.start_insertion,
    ];
    if costs.transpositions {
        candidates.push(costs.transposition);
    }
    if costs.substring {
        candidates.push(SUBSTRING_END_DELETION_ERROR);
        candidates.push(SUBSTRING_START_INSERTION_ERROR);
    }
    candidates.extend(costs.presets.iter().map(|preset| match preset {
        Preset::Keyboard => DEFAULT_TYPO_ERROR,
        Preset::Numberpad => NUMBERPAD_ADJACENT_ERROR,
        Preset::LatinAccents | Preset::GreekAccents => DEFAULT_GROUP_ERROR,
    }));
    candidates.extend(costs.pairs.iter().map(|p| p.cost));
    candidates.extend(costs.groups.iter().map(|g| g.cost));

    candidates.into_iter().filter(|&c| c > 0).min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GroupDefinition, PairOverride};

    #[test]
    fn default_config_is_clean() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn overlapping_groups() {
        let mut config = Config::default();
        config.costs.groups = vec![
            GroupDefinition {
                letters: "abc".into(),
                cost: 10,
            },
            GroupDefinition {
                letters: "cde".into(),
                cost: 10,
            },
        ];
        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::GroupLetterConflict { letter: 'c' }]
        );
    }

    #[test]
    fn self_pair() {
        let mut config = Config::default();
        config.costs.pairs = vec![PairOverride {
            letters: "aa".into(),
            cost: 1,
        }];
        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::SelfPair {
                letters: "aa".into()
            }]
        );
    }

    #[test]
    fn budget_below_every_cost() {
        let mut config = Config::default();
        config.search.max_error = 20;
        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::BudgetBelowCosts {
                max_error: 20,
                cheapest: 100
            }]
        );

        config.costs.substring = true;
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn zero_cost_pairs_are_not_edits() {
        let mut config = Config::default();
        config.search.max_error = 0;
        config.costs.pairs = vec![PairOverride {
            letters: "bd".into(),
            cost: 0,
        }];
        assert_eq!(
            validate_config(&config),
            vec![ConfigWarning::BudgetBelowCosts {
                max_error: 0,
                cheapest: 100
            }]
        );
    }

    #[test]
    fn warnings_display() {
        let warning = ConfigWarning::BudgetBelowCosts {
            max_error: 5,
            cheapest: 30,
        };
        assert_eq!(
            warning.to_string(),
            "max_error 5 is below the cheapest edit (30), only exact matches will be found"
        );
    }
}
