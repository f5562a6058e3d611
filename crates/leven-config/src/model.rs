//! Turns `[costs]` settings into a `CostModel`.

use leven_index::{AccentGroup, CostModel, Letter};

use crate::{ConfigError, CostSettings, Preset};

/// Builds the cost model for `settings`.
pub fn build_cost_model(settings: &CostSettings) -> Result<CostModel, ConfigError> {
    let mut model = CostModel::new(settings.base());
    if settings.substring {
        model.set_substring_mode();
    }
    for preset in &settings.presets {
        apply_preset(&mut model, *preset)?;
    }
    for group in &settings.groups {
        let letters = group_letters(&group.letters)?;
        model.define_group(&letters, group.cost)?;
    }
    for pair in &settings.pairs {
        let (a, b) = pair_letters(&pair.letters)?;
        model.set_pair_override(a, b, pair.cost);
    }
    Ok(model)
}

/// Adds the overrides or groups of one preset.
fn apply_preset(model: &mut CostModel, preset: Preset) -> Result<(), ConfigError> {
    match preset {
        Preset::Keyboard => model.add_keyboard_errors(),
        Preset::Numberpad => model.add_numberpad_errors(),
        Preset::LatinAccents => model.add_accents(AccentGroup::Latin)?,
        Preset::GreekAccents => model.add_accents(AccentGroup::Greek)?,
    }
    Ok(())
}

/// Splits a pair entry into its two letters.
pub fn pair_letters(letters: &str) -> Result<(Letter, Letter), ConfigError> {
    let chars = checked_letters(letters)?;
    match chars.as_slice() {
        &[a, b] => Ok((a, b)),
        _ => Err(ConfigError::InvalidLetter {
            letters: letters.to_string(),
            reason: "a pair needs exactly two letters",
        }),
    }
}

/// Splits a group entry into its letters.
pub fn group_letters(letters: &str) -> Result<Vec<Letter>, ConfigError> {
    let chars = checked_letters(letters)?;
    if chars.is_empty() {
        return Err(ConfigError::InvalidLetter {
            letters: letters.to_string(),
            reason: "a group needs at least one letter",
        });
    }
    Ok(chars)
}

/// Letters of an entry, rejecting whitespace.
fn checked_letters(letters: &str) -> Result<Vec<Letter>, ConfigError> {
    if letters.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidLetter {
            letters: letters.to_string(),
            reason: "whitespace is not a letter",
        });
    }
    Ok(letters.chars().collect())
}

#[cfg(test)]
mod tests {
    use leven_index::{DEFAULT_GROUP_ERROR, DEFAULT_TYPO_ERROR, IndexError};

    use super::*;
    use crate::{GroupDefinition, PairOverride};

    #[test]
    fn default_settings_build_default_model() {
        let model = build_cost_model(&CostSettings::default()).unwrap();
        assert_eq!(model.config(), CostModel::default().config());
        assert_eq!(model.num_overrides(), 0);
        assert_eq!(model.num_groups(), 0);
    }

    #[test]
    fn substring_preset_lowers_edges() {
        let settings = CostSettings {
            substring: true,
            ..CostSettings::default()
        };
        let model = build_cost_model(&settings).unwrap();
        assert_eq!(model.end_deletion_cost(), 15);
        assert_eq!(model.start_insertion_cost(3), 15);
        assert_eq!(model.start_insertion_cost(2), 100);
    }

    #[test]
    fn presets_apply() {
        let settings = CostSettings {
            presets: vec![Preset::Keyboard, Preset::LatinAccents],
            ..CostSettings::default()
        };
        let model = build_cost_model(&settings).unwrap();
        assert_eq!(model.substitution_cost('k', 'l'), DEFAULT_TYPO_ERROR);
        assert_eq!(model.substitution_cost('e', 'é'), DEFAULT_GROUP_ERROR);
    }

    #[test]
    fn later_pair_wins() {
        let settings = CostSettings {
            presets: vec![Preset::Keyboard],
            pairs: vec![
                PairOverride {
                    letters: "kl".into(),
                    cost: 50,
                },
                PairOverride {
                    letters: "lk".into(),
                    cost: 5,
                },
            ],
            ..CostSettings::default()
        };
        let model = build_cost_model(&settings).unwrap();
        assert_eq!(model.substitution_cost('k', 'l'), 5);
    }

    #[test]
    fn groups_apply_and_conflict() {
        let mut settings = CostSettings {
            groups: vec![GroupDefinition {
                letters: "vw".into(),
                cost: 10,
            }],
            ..CostSettings::default()
        };
        let model = build_cost_model(&settings).unwrap();
        assert_eq!(model.substitution_cost('v', 'w'), 10);

        settings.groups.push(GroupDefinition {
            letters: "wx".into(),
            cost: 10,
        });
        assert!(matches!(
            build_cost_model(&settings),
            Err(ConfigError::InvalidCosts(IndexError::GroupConflict { letter: 'w' }))
        ));
    }

    #[test]
    fn letter_validation() {
        assert_eq!(pair_letters("bd").unwrap(), ('b', 'd'));
        assert_eq!(pair_letters("äö").unwrap(), ('ä', 'ö'));
        assert!(matches!(pair_letters("b"), Err(ConfigError::InvalidLetter { .. })));
        assert!(matches!(pair_letters("bde"), Err(ConfigError::InvalidLetter { .. })));
        assert!(matches!(pair_letters("b "), Err(ConfigError::InvalidLetter { .. })));
        assert!(matches!(group_letters(""), Err(ConfigError::InvalidLetter { .. })));
        assert_eq!(group_letters("eé").unwrap(), vec!['e', 'é']);
    }
}
