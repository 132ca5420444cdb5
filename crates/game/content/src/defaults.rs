//! Content compiled into the binary.
//!
//! Used to seed an empty config store on first start. Each kind is inserted
//! only if absent, so a partially configured deployment keeps its own data.

use hunt_core::{DirectorySet, GameRules, LevelTable, SurveySet};

use crate::loaders::{DirectoryLoader, LevelLoader, LoadResult, RulesLoader, SurveyLoader};

const LEVELS_RON: &str = include_str!("../data/levels.ron");
const SURVEY_RON: &str = include_str!("../data/survey.ron");
const DIRECTORY_RON: &str = include_str!("../data/directory.ron");
const RULES_TOML: &str = include_str!("../data/rules.toml");

/// The hunt's built-in configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultContent {
    pub levels: LevelTable,
    pub survey: SurveySet,
    pub directory: DirectorySet,
}

impl DefaultContent {
    /// Parses the embedded data files.
    pub fn load() -> LoadResult<Self> {
        Ok(Self {
            levels: LevelLoader::parse(LEVELS_RON)?,
            survey: SurveyLoader::parse(SURVEY_RON)?,
            directory: DirectoryLoader::parse(DIRECTORY_RON)?,
        })
    }

    /// Reference rules, as shipped in `rules.toml`.
    pub fn rules() -> LoadResult<GameRules> {
        RulesLoader::parse(RULES_TOML)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunt_core::{Directory, DirectoryOracle, LevelKind, LevelOracle};

    #[test]
    fn embedded_rules_match_the_reference_rules() {
        assert_eq!(DefaultContent::rules().unwrap(), GameRules::default());
    }

    #[test]
    fn every_level_up_to_victory_is_defined() {
        let content = DefaultContent::load().unwrap();
        let rules = GameRules::default();

        for level in rules.starting_level..=rules.final_level {
            assert!(content.levels.level(level).is_some(), "level {level} missing");
        }
        assert_eq!(content.levels.len(), 22);
    }

    #[test]
    fn level_references_resolve() {
        let content = DefaultContent::load().unwrap();
        let directory = Directory::build(content.directory.clone()).unwrap();

        for definition in &content.levels.levels {
            match &definition.kind {
                LevelKind::RosterMatch { expected_scanners } => {
                    for player in expected_scanners {
                        assert!(
                            directory.by_player_id(player).is_some(),
                            "level {} expects unknown player {player}",
                            definition.level_id
                        );
                    }
                }
                LevelKind::SurveyMatch { question_id, .. } => {
                    assert!(content.survey.question(*question_id).is_some());
                }
                LevelKind::Wildcard => {}
            }
        }
    }

    #[test]
    fn the_cauldron_closes_the_hunt() {
        let content = DefaultContent::load().unwrap();
        assert_eq!(
            content.levels.level(21).unwrap().kind,
            LevelKind::roster(["cauldron"])
        );
    }
}
