//! Content factory for loading a full configuration from a data directory.

use std::path::{Path, PathBuf};

use hunt_core::{DirectorySet, GameRules, LevelTable, SurveySet};

use crate::loaders::{DirectoryLoader, LevelLoader, LoadResult, RulesLoader, SurveyLoader};

/// Content factory that loads hunt content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// ├── levels.ron
/// ├── survey.ron
/// └── directory.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load rules from `rules.toml`, falling back to the reference rules when
    /// the file does not exist.
    pub fn load_rules(&self) -> LoadResult<GameRules> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            return Ok(GameRules::default());
        }
        RulesLoader::load(&path)
    }

    pub fn load_levels(&self) -> LoadResult<LevelTable> {
        LevelLoader::load(&self.data_dir.join("levels.ron"))
    }

    pub fn load_survey(&self) -> LoadResult<SurveySet> {
        SurveyLoader::load(&self.data_dir.join("survey.ron"))
    }

    pub fn load_directory(&self) -> LoadResult<DirectorySet> {
        DirectoryLoader::load(&self.data_dir.join("directory.ron"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rules_file_means_reference_rules() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_rules().unwrap(), GameRules::default());
        assert!(factory.load_levels().is_err());
    }

    #[test]
    fn loads_files_from_the_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("survey.ron"),
            r#"(questions: [(question_id: 1, text: "Do you like tea?")])"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("rules.toml"), "final_level = 12\ngrab_level = 10\n").unwrap();

        let factory = ContentFactory::new(dir.path());
        let survey = factory.load_survey().unwrap();
        assert_eq!(survey.questions.len(), 1);
        assert_eq!(factory.load_rules().unwrap().final_level, 12);
    }
}
