//! Survey loader.

use std::path::Path;

use hunt_core::SurveySet;

use crate::loaders::{LoadResult, read_file};

/// Loader for survey questions from RON files.
pub struct SurveyLoader;

impl SurveyLoader {
    pub fn load(path: &Path) -> LoadResult<SurveySet> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SurveySet> {
        let survey: SurveySet = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse survey RON: {}", e))?;

        let mut ids: Vec<u32> = survey.question_ids().collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            anyhow::bail!("Survey question {} is defined more than once", pair[0]);
        }

        Ok(survey)
    }
}
