//! Level table loader.

use std::collections::BTreeSet;
use std::path::Path;

use hunt_core::LevelTable;

use crate::loaders::{LoadResult, read_file};

/// Loader for level definitions from RON files.
pub struct LevelLoader;

impl LevelLoader {
    /// Load a level table from a RON file.
    pub fn load(path: &Path) -> LoadResult<LevelTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a level table and reject duplicate level ids.
    pub fn parse(content: &str) -> LoadResult<LevelTable> {
        let table: LevelTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse levels RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for definition in &table.levels {
            if !seen.insert(definition.level_id) {
                anyhow::bail!("Level {} is defined more than once", definition.level_id);
            }
        }

        Ok(table)
    }
}
