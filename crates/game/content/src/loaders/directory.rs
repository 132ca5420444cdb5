//! Scan-code directory loader.

use std::path::Path;

use hunt_core::{Directory, DirectorySet};

use crate::loaders::{LoadResult, read_file};

/// Loader for the scan-code directory from RON files.
///
/// The set is indexed once while loading so a file with duplicate codes or
/// players is rejected here rather than when the runtime swaps it in.
pub struct DirectoryLoader;

impl DirectoryLoader {
    pub fn load(path: &Path) -> LoadResult<DirectorySet> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<DirectorySet> {
        let set: DirectorySet = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse directory RON: {}", e))?;

        Directory::build(set.clone())
            .map_err(|e| anyhow::anyhow!("Invalid directory: {}", e))?;

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunt_core::CardSuit;

    #[test]
    fn parses_badges_with_cards() {
        let set = DirectoryLoader::parse(
            r#"(entries: [
                (player_id: "p1", scan_code: "abc", display_name: "Ada", suit: Hearts, rank: 12),
            ])"#,
        )
        .unwrap();

        assert_eq!(set.entries[0].suit, CardSuit::Hearts);
        assert_eq!(set.entries[0].rank, 12);
    }

    #[test]
    fn duplicate_codes_fail_to_load() {
        let error = DirectoryLoader::parse(
            r#"(entries: [
                (player_id: "p1", scan_code: "abc", display_name: "Ada", suit: Hearts, rank: 1),
                (player_id: "p2", scan_code: "abc", display_name: "Bo", suit: Clubs, rank: 2),
            ])"#,
        )
        .unwrap_err();

        assert!(error.to_string().contains("abc"));
    }
}
