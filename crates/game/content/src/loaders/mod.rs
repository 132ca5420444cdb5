//! Content loaders for reading hunt data from files.
//!
//! Each loader exposes `load(path)` for files and `parse(text)` for content
//! that is already in memory (embedded defaults, admin uploads).

pub mod directory;
pub mod factory;
pub mod levels;
pub mod rules;
pub mod survey;

pub use directory::DirectoryLoader;
pub use factory::ContentFactory;
pub use levels::LevelLoader;
pub use rules::RulesLoader;
pub use survey::SurveyLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
