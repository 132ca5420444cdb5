//! Data-driven hunt content and loaders.
//!
//! This crate houses the default configuration the hunt ships with and the
//! loaders that read replacements from disk:
//! - Level definitions (RON)
//! - Survey questions (RON)
//! - Scan-code directory (RON)
//! - Game rules overrides (TOML)
//!
//! Content is handed to the runtime, which seeds its config store from it and
//! never reads these files again on the hot path.

pub mod defaults;
pub mod loaders;

pub use defaults::DefaultContent;
pub use loaders::{
    ContentFactory, DirectoryLoader, LevelLoader, LoadResult, RulesLoader, SurveyLoader,
};
