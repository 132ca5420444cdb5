//! Bootstrap configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use hunt_runtime::ConfigCache;

/// Where players, the action log and configuration blobs are kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StorageBackend {
    /// Everything lives in process memory and is lost on exit.
    Memory,
    /// Files under the data directory.
    #[default]
    File,
}

/// Configuration required to bootstrap a [`GameService`](hunt_runtime::GameService).
#[derive(Clone, Debug)]
pub struct HuntConfig {
    pub data_dir: PathBuf,
    pub storage: StorageBackend,
    pub cache_ttl: Duration,
    /// Directory with `rules.toml`, `levels.ron`, `survey.ron` and
    /// `directory.ron` replacing the built-in content.
    pub content_dir: Option<PathBuf>,
    /// File name of the log, relative to `data_dir`.
    pub log_file: String,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage: StorageBackend::default(),
            cache_ttl: ConfigCache::DEFAULT_TTL,
            content_dir: None,
            log_file: "hunt.log".to_string(),
        }
    }
}

impl HuntConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `HUNT_DATA_DIR` - Directory for storage and logs (default: platform-specific)
    /// - `HUNT_STORAGE` - `memory` or `file` (default: file)
    /// - `HUNT_CACHE_TTL_SECS` - Configuration cache lifetime (default: 60)
    /// - `HUNT_CONTENT_DIR` - Content directory overriding the built-in hunt
    /// - `HUNT_LOG_FILE` - Log file name (default: hunt.log)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("HUNT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(storage) = parse(&lookup, "HUNT_STORAGE") {
            config.storage = storage;
        }

        if let Some(secs) = parse::<u64>(&lookup, "HUNT_CACHE_TTL_SECS") {
            config.cache_ttl = Duration::from_secs(secs);
        }

        config.content_dir = lookup("HUNT_CONTENT_DIR").map(PathBuf::from);

        if let Some(file) = lookup("HUNT_LOG_FILE").filter(|file| !file.is_empty()) {
            config.log_file = file;
        }

        config
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(&self.log_file)
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}

/// Platform data directory, or `./hunt-data` when none can be determined.
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "qr-hunt")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("hunt-data"))
}
