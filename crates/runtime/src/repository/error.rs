//! Error types raised by repository implementations.

use hunt_core::PlayerId;
use thiserror::Error;

use super::ConfigKey;

/// Errors surfaced by repository implementations.
///
/// This is the storage failure seen by callers: it is reported, never retried
/// underneath them.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("unsupported blob format version {found} (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },

    #[error("no '{0}' configuration has been stored")]
    MissingConfig(ConfigKey),

    #[error("player '{0}' already exists")]
    PlayerAlreadyExists(PlayerId),

    #[error("player '{0}' does not exist")]
    PlayerNotFound(PlayerId),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
