//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors raised by oracle implementations backed by external storage.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// The player store could not be read.
    #[error("player lookup failed: {0}")]
    PlayerLookup(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            OracleError::PlayerLookup(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::PlayerLookup(_) => "ORACLE_PLAYER_LOOKUP",
        }
    }
}
