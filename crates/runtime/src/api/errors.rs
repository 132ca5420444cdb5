//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from repositories, the progression engine and registration
//! so callers can bubble them up with consistent context, and turns each one
//! into the text a player should see.

use hunt_core::{DirectoryError, ErrorSeverity, GameError, StepError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Step(#[from] StepError),

    #[error("no player is bound to this session")]
    SessionNotFound,

    #[error("scan code '{0}' is not on any badge")]
    UnknownScanCode(String),

    #[error("directory cannot be indexed: {0}")]
    InvalidDirectory(#[from] DirectoryError),

    #[error("game service requires {0} to be configured before building")]
    MissingComponent(&'static str),
}

impl RuntimeError {
    /// Text shown to the player for this failure.
    ///
    /// A scan of an unregistered player, a code outside the game and a storage
    /// failure each get their own message; none of them reads like a wrong
    /// answer.
    pub fn user_message(&self) -> &'static str {
        match self {
            RuntimeError::Step(StepError::UnregisteredTarget { .. }) => {
                "That player has not registered yet. Ask them to scan their own badge first."
            }
            RuntimeError::Step(StepError::UnknownTarget { .. }) => {
                "That code is not part of the game."
            }
            RuntimeError::Step(StepError::ConfigurationMissing { .. }) => {
                "This level is not set up. Please find an organiser."
            }
            RuntimeError::Step(StepError::Oracle(_)) | RuntimeError::Repository(_) => {
                "Something went wrong saving the game. Please scan again."
            }
            RuntimeError::SessionNotFound => "You are not signed in. Scan your badge to register.",
            RuntimeError::UnknownScanCode(_) => {
                "Unregistered QR. Scan the code printed on your own badge."
            }
            RuntimeError::InvalidDirectory(_) | RuntimeError::MissingComponent(_) => {
                "The game is misconfigured. Please find an organiser."
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Step(error) => error.severity(),
            RuntimeError::Repository(_) => ErrorSeverity::Recoverable,
            RuntimeError::SessionNotFound | RuntimeError::UnknownScanCode(_) => {
                ErrorSeverity::Validation
            }
            RuntimeError::InvalidDirectory(_) | RuntimeError::MissingComponent(_) => {
                ErrorSeverity::Fatal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunt_core::PlayerId;

    #[test]
    fn target_errors_read_differently_from_storage_errors() {
        let unregistered = RuntimeError::from(StepError::UnregisteredTarget {
            player_id: PlayerId::from("p3"),
        });
        let unknown = RuntimeError::from(StepError::UnknownTarget {
            scan_code: "x".into(),
        });
        let storage = RuntimeError::from(RepositoryError::LockPoisoned);

        assert_ne!(unregistered.user_message(), unknown.user_message());
        assert_ne!(unregistered.user_message(), storage.user_message());
        assert_ne!(unknown.user_message(), storage.user_message());
        assert!(storage.severity().is_recoverable());
        assert_eq!(unregistered.severity(), ErrorSeverity::Validation);
    }
}
