//! Error types for step evaluation.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::PlayerId;

/// Errors surfaced while evaluating a scan.
///
/// Wrong answers are never errors; they are successful steps with a
/// [`LostLife`](super::OutcomeKind::LostLife) outcome. These variants mean the
/// scan itself could not be judged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    /// The scanned badge belongs to someone who has not registered yet, at a
    /// level that needs their profile or metals.
    #[error("player '{player_id}' has not registered for the game yet")]
    UnregisteredTarget { player_id: PlayerId },

    /// The scanned code is not in the directory, at a level that needs to
    /// know who was scanned.
    #[error("scan code '{scan_code}' does not belong to anyone")]
    UnknownTarget { scan_code: String },

    /// No level definition exists for the player's current level.
    #[error("no level definition configured for level {level}")]
    ConfigurationMissing { level: i64 },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for StepError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StepError::UnregisteredTarget { .. } | StepError::UnknownTarget { .. } => {
                ErrorSeverity::Validation
            }
            StepError::ConfigurationMissing { .. } => ErrorSeverity::Fatal,
            StepError::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StepError::UnregisteredTarget { .. } => "STEP_UNREGISTERED_TARGET",
            StepError::UnknownTarget { .. } => "STEP_UNKNOWN_TARGET",
            StepError::ConfigurationMissing { .. } => "STEP_CONFIGURATION_MISSING",
            StepError::Oracle(error) => error.error_code(),
        }
    }
}
