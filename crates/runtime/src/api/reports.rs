//! Results handed back to the calling layer.

use hunt_core::{PlayerId, PlayerState, StepOutcome};

use crate::repository::PlayerRecord;

/// The result of one scan after it has been persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanReport {
    pub player_id: PlayerId,
    pub prior_state: PlayerState,
    pub step: StepOutcome,
    /// Display name of whoever was scanned, if the code resolved.
    pub target_name: Option<String>,
    /// False if the new state was saved but the action log append failed.
    pub logged: bool,
}

impl ScanReport {
    pub fn message(&self) -> &'static str {
        self.step.message()
    }

    pub fn state(&self) -> &PlayerState {
        &self.step.state
    }
}

/// Which branch of the registration flow a submission took.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum RegistrationKind {
    /// The session was already bound; its player's profile was updated.
    Updated,
    /// The badge's player existed; the session now resolves to them.
    Rebound,
    /// A new player was created at the starting state.
    Created,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub kind: RegistrationKind,
    pub record: PlayerRecord,
}
