//! Results of a single step.

use crate::state::{Metal, PlayerId, PlayerState};

/// What a scan did for the player.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    Progress,
    LostLife,
    AlreadyVictorious,
    GrabbedMetal,
    NothingFound,
    Dead,
}

impl OutcomeKind {
    /// Player-facing text for this outcome.
    pub const fn message(self) -> &'static str {
        match self {
            OutcomeKind::Progress => "Correct!",
            OutcomeKind::LostLife => "Lost a Life!",
            OutcomeKind::AlreadyVictorious => "Already Victorious!",
            OutcomeKind::GrabbedMetal => "Grabbed Metal!",
            OutcomeKind::NothingFound => "Nothing Found!",
            OutcomeKind::Dead => "Dead!",
        }
    }
}

/// Everything the caller needs after a step: the state to persist, what
/// happened, and the clue for the level the player now stands on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub state: PlayerState,
    pub outcome: OutcomeKind,
    /// Clue HTML for `state.level`; empty when that level has no definition.
    pub clue: String,
    /// Who the scanned code resolved to, if anyone.
    pub target: Option<PlayerId>,
    /// Metal gained during this step, by grant or by grab.
    pub gained: Option<Metal>,
}

impl StepOutcome {
    pub fn message(&self) -> &'static str {
        self.outcome.message()
    }
}
