//! Per-player progression state.
//!
//! This module owns the data a player carries through the hunt: their level,
//! remaining lives, collected metals, and profile. Runtime layers persist and
//! query these values but only the engine computes new states.
mod metal;
mod profile;

pub use metal::{Metal, MetalSet};
pub use profile::{PlayerId, PlayerProfile, SurveyAnswer};

use crate::config::GameRules;

/// Where a player stands in the hunt.
///
/// `level` is `-1` once eliminated and otherwise lies in
/// `[starting_level, final_level]`; level 0 is never reached.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub level: i64,
    pub lives: i64,
    pub metals: MetalSet,
}

impl PlayerState {
    pub fn new(level: i64, lives: i64) -> Self {
        Self {
            level,
            lives,
            metals: MetalSet::empty(),
        }
    }

    /// The state a freshly registered player starts from.
    pub fn starting(rules: &GameRules) -> Self {
        Self::new(rules.starting_level, rules.starting_lives)
    }

    pub fn with_metals(mut self, metals: impl IntoIterator<Item = Metal>) -> Self {
        self.metals = metals.into_iter().collect();
        self
    }

    pub fn is_dead(&self) -> bool {
        self.level == GameRules::DEAD_LEVEL || self.lives <= 0
    }

    pub fn is_victorious(&self, rules: &GameRules) -> bool {
        self.level == rules.final_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_state_follows_rules() {
        let state = PlayerState::starting(&GameRules::default());
        assert_eq!(state, PlayerState::new(1, 5));
        assert!(state.metals.is_empty());
        assert!(!state.is_dead());
    }

    #[test]
    fn dead_by_level_or_lives() {
        assert!(PlayerState::new(GameRules::DEAD_LEVEL, 3).is_dead());
        assert!(PlayerState::new(4, 0).is_dead());
        assert!(!PlayerState::new(4, 1).is_dead());
    }
}
