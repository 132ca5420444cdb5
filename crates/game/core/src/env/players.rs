//! Read-only view of other players, used by the interaction levels.

use std::collections::BTreeMap;

use super::OracleError;
use crate::state::{PlayerId, PlayerProfile, PlayerState};

/// A point-in-time copy of one player's profile and progression.
///
/// Snapshots are taken without locking the player's record, so a concurrent
/// scan by that player may already have moved them on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSnapshot {
    pub profile: PlayerProfile,
    pub state: PlayerState,
}

impl PlayerSnapshot {
    pub fn new(profile: PlayerProfile, state: PlayerState) -> Self {
        Self { profile, state }
    }
}

/// Lookup of third-party players by id.
///
/// `Ok(None)` means the player has never registered; `Err` means the lookup
/// itself failed.
pub trait PlayerOracle: Send + Sync {
    fn snapshot(&self, player_id: &PlayerId) -> Result<Option<PlayerSnapshot>, OracleError>;
}

impl PlayerOracle for BTreeMap<PlayerId, PlayerSnapshot> {
    fn snapshot(&self, player_id: &PlayerId) -> Result<Option<PlayerSnapshot>, OracleError> {
        Ok(self.get(player_id).cloned())
    }
}
