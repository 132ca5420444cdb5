//! Oracle adapters over runtime repositories.

use hunt_core::{OracleError, PlayerId, PlayerOracle, PlayerSnapshot};

use crate::repository::PlayerRepository;

/// Serves cross-player lookups from the same repository that stores the
/// acting player.
///
/// Snapshots are read without locking the other player's record.
pub struct RepositoryPlayerOracle<'a> {
    players: &'a dyn PlayerRepository,
}

impl<'a> RepositoryPlayerOracle<'a> {
    pub fn new(players: &'a dyn PlayerRepository) -> Self {
        Self { players }
    }
}

impl PlayerOracle for RepositoryPlayerOracle<'_> {
    fn snapshot(&self, player_id: &PlayerId) -> Result<Option<PlayerSnapshot>, OracleError> {
        self.players
            .by_player_id(player_id)
            .map(|record| record.map(|record| record.snapshot()))
            .map_err(|e| OracleError::PlayerLookup(e.to_string()))
    }
}
