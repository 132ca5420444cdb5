//! In-memory PlayerRepository implementation for tests and local runs.

use std::sync::RwLock;

use hunt_core::{PlayerId, PlayerProfile, PlayerState};

use crate::repository::{PlayerRecord, PlayerRepository, PlayerTable, RepositoryError, Result};

/// In-memory implementation of PlayerRepository.
#[derive(Default)]
pub struct InMemoryPlayerRepository {
    table: RwLock<PlayerTable>,
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerRepository for InMemoryPlayerRepository {
    fn by_token(&self, token: &str) -> Result<Option<PlayerRecord>> {
        let table = self
            .table
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(table.by_token(token).cloned())
    }

    fn by_player_id(&self, player_id: &PlayerId) -> Result<Option<PlayerRecord>> {
        let table = self
            .table
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(table.by_player_id(player_id).cloned())
    }

    fn create(&self, token: &str, profile: PlayerProfile, state: PlayerState) -> Result<()> {
        let mut table = self
            .table
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        table.create(token, profile, state)
    }

    fn update_state(&self, player_id: &PlayerId, state: &PlayerState) -> Result<()> {
        let mut table = self
            .table
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        table.update_state(player_id, state)
    }

    fn update_profile(&self, profile: &PlayerProfile) -> Result<()> {
        let mut table = self
            .table
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        table.update_profile(profile)
    }

    fn rebind_token(&self, player_id: &PlayerId, token: &str) -> Result<()> {
        let mut table = self
            .table
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        table.rebind_token(player_id, token)
    }

    fn unbind_token(&self, token: &str) -> Result<bool> {
        let mut table = self
            .table
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(table.unbind_token(token))
    }

    fn list(&self) -> Result<Vec<PlayerRecord>> {
        let table = self
            .table
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(table.records())
    }
}
