//! Player records and the binding table shared by the player repositories.

use std::collections::{BTreeMap, HashMap};

use hunt_core::{PlayerId, PlayerProfile, PlayerSnapshot, PlayerState};
use serde::{Deserialize, Serialize};

use crate::repository::{RepositoryError, Result};

/// One player as stored: profile, progression, and the session token that
/// currently resolves to them (if any).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub profile: PlayerProfile,
    pub state: PlayerState,
    pub token: Option<String>,
}

impl PlayerRecord {
    pub fn new(profile: PlayerProfile, state: PlayerState, token: Option<String>) -> Self {
        Self {
            profile,
            state,
            token,
        }
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.profile.player_id
    }

    /// Read-only copy handed to the engine for cross-player levels.
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot::new(self.profile.clone(), self.state.clone())
    }
}

/// Players keyed by id plus the token index over them.
///
/// Keeps the binding invariant: a token resolves to at most one player and a
/// player holds at most one token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerTable {
    players: BTreeMap<PlayerId, PlayerRecord>,
    tokens: HashMap<String, PlayerId>,
}

impl PlayerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a table from stored records, rejecting duplicate ids or
    /// tokens.
    pub fn from_records(records: Vec<PlayerRecord>) -> Result<Self> {
        let mut table = Self::new();
        for record in records {
            let player_id = record.player_id().clone();
            if let Some(token) = &record.token
                && let Some(holder) = table.tokens.insert(token.clone(), player_id.clone())
            {
                return Err(RepositoryError::CorruptedData(format!(
                    "token bound to both '{holder}' and '{player_id}'"
                )));
            }
            if table.players.insert(player_id.clone(), record).is_some() {
                return Err(RepositoryError::CorruptedData(format!(
                    "player '{player_id}' stored twice"
                )));
            }
        }
        Ok(table)
    }

    /// All records, ordered by player id.
    pub fn records(&self) -> Vec<PlayerRecord> {
        self.players.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn by_token(&self, token: &str) -> Option<&PlayerRecord> {
        self.tokens
            .get(token)
            .and_then(|player_id| self.players.get(player_id))
    }

    pub fn by_player_id(&self, player_id: &PlayerId) -> Option<&PlayerRecord> {
        self.players.get(player_id)
    }

    pub fn create(
        &mut self,
        token: &str,
        profile: PlayerProfile,
        state: PlayerState,
    ) -> Result<()> {
        let player_id = profile.player_id.clone();
        if self.players.contains_key(&player_id) {
            return Err(RepositoryError::PlayerAlreadyExists(player_id));
        }

        self.release_token(token);
        self.tokens.insert(token.to_owned(), player_id.clone());
        self.players.insert(
            player_id,
            PlayerRecord::new(profile, state, Some(token.to_owned())),
        );
        Ok(())
    }

    pub fn update_state(&mut self, player_id: &PlayerId, state: &PlayerState) -> Result<()> {
        self.record_mut(player_id)?.state = state.clone();
        Ok(())
    }

    pub fn update_profile(&mut self, profile: &PlayerProfile) -> Result<()> {
        self.record_mut(&profile.player_id)?.profile = profile.clone();
        Ok(())
    }

    pub fn rebind_token(&mut self, player_id: &PlayerId, token: &str) -> Result<()> {
        if !self.players.contains_key(player_id) {
            return Err(RepositoryError::PlayerNotFound(player_id.clone()));
        }

        self.release_token(token);
        let record = self.record_mut(player_id)?;
        let old = record.token.replace(token.to_owned());
        if let Some(old) = old {
            self.tokens.remove(&old);
        }
        self.tokens.insert(token.to_owned(), player_id.clone());
        Ok(())
    }

    pub fn unbind_token(&mut self, token: &str) -> bool {
        self.release_token(token)
    }

    /// Detaches `token` from whoever holds it.
    fn release_token(&mut self, token: &str) -> bool {
        let Some(holder) = self.tokens.remove(token) else {
            return false;
        };
        if let Some(record) = self.players.get_mut(&holder) {
            record.token = None;
        }
        true
    }

    fn record_mut(&mut self, player_id: &PlayerId) -> Result<&mut PlayerRecord> {
        self.players
            .get_mut(player_id)
            .ok_or_else(|| RepositoryError::PlayerNotFound(player_id.clone()))
    }
}
