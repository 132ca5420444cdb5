//! File-based PlayerRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use hunt_core::{PlayerId, PlayerProfile, PlayerState};

use crate::repository::{PlayerRecord, PlayerRepository, PlayerTable, RepositoryError, Result};

/// File-based implementation of PlayerRepository.
///
/// The whole table is held in memory and rewritten to `players.json` after
/// every mutation (pretty JSON, temp file then atomic rename). Reads never
/// touch the disk. A failed write leaves the in-memory table untouched.
pub struct FilePlayerRepository {
    path: PathBuf,
    table: RwLock<PlayerTable>,
}

impl FilePlayerRepository {
    const FILE_NAME: &'static str = "players.json";

    /// Opens the table in `base_dir`, starting empty if no file exists.
    pub fn open(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir).map_err(RepositoryError::Io)?;
        let path = base_dir.join(Self::FILE_NAME);

        let table = if path.exists() {
            let json = fs::read_to_string(&path).map_err(RepositoryError::Io)?;
            let records: Vec<PlayerRecord> =
                serde_json::from_str(&json).map_err(|e| RepositoryError::Json(e.to_string()))?;
            tracing::info!("Loaded {} players from {}", records.len(), path.display());
            PlayerTable::from_records(records)?
        } else {
            PlayerTable::new()
        };

        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    fn save(&self, table: &PlayerTable) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(&table.records())
            .map_err(|e| RepositoryError::Json(e.to_string()))?;
        fs::write(&temp_path, json).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved {} players to {}", table.len(), self.path.display());
        Ok(())
    }

    /// Applies `change` to a copy of the table, persists the copy, and only
    /// then swaps it in.
    fn mutate<R>(&self, change: impl FnOnce(&mut PlayerTable) -> Result<R>) -> Result<R> {
        let mut table = self
            .table
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut next = table.clone();
        let result = change(&mut next)?;
        self.save(&next)?;
        *table = next;
        Ok(result)
    }
}

impl PlayerRepository for FilePlayerRepository {
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
        self.mutate(|table| table.create(token, profile, state))
    }

    fn update_state(&self, player_id: &PlayerId, state: &PlayerState) -> Result<()> {
        self.mutate(|table| table.update_state(player_id, state))
    }

    fn update_profile(&self, profile: &PlayerProfile) -> Result<()> {
        self.mutate(|table| table.update_profile(profile))
    }

    fn rebind_token(&self, player_id: &PlayerId, token: &str) -> Result<()> {
        self.mutate(|table| table.rebind_token(player_id, token))
    }

    fn unbind_token(&self, token: &str) -> Result<bool> {
        self.mutate(|table| Ok(table.unbind_token(token)))
    }

    fn list(&self) -> Result<Vec<PlayerRecord>> {
        let table = self
            .table
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(table.records())
    }
}
