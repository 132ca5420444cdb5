//! In-memory action log.

use std::sync::RwLock;

use hunt_core::PlayerId;

use crate::repository::types::{newest_first, sort_oldest_first};
use crate::repository::{ActionLogEntry, ActionLogRepository, RepositoryError, Result};

/// In-memory implementation of ActionLogRepository.
///
/// Entries are kept in append order.
#[derive(Default)]
pub struct InMemoryActionLog {
    entries: RwLock<Vec<ActionLogEntry>>,
}

impl InMemoryActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ActionLogRepository for InMemoryActionLog {
    fn append(&self, entry: &ActionLogEntry) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        entries.push(entry.clone());
        Ok(())
    }

    fn entries_for(&self, player_id: &PlayerId) -> Result<Vec<ActionLogEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut matching: Vec<ActionLogEntry> = entries
            .iter()
            .filter(|entry| &entry.player_id == player_id)
            .cloned()
            .collect();
        sort_oldest_first(&mut matching);
        Ok(matching)
    }

    fn recent(&self, limit: usize) -> Result<Vec<ActionLogEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(newest_first(entries.clone(), limit))
    }
}
