//! File-backed action log.

use std::path::Path;
use std::sync::Mutex;

use hunt_core::PlayerId;

use super::FileRepository;
use crate::repository::types::{newest_first, sort_oldest_first};
use crate::repository::{ActionLogEntry, ActionLogRepository, RepositoryError, Result};

/// Action log stored as `actions.log` frames through [`FileRepository`].
///
/// Every append is flushed before returning so a crash loses no evaluated
/// scan. An entry torn by a crash mid-append is dropped when the log is
/// reopened. Queries read the file from the start.
pub struct FileActionLog {
    log: Mutex<FileRepository<ActionLogEntry>>,
}

impl FileActionLog {
    const FILE_NAME: &'static str = "actions.log";

    pub fn open(base_dir: impl AsRef<Path>) -> Result<Self> {
        let log = FileRepository::open_or_create(base_dir, Self::FILE_NAME)?;
        Ok(Self {
            log: Mutex::new(log),
        })
    }

    fn read_all(&self) -> Result<Vec<ActionLogEntry>> {
        let mut log = self.log.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        log.read_all()
    }
}

impl ActionLogRepository for FileActionLog {
    fn append(&self, entry: &ActionLogEntry) -> Result<()> {
        let mut log = self.log.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        log.append(entry)?;
        log.flush()?;

        tracing::debug!(
            player = %entry.player_id,
            "appended {} to {}",
            entry.outcome,
            log.name()
        );
        Ok(())
    }

    fn entries_for(&self, player_id: &PlayerId) -> Result<Vec<ActionLogEntry>> {
        let mut entries: Vec<ActionLogEntry> = self
            .read_all()?
            .into_iter()
            .filter(|entry| &entry.player_id == player_id)
            .collect();
        sort_oldest_first(&mut entries);
        Ok(entries)
    }

    fn recent(&self, limit: usize) -> Result<Vec<ActionLogEntry>> {
        Ok(newest_first(self.read_all()?, limit))
    }
}
