//! In-memory ConfigStore implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::repository::{ConfigKey, ConfigStore, RepositoryError, Result};

/// In-memory implementation of ConfigStore.
#[derive(Default)]
pub struct InMemoryConfigStore {
    blobs: RwLock<HashMap<ConfigKey, Vec<u8>>>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn read_blob(&self, key: ConfigKey) -> Result<Option<Vec<u8>>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(blobs.get(&key).cloned())
    }

    fn write_blob(&self, key: ConfigKey, bytes: &[u8]) -> Result<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        blobs.insert(key, bytes.to_vec());
        Ok(())
    }

    fn insert_if_absent(&self, key: ConfigKey, bytes: &[u8]) -> Result<bool> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        if blobs.contains_key(&key) {
            return Ok(false);
        }
        blobs.insert(key, bytes.to_vec());
        Ok(true)
    }
}
