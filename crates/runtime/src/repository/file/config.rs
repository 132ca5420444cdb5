//! File-based ConfigStore implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::{ConfigKey, ConfigStore, RepositoryError, Result};

/// File-based implementation of ConfigStore.
///
/// Each key lives in its own `config_{key}.bin`, written through a temp file
/// and an atomic rename so a reader never sees a half-written blob.
pub struct FileConfigStore {
    base_dir: PathBuf,
}

impl FileConfigStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    fn blob_path(&self, key: ConfigKey) -> PathBuf {
        self.base_dir.join(format!("config_{}.bin", key))
    }
}

impl ConfigStore for FileConfigStore {
    fn read_blob(&self, key: ConfigKey) -> Result<Option<Vec<u8>>> {
        let path = self.blob_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        tracing::debug!("Read {} bytes of '{}' from {}", bytes.len(), key, path.display());
        Ok(Some(bytes))
    }

    fn write_blob(&self, key: ConfigKey, bytes: &[u8]) -> Result<()> {
        let path = self.blob_path(key);
        let temp_path = path.with_extension("bin.tmp");

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Wrote '{}' to {}", key, path.display());
        Ok(())
    }

    fn insert_if_absent(&self, key: ConfigKey, bytes: &[u8]) -> Result<bool> {
        if self.blob_path(key).exists() {
            return Ok(false);
        }
        self.write_blob(key, bytes)?;
        Ok(true)
    }
}
