//! Time-boxed cache over the [`ConfigStore`].
//!
//! All three configuration kinds share one "last updated" timestamp. Reading
//! any kind after the TTL reloads only that kind from storage, and the reload
//! resets staleness for every kind. Configuration changes are rare admin
//! events, so this coarse invalidation is accepted.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use hunt_content::DefaultContent;
use hunt_core::{Directory, DirectorySet, LevelTable, SurveySet};

use crate::api::{Result, RuntimeError};
use crate::repository::{ConfigKey, ConfigStore, RepositoryError, decode_blob, encode_blob};

/// A cached configuration value.
#[derive(Clone, Debug)]
pub enum ConfigValue {
    Levels(Arc<LevelTable>),
    Survey(Arc<SurveySet>),
    /// Always carries a fully built index.
    Directory(Arc<Directory>),
}

impl ConfigValue {
    pub fn key(&self) -> ConfigKey {
        match self {
            ConfigValue::Levels(_) => ConfigKey::Questions,
            ConfigValue::Survey(_) => ConfigKey::Survey,
            ConfigValue::Directory(_) => ConfigKey::Directory,
        }
    }
}

/// A replacement for one configuration kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigUpdate {
    Levels(LevelTable),
    Survey(SurveySet),
    Directory(DirectorySet),
}

impl ConfigUpdate {
    pub fn key(&self) -> ConfigKey {
        match self {
            ConfigUpdate::Levels(_) => ConfigKey::Questions,
            ConfigUpdate::Survey(_) => ConfigKey::Survey,
            ConfigUpdate::Directory(_) => ConfigKey::Directory,
        }
    }
}

#[derive(Default)]
struct CacheState {
    levels: Option<Arc<LevelTable>>,
    survey: Option<Arc<SurveySet>>,
    directory: Option<Arc<Directory>>,
    last_updated: Option<Instant>,
}

impl CacheState {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.last_updated.is_some_and(|at| at.elapsed() < ttl)
    }

    fn store(&mut self, value: ConfigValue) {
        match value {
            ConfigValue::Levels(levels) => self.levels = Some(levels),
            ConfigValue::Survey(survey) => self.survey = Some(survey),
            ConfigValue::Directory(directory) => self.directory = Some(directory),
        }
        self.last_updated = Some(Instant::now());
    }
}

/// Cache of the level table, survey and directory.
pub struct ConfigCache {
    store: Arc<dyn ConfigStore>,
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl ConfigCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

    pub fn new(store: Arc<dyn ConfigStore>, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            state: RwLock::new(CacheState::default()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the value for `key`, reloading it if absent or stale.
    pub fn get(&self, key: ConfigKey) -> Result<ConfigValue> {
        match key {
            ConfigKey::Questions => self.levels().map(ConfigValue::Levels),
            ConfigKey::Survey => self.survey().map(ConfigValue::Survey),
            ConfigKey::Directory => self.directory().map(ConfigValue::Directory),
        }
    }

    pub fn levels(&self) -> Result<Arc<LevelTable>> {
        self.cached(ConfigKey::Questions, |state| state.levels.clone())
    }

    pub fn survey(&self) -> Result<Arc<SurveySet>> {
        self.cached(ConfigKey::Survey, |state| state.survey.clone())
    }

    pub fn directory(&self) -> Result<Arc<Directory>> {
        self.cached(ConfigKey::Directory, |state| state.directory.clone())
    }

    /// Replaces one kind, in memory first and then in storage.
    ///
    /// If the storage write fails the in-memory copy has already changed and
    /// the error is returned; the cache may then disagree with storage until
    /// the next reload. A directory that cannot be indexed is rejected before
    /// anything changes.
    pub fn set(&self, update: ConfigUpdate) -> Result<()> {
        let key = update.key();
        let (bytes, value) = match update {
            ConfigUpdate::Levels(levels) => (
                encode_blob(key, &levels)?,
                ConfigValue::Levels(Arc::new(levels)),
            ),
            ConfigUpdate::Survey(survey) => (
                encode_blob(key, &survey)?,
                ConfigValue::Survey(Arc::new(survey)),
            ),
            ConfigUpdate::Directory(set) => {
                let directory = Directory::build(set)?;
                (
                    encode_blob(key, directory.set())?,
                    ConfigValue::Directory(Arc::new(directory)),
                )
            }
        };

        self.state
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .store(value);

        if let Err(error) = self.store.write_blob(key, &bytes) {
            tracing::warn!(%key, %error, "config write-through failed; cache now ahead of storage");
            return Err(error.into());
        }

        tracing::info!(%key, bytes = bytes.len(), "config replaced");
        Ok(())
    }

    /// Marks every kind stale so the next read goes to storage.
    pub fn invalidate(&self) -> Result<()> {
        self.state
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .last_updated = None;
        Ok(())
    }

    /// Seeds storage with the built-in content, one key at a time, never
    /// overwriting a key that already holds a value.
    ///
    /// Returns the keys that were written.
    pub fn seed_defaults(&self, content: &DefaultContent) -> Result<Vec<ConfigKey>> {
        let blobs = [
            (ConfigKey::Questions, encode_blob(ConfigKey::Questions, &content.levels)?),
            (ConfigKey::Survey, encode_blob(ConfigKey::Survey, &content.survey)?),
            (ConfigKey::Directory, encode_blob(ConfigKey::Directory, &content.directory)?),
        ];

        let mut seeded = Vec::new();
        for (key, bytes) in blobs {
            if self.store.insert_if_absent(key, &bytes)? {
                seeded.push(key);
            }
        }

        if !seeded.is_empty() {
            tracing::info!(?seeded, "seeded default configuration");
        }
        Ok(seeded)
    }

    fn cached<T>(
        &self,
        key: ConfigKey,
        pick: impl Fn(&CacheState) -> Option<Arc<T>>,
    ) -> Result<Arc<T>> {
        {
            let state = self
                .state
                .read()
                .map_err(|_| RepositoryError::LockPoisoned)?;
            if state.is_fresh(self.ttl)
                && let Some(value) = pick(&*state)
            {
                return Ok(value);
            }
        }

        self.refresh(key)?;

        let state = self
            .state
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        pick(&*state).ok_or_else(|| RepositoryError::MissingConfig(key).into())
    }

    fn refresh(&self, key: ConfigKey) -> Result<()> {
        let bytes = self
            .store
            .read_blob(key)?
            .ok_or(RepositoryError::MissingConfig(key))?;

        let value = match key {
            ConfigKey::Questions => ConfigValue::Levels(Arc::new(decode_blob(key, &bytes)?)),
            ConfigKey::Survey => ConfigValue::Survey(Arc::new(decode_blob(key, &bytes)?)),
            ConfigKey::Directory => {
                let set: DirectorySet = decode_blob(key, &bytes)?;
                ConfigValue::Directory(Arc::new(
                    Directory::build(set).map_err(RuntimeError::InvalidDirectory)?,
                ))
            }
        };

        self.state
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .store(value);

        tracing::debug!(%key, bytes = bytes.len(), "config reloaded from storage");
        Ok(())
    }

    /// Pretends the last refresh happened `age` ago.
    #[cfg(test)]
    fn backdate(&self, age: Duration) {
        let mut state = self.state.write().unwrap();
        state.last_updated = Instant::now().checked_sub(age);
    }
}
