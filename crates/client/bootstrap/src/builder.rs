//! Builds the game service and storage backends used by front-ends.
use std::sync::Arc;

use anyhow::{Context, Result};
use hunt_content::{ContentFactory, DefaultContent};
use hunt_core::GameRules;
use hunt_runtime::{
    FileActionLog, FileConfigStore, FilePlayerRepository, GameService, InMemoryActionLog,
    InMemoryConfigStore, InMemoryPlayerRepository,
};

use crate::config::{HuntConfig, StorageBackend};

/// Builder that assembles storage, content and the game service for clients.
pub struct ServiceBuilder {
    config: HuntConfig,
}

impl ServiceBuilder {
    pub fn new(config: HuntConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<ServiceSetup> {
        let (rules, content) = self.load_content()?;

        let mut builder = GameService::builder()
            .rules(rules)
            .cache_ttl(self.config.cache_ttl)
            .seed_content(content);

        builder = match self.config.storage {
            StorageBackend::Memory => builder
                .config_store(Arc::new(InMemoryConfigStore::new()))
                .players(Arc::new(InMemoryPlayerRepository::new()))
                .actions(Arc::new(InMemoryActionLog::new())),
            StorageBackend::File => {
                let dir = &self.config.data_dir;
                builder
                    .config_store(Arc::new(FileConfigStore::new(dir).with_context(|| {
                        format!("Failed to open config store in {}", dir.display())
                    })?))
                    .players(Arc::new(FilePlayerRepository::open(dir).with_context(
                        || format!("Failed to open players in {}", dir.display()),
                    )?))
                    .actions(Arc::new(FileActionLog::open(dir).with_context(|| {
                        format!("Failed to open action log in {}", dir.display())
                    })?))
            }
        };

        let service = builder.build().context("Failed to build game service")?;
        tracing::info!(
            "Game service ready: storage={}, data_dir={}, cache_ttl={:?}",
            self.config.storage,
            self.config.data_dir.display(),
            self.config.cache_ttl
        );

        Ok(ServiceSetup {
            config: self.config,
            service,
        })
    }

    /// Rules and seed content, from the content directory when one is set.
    fn load_content(&self) -> Result<(GameRules, DefaultContent)> {
        let Some(dir) = &self.config.content_dir else {
            return Ok((DefaultContent::rules()?, DefaultContent::load()?));
        };

        let factory = ContentFactory::new(dir);
        let rules = factory.load_rules()?;
        let content = DefaultContent {
            levels: factory.load_levels()?,
            survey: factory.load_survey()?,
            directory: factory.load_directory()?,
        };
        tracing::info!("Loaded hunt content from {}", dir.display());
        Ok((rules, content))
    }
}

pub struct ServiceSetup {
    pub config: HuntConfig,
    pub service: GameService,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(dir: &TempDir, storage: StorageBackend) -> HuntConfig {
        HuntConfig {
            data_dir: dir.path().to_path_buf(),
            storage,
            ..HuntConfig::default()
        }
    }

    #[test]
    fn memory_backend_seeds_builtin_content() {
        let dir = TempDir::new().unwrap();
        let setup = ServiceBuilder::new(config(&dir, StorageBackend::Memory))
            .build()
            .unwrap();

        let badge = setup.service.check_badge("qr-cauldron").unwrap();
        assert_eq!(badge.display_name, "The Cauldron");
        assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[test]
    fn file_backend_writes_into_data_dir() {
        let dir = TempDir::new().unwrap();
        ServiceBuilder::new(config(&dir, StorageBackend::File))
            .build()
            .unwrap();

        assert!(dir.path().join("config_questions.bin").exists());
        assert!(dir.path().join("config_directory.bin").exists());
    }

    #[test]
    fn content_dir_replaces_builtin_content() {
        let data = TempDir::new().unwrap();
        let content = TempDir::new().unwrap();
        fs::write(
            content.path().join("levels.ron"),
            r#"(levels: [(level_id: 1, clue_html: "only level", kind: Wildcard)])"#,
        )
        .unwrap();
        fs::write(content.path().join("survey.ron"), "(questions: [])").unwrap();
        fs::write(
            content.path().join("directory.ron"),
            r#"(entries: [(player_id: "solo", scan_code: "qr-solo", display_name: "Solo", suit: Hearts, rank: 1)])"#,
        )
        .unwrap();

        let mut config = config(&data, StorageBackend::Memory);
        config.content_dir = Some(content.path().to_path_buf());
        let setup = ServiceBuilder::new(config).build().unwrap();

        assert!(setup.service.check_badge("qr-cauldron").is_err());
        assert_eq!(setup.service.check_badge("qr-solo").unwrap().display_name, "Solo");
        assert_eq!(setup.service.rules(), &GameRules::default());
    }

    #[test]
    fn broken_content_dir_fails() {
        let data = TempDir::new().unwrap();
        let mut config = config(&data, StorageBackend::Memory);
        config.content_dir = Some(data.path().join("missing"));
        assert!(ServiceBuilder::new(config).build().is_err());
    }
}
