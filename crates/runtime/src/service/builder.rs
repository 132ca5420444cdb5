use std::sync::Arc;
use std::time::Duration;

use hunt_content::DefaultContent;
use hunt_core::{GameRules, PcgRng};

use super::GameService;
use crate::api::{Result, RuntimeError};
use crate::cache::ConfigCache;
use crate::repository::{ActionLogRepository, ConfigStore, PlayerRepository};

/// Builder for [`GameService`].
///
/// Storage backends are required; rules default to the reference rules and
/// the cache TTL to [`ConfigCache::DEFAULT_TTL`].
pub struct GameServiceBuilder {
    rules: GameRules,
    cache_ttl: Duration,
    config_store: Option<Arc<dyn ConfigStore>>,
    players: Option<Arc<dyn PlayerRepository>>,
    actions: Option<Arc<dyn ActionLogRepository>>,
    seed_content: Option<DefaultContent>,
}

impl GameServiceBuilder {
    pub fn new() -> Self {
        Self {
            rules: GameRules::default(),
            cache_ttl: ConfigCache::DEFAULT_TTL,
            config_store: None,
            players: None,
            actions: None,
            seed_content: None,
        }
    }

    pub fn rules(mut self, rules: GameRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn config_store(mut self, store: Arc<dyn ConfigStore>) -> Self {
        self.config_store = Some(store);
        self
    }

    pub fn players(mut self, players: Arc<dyn PlayerRepository>) -> Self {
        self.players = Some(players);
        self
    }

    pub fn actions(mut self, actions: Arc<dyn ActionLogRepository>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Content inserted into the config store for every key that is still
    /// empty when the service is built.
    pub fn seed_content(mut self, content: DefaultContent) -> Self {
        self.seed_content = Some(content);
        self
    }

    pub fn build(self) -> Result<GameService> {
        let store = self
            .config_store
            .ok_or(RuntimeError::MissingComponent("a config store"))?;
        let players = self
            .players
            .ok_or(RuntimeError::MissingComponent("a player repository"))?;
        let actions = self
            .actions
            .ok_or(RuntimeError::MissingComponent("an action log"))?;

        let config = ConfigCache::new(store, self.cache_ttl);
        if let Some(content) = &self.seed_content {
            config.seed_defaults(content)?;
        }

        Ok(GameService {
            rules: self.rules,
            config,
            players,
            actions,
            rng: PcgRng,
        })
    }
}

impl Default for GameServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
