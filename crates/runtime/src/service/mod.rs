//! The caller around the progression engine.
//!
//! [`GameService`] resolves the session, runs one engine step against the
//! cached configuration, persists the returned state, and only then appends
//! the action log entry. A failure before the state is saved leaves nothing
//! behind, so the player can simply scan again.

mod builder;
mod registration;

pub use builder::GameServiceBuilder;

use std::sync::Arc;

use hunt_core::{
    DirectoryOracle, Env, GameRules, LevelOracle, PcgRng, PlayerId, ProgressionEngine,
    ScanDirectoryEntry,
};

use crate::api::{Result, RuntimeError, ScanReport};
use crate::cache::{ConfigCache, ConfigUpdate};
use crate::oracle::RepositoryPlayerOracle;
use crate::repository::{ActionLogEntry, ActionLogRepository, PlayerRecord, PlayerRepository};

/// Game operations exposed to the calling layer.
pub struct GameService {
    rules: GameRules,
    config: ConfigCache,
    players: Arc<dyn PlayerRepository>,
    actions: Arc<dyn ActionLogRepository>,
    rng: PcgRng,
}

impl GameService {
    pub fn builder() -> GameServiceBuilder {
        GameServiceBuilder::new()
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn config(&self) -> &ConfigCache {
        &self.config
    }

    /// Evaluates a scan for the player bound to `token`.
    pub fn scan(&self, token: &str, scanned_code: &str) -> Result<ScanReport> {
        self.scan_with_seed(token, scanned_code, rand::random())
    }

    /// [`scan`](Self::scan) with a caller-chosen seed, for replays and tests.
    pub fn scan_with_seed(&self, token: &str, scanned_code: &str, seed: u64) -> Result<ScanReport> {
        let record = self.session(token)?;
        let player_id = record.player_id().clone();

        let levels = self.config.levels()?;
        let directory = self.config.directory()?;
        let oracle = RepositoryPlayerOracle::new(self.players.as_ref());
        let env = Env::new(levels.as_ref(), directory.as_ref(), &oracle, &self.rng);

        let step = ProgressionEngine::new(&self.rules)
            .step(env, &record.state, scanned_code, seed)
            .inspect_err(|error| {
                tracing::info!(player = %player_id, code = scanned_code, %error, "scan rejected");
            })?;

        if let Err(error) = self.players.update_state(&player_id, &step.state) {
            tracing::warn!(player = %player_id, %error, "failed to persist step; nothing logged");
            return Err(error.into());
        }

        let entry = ActionLogEntry {
            player_id: player_id.clone(),
            timestamp_micros: ActionLogEntry::now_micros(),
            scanned_code: scanned_code.to_owned(),
            target: step.target.clone(),
            outcome: step.outcome,
            prior_state: record.state.clone(),
            new_state: step.state.clone(),
            gained: step.gained,
        };
        let logged = match self.actions.append(&entry) {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(player = %player_id, %error, "state saved but action log append failed");
                false
            }
        };

        tracing::info!(
            player = %player_id,
            code = scanned_code,
            outcome = %step.outcome,
            level = step.state.level,
            lives = step.state.lives,
            metals = %step.state.metals,
            "scan evaluated"
        );

        let target_name = step
            .target
            .as_ref()
            .and_then(|target| directory.by_player_id(target))
            .map(|entry| entry.display_name.clone());

        Ok(ScanReport {
            player_id,
            prior_state: record.state,
            step,
            target_name,
            logged,
        })
    }

    /// Clue for the level the session's player stands on. Empty for
    /// eliminated players and levels past the table.
    pub fn current_clue(&self, token: &str) -> Result<String> {
        let record = self.session(token)?;
        let levels = self.config.levels()?;
        Ok(levels.clue(record.state.level).to_owned())
    }

    /// Resolves a badge scan before any session exists.
    pub fn check_badge(&self, scan_code: &str) -> Result<ScanDirectoryEntry> {
        let directory = self.config.directory()?;
        directory
            .by_code(scan_code)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownScanCode(scan_code.to_owned()))
    }

    /// Drops the session binding. The player and their progress stay.
    pub fn logout(&self, token: &str) -> Result<()> {
        if !self.players.unbind_token(token)? {
            return Err(RuntimeError::SessionNotFound);
        }
        tracing::info!("session closed");
        Ok(())
    }

    /// The player's action log, oldest first.
    pub fn history(&self, player_id: &PlayerId) -> Result<Vec<ActionLogEntry>> {
        Ok(self.actions.entries_for(player_id)?)
    }

    /// Up to `limit` entries across all players, newest first.
    pub fn recent_actions(&self, limit: usize) -> Result<Vec<ActionLogEntry>> {
        Ok(self.actions.recent(limit)?)
    }

    /// Every player, furthest along first.
    ///
    /// Ordered by level, then remaining lives, then id. Eliminated players
    /// sink to the bottom.
    pub fn leaderboard(&self) -> Result<Vec<PlayerRecord>> {
        let mut records = self.players.list()?;
        records.sort_by(|a, b| {
            b.state
                .level
                .cmp(&a.state.level)
                .then(b.state.lives.cmp(&a.state.lives))
                .then_with(|| a.player_id().cmp(b.player_id()))
        });
        Ok(records)
    }

    /// Administrative replacement of one configuration kind.
    pub fn replace_config(&self, update: ConfigUpdate) -> Result<()> {
        self.config.set(update)
    }

    fn session(&self, token: &str) -> Result<PlayerRecord> {
        self.players
            .by_token(token)?
            .ok_or(RuntimeError::SessionNotFound)
    }
}
