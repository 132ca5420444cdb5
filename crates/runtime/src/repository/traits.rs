//! Repository contracts for configuration, players and the action log.

use hunt_core::{PlayerId, PlayerProfile, PlayerState};

use super::Result;
use super::types::{ActionLogEntry, ConfigKey, PlayerRecord};

/// Durable key/value storage of the configuration blobs.
///
/// Values are opaque bytes here; [`encode_blob`](super::encode_blob) and
/// [`decode_blob`](super::decode_blob) give them meaning. A blob read back
/// must be byte-identical to the one written.
pub trait ConfigStore: Send + Sync {
    /// Returns the stored blob, or `None` if the key was never written.
    fn read_blob(&self, key: ConfigKey) -> Result<Option<Vec<u8>>>;

    /// Stores `bytes` under `key`, replacing any previous value.
    fn write_blob(&self, key: ConfigKey, bytes: &[u8]) -> Result<()>;

    /// Stores `bytes` only if `key` holds nothing yet.
    ///
    /// Returns `true` if the blob was written.
    fn insert_if_absent(&self, key: ConfigKey, bytes: &[u8]) -> Result<bool>;
}

/// Durable storage of players and their session bindings.
///
/// A player is keyed by [`PlayerId`] and reachable through at most one
/// session token. Binding a token to a player drops whatever that player was
/// bound to before, and unbinds the token from anyone else holding it.
pub trait PlayerRepository: Send + Sync {
    fn by_token(&self, token: &str) -> Result<Option<PlayerRecord>>;

    fn by_player_id(&self, player_id: &PlayerId) -> Result<Option<PlayerRecord>>;

    /// Creates a player bound to `token`.
    ///
    /// Fails with `PlayerAlreadyExists` if the id is taken.
    fn create(&self, token: &str, profile: PlayerProfile, state: PlayerState) -> Result<()>;

    fn update_state(&self, player_id: &PlayerId, state: &PlayerState) -> Result<()>;

    /// Replaces the profile stored under `profile.player_id`.
    fn update_profile(&self, profile: &PlayerProfile) -> Result<()>;

    /// Binds `token` to an existing player, invalidating their old token.
    fn rebind_token(&self, player_id: &PlayerId, token: &str) -> Result<()>;

    /// Removes the binding for `token`. Returns `false` if it was not bound.
    fn unbind_token(&self, token: &str) -> Result<bool>;

    /// All players, ordered by id.
    fn list(&self) -> Result<Vec<PlayerRecord>>;
}

/// Append-only record of every evaluated scan.
pub trait ActionLogRepository: Send + Sync {
    fn append(&self, entry: &ActionLogEntry) -> Result<()>;

    /// Entries for one player, oldest first.
    fn entries_for(&self, player_id: &PlayerId) -> Result<Vec<ActionLogEntry>>;

    /// Up to `limit` entries across all players, newest first.
    fn recent(&self, limit: usize) -> Result<Vec<ActionLogEntry>>;
}
