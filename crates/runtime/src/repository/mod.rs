//! Repository layer for durable hunt data.
//!
//! Repositories handle data that outlives a process:
//! - Configuration blobs (level table, survey, directory)
//! - Player profiles, progression and session bindings
//! - The append-only action log
//!
//! Every contract has an in-memory implementation for tests and local runs
//! and a file-backed one for deployments.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::{FileActionLog, FileConfigStore, FilePlayerRepository, FileRepository};
pub use memory::{InMemoryActionLog, InMemoryConfigStore, InMemoryPlayerRepository};
pub use traits::{ActionLogRepository, ConfigStore, PlayerRepository};
pub use types::{
    ActionLogEntry, BLOB_FORMAT_VERSION, BLOB_MAGIC, ConfigKey, PlayerRecord, PlayerTable,
    decode_blob, encode_blob,
};
