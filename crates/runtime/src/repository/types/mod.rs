//! Records persisted by the repositories.

mod action_log;
mod config;
mod player;

pub use action_log::ActionLogEntry;
pub(crate) use action_log::{newest_first, sort_oldest_first};
pub use config::{BLOB_FORMAT_VERSION, BLOB_MAGIC, ConfigKey, decode_blob, encode_blob};
pub use player::{PlayerRecord, PlayerTable};
