//! File-based repository implementations.

mod action_log;
mod config;
mod log;
mod players;

pub use action_log::FileActionLog;
pub use config::FileConfigStore;
pub use log::FileRepository;
pub use players::FilePlayerRepository;
