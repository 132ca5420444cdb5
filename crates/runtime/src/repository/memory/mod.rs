//! In-memory repository implementations for testing and development.

mod action_log;
mod config;
mod players;

pub use action_log::InMemoryActionLog;
pub use config::InMemoryConfigStore;
pub use players::InMemoryPlayerRepository;
