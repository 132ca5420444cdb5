//! Runtime around the hunt's progression engine.
//!
//! This crate owns everything the pure engine in `hunt-core` does not:
//! durable storage, the time-boxed configuration cache, session binding, and
//! the scan pipeline that runs a step, persists it and logs it. Consumers
//! build a [`GameService`] and call it once per player request.
//!
//! Modules are organized by responsibility:
//! - [`repository`] defines storage contracts with memory and file backends
//! - [`cache`] serves configuration from memory for a bounded time
//! - [`oracle`] adapts repositories to the engine's oracle traits
//! - [`service`] hosts the scan and registration flows
//! - [`api`] exposes the error and report types clients handle
pub mod api;
pub mod cache;
pub mod oracle;
pub mod repository;
pub mod service;

pub use api::{Registration, RegistrationKind, Result, RuntimeError, ScanReport};
pub use cache::{ConfigCache, ConfigUpdate, ConfigValue};
pub use oracle::RepositoryPlayerOracle;
pub use repository::{
    ActionLogEntry, ActionLogRepository, ConfigKey, ConfigStore, FileActionLog, FileConfigStore,
    FilePlayerRepository, InMemoryActionLog, InMemoryConfigStore, InMemoryPlayerRepository,
    PlayerRecord, PlayerRepository, RepositoryError,
};
pub use service::{GameService, GameServiceBuilder};
