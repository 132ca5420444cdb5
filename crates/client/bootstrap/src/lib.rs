//! Shared bootstrap utilities for hunt front-ends.
//!
//! Provides configuration loading, storage selection, and service setup that
//! can be reused by the operator console or any other front-end crate.
pub mod builder;
pub mod config;

pub use builder::{ServiceBuilder, ServiceSetup};
pub use config::{HuntConfig, StorageBackend};
