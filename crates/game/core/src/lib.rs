//! Rules and data types of the QR scavenger hunt.
//!
//! `hunt-core` defines the progression state machine and the read-only world it
//! is evaluated against. It performs no I/O: storage, caching and session
//! handling live in `hunt-runtime`, which feeds the engine through the oracle
//! traits in [`env`]. Every state change flows through
//! [`engine::ProgressionEngine::step`].
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use config::{GameRules, GrantChance, GrantWindow};
pub use engine::{OutcomeKind, ProgressionEngine, StepError, StepOutcome};
pub use env::{
    CardSuit, Directory, DirectoryError, DirectoryOracle, DirectorySet, Env, LevelDefinition,
    LevelKind, LevelOracle, LevelTable, OracleError, PcgRng, PlayerOracle, PlayerSnapshot,
    RngOracle, RollContext, ScanDirectoryEntry, SurveyKind, SurveyQuestion, SurveySet,
    compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{Metal, MetalSet, PlayerId, PlayerProfile, PlayerState, SurveyAnswer};
