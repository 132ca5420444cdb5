//! Traits describing the read-only world a step runs against.
//!
//! Oracles expose level definitions, the scan-code directory, other players'
//! snapshots, and randomness. The [`Env`] aggregate bundles them so the engine
//! can access everything it needs without hard coupling to concrete storage.
mod directory;
mod error;
mod levels;
mod players;
mod rng;
mod survey;

pub use directory::{
    CardSuit, Directory, DirectoryError, DirectoryOracle, DirectorySet, ScanDirectoryEntry,
};
pub use error::OracleError;
pub use levels::{LevelDefinition, LevelKind, LevelOracle, LevelTable};
pub use players::{PlayerOracle, PlayerSnapshot};
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};
pub use survey::{SurveyKind, SurveyQuestion, SurveySet};

/// Aggregates the read-only oracles required by the progression engine.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    levels: &'a dyn LevelOracle,
    directory: &'a dyn DirectoryOracle,
    players: &'a dyn PlayerOracle,
    rng: &'a dyn RngOracle,
}

impl<'a> Env<'a> {
    pub fn new(
        levels: &'a dyn LevelOracle,
        directory: &'a dyn DirectoryOracle,
        players: &'a dyn PlayerOracle,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            levels,
            directory,
            players,
            rng,
        }
    }

    pub fn levels(&self) -> &'a dyn LevelOracle {
        self.levels
    }

    pub fn directory(&self) -> &'a dyn DirectoryOracle {
        self.directory
    }

    pub fn players(&self) -> &'a dyn PlayerOracle {
        self.players
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl core::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Env").finish_non_exhaustive()
    }
}
