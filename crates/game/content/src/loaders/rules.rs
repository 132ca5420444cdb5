//! Game rules loader.

use std::path::Path;

use hunt_core::GameRules;

use crate::loaders::{LoadResult, read_file};

/// Loader for game rules from TOML files.
///
/// Fields missing from the file keep their reference values.
pub struct RulesLoader;

impl RulesLoader {
    /// Load rules from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing GameRules
    pub fn load(path: &Path) -> LoadResult<GameRules> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameRules> {
        let rules: GameRules = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;

        if rules.starting_level < 1 {
            anyhow::bail!("starting level {} must be at least 1", rules.starting_level);
        }
        if rules.grab_level <= rules.starting_level || rules.grab_level >= rules.final_level {
            anyhow::bail!(
                "grab level {} must lie between starting level {} and final level {}",
                rules.grab_level,
                rules.starting_level,
                rules.final_level
            );
        }
        if rules.starting_lives <= 0 {
            anyhow::bail!("starting lives must be positive");
        }

        for window in &rules.grant_windows {
            let [first, second] = window.pair;
            if first == second {
                anyhow::bail!("grant window pairs {} with itself", first);
            }
            for chance in &window.chances {
                if chance.percent > 100 {
                    anyhow::bail!(
                        "grant chance at level {} is {}%, above 100",
                        chance.level,
                        chance.percent
                    );
                }
                if chance.level < rules.starting_level || chance.level >= rules.final_level {
                    anyhow::bail!(
                        "grant at level {} is outside levels {}..{}",
                        chance.level,
                        rules.starting_level,
                        rules.final_level
                    );
                }
            }
        }

        Ok(rules)
    }
}
