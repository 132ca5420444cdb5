//! Game rules: level bounds, starting values and metal-grant windows.

use crate::state::Metal;

/// One level inside a grant window and the percent chance (0..=100) that a
/// player reaching it receives a metal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrantChance {
    pub level: i64,
    pub percent: u32,
}

impl GrantChance {
    pub const fn new(level: i64, percent: u32) -> Self {
        Self { level, percent }
    }
}

/// A run of consecutive levels in which a player lacking both metals of
/// `pair` may be handed one of them.
///
/// The last chance of the window should be 100 so the grant is guaranteed
/// before the grab phase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrantWindow {
    pub pair: [Metal; 2],
    pub chances: Vec<GrantChance>,
}

impl GrantWindow {
    /// Returns the percent chance for `level`, or `None` if the level is
    /// outside this window.
    pub fn chance_at(&self, level: i64) -> Option<u32> {
        self.chances
            .iter()
            .find(|chance| chance.level == level)
            .map(|chance| chance.percent)
    }
}

/// Tunable rules of the hunt.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameRules {
    /// Level at which a player has won. Terminal.
    pub final_level: i64,
    /// Level at which players take metals from each other instead of
    /// answering a question.
    pub grab_level: i64,
    pub starting_level: i64,
    pub starting_lives: i64,
    pub grant_windows: Vec<GrantWindow>,
}

impl GameRules {
    /// Level value marking an eliminated player.
    pub const DEAD_LEVEL: i64 = -1;

    // ===== reference configuration =====
    pub const DEFAULT_FINAL_LEVEL: i64 = 22;
    pub const DEFAULT_GRAB_LEVEL: i64 = 20;
    pub const DEFAULT_STARTING_LEVEL: i64 = 1;
    pub const DEFAULT_STARTING_LIVES: i64 = 5;

    pub fn new() -> Self {
        Self {
            final_level: Self::DEFAULT_FINAL_LEVEL,
            grab_level: Self::DEFAULT_GRAB_LEVEL,
            starting_level: Self::DEFAULT_STARTING_LEVEL,
            starting_lives: Self::DEFAULT_STARTING_LIVES,
            grant_windows: vec![
                GrantWindow {
                    pair: [Metal::Aluminium, Metal::Copper],
                    chances: vec![
                        GrantChance::new(8, 60),
                        GrantChance::new(9, 30),
                        GrantChance::new(10, 100),
                    ],
                },
                GrantWindow {
                    pair: [Metal::Tin, Metal::Zinc],
                    chances: vec![
                        GrantChance::new(18, 60),
                        GrantChance::new(19, 30),
                        GrantChance::new(20, 100),
                    ],
                },
            ],
        }
    }

    /// True for levels evaluated against a [`LevelDefinition`](crate::LevelDefinition).
    pub fn is_question_level(&self, level: i64) -> bool {
        level >= self.starting_level && level < self.final_level && level != self.grab_level
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_windows_end_in_a_guaranteed_grant() {
        let rules = GameRules::default();
        assert_eq!(rules.grant_windows.len(), 2);
        assert_eq!(rules.grant_windows[0].chance_at(10), Some(100));
        assert_eq!(rules.grant_windows[1].chance_at(20), Some(100));
        assert_eq!(rules.grant_windows[0].chance_at(11), None);
    }

    #[test]
    fn question_levels_skip_grab_and_final() {
        let rules = GameRules::default();
        assert!(rules.is_question_level(1));
        assert!(rules.is_question_level(19));
        assert!(rules.is_question_level(21));
        assert!(!rules.is_question_level(20));
        assert!(!rules.is_question_level(22));
        assert!(!rules.is_question_level(0));
        assert!(!rules.is_question_level(GameRules::DEAD_LEVEL));
    }
}
