//! Level definitions and the oracle that serves them.

use std::collections::BTreeSet;

use crate::state::PlayerId;

/// How a scan is judged at a given level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelKind {
    /// Correct iff the scanned code resolves to one of these players.
    RosterMatch { expected_scanners: BTreeSet<PlayerId> },
    /// Correct iff the scanned player answered `question_id` with
    /// `expected_answer`. Blank answers count as `false`.
    SurveyMatch {
        question_id: u32,
        expected_answer: bool,
    },
    /// Any scan is correct.
    Wildcard,
}

impl LevelKind {
    pub fn roster<I, P>(players: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PlayerId>,
    {
        LevelKind::RosterMatch {
            expected_scanners: players.into_iter().map(Into::into).collect(),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            LevelKind::RosterMatch { .. } => "roster_match",
            LevelKind::SurveyMatch { .. } => "survey_match",
            LevelKind::Wildcard => "wildcard",
        }
    }
}

/// One challenge in the fixed sequence of the hunt.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelDefinition {
    pub level_id: i64,
    /// HTML shown to a player standing at this level.
    pub clue_html: String,
    pub kind: LevelKind,
}

impl LevelDefinition {
    pub fn new(level_id: i64, clue_html: impl Into<String>, kind: LevelKind) -> Self {
        Self {
            level_id,
            clue_html: clue_html.into(),
            kind,
        }
    }
}

/// The full question set, as stored under the `questions` config key.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelTable {
    pub levels: Vec<LevelDefinition>,
}

impl LevelTable {
    pub fn new(levels: Vec<LevelDefinition>) -> Self {
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Read access to level definitions.
pub trait LevelOracle: Send + Sync {
    /// Returns the definition for `level`, if one is configured.
    fn level(&self, level: i64) -> Option<&LevelDefinition>;

    /// Clue HTML for `level`; empty when the level has no definition
    /// (eliminated players, levels past the table).
    fn clue(&self, level: i64) -> &str {
        self.level(level)
            .map(|definition| definition.clue_html.as_str())
            .unwrap_or("")
    }
}

impl LevelOracle for LevelTable {
    fn level(&self, level: i64) -> Option<&LevelDefinition> {
        self.levels
            .iter()
            .find(|definition| definition.level_id == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clue_is_empty_outside_the_table() {
        let table = LevelTable::new(vec![
            LevelDefinition::new(1, "find a friend", LevelKind::Wildcard),
            LevelDefinition::new(2, "find p2", LevelKind::roster(["p2"])),
        ]);

        assert_eq!(table.clue(2), "find p2");
        assert_eq!(table.clue(-1), "");
        assert_eq!(table.clue(99), "");
        assert_eq!(table.level(2).map(|l| l.kind.as_str()), Some("roster_match"));
    }
}
