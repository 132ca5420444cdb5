//! Scan-code directory and its bidirectional index.
//!
//! The [`DirectorySet`] is the stored form (a flat list of badges). The
//! [`Directory`] is derived from it in full whenever the set changes and
//! answers lookups in both directions in O(1).

use std::collections::HashMap;

use crate::state::PlayerId;

/// Playing-card suit printed on a badge.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CardSuit {
    #[default]
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

/// One badge: who (or what) carries a given scan code.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanDirectoryEntry {
    pub player_id: PlayerId,
    pub scan_code: String,
    pub display_name: String,
    pub suit: CardSuit,
    /// Card rank, 1 (ace) through 13 (king).
    pub rank: u8,
}

impl ScanDirectoryEntry {
    pub fn new(
        player_id: impl Into<PlayerId>,
        scan_code: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            player_id: player_id.into(),
            scan_code: scan_code.into(),
            display_name: display_name.into(),
            suit: CardSuit::default(),
            rank: 1,
        }
    }

    pub fn with_card(mut self, suit: CardSuit, rank: u8) -> Self {
        self.suit = suit;
        self.rank = rank;
        self
    }
}

/// The directory, as stored under the `directory` config key.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectorySet {
    pub entries: Vec<ScanDirectoryEntry>,
}

impl DirectorySet {
    pub fn new(entries: Vec<ScanDirectoryEntry>) -> Self {
        Self { entries }
    }
}

/// Rejections raised while indexing a [`DirectorySet`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("scan code '{0}' appears on more than one badge")]
    DuplicateScanCode(String),

    #[error("player '{0}' has more than one badge")]
    DuplicatePlayerId(PlayerId),
}

/// Lookup of directory entries by scan code or by player id.
pub trait DirectoryOracle: Send + Sync {
    fn by_code(&self, scan_code: &str) -> Option<&ScanDirectoryEntry>;

    fn by_player_id(&self, player_id: &PlayerId) -> Option<&ScanDirectoryEntry>;
}

/// Bidirectional index over a [`DirectorySet`].
///
/// Built in one pass and never patched: every entry of the set is reachable
/// through both indices, or construction fails.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    set: DirectorySet,
    by_code: HashMap<String, usize>,
    by_player: HashMap<PlayerId, usize>,
}

impl Directory {
    pub fn build(set: DirectorySet) -> Result<Self, DirectoryError> {
        let mut by_code = HashMap::with_capacity(set.entries.len());
        let mut by_player = HashMap::with_capacity(set.entries.len());

        for (index, entry) in set.entries.iter().enumerate() {
            if by_code.insert(entry.scan_code.clone(), index).is_some() {
                return Err(DirectoryError::DuplicateScanCode(entry.scan_code.clone()));
            }
            if by_player.insert(entry.player_id.clone(), index).is_some() {
                return Err(DirectoryError::DuplicatePlayerId(entry.player_id.clone()));
            }
        }

        Ok(Self {
            set,
            by_code,
            by_player,
        })
    }

    /// The set this index was built from.
    pub fn set(&self) -> &DirectorySet {
        &self.set
    }

    pub fn entries(&self) -> &[ScanDirectoryEntry] {
        &self.set.entries
    }

    pub fn len(&self) -> usize {
        self.set.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.entries.is_empty()
    }
}

impl DirectoryOracle for Directory {
    fn by_code(&self, scan_code: &str) -> Option<&ScanDirectoryEntry> {
        self.by_code
            .get(scan_code)
            .and_then(|index| self.set.entries.get(*index))
    }

    fn by_player_id(&self, player_id: &PlayerId) -> Option<&ScanDirectoryEntry> {
        self.by_player
            .get(player_id)
            .and_then(|index| self.set.entries.get(*index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DirectorySet {
        DirectorySet::new(vec![
            ScanDirectoryEntry::new("p1", "code-1", "Ada").with_card(CardSuit::Hearts, 12),
            ScanDirectoryEntry::new("p2", "code-2", "Brian"),
            ScanDirectoryEntry::new("cauldron", "code-c", "The Cauldron"),
        ])
    }

    #[test]
    fn every_entry_is_reachable_both_ways() {
        let directory = Directory::build(sample()).unwrap();

        for entry in directory.entries() {
            assert_eq!(directory.by_code(&entry.scan_code), Some(entry));
            assert_eq!(directory.by_player_id(&entry.player_id), Some(entry));
        }
        assert_eq!(directory.len(), 3);
    }

    #[test]
    fn unknown_lookups_miss() {
        let directory = Directory::build(sample()).unwrap();
        assert!(directory.by_code("code-9").is_none());
        assert!(directory.by_player_id(&PlayerId::from("p9")).is_none());
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let mut set = sample();
        set.entries
            .push(ScanDirectoryEntry::new("p4", "code-1", "Copycat"));

        assert_eq!(
            Directory::build(set).unwrap_err(),
            DirectoryError::DuplicateScanCode("code-1".into())
        );
    }

    #[test]
    fn duplicate_players_are_rejected() {
        let mut set = sample();
        set.entries.push(ScanDirectoryEntry::new("p2", "code-x", "Brian again"));

        assert_eq!(
            Directory::build(set).unwrap_err(),
            DirectoryError::DuplicatePlayerId(PlayerId::from("p2"))
        );
    }
}
