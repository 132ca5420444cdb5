//! Action log entry types.

use hunt_core::{Metal, OutcomeKind, PlayerId, PlayerState};
use serde::{Deserialize, Serialize};

/// One evaluated scan.
///
/// Carries enough to reconstruct the decision: who scanned what, the state
/// the step started from, and what it produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLogEntry {
    pub player_id: PlayerId,
    /// Microseconds since the Unix epoch, taken when the entry was written.
    pub timestamp_micros: i64,
    pub scanned_code: String,
    /// Who the scanned code resolved to, if anyone.
    pub target: Option<PlayerId>,
    pub outcome: OutcomeKind,
    pub prior_state: PlayerState,
    pub new_state: PlayerState,
    pub gained: Option<Metal>,
}

impl ActionLogEntry {
    /// Current wall-clock time in microseconds since the Unix epoch.
    pub fn now_micros() -> i64 {
        chrono::Utc::now().timestamp_micros()
    }
}

/// Sorts oldest first, keeping append order between equal timestamps.
pub(crate) fn sort_oldest_first(entries: &mut [ActionLogEntry]) {
    entries.sort_by_key(|entry| entry.timestamp_micros);
}

/// The `limit` newest entries, newest first.
pub(crate) fn newest_first(mut entries: Vec<ActionLogEntry>, limit: usize) -> Vec<ActionLogEntry> {
    sort_oldest_first(&mut entries);
    entries.reverse();
    entries.truncate(limit);
    entries
}
