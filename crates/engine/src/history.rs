//! Linear undo/redo log over full seat-layout snapshots.
//!
//! The log is a sequence of snapshots and a cursor. The cursor names the
//! snapshot the next undo restores; `None` means nothing is undoable.
//! Recording after an undo drops every entry beyond the cursor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::snapshot::Snapshot;

pub const DEFAULT_MAX_ENTRIES: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryAction {
    #[default]
    SeatArrangement,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub action: HistoryAction,
    #[serde(rename = "data")]
    pub snapshot: Snapshot,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            action: HistoryAction::SeatArrangement,
            snapshot,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
    max_entries: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_entries: Some(DEFAULT_MAX_ENTRIES),
        }
    }

    /// Cap the number of retained entries. `None` keeps everything.
    pub fn with_limit(mut self, max_entries: Option<usize>) -> Self {
        self.max_entries = max_entries.map(|n| n.max(1));
        self.enforce_limit();
        self
    }

    /// Log seeded with the starting layout. The seed is stored but the
    /// cursor sits before it, so the first undo does nothing.
    pub fn cold_start(initial: Snapshot) -> Self {
        let mut history = Self::new();
        history.seed(initial);
        history
    }

    pub(crate) fn seed(&mut self, initial: Snapshot) {
        self.entries.clear();
        self.record(initial);
        self.cursor = None;
    }

    /// Rebuild a log from stored entries and a stored index (`-1` for none).
    /// Out-of-range indices are clamped.
    pub fn from_parts(entries: Vec<HistoryEntry>, index: i64, max_entries: Option<usize>) -> Self {
        let cursor = if index < 0 || entries.is_empty() {
            None
        } else {
            let last = entries.len() - 1;
            let index = index as usize;
            if index > last {
                log::warn!("history: cursor {index} beyond {} entries, clamped", entries.len());
            }
            Some(index.min(last))
        };
        let mut history = Self {
            entries,
            cursor,
            max_entries: None,
        };
        history.max_entries = max_entries.map(|n| n.max(1));
        history.enforce_limit();
        history
    }

    /// Record a pre-mutation snapshot. Truncates any redo tail first.
    pub fn record(&mut self, snapshot: Snapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(HistoryEntry::new(snapshot));
        self.cursor = Some(self.entries.len() - 1);
        self.enforce_limit();
    }

    fn enforce_limit(&mut self) {
        let Some(max) = self.max_entries else { return };
        if self.entries.len() <= max {
            return;
        }
        let excess = self.entries.len() - max;
        self.entries.drain(..excess);
        self.cursor = self.cursor.and_then(|c| c.checked_sub(excess));
    }

    /// The snapshot the next undo would restore, without moving the cursor.
    pub fn peek_undo(&self) -> Option<&Snapshot> {
        self.cursor.map(|c| &self.entries[c].snapshot)
    }

    /// The snapshot the next redo would restore, without moving the cursor.
    pub fn peek_redo(&self) -> Option<&Snapshot> {
        let next = self.cursor.map_or(0, |c| c + 1);
        self.entries.get(next).map(|e| &e.snapshot)
    }

    /// Step back. Returns the snapshot that should become live state,
    /// or `None` when already at the oldest state.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let c = self.cursor?;
        self.cursor = c.checked_sub(1);
        Some(&self.entries[c].snapshot)
    }

    /// Step forward. Returns the snapshot that should become live state,
    /// or `None` when already at the newest entry.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= self.entries.len() {
            return None;
        }
        self.cursor = Some(next);
        Some(&self.entries[next].snapshot)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.map_or(0, |c| c + 1) < self.entries.len()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Cursor as stored in the persistence bundle: `-1` when nothing is undoable.
    pub fn index(&self) -> i64 {
        self.cursor.map_or(-1, |c| c as i64)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}
