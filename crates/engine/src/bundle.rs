//! Serializable form of the whole classroom, for the persistence layer.
//!
//! The bundle is plain data. Turning it back into a [`Classroom`] repairs
//! what it can (dangling occupants, double-seated students, cursor out of
//! range) and rejects what it cannot (bad dimensions, seat set that does
//! not match the grid).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::classroom::Classroom;
use crate::constraint::{Constraint, ConstraintList};
use crate::error::ClassroomError;
use crate::grid::{Layout, Seat, DEFAULT_COLS, DEFAULT_ROWS};
use crate::history::{History, HistoryEntry};
use crate::roster::{Roster, Student};
use crate::snapshot::Snapshot;

fn default_rows() -> usize {
    DEFAULT_ROWS
}

fn default_cols() -> usize {
    DEFAULT_COLS
}

fn default_true() -> bool {
    true
}

fn default_index() -> i64 {
    -1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomBundle {
    #[serde(default)]
    pub students: Vec<Student>,
    /// Empty means "fresh grid of `rows x cols`".
    #[serde(default)]
    pub seats: Vec<Seat>,
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    #[serde(default = "default_true")]
    pub show_coordinates: bool,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default = "default_index")]
    pub history_index: i64,
}

impl Classroom {
    pub fn to_bundle(&self) -> ClassroomBundle {
        ClassroomBundle {
            students: self.roster.students().to_vec(),
            seats: self.layout.seats().to_vec(),
            rows: self.layout.rows(),
            cols: self.layout.cols(),
            constraints: self.constraints.items().to_vec(),
            show_coordinates: self.show_coordinates,
            history: self.history.entries().to_vec(),
            history_index: self.history.index(),
        }
    }

    /// Rebuild a classroom from stored data.
    ///
    /// `max_history` caps the restored log the same way it caps a live one.
    pub fn from_bundle(bundle: ClassroomBundle, max_history: Option<usize>) -> Result<Self, ClassroomError> {
        let mut layout = if bundle.seats.is_empty() {
            Layout::new(bundle.rows, bundle.cols)?
        } else {
            Layout::from_seats(bundle.rows, bundle.cols, bundle.seats)?
        };

        let mut ids = HashSet::new();
        let mut students = Vec::with_capacity(bundle.students.len());
        for student in bundle.students {
            if student.name.trim().is_empty() {
                log::warn!("bundle: dropped student {} with empty name", student.id);
                continue;
            }
            if !ids.insert(student.id) {
                log::warn!("bundle: dropped duplicate student id {}", student.id);
                continue;
            }
            students.push(student);
        }
        let roster = Roster::from_students(students);

        let dropped = layout.retain_occupants(|id| roster.contains(id));
        if dropped > 0 {
            log::warn!("bundle: dropped {dropped} invalid seat occupants");
        }

        let (entries, index) = usable_history(bundle.history, bundle.history_index);
        let history = if entries.is_empty() {
            History::cold_start(Snapshot::capture(&layout)).with_limit(max_history)
        } else {
            History::from_parts(entries, index, max_history)
        };

        Ok(Self {
            layout,
            roster,
            history,
            constraints: ConstraintList::from_items(bundle.constraints),
            show_coordinates: bundle.show_coordinates,
        })
    }
}

/// Drop history entries whose snapshot is not a valid grid. The stored
/// index keeps pointing at the same surviving entry, or the nearest older one.
fn usable_history(entries: Vec<HistoryEntry>, index: i64) -> (Vec<HistoryEntry>, i64) {
    let mut kept = Vec::with_capacity(entries.len());
    let mut new_index = -1;
    for (i, entry) in entries.into_iter().enumerate() {
        let snapshot = &entry.snapshot;
        if let Err(e) = Layout::from_seats(snapshot.rows, snapshot.cols, snapshot.seats.clone()) {
            log::warn!("bundle: dropped history entry {i}: {e}");
            continue;
        }
        kept.push(entry);
        if (i as i64) <= index {
            new_index = kept.len() as i64 - 1;
        }
    }
    (kept, new_index)
}
