//! The classroom controller: owns the layout, roster, history and
//! settings-surface data, and runs every operation against them.
//!
//! Every seat-mutating operation captures the pre-mutation layout into the
//! history log before it changes anything. Validation happens first, so a
//! rejected operation leaves both the state and the log untouched.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arrange::{self, ArrangementSummary};
use crate::assign::{self, Placement};
use crate::constraint::{Constraint, ConstraintId, ConstraintList};
use crate::error::ClassroomError;
use crate::grid::{self, Layout, Seat, SeatId};
use crate::history::History;
use crate::import::{self, DuplicatePolicy, ImportRow, ImportSummary};
use crate::roster::{Roster, Student, StudentFields, StudentId};
use crate::snapshot::Snapshot;

/// Student list filter by seating status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentFilter {
    All,
    Seated,
    #[default]
    Unseated,
}

impl FromStr for StudentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "seated" => Ok(Self::Seated),
            "unseated" => Ok(Self::Unseated),
            other => Err(format!("unknown filter '{other}' (expected all, seated, unseated)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomStats {
    pub rows: usize,
    pub cols: usize,
    pub total_students: usize,
    pub seated_students: usize,
    pub unseated_students: usize,
    pub total_seats: usize,
    pub occupied_seats: usize,
    /// Rounded to the nearest whole percent.
    pub occupancy_percent: u32,
}

impl fmt::Display for ClassroomStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} | students {} (seated {}, unseated {}) | occupancy {}%",
            self.rows,
            self.cols,
            self.total_students,
            self.seated_students,
            self.unseated_students,
            self.occupancy_percent
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classroom {
    pub(crate) layout: Layout,
    pub(crate) roster: Roster,
    pub(crate) history: History,
    pub(crate) constraints: ConstraintList,
    pub(crate) show_coordinates: bool,
}

impl Default for Classroom {
    fn default() -> Self {
        let layout = Layout::default();
        let history = History::cold_start(Snapshot::capture(&layout));
        Self {
            layout,
            roster: Roster::new(),
            history,
            constraints: ConstraintList::new(),
            show_coordinates: true,
        }
    }
}

impl Classroom {
    pub fn new(rows: usize, cols: usize) -> Result<Self, ClassroomError> {
        let layout = Layout::new(rows, cols)?;
        let history = History::cold_start(Snapshot::capture(&layout));
        Ok(Self {
            layout,
            history,
            ..Self::default()
        })
    }

    pub fn with_history_limit(mut self, max_entries: Option<usize>) -> Self {
        self.history = std::mem::take(&mut self.history).with_limit(max_entries);
        self
    }

    pub fn with_show_coordinates(mut self, show: bool) -> Self {
        self.show_coordinates = show;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn constraints(&self) -> &[Constraint] {
        self.constraints.items()
    }

    pub fn show_coordinates(&self) -> bool {
        self.show_coordinates
    }

    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.roster.get(id)
    }

    pub fn seat_of(&self, id: StudentId) -> Option<SeatId> {
        self.layout.seat_of(id)
    }

    pub fn is_seated(&self, id: StudentId) -> bool {
        self.layout.seat_of(id).is_some()
    }

    /// Student sitting on `seat`, if any.
    pub fn student_at(&self, seat: SeatId) -> Option<&Student> {
        self.layout.occupant(seat).and_then(|id| self.roster.get(id))
    }

    pub fn stats(&self) -> ClassroomStats {
        let total_students = self.roster.len();
        let seated_students = self
            .roster
            .iter()
            .filter(|s| self.layout.seat_of(s.id).is_some())
            .count();
        let total_seats = self.layout.seat_count();
        let occupied_seats = self.layout.occupied_count();
        let occupancy_percent = if total_seats > 0 {
            ((occupied_seats as f64 / total_seats as f64) * 100.0).round() as u32
        } else {
            0
        };
        ClassroomStats {
            rows: self.layout.rows(),
            cols: self.layout.cols(),
            total_students,
            seated_students,
            unseated_students: total_students - seated_students,
            total_seats,
            occupied_seats,
            occupancy_percent,
        }
    }

    /// Students matching a status filter and a case-insensitive search over
    /// the name and details line. An empty search matches everyone.
    pub fn students_filtered(&self, filter: StudentFilter, search: &str) -> Vec<&Student> {
        let needle = search.trim().to_lowercase();
        self.roster
            .iter()
            .filter(|s| match filter {
                StudentFilter::All => true,
                StudentFilter::Seated => self.is_seated(s.id),
                StudentFilter::Unseated => !self.is_seated(s.id),
            })
            .filter(|s| {
                needle.is_empty()
                    || s.name.to_lowercase().contains(&needle)
                    || s.details().to_lowercase().contains(&needle)
            })
            .collect()
    }

    // =========================================================================
    // Roster
    // =========================================================================

    pub fn add_student(&mut self, fields: StudentFields) -> Result<StudentId, ClassroomError> {
        self.roster.add_student(fields).map(|s| s.id)
    }

    pub fn update_student(&mut self, id: StudentId, fields: StudentFields) -> Result<(), ClassroomError> {
        self.roster.update_student(id, fields).map(|_| ())
    }

    /// Unseat then delete a student. Not recorded in history.
    pub fn remove_student(&mut self, id: StudentId) -> Result<Student, ClassroomError> {
        if !self.roster.contains(id) {
            return Err(ClassroomError::StudentNotFound(id));
        }
        if let Some(seat) = self.layout.seat_of(id) {
            if let Some(slot) = self.layout.seat_mut(seat) {
                slot.occupant = None;
            }
        }
        let student = self.roster.remove_student(id)?;
        log::debug!("removed student {} ({id})", student.name);
        Ok(student)
    }

    pub fn import_rows(&mut self, rows: &[ImportRow], policy: DuplicatePolicy) -> ImportSummary {
        import::reconcile(&mut self.roster, rows, policy)
    }

    // =========================================================================
    // Seating
    // =========================================================================

    fn record(&mut self) {
        self.history.record(Snapshot::capture(&self.layout));
    }

    /// Put `student` on `target`.
    ///
    /// Returns `None` without touching anything when the student or seat
    /// does not resolve, since drag sources can be stale. A student already
    /// on `target` yields `Placement::Unchanged` and records nothing.
    pub fn assign(&mut self, student: StudentId, target: SeatId, source: Option<SeatId>) -> Option<Placement> {
        if !self.roster.contains(student) {
            log::debug!("assign: unknown student {student}, ignored");
            return None;
        }
        let Some(placement) = assign::plan(&self.layout, student, target, source) else {
            log::debug!("assign: unknown seat {target}, ignored");
            return None;
        };
        if placement.is_change() {
            self.record();
            assign::apply(&mut self.layout, student, target, placement);
            log::debug!("assign: {student} -> {target} ({placement:?})");
        }
        Some(placement)
    }

    /// Clear one seat. Returns the student removed, or `None` if the seat
    /// is unknown or already empty (nothing recorded in that case).
    pub fn unseat(&mut self, seat: SeatId) -> Option<StudentId> {
        let occupant = self.layout.occupant(seat)?;
        self.record();
        if let Some(slot) = self.layout.seat_mut(seat) {
            slot.occupant = None;
        }
        log::debug!("unseat: {occupant} from {seat}");
        Some(occupant)
    }

    /// Clear every seat. Returns how many seats were occupied.
    pub fn clear_seats(&mut self) -> usize {
        let occupied = self.layout.occupied_count();
        self.record();
        self.layout.clear_occupants();
        log::debug!("cleared {occupied} seats");
        occupied
    }

    /// Random arrangement of the whole roster with front-band priority.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<ArrangementSummary, ClassroomError> {
        if self.roster.is_empty() {
            return Err(ClassroomError::NoStudents);
        }
        self.record();
        let summary = arrange::randomize(&mut self.layout, self.roster.students(), rng);
        log::info!(
            "randomize: {} seated, {} front-band, {} front overflow, {} without seat",
            summary.seated,
            summary.front_placed,
            summary.front_overflow,
            summary.unseated
        );
        Ok(summary)
    }

    /// Change the grid dimensions. All seat assignments are discarded; the
    /// roster is kept.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), ClassroomError> {
        grid::validate_dimensions(rows, cols)?;
        self.record();
        self.layout.resize(rows, cols)?;
        log::info!("resize: layout is now {rows}x{cols}");
        Ok(())
    }

    /// Replace the layout with stored seats (a saved named layout).
    /// Occupants not in the roster are dropped.
    pub fn apply_layout(&mut self, rows: usize, cols: usize, seats: Vec<Seat>) -> Result<(), ClassroomError> {
        let mut layout = Layout::from_seats(rows, cols, seats)?;
        let roster = &self.roster;
        let dropped = layout.retain_occupants(|id| roster.contains(id));
        if dropped > 0 {
            log::warn!("layout: dropped {dropped} occupants that are not in the roster");
        }
        self.record();
        self.layout = layout;
        Ok(())
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Restore the snapshot under the cursor. Returns false at the oldest
    /// state, or when the snapshot cannot be turned back into a layout; the
    /// cursor only moves once the restore is certain.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.peek_undo() else {
            log::debug!("undo: already at the oldest state");
            return false;
        };
        let Some(layout) = self.layout_from(snapshot) else {
            return false;
        };
        self.history.undo();
        self.layout = layout;
        true
    }

    /// Restore the snapshot after the cursor. Returns false at the newest
    /// entry or for an unusable snapshot.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.peek_redo() else {
            log::debug!("redo: already at the newest state");
            return false;
        };
        let Some(layout) = self.layout_from(snapshot) else {
            return false;
        };
        self.history.redo();
        self.layout = layout;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Rebuild a layout from `snapshot`. Occupants deleted from the roster
    /// since the snapshot was taken are dropped.
    fn layout_from(&self, snapshot: &Snapshot) -> Option<Layout> {
        let mut layout = match Layout::from_seats(snapshot.rows, snapshot.cols, snapshot.seats.clone()) {
            Ok(layout) => layout,
            Err(e) => {
                log::warn!("history: unusable snapshot ignored: {e}");
                return None;
            }
        };
        let roster = &self.roster;
        let dropped = layout.retain_occupants(|id| roster.contains(id));
        if dropped > 0 {
            log::warn!("history: dropped {dropped} occupants no longer in the roster");
        }
        Some(layout)
    }

    // =========================================================================
    // Settings surface
    // =========================================================================

    pub fn add_constraint(&mut self, text: &str) -> Result<ConstraintId, ClassroomError> {
        self.constraints.add(text).map(|c| c.id)
    }

    pub fn remove_constraint(&mut self, id: ConstraintId) -> Result<Constraint, ClassroomError> {
        self.constraints.remove(id)
    }

    pub fn set_constraint_active(&mut self, id: ConstraintId, active: bool) -> Result<(), ClassroomError> {
        self.constraints.set_active(id, active)
    }

    pub fn set_show_coordinates(&mut self, show: bool) {
        self.show_coordinates = show;
    }

    /// Wipe students, seats, constraints and history. The grid dimensions
    /// and display settings survive.
    pub fn reset(&mut self) {
        self.roster.clear();
        self.constraints.clear();
        self.layout.clear_occupants();
        self.history.seed(Snapshot::capture(&self.layout));
        log::info!("classroom reset");
    }
}
