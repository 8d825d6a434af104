//! Typed operations and their dispatcher.
//!
//! Front ends translate user gestures into a [`Command`] and hand it to
//! [`Classroom::apply`]. The returned [`Outcome`] says what changed so the
//! caller knows whether to persist and what to redraw.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::arrange::ArrangementSummary;
use crate::assign::Placement;
use crate::classroom::Classroom;
use crate::constraint::ConstraintId;
use crate::error::ClassroomError;
use crate::grid::{Seat, SeatId};
use crate::import::{DuplicatePolicy, ImportRow, ImportSummary};
use crate::roster::{StudentFields, StudentId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Assign {
        student: StudentId,
        target: SeatId,
        #[serde(default)]
        source: Option<SeatId>,
    },
    Unseat {
        seat: SeatId,
    },
    ClearSeats,
    /// `seed` makes the draw reproducible; without it the thread RNG is used.
    Randomize {
        #[serde(default)]
        seed: Option<u64>,
    },
    Resize {
        rows: usize,
        cols: usize,
    },
    ApplyLayout {
        rows: usize,
        cols: usize,
        seats: Vec<Seat>,
    },
    Undo,
    Redo,
    AddStudent {
        fields: StudentFields,
    },
    UpdateStudent {
        id: StudentId,
        fields: StudentFields,
    },
    RemoveStudent {
        id: StudentId,
    },
    Import {
        rows: Vec<ImportRow>,
        policy: DuplicatePolicy,
    },
    AddConstraint {
        text: String,
    },
    RemoveConstraint {
        id: ConstraintId,
    },
    SetConstraintActive {
        id: ConstraintId,
        active: bool,
    },
    SetShowCoordinates {
        show: bool,
    },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// Nothing changed: stale reference, empty seat, or history boundary.
    Unchanged,
    Assigned { placement: Placement },
    Unseated { seat: SeatId, student: StudentId },
    Cleared { seats: usize },
    Arranged { summary: ArrangementSummary },
    Resized { rows: usize, cols: usize },
    LayoutApplied,
    Undone,
    Redone,
    StudentAdded { id: StudentId },
    StudentUpdated { id: StudentId },
    StudentRemoved { id: StudentId },
    Imported { summary: ImportSummary },
    ConstraintAdded { id: ConstraintId },
    ConstraintRemoved { id: ConstraintId },
    ConstraintUpdated { id: ConstraintId },
    ShowCoordinates { show: bool },
    Reset,
}

impl Outcome {
    /// True when state changed and should be saved.
    pub fn is_change(&self) -> bool {
        match self {
            Outcome::Unchanged => false,
            Outcome::Assigned { placement } => placement.is_change(),
            Outcome::Imported { summary } => summary.changed_roster(),
            _ => true,
        }
    }
}

impl Classroom {
    /// Run one command to completion.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, ClassroomError> {
        log::debug!("apply: {command:?}");
        let outcome = match command {
            Command::Assign { student, target, source } => match self.assign(student, target, source) {
                Some(placement) => Outcome::Assigned { placement },
                None => Outcome::Unchanged,
            },
            Command::Unseat { seat } => match self.unseat(seat) {
                Some(student) => Outcome::Unseated { seat, student },
                None => Outcome::Unchanged,
            },
            Command::ClearSeats => Outcome::Cleared {
                seats: self.clear_seats(),
            },
            Command::Randomize { seed } => {
                let summary = match seed {
                    Some(seed) => self.randomize(&mut StdRng::seed_from_u64(seed))?,
                    None => self.randomize(&mut rand::thread_rng())?,
                };
                Outcome::Arranged { summary }
            }
            Command::Resize { rows, cols } => {
                self.resize(rows, cols)?;
                Outcome::Resized { rows, cols }
            }
            Command::ApplyLayout { rows, cols, seats } => {
                self.apply_layout(rows, cols, seats)?;
                Outcome::LayoutApplied
            }
            Command::Undo => {
                if self.undo() {
                    Outcome::Undone
                } else {
                    Outcome::Unchanged
                }
            }
            Command::Redo => {
                if self.redo() {
                    Outcome::Redone
                } else {
                    Outcome::Unchanged
                }
            }
            Command::AddStudent { fields } => Outcome::StudentAdded {
                id: self.add_student(fields)?,
            },
            Command::UpdateStudent { id, fields } => {
                self.update_student(id, fields)?;
                Outcome::StudentUpdated { id }
            }
            Command::RemoveStudent { id } => {
                self.remove_student(id)?;
                Outcome::StudentRemoved { id }
            }
            Command::Import { rows, policy } => Outcome::Imported {
                summary: self.import_rows(&rows, policy),
            },
            Command::AddConstraint { text } => Outcome::ConstraintAdded {
                id: self.add_constraint(&text)?,
            },
            Command::RemoveConstraint { id } => {
                self.remove_constraint(id)?;
                Outcome::ConstraintRemoved { id }
            }
            Command::SetConstraintActive { id, active } => {
                self.set_constraint_active(id, active)?;
                Outcome::ConstraintUpdated { id }
            }
            Command::SetShowCoordinates { show } => {
                self.set_show_coordinates(show);
                Outcome::ShowCoordinates { show }
            }
            Command::Reset => {
                self.reset();
                Outcome::Reset
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::check_invariants;

    #[test]
    fn test_dispatch_roundtrip_through_commands() {
        let mut classroom = Classroom::new(4, 4).unwrap();
        let Outcome::StudentAdded { id: a } = classroom
            .apply(Command::AddStudent { fields: StudentFields::named("A") })
            .unwrap()
        else {
            panic!("expected StudentAdded");
        };

        let outcome = classroom
            .apply(Command::Assign { student: a, target: SeatId::new(0, 0), source: None })
            .unwrap();
        assert_eq!(outcome, Outcome::Assigned { placement: Placement::Placed });
        assert!(outcome.is_change());

        assert_eq!(classroom.apply(Command::Undo).unwrap(), Outcome::Undone);
        assert_eq!(classroom.seat_of(a), None);
        assert_eq!(classroom.apply(Command::Undo).unwrap(), Outcome::Unchanged);
        check_invariants(&classroom);
    }

    #[test]
    fn test_stale_drag_is_unchanged_not_error() {
        let mut classroom = Classroom::new(2, 2).unwrap();
        let outcome = classroom
            .apply(Command::Assign {
                student: StudentId::new(),
                target: SeatId::new(0, 0),
                source: None,
            })
            .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert!(!outcome.is_change());

        let outcome = classroom.apply(Command::Unseat { seat: SeatId::new(9, 9) }).unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn test_crud_not_found_surfaces() {
        let mut classroom = Classroom::new(2, 2).unwrap();
        let ghost = StudentId::new();
        let err = classroom.apply(Command::RemoveStudent { id: ghost }).unwrap_err();
        assert_eq!(err, ClassroomError::StudentNotFound(ghost));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_seeded_randomize_command() {
        let mut first = Classroom::new(6, 6).unwrap();
        first.add_student(StudentFields::named("A").with_front_seat(true)).unwrap();
        first.add_student(StudentFields::named("B")).unwrap();
        let mut second = first.clone();

        first.apply(Command::Randomize { seed: Some(11) }).unwrap();
        second.apply(Command::Randomize { seed: Some(11) }).unwrap();

        assert_eq!(first.layout(), second.layout());
        check_invariants(&first);
    }

    #[test]
    fn test_command_json_shape() {
        let json = r#"{"op":"assign","student":"6f1c1a64-9a8f-4f52-9d51-0e7e2c7e2a11","target":{"row":1,"col":2}}"#;
        let command: Command = serde_json::from_str(json).unwrap();
        match command {
            Command::Assign { target, source, .. } => {
                assert_eq!(target, SeatId::new(1, 2));
                assert_eq!(source, None);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let command: Command = serde_json::from_str(r#"{"op":"resize","rows":3,"cols":4}"#).unwrap();
        assert_eq!(command, Command::Resize { rows: 3, cols: 4 });
    }
}
