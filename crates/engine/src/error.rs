use std::fmt;

use crate::constraint::ConstraintId;
use crate::grid::{SeatId, MAX_COLS, MAX_ROWS, MIN_COLS, MIN_ROWS};
use crate::roster::StudentId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassroomError {
    /// Layout dimensions outside the supported bounds.
    InvalidDimensions { rows: usize, cols: usize },
    /// Student name missing or blank.
    EmptyName,
    /// Random arrangement requested with an empty roster.
    NoStudents,
    /// Constraint text missing or blank.
    EmptyConstraint,
    StudentNotFound(StudentId),
    SeatNotFound(SeatId),
    ConstraintNotFound(ConstraintId),
    /// Stored state could not be turned back into a classroom.
    CorruptBundle(String),
}

impl ClassroomError {
    /// Caller-input problems, reported before any mutation happens.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::EmptyName | Self::NoStudents | Self::EmptyConstraint
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::StudentNotFound(_) | Self::SeatNotFound(_) | Self::ConstraintNotFound(_)
        )
    }
}

impl fmt::Display for ClassroomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => write!(
                f,
                "invalid layout {rows}x{cols}: rows must be {MIN_ROWS}-{MAX_ROWS}, columns {MIN_COLS}-{MAX_COLS}"
            ),
            Self::EmptyName => write!(f, "student name must not be empty"),
            Self::NoStudents => write!(f, "no students to arrange; add students first"),
            Self::EmptyConstraint => write!(f, "constraint text must not be empty"),
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::SeatNotFound(id) => write!(f, "seat not found: {id}"),
            Self::ConstraintNotFound(id) => write!(f, "constraint not found: {id}"),
            Self::CorruptBundle(msg) => write!(f, "corrupt classroom data: {msg}"),
        }
    }
}

impl std::error::Error for ClassroomError {}
