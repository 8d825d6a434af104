//! `seatplan-engine`: classroom seating model and operations.
//!
//! Pure engine crate: synchronous, no I/O. Front ends read state after
//! each operation and persist the [`ClassroomBundle`] themselves.

pub mod arrange;
pub mod assign;
pub mod bundle;
pub mod classroom;
pub mod command;
pub mod constraint;
pub mod error;
pub mod grid;
pub mod history;
pub mod import;
pub mod roster;
pub mod snapshot;

#[cfg(test)]
pub mod harness;

pub use bundle::ClassroomBundle;
pub use classroom::{Classroom, ClassroomStats, StudentFilter};
pub use command::{Command, Outcome};
pub use error::ClassroomError;
pub use grid::{Layout, Seat, SeatId};
pub use import::{DuplicatePolicy, ImportRow, ImportSummary};
pub use roster::{Gender, Roster, Student, StudentFields, StudentId};
