//! Invariant checks shared by the engine's unit tests.
//!
//! Call [`check_invariants`] after any operation; it panics with a
//! description of the first broken rule.

use std::collections::HashSet;

use crate::classroom::Classroom;
use crate::grid::SeatId;

pub fn check_invariants(classroom: &Classroom) {
    let layout = classroom.layout();

    assert_eq!(
        layout.seat_count(),
        layout.rows() * layout.cols(),
        "seat count does not match {}x{}",
        layout.rows(),
        layout.cols()
    );

    let mut ids = HashSet::new();
    for (index, seat) in layout.seats().iter().enumerate() {
        assert!(ids.insert(seat.id), "seat {} appears twice", seat.id);
        assert_eq!(
            seat.id,
            SeatId::new(index / layout.cols(), index % layout.cols()),
            "seat storage is not row-major"
        );
    }

    let mut seated = HashSet::new();
    for seat in layout.seats() {
        if let Some(student) = seat.occupant {
            assert!(seated.insert(student), "student {student} occupies two seats");
            assert!(
                classroom.roster().contains(student),
                "seat {} references unknown student {student}",
                seat.id
            );
        }
    }

    let history = classroom.history();
    if let Some(cursor) = history.cursor() {
        assert!(cursor < history.len(), "history cursor {cursor} out of range");
    }
}
