//! Seat placement: moving one student onto a seat.
//!
//! Placement is split into a read-only plan and an apply step so the
//! caller can tell a no-op apart before recording history.

use serde::Serialize;

use crate::grid::{Layout, SeatId};
use crate::roster::StudentId;

/// What a placement does to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Student already sits on the target seat.
    Unchanged,
    /// Unseated student onto an empty seat.
    Placed,
    /// Unseated student onto an occupied seat; the previous occupant
    /// becomes unassigned.
    Displaced { displaced: StudentId },
    /// Seated student onto an empty seat.
    Moved { from: SeatId },
    /// Seated student onto an occupied seat; the previous occupant takes
    /// the vacated seat.
    Swapped { from: SeatId, displaced: StudentId },
}

impl Placement {
    pub fn is_change(&self) -> bool {
        !matches!(self, Placement::Unchanged)
    }
}

/// Find the seat the student is moving out of.
///
/// An explicit `source` is trusted only if it really holds the student;
/// a stale source falls back to scanning the grid.
pub fn resolve_source(layout: &Layout, student: StudentId, source: Option<SeatId>) -> Option<SeatId> {
    if let Some(source) = source {
        if layout.occupant(source) == Some(student) {
            return Some(source);
        }
        log::debug!("assign: source seat {source} does not hold {student}, scanning");
    }
    layout.seat_of(student)
}

/// Work out what assigning `student` to `target` would do.
/// Returns `None` when `target` is not part of the layout.
pub fn plan(layout: &Layout, student: StudentId, target: SeatId, source: Option<SeatId>) -> Option<Placement> {
    let displaced = layout.seat(target)?.occupant;
    let current = resolve_source(layout, student, source);

    if current == Some(target) {
        return Some(Placement::Unchanged);
    }

    Some(match (current, displaced) {
        (Some(from), Some(displaced)) => Placement::Swapped { from, displaced },
        (Some(from), None) => Placement::Moved { from },
        (None, Some(displaced)) => Placement::Displaced { displaced },
        (None, None) => Placement::Placed,
    })
}

/// Carry out a placement produced by [`plan`] against the same layout.
pub fn apply(layout: &mut Layout, student: StudentId, target: SeatId, placement: Placement) {
    match placement {
        Placement::Unchanged => return,
        Placement::Swapped { from, displaced } => {
            if let Some(seat) = layout.seat_mut(from) {
                seat.occupant = Some(displaced);
            }
        }
        Placement::Moved { from } => {
            if let Some(seat) = layout.seat_mut(from) {
                seat.occupant = None;
            }
        }
        Placement::Placed | Placement::Displaced { .. } => {}
    }
    if let Some(seat) = layout.seat_mut(target) {
        seat.occupant = Some(student);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(layout: &mut Layout, row: usize, col: usize, student: StudentId) {
        layout.seat_mut(SeatId::new(row, col)).unwrap().occupant = Some(student);
    }

    fn place(layout: &mut Layout, student: StudentId, target: SeatId, source: Option<SeatId>) -> Placement {
        let placement = plan(layout, student, target, source).unwrap();
        apply(layout, student, target, placement);
        placement
    }

    #[test]
    fn test_place_from_roster() {
        let mut layout = Layout::new(2, 2).unwrap();
        let a = StudentId::new();
        let target = SeatId::new(1, 1);

        assert_eq!(place(&mut layout, a, target, None), Placement::Placed);
        assert_eq!(layout.occupant(target), Some(a));
    }

    #[test]
    fn test_place_from_roster_displacing() {
        let mut layout = Layout::new(2, 2).unwrap();
        let (a, b) = (StudentId::new(), StudentId::new());
        seat(&mut layout, 0, 0, b);

        let placement = place(&mut layout, a, SeatId::new(0, 0), None);

        assert_eq!(placement, Placement::Displaced { displaced: b });
        assert_eq!(layout.occupant(SeatId::new(0, 0)), Some(a));
        assert_eq!(layout.seat_of(b), None);
    }

    #[test]
    fn test_seat_to_seat_swap_with_source() {
        let mut layout = Layout::new(2, 2).unwrap();
        let (a, b) = (StudentId::new(), StudentId::new());
        seat(&mut layout, 0, 0, a);
        seat(&mut layout, 1, 1, b);

        let placement = place(&mut layout, a, SeatId::new(1, 1), Some(SeatId::new(0, 0)));

        assert_eq!(
            placement,
            Placement::Swapped { from: SeatId::new(0, 0), displaced: b }
        );
        assert_eq!(layout.occupant(SeatId::new(1, 1)), Some(a));
        assert_eq!(layout.occupant(SeatId::new(0, 0)), Some(b));
    }

    #[test]
    fn test_swap_without_explicit_source() {
        let mut layout = Layout::new(2, 2).unwrap();
        let (a, b) = (StudentId::new(), StudentId::new());
        seat(&mut layout, 0, 1, a);
        seat(&mut layout, 1, 0, b);

        place(&mut layout, a, SeatId::new(1, 0), None);

        assert_eq!(layout.occupant(SeatId::new(1, 0)), Some(a));
        assert_eq!(layout.occupant(SeatId::new(0, 1)), Some(b));
    }

    #[test]
    fn test_move_to_empty_seat() {
        let mut layout = Layout::new(2, 2).unwrap();
        let a = StudentId::new();
        seat(&mut layout, 0, 0, a);

        let placement = place(&mut layout, a, SeatId::new(1, 1), None);

        assert_eq!(placement, Placement::Moved { from: SeatId::new(0, 0) });
        assert_eq!(layout.occupant(SeatId::new(0, 0)), None);
        assert_eq!(layout.occupant(SeatId::new(1, 1)), Some(a));
    }

    #[test]
    fn test_seat_to_empty_seat_with_source() {
        let mut layout = Layout::new(3, 3).unwrap();
        let (a, b) = (StudentId::new(), StudentId::new());
        seat(&mut layout, 2, 0, a);
        seat(&mut layout, 0, 0, b);

        let placement = place(&mut layout, a, SeatId::new(1, 2), Some(SeatId::new(2, 0)));

        assert_eq!(placement, Placement::Moved { from: SeatId::new(2, 0) });
        assert_eq!(layout.occupant(SeatId::new(2, 0)), None);
        assert_eq!(layout.occupant(SeatId::new(1, 2)), Some(a));
        assert_eq!(layout.occupant(SeatId::new(0, 0)), Some(b));
        assert_eq!(layout.occupied_count(), 2);
    }

    #[test]
    fn test_same_seat_is_unchanged() {
        let mut layout = Layout::new(2, 2).unwrap();
        let a = StudentId::new();
        seat(&mut layout, 1, 0, a);

        assert_eq!(place(&mut layout, a, SeatId::new(1, 0), None), Placement::Unchanged);
        assert_eq!(layout.occupant(SeatId::new(1, 0)), Some(a));
        assert_eq!(layout.occupied_count(), 1);
    }

    #[test]
    fn test_stale_source_falls_back_to_scan() {
        let mut layout = Layout::new(2, 2).unwrap();
        let (a, b) = (StudentId::new(), StudentId::new());
        seat(&mut layout, 0, 0, a);
        seat(&mut layout, 0, 1, b);

        // Claims A comes from (0,1), which actually holds B
        place(&mut layout, a, SeatId::new(1, 1), Some(SeatId::new(0, 1)));

        assert_eq!(layout.occupant(SeatId::new(1, 1)), Some(a));
        assert_eq!(layout.occupant(SeatId::new(0, 1)), Some(b));
        assert_eq!(layout.occupant(SeatId::new(0, 0)), None);
    }

    #[test]
    fn test_unknown_target() {
        let layout = Layout::new(2, 2).unwrap();
        assert_eq!(plan(&layout, StudentId::new(), SeatId::new(5, 5), None), None);
    }
}
