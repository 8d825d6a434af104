//! Deep copies of seat occupancy for the history log.

use serde::{Deserialize, Serialize};

use crate::grid::{Layout, Seat};

/// Occupancy of every seat at one instant, plus the grid dimensions it
/// was taken under. Owns its seats; never shares storage with a live
/// [`Layout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: usize,
    pub cols: usize,
    pub seats: Vec<Seat>,
}

impl Snapshot {
    pub fn capture(layout: &Layout) -> Self {
        Self {
            rows: layout.rows(),
            cols: layout.cols(),
            seats: layout.seats().iter().map(copy_seat).collect(),
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_occupied()).count()
    }
}

/// Field-by-field copy. `Seat` holds only `Copy` data, so the result
/// cannot alias the source.
fn copy_seat(seat: &Seat) -> Seat {
    Seat {
        id: seat.id,
        occupant: seat.occupant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SeatId;
    use crate::roster::StudentId;

    #[test]
    fn test_capture_is_independent_of_layout() {
        let student = StudentId::new();
        let mut layout = Layout::new(2, 2).unwrap();
        layout.seat_mut(SeatId::new(0, 1)).unwrap().occupant = Some(student);

        let snapshot = Snapshot::capture(&layout);
        layout.clear_occupants();

        assert_eq!(snapshot.rows, 2);
        assert_eq!(snapshot.cols, 2);
        assert_eq!(snapshot.occupied_count(), 1);
        assert_eq!(snapshot.seats[1].occupant, Some(student));
        assert_eq!(layout.occupied_count(), 0);
    }
}
