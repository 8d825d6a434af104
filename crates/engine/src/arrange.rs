//! Random seating with a front-row priority class.
//!
//! Two phases. Students flagged as needing a front seat draw, in roster
//! order, a random seat from the front band (the front third of rows).
//! Everyone left over, including priority students the band could not
//! hold, is then paired off with random remaining seats, one random
//! student and one random seat per step. The result is not a uniform
//! permutation.

use rand::Rng;
use serde::Serialize;

use crate::grid::{Layout, SeatId};
use crate::roster::Student;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ArrangementSummary {
    pub seated: usize,
    /// Priority students placed during the front-band phase.
    pub front_placed: usize,
    /// Priority students that did not fit in the front band.
    pub front_overflow: usize,
    /// Students left without a seat because the grid ran out.
    pub unseated: usize,
}

/// Clear the grid and seat `students` at random.
pub fn randomize<R: Rng + ?Sized>(layout: &mut Layout, students: &[Student], rng: &mut R) -> ArrangementSummary {
    layout.clear_occupants();

    let band = layout.front_band_rows();
    let mut available: Vec<SeatId> = layout.seats().iter().map(|s| s.id).collect();
    let mut front: Vec<SeatId> = available.iter().copied().filter(|id| id.row < band).collect();
    let mut pending: Vec<&Student> = students.iter().collect();
    let mut summary = ArrangementSummary::default();

    for student in students.iter().filter(|s| s.needs_front_seat) {
        if front.is_empty() {
            summary.front_overflow += 1;
            continue;
        }
        let seat = front.remove(rng.gen_range(0..front.len()));
        available.retain(|id| *id != seat);
        pending.retain(|s| s.id != student.id);
        occupy(layout, seat, student);
        summary.front_placed += 1;
    }

    while !pending.is_empty() && !available.is_empty() {
        let student = pending.remove(rng.gen_range(0..pending.len()));
        let seat = available.remove(rng.gen_range(0..available.len()));
        occupy(layout, seat, student);
    }

    summary.seated = layout.occupied_count();
    summary.unseated = pending.len();
    summary
}

fn occupy(layout: &mut Layout, seat: SeatId, student: &Student) {
    if let Some(slot) = layout.seat_mut(seat) {
        slot.occupant = Some(student.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Roster, StudentFields};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster(names: &[(&str, bool)]) -> Roster {
        let mut roster = Roster::new();
        for (name, front) in names {
            roster
                .add_student(StudentFields::named(*name).with_front_seat(*front))
                .unwrap();
        }
        roster
    }

    #[test]
    fn test_priority_students_in_front_band() {
        let roster = roster(&[("A", true), ("B", false), ("C", true), ("D", false)]);
        for seed in 0..50 {
            let mut layout = Layout::new(8, 6).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let summary = randomize(&mut layout, roster.students(), &mut rng);

            assert_eq!(summary.seated, 4);
            assert_eq!(summary.front_placed, 2);
            for student in roster.iter().filter(|s| s.needs_front_seat) {
                let seat = layout.seat_of(student.id).unwrap();
                assert!(seat.row < 3, "seed {seed}: {} at {seat}", student.name);
            }
        }
    }

    #[test]
    fn test_front_band_overflow_falls_through() {
        // 3x2 grid: front band is row 0 only, two seats
        let roster = roster(&[("A", true), ("B", true), ("C", true)]);
        let mut layout = Layout::new(3, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let summary = randomize(&mut layout, roster.students(), &mut rng);

        assert_eq!(summary.front_placed, 2);
        assert_eq!(summary.front_overflow, 1);
        assert_eq!(summary.seated, 3);
        // The first two in roster order won the band
        for student in roster.iter().take(2) {
            assert_eq!(layout.seat_of(student.id).unwrap().row, 0);
        }
    }

    #[test]
    fn test_more_students_than_seats() {
        let names: Vec<String> = (0..5).map(|i| format!("S{i}")).collect();
        let entries: Vec<(&str, bool)> = names.iter().map(|n| (n.as_str(), false)).collect();
        let roster = roster(&entries);
        let mut layout = Layout::new(2, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let summary = randomize(&mut layout, roster.students(), &mut rng);

        assert_eq!(summary.seated, 4);
        assert_eq!(summary.unseated, 1);
        assert_eq!(layout.occupied_count(), 4);
    }

    #[test]
    fn test_more_seats_than_students() {
        let roster = roster(&[("A", false), ("B", false)]);
        let mut layout = Layout::new(4, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let summary = randomize(&mut layout, roster.students(), &mut rng);

        assert_eq!(summary.seated, 2);
        assert_eq!(summary.unseated, 0);
        assert_eq!(layout.occupied_count(), 2);
    }

    #[test]
    fn test_same_seed_same_arrangement() {
        let roster = roster(&[("A", true), ("B", false), ("C", false)]);
        let mut first = Layout::new(5, 5).unwrap();
        let mut second = Layout::new(5, 5).unwrap();
        randomize(&mut first, roster.students(), &mut StdRng::seed_from_u64(42));
        randomize(&mut second, roster.students(), &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }
}
