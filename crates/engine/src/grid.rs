//! Classroom seat grid.
//!
//! Coordinates are 0-based. Row 0 is the row nearest the podium, column 0
//! is the leftmost column as seen from the students.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClassroomError;
use crate::roster::StudentId;

pub const MIN_ROWS: usize = 1;
pub const MAX_ROWS: usize = 15;
pub const MIN_COLS: usize = 1;
pub const MAX_COLS: usize = 12;

pub const DEFAULT_ROWS: usize = 8;
pub const DEFAULT_COLS: usize = 6;

/// Identity of a seat, derived from its coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatId {
    pub row: usize,
    pub col: usize,
}

impl SeatId {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

impl FromStr for SeatId {
    type Err = String;

    /// Parse the `row-col` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("invalid seat id '{s}' (expected row-col)"))?;
        let row = row
            .trim()
            .parse()
            .map_err(|_| format!("invalid seat row in '{s}'"))?;
        let col = col
            .trim()
            .parse()
            .map_err(|_| format!("invalid seat column in '{s}'"))?;
        Ok(Self { row, col })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    #[serde(flatten)]
    pub id: SeatId,
    /// Non-owning reference into the roster.
    #[serde(rename = "student")]
    pub occupant: Option<StudentId>,
}

impl Seat {
    pub fn empty(id: SeatId) -> Self {
        Self { id, occupant: None }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Check dimensions against the supported classroom bounds.
pub fn validate_dimensions(rows: usize, cols: usize) -> Result<(), ClassroomError> {
    if (MIN_ROWS..=MAX_ROWS).contains(&rows) && (MIN_COLS..=MAX_COLS).contains(&cols) {
        Ok(())
    } else {
        Err(ClassroomError::InvalidDimensions { rows, cols })
    }
}

/// The full `rows x cols` seat grid. Seats are stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    rows: usize,
    cols: usize,
    seats: Vec<Seat>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seats: generate_seats(DEFAULT_ROWS, DEFAULT_COLS),
        }
    }
}

impl Layout {
    pub fn new(rows: usize, cols: usize) -> Result<Self, ClassroomError> {
        validate_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            seats: generate_seats(rows, cols),
        })
    }

    /// Rebuild a layout from stored seats.
    ///
    /// The seat set must cover the grid exactly once. Occupancy is taken as
    /// given; callers that need the one-seat-per-student invariant repaired
    /// use [`Layout::retain_occupants`].
    pub fn from_seats(rows: usize, cols: usize, seats: Vec<Seat>) -> Result<Self, ClassroomError> {
        validate_dimensions(rows, cols)?;
        if seats.len() != rows * cols {
            return Err(ClassroomError::CorruptBundle(format!(
                "expected {} seats for a {rows}x{cols} layout, found {}",
                rows * cols,
                seats.len()
            )));
        }

        let mut slots: Vec<Option<Seat>> = vec![None; rows * cols];
        for seat in seats {
            let SeatId { row, col } = seat.id;
            if row >= rows || col >= cols {
                return Err(ClassroomError::CorruptBundle(format!(
                    "seat {} lies outside a {rows}x{cols} layout",
                    seat.id
                )));
            }
            let slot = &mut slots[row * cols + col];
            if slot.is_some() {
                return Err(ClassroomError::CorruptBundle(format!("duplicate seat {}", seat.id)));
            }
            *slot = Some(seat);
        }

        Ok(Self {
            rows,
            cols,
            seats: slots.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Validate and regenerate the grid. Every seat comes back empty.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<(), ClassroomError> {
        validate_dimensions(rows, cols)?;
        self.rows = rows;
        self.cols = cols;
        self.seats = generate_seats(rows, cols);
        Ok(())
    }

    fn index_of(&self, id: SeatId) -> Option<usize> {
        if id.row < self.rows && id.col < self.cols {
            Some(id.row * self.cols + id.col)
        } else {
            None
        }
    }

    pub fn contains(&self, id: SeatId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn seat_at(&self, row: usize, col: usize) -> Result<&Seat, ClassroomError> {
        let id = SeatId::new(row, col);
        self.index_of(id)
            .map(|i| &self.seats[i])
            .ok_or(ClassroomError::SeatNotFound(id))
    }

    pub fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.index_of(id).map(|i| &self.seats[i])
    }

    pub(crate) fn seat_mut(&mut self, id: SeatId) -> Option<&mut Seat> {
        self.index_of(id).map(move |i| &mut self.seats[i])
    }

    pub fn occupant(&self, id: SeatId) -> Option<StudentId> {
        self.seat(id).and_then(|s| s.occupant)
    }

    /// The seat currently holding `student`, if any.
    pub fn seat_of(&self, student: StudentId) -> Option<SeatId> {
        self.seats
            .iter()
            .find(|s| s.occupant == Some(student))
            .map(|s| s.id)
    }

    pub fn occupied_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_occupied()).count()
    }

    pub fn clear_occupants(&mut self) {
        for seat in &mut self.seats {
            seat.occupant = None;
        }
    }

    /// Drop every occupant for which `keep` returns false, and any repeat
    /// occurrence of a student already seated earlier in row-major order.
    /// Returns the number of occupants removed.
    pub fn retain_occupants(&mut self, mut keep: impl FnMut(StudentId) -> bool) -> usize {
        let mut seen = std::collections::HashSet::new();
        let mut removed = 0;
        for seat in &mut self.seats {
            if let Some(student) = seat.occupant {
                if !keep(student) || !seen.insert(student) {
                    seat.occupant = None;
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Number of rows in the front band: the front third, rounded up.
    pub fn front_band_rows(&self) -> usize {
        self.rows.div_ceil(3)
    }

    pub fn is_front_band(&self, id: SeatId) -> bool {
        id.row < self.front_band_rows()
    }

    /// Linear seat number, 1-based, row-major.
    pub fn position(&self, id: SeatId) -> usize {
        id.row * self.cols + id.col + 1
    }

    /// Label as printed on the chart. The podium is drawn below the grid,
    /// so the front row carries the highest row number.
    pub fn label(&self, id: SeatId) -> String {
        format!("{}-{}", self.rows - id.row, id.col + 1)
    }
}

fn generate_seats(rows: usize, cols: usize) -> Vec<Seat> {
    let mut seats = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            seats.push(Seat::empty(SeatId::new(row, col)));
        }
    }
    seats
}
