// Plain-text views of the classroom for stdout

use unicode_width::UnicodeWidthStr;

use seatplan_engine::constraint::Constraint;
use seatplan_engine::{Classroom, SeatId, Student};

const EMPTY_SEAT: &str = "·";
const PODIUM: &str = "[ podium ]";

fn seat_text(classroom: &Classroom, id: SeatId) -> String {
    let layout = classroom.layout();
    let name = classroom.student_at(id).map(|s| s.name.as_str());
    match (classroom.show_coordinates(), name) {
        (true, Some(name)) => format!("{} {}", layout.label(id), name),
        (true, None) => layout.label(id),
        (false, Some(name)) => name.to_string(),
        (false, None) => EMPTY_SEAT.to_string(),
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// The chart as seen from the back of the room: back row on top, podium
/// at the bottom. Front-band rows are marked with `*`.
pub fn chart(classroom: &Classroom) -> String {
    let layout = classroom.layout();
    let cells: Vec<Vec<String>> = (0..layout.rows())
        .rev()
        .map(|row| (0..layout.cols()).map(|col| seat_text(classroom, SeatId::new(row, col))).collect())
        .collect();

    let width = cells
        .iter()
        .flatten()
        .map(|c| c.width())
        .max()
        .unwrap_or(1)
        .max(EMPTY_SEAT.width());

    let mut out = String::new();
    for (i, row) in cells.iter().enumerate() {
        let grid_row = layout.rows() - 1 - i;
        let marker = if layout.is_front_band(SeatId::new(grid_row, 0)) { '*' } else { ' ' };
        let line: Vec<String> = row.iter().map(|c| format!("[{}]", pad(c, width))).collect();
        out.push(marker);
        out.push(' ');
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }

    let total = 2 + layout.cols() * (width + 3) - 1;
    let indent = total.saturating_sub(PODIUM.width()) / 2;
    out.push_str(&" ".repeat(indent));
    out.push_str(PODIUM);
    out.push('\n');
    out
}

pub fn student_line(classroom: &Classroom, student: &Student) -> String {
    let seat = classroom
        .seat_of(student.id)
        .map(|id| classroom.layout().label(id))
        .unwrap_or_else(|| "-".to_string());

    let mut parts = vec![student.name.clone()];
    if let Some(external_id) = &student.external_id {
        parts.push(format!("#{}", external_id));
    }
    let details = student.details();
    if !details.is_empty() {
        parts.push(details);
    }
    if !student.notes.is_empty() {
        parts.push(format!("note: {}", student.notes));
    }
    format!("{}\tseat {}\t{}", parts.join(" | "), seat, student.id)
}

pub fn constraint_line(index: usize, constraint: &Constraint) -> String {
    let state = if constraint.active { "on " } else { "off" };
    format!("{:>2}. [{}] {}\t{}", index + 1, state, constraint.text, constraint.id)
}
