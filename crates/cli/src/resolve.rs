// Turn command-line references into engine ids

use seatplan_engine::constraint::ConstraintId;
use seatplan_engine::{Classroom, SeatId, StudentId};

use crate::CliError;

/// A student is named by record id, exact name, or student number.
pub fn student(classroom: &Classroom, reference: &str) -> Result<StudentId, CliError> {
    let reference = reference.trim();

    if let Ok(id) = reference.parse::<StudentId>() {
        if classroom.roster().contains(id) {
            return Ok(id);
        }
    }

    let by_name: Vec<StudentId> = classroom
        .roster()
        .iter()
        .filter(|s| s.name == reference)
        .map(|s| s.id)
        .collect();
    match by_name.as_slice() {
        [id] => return Ok(*id),
        [] => {}
        _ => {
            return Err(CliError::args(format!("{} students are named '{}'", by_name.len(), reference))
                .with_hint("use the student id from `seatplan student list`"))
        }
    }

    let by_number: Vec<StudentId> = classroom
        .roster()
        .iter()
        .filter(|s| s.external_id.as_deref() == Some(reference))
        .map(|s| s.id)
        .collect();
    match by_number.as_slice() {
        [id] => Ok(*id),
        [] => Err(CliError::not_found(format!("no student '{}'", reference))),
        _ => Err(CliError::args(format!("student number '{}' is not unique", reference))
            .with_hint("use the student id from `seatplan student list`")),
    }
}

/// A seat is named by its `row-col` id and must exist in the current grid.
pub fn seat(classroom: &Classroom, reference: &str) -> Result<SeatId, CliError> {
    let id: SeatId = reference.parse().map_err(CliError::args)?;
    let layout = classroom.layout();
    layout.seat_at(id.row, id.col).map(|seat| seat.id).map_err(|_| {
        CliError::not_found(format!("seat {} is outside the {}x{} layout", id, layout.rows(), layout.cols()))
            .with_hint("seat ids are 0-based row-col, front row first")
    })
}

/// A constraint is named by its id or its 1-based position in the list.
pub fn constraint(classroom: &Classroom, reference: &str) -> Result<ConstraintId, CliError> {
    let reference = reference.trim();
    let constraints = classroom.constraints();

    if let Ok(position) = reference.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|i| constraints.get(i))
            .map(|c| c.id)
            .ok_or_else(|| CliError::not_found(format!("no constraint #{}", position)));
    }

    let id: ConstraintId = reference
        .parse()
        .map_err(|_| CliError::args(format!("invalid constraint reference '{}'", reference)))?;
    if constraints.iter().any(|c| c.id == id) {
        Ok(id)
    } else {
        Err(CliError::not_found(format!("no constraint {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes::{EXIT_NOT_FOUND, EXIT_USAGE};
    use seatplan_engine::StudentFields;

    fn classroom() -> (Classroom, StudentId, StudentId) {
        let mut classroom = Classroom::new(3, 3).unwrap();
        let mut fields = StudentFields::named("Ada");
        fields.external_id = Some("007".to_string());
        let ada = classroom.add_student(fields).unwrap();
        let bob = classroom.add_student(StudentFields::named("Bob")).unwrap();
        (classroom, ada, bob)
    }

    #[test]
    fn test_student_by_id_name_and_number() {
        let (classroom, ada, bob) = classroom();
        assert_eq!(student(&classroom, &ada.to_string()).unwrap(), ada);
        assert_eq!(student(&classroom, " Bob ").unwrap(), bob);
        assert_eq!(student(&classroom, "007").unwrap(), ada);
        assert_eq!(student(&classroom, "Eve").unwrap_err().code, EXIT_NOT_FOUND);
    }

    #[test]
    fn test_ambiguous_name() {
        let (mut classroom, _, _) = classroom();
        classroom.add_student(StudentFields::named("Bob")).unwrap();
        assert_eq!(student(&classroom, "Bob").unwrap_err().code, EXIT_USAGE);
    }

    #[test]
    fn test_seat_must_be_in_grid() {
        let (classroom, _, _) = classroom();
        assert_eq!(seat(&classroom, "2-2").unwrap(), SeatId::new(2, 2));
        assert_eq!(seat(&classroom, "3-0").unwrap_err().code, EXIT_NOT_FOUND);
        assert_eq!(seat(&classroom, "a-b").unwrap_err().code, EXIT_USAGE);
    }

    #[test]
    fn test_constraint_by_position() {
        let (mut classroom, _, _) = classroom();
        let id = classroom.add_constraint("Ada by the window").unwrap();
        assert_eq!(constraint(&classroom, "1").unwrap(), id);
        assert_eq!(constraint(&classroom, &id.to_string()).unwrap(), id);
        assert_eq!(constraint(&classroom, "2").unwrap_err().code, EXIT_NOT_FOUND);
        assert_eq!(constraint(&classroom, "0").unwrap_err().code, EXIT_NOT_FOUND);
    }
}
