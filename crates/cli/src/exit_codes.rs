//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: scripts rely on them.
//!
//! | Code | Meaning                                            |
//! |------|----------------------------------------------------|
//! | 0    | Success                                            |
//! | 1    | General error (unspecified)                        |
//! | 2    | Usage error (bad arguments, ambiguous student)     |
//! | 3    | I/O error (file missing, unreadable, unwritable)   |
//! | 4    | Parse error (roster file, corrupt classroom file)  |
//! | 5    | Validation error (bad dimensions, empty name)      |
//! | 6    | Not found (student, seat, constraint, layout)      |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above

use seatplan_engine::ClassroomError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing confirmation, ambiguous reference.
pub const EXIT_USAGE: u8 = 2;

/// File could not be read or written.
pub const EXIT_IO: u8 = 3;

/// Input file or stored classroom could not be parsed.
pub const EXIT_PARSE: u8 = 4;

/// Operation rejected by the engine before any change was made.
pub const EXIT_VALIDATION: u8 = 5;

/// Referenced student, seat, constraint or layout does not exist.
pub const EXIT_NOT_FOUND: u8 = 6;

/// Map an engine error to its exit code.
pub fn engine_exit_code(err: &ClassroomError) -> u8 {
    if err.is_validation() {
        EXIT_VALIDATION
    } else if err.is_not_found() {
        EXIT_NOT_FOUND
    } else if matches!(err, ClassroomError::CorruptBundle(_)) {
        EXIT_PARSE
    } else {
        EXIT_ERROR
    }
}
