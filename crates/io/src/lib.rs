// File I/O operations

pub mod delimited;
pub mod export;
pub mod layouts;
pub mod native;
pub mod roster_import;
pub mod template;

/// Classroom file format version, written into every saved file.
/// Increment when the layout changes in a way older builds can't read.
pub const NATIVE_FORMAT_VERSION: u32 = 1;
