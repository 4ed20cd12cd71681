//! CLI exit code registry.
//!
//! This is the single source of truth for all CLI exit codes. Exit codes are
//! part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 2    | Usage error (bad args, unsupported input type)   |
//! | 3    | Settings document error                          |
//! | 4    | Source read/parse error                          |
//! | 5    | Output write error                               |

/// Success, both datasets written as requested.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error: bad arguments or an unsupported input file type.
/// Matches clap's own exit code for argument errors.
pub const EXIT_USAGE: u8 = 2;

/// Settings document unreadable or malformed.
pub const EXIT_CONFIG: u8 = 3;

/// Source export unreadable, malformed, or missing a requested column.
pub const EXIT_READ: u8 = 4;

/// Output directory or file could not be written.
pub const EXIT_WRITE: u8 = 5;
