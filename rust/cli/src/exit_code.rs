//! Exit codes returned by [`run`](crate::run).

use crate::error::CliError;

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// General error exit code.
pub const ERROR: i32 = 2;

/// Interrupted by user (Ctrl+C) exit code.
pub const INTERRUPTED: i32 = 130;

pub fn for_error(error: &CliError) -> i32 {
    match error {
        CliError::Interrupted(_) => INTERRUPTED,
        _ => ERROR,
    }
}
