//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ExchangeError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ExchangeError) -> String {
    match e {
        ExchangeError::PasswordProtected(name) => format!(
            "{}\nUnlock library '{}' in the office instance before retrying.",
            e, name
        ),
        ExchangeError::Remote(_) => format!(
            "{}\nIs the office bridge running and reachable at the configured host and port?",
            e
        ),
        _ => e.to_string(),
    }
}
