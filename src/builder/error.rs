//! Build errors for table authoring.

use thiserror::Error;

/// Errors that can occur while authoring a raw transition table.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("at least two states are required, got {found}")]
    TooFewStates { found: usize },

    #[error("'{name}' is not a valid state name")]
    InvalidStateName { name: String },

    #[error("state '{state}' is declared more than once")]
    DuplicateState { state: String },
}
