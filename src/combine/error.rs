//! Slice reducer shape violations.

use thiserror::Error;

/// A slice reducer that fails to produce state for a reserved or unknown action.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShapeViolation {
    /// Returned null when initialised with no state
    #[error(
        "Slice reducer \"{key}\" returned null during initialization; \
         return an explicit initial state when no state is given"
    )]
    NullOnInit { key: String },

    /// Returned null for an action it does not handle
    #[error(
        "Slice reducer \"{key}\" returned null when probed with an unknown action; \
         return the current state for any unknown action"
    )]
    NullOnProbe { key: String },
}

impl ShapeViolation {
    /// The slice the violation belongs to.
    pub fn key(&self) -> &str {
        match self {
            Self::NullOnInit { key } | Self::NullOnProbe { key } => key,
        }
    }
}
