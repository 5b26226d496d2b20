//! Error types for the action registry.

use thiserror::Error;

/// Registry-level failures.
///
/// Execution never surfaces these as `Err` to callers; they are folded into an
/// [`ActionResult`](crate::action::ActionResult) at the registry boundary.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Action not found: {0}")]
    NotFound(String),

    #[error("Action is not available in the current context")]
    Unavailable(String),

    #[error("Action requires a context to execute")]
    MissingContext(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("{reason}")]
    ExecutionFailed { id: String, reason: String },

    #[error("Action panicked: {reason}")]
    Panicked { id: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ActionError {
    /// Identifier of the action the error refers to, when there is one.
    pub fn action_id(&self) -> Option<&str> {
        match self {
            ActionError::NotFound(id)
            | ActionError::Unavailable(id)
            | ActionError::MissingContext(id) => Some(id),
            ActionError::ExecutionFailed { id, .. } | ActionError::Panicked { id, .. } => Some(id),
            ActionError::InvalidAction(_) | ActionError::Config(_) => None,
        }
    }
}

impl From<config::ConfigError> for ActionError {
    fn from(err: config::ConfigError) -> Self {
        ActionError::Config(err.to_string())
    }
}
