use crate::intake::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    /// An operation was invoked in a state that does not accept it.
    /// This is a programming error in the caller, never a data problem.
    #[error("Invalid operation '{operation}' while {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("Role '{role}' may not {operation}")]
    Forbidden {
        role: &'static str,
        operation: &'static str,
    },

    #[error("Complaint '{complaint_id}' not found in the current snapshot")]
    UnknownComplaint { complaint_id: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The persistence collaborator reported failure. The draft that was
    /// being committed is preserved so the operator can retry or discard.
    #[error("Persistence failed: {reason}")]
    Persistence { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DeskResult<T> = Result<T, DeskError>;
