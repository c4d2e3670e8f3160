use thiserror::Error;

use crate::workflow::validation::LwdRejection;

/// Failure modes of the resignation workflow core.
///
/// Handlers translate these into HTTP statuses: `Validation` → 400,
/// `NotFound` → 404, `InvalidState` → 409, `Persistence` → 500 (logged,
/// generic body — internals are never leaked to the caller).
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    InvalidState(&'static str),

    #[error(transparent)]
    Persistence(#[from] sqlx::Error),
}

impl From<LwdRejection> for WorkflowError {
    fn from(rejection: LwdRejection) -> Self {
        WorkflowError::Validation(rejection.to_string())
    }
}
