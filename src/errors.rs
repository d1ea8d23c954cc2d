use crate::document::DocumentError;
use crate::store::StoreError;
use thiserror::Error;

/// A write the store rejected. The cause classification is the caller's
/// retry signal: transient causes may be retried, the rest are surfaced.
#[derive(Debug, Error)]
#[error("write rejected: {cause}")]
pub struct WriteError {
    #[from]
    pub cause: StoreError,
}

impl WriteError {
    pub fn is_transient(&self) -> bool {
        self.cause.is_transient()
    }
}

/// Error taxonomy for the workflow layer. Every failure is returned to the
/// caller, who owns user-facing presentation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Event error: {0}")]
    EventError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl ServiceError {
    /// Single source of truth for retry classification: only a transient
    /// store failure is worth retrying, everything else reflects caller
    /// input or state and will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Write(w) if w.is_transient())
    }
}
