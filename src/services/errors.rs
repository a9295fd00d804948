use thiserror::Error;

/// Generic error type used by the service layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The request payload failed validation.
    #[error("{0}")]
    Validation(String),
    /// The supplied passkey does not match the configured secret.
    #[error("Invalid passkey")]
    Unauthorized,
    /// The requested resource does not exist.
    #[error("not found")]
    NotFound,
    /// The request cannot proceed because the records already exist.
    #[error("{0}")]
    Conflict(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

pub type ServiceResult<T> = Result<T, ServiceError>;
