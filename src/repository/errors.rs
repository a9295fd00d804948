use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A pooled connection could not be checked out.
    #[error("database connection unavailable: {0}")]
    Connection(#[from] diesel::r2d2::PoolError),
    /// A write collided with a unique index.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    /// A stored row failed domain validation on the way out.
    #[error("stored data failed validation: {0}")]
    ValidationError(String),
    /// Any other database failure.
    #[error("database error: {0}")]
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            ) => Self::DuplicateKey(info.message().to_string()),
            other => Self::Database(other),
        }
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
