//! Service layer sitting between the HTTP handlers and the repositories.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod member;

#[derive(Debug, Error)]
/// Failures reported by the service layer.
pub enum ServiceError {
    #[error("invalid page request: {0}")]
    InvalidPageRequest(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("request timed out")]
    Timeout,

    #[error(transparent)]
    Repository(RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        if err.is_unavailable() {
            ServiceError::StoreUnavailable(err.to_string())
        } else {
            ServiceError::Repository(err)
        }
    }
}
