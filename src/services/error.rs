use thiserror::Error;

use crate::database::StoreError;

/// Domain failures shared by every service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Email or username already registered")]
    DuplicateIdentity,

    #[error("Dependency failure: {0}")]
    DependencyFailure(String),

    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Internal failure: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ServiceError::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::StorageFailure(err.to_string())
    }
}
