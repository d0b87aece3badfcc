use thiserror::Error;

use crate::db::RepositoryError;
use crate::places::PlacesError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Places(#[from] PlacesError),
}

impl ServiceError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ServiceError::InvalidInput(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            ServiceError::Repository(e) => e.is_not_found(),
            ServiceError::Places(e) => e.is_not_found(),
            ServiceError::InvalidInput(_) => false,
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
