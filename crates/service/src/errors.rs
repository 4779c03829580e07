use models::errors::ModelError;
use thiserror::Error;

/// Failures surfaced by service operations. Messages are display-ready.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("a client with email {0} already exists")]
    DuplicateEmail(String),
    #[error("fixture error: {0}")]
    Fixture(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::DuplicateEmail(_) => "duplicate_email",
            ServiceError::Fixture(_) => "fixture",
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::Fixture(msg) => ServiceError::Fixture(msg),
        }
    }
}
