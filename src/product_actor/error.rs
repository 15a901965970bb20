use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::ValidationErrors;

/// Errors surfaced by catalog operations.
///
/// Updating or deleting an unknown id is reported as `NotFound`; the store is
/// left unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Product validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CatalogError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => CatalogError::NotFound(id),
            FrameworkError::Validation(errors) => CatalogError::Validation(errors),
            other => CatalogError::ActorCommunicationError(other.to_string()),
        }
    }
}
