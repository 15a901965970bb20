use thiserror::Error;

/// Errors that can occur during auth operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
