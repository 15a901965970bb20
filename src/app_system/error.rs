use thiserror::Error;

use crate::persistence::PersistenceError;

/// Errors raised while starting or stopping the storefront system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("failed to load stored state: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}
