//! Runtime error surface.

use saga_core::EngineError;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// An engine operation was rejected; the world state is unchanged.
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("repository error: {0}")]
    Repository(#[from] crate::repository::RepositoryError),

    #[error("content error: {0}")]
    Content(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
