//! World state persistence.

mod file;
mod memory;
mod snapshot;

pub use file::FileStateRepository;
pub use memory::InMemoryStateRepository;
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};

use saga_core::WorldState;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("snapshot version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("snapshot digest mismatch: stored {stored}, computed {computed}")]
    DigestMismatch { stored: String, computed: String },
}

/// Versioned world snapshots, keyed by label (e.g. session or shard name).
pub trait StateRepository: Send + Sync {
    fn save(&self, label: &str, state: &WorldState) -> Result<(), RepositoryError>;

    fn load(&self, label: &str) -> Result<Option<WorldState>, RepositoryError>;

    fn exists(&self, label: &str) -> bool;

    fn delete(&self, label: &str) -> Result<(), RepositoryError>;
}
