//! Runtime orchestration for the progression engine.
//!
//! This crate wires the pure rules in `saga-core` to the outside world:
//! concrete providers for the collaborator traits, a service that serializes
//! command execution over shared state, broadcast fan-out of change records,
//! and snapshot persistence.
//!
//! Modules by responsibility:
//! - [`service`] hosts [`EngineService`] and the [`Command`] surface
//! - [`providers`] implements the `saga-core` collaborator traits in memory
//! - [`events`] broadcasts change records to subscribers
//! - [`repository`] persists versioned world snapshots
pub mod error;
pub mod events;
pub mod providers;
pub mod repository;
pub mod service;

pub use error::{Result, RuntimeError};
pub use events::{EventBus, EventEnvelope};
pub use providers::{
    InMemoryCatalog, InMemoryLedger, InMemoryOwnership, InMemoryToken, ManualClock, ProviderSet,
    SystemClock,
};
pub use repository::{
    FileStateRepository, InMemoryStateRepository, RepositoryError, Snapshot, SNAPSHOT_VERSION,
    StateRepository,
};
pub use service::{Command, EngineService};
