//! In-memory snapshot repository for tests and ephemeral deployments.

use std::collections::HashMap;
use std::sync::RwLock;

use saga_core::WorldState;

use crate::repository::{RepositoryError, Snapshot, StateRepository};

/// Keeps snapshots in a map. Goes through the same envelope as the file
/// backend so version and digest handling are exercised identically.
#[derive(Default)]
pub struct InMemoryStateRepository {
    snapshots: RwLock<HashMap<String, Snapshot>>,
}

impl StateRepository for InMemoryStateRepository {
    fn save(&self, label: &str, state: &WorldState) -> Result<(), RepositoryError> {
        let snapshot = Snapshot::capture(state)?;
        self.snapshots
            .write()
            .expect("repository lock poisoned")
            .insert(label.to_owned(), snapshot);
        Ok(())
    }

    fn load(&self, label: &str) -> Result<Option<WorldState>, RepositoryError> {
        let snapshots = self.snapshots.read().expect("repository lock poisoned");
        match snapshots.get(label) {
            Some(snapshot) => Ok(Some(snapshot.restore()?)),
            None => Ok(None),
        }
    }

    fn exists(&self, label: &str) -> bool {
        self.snapshots
            .read()
            .expect("repository lock poisoned")
            .contains_key(label)
    }

    fn delete(&self, label: &str) -> Result<(), RepositoryError> {
        self.snapshots
            .write()
            .expect("repository lock poisoned")
            .remove(label);
        Ok(())
    }
}
