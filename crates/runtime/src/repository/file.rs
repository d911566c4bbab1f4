//! File-based snapshot repository.

use std::fs;
use std::path::{Path, PathBuf};

use saga_core::WorldState;

use crate::repository::{RepositoryError, Snapshot, StateRepository};

/// Stores one bincode snapshot file per label under a base directory.
/// Writes go to a temp file first and are renamed into place, so a crash
/// mid-write never clobbers the previous snapshot.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn snapshot_path(&self, label: &str) -> PathBuf {
        self.base_dir.join(format!("{label}.bin"))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, label: &str, state: &WorldState) -> Result<(), RepositoryError> {
        let path = self.snapshot_path(label);
        let temp_path = path.with_extension("bin.tmp");

        let bytes = Snapshot::capture(state)?.to_bytes()?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(label, path = %path.display(), "saved snapshot");
        Ok(())
    }

    fn load(&self, label: &str) -> Result<Option<WorldState>, RepositoryError> {
        let path = self.snapshot_path(label);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        let state = Snapshot::from_bytes(&bytes)?.restore()?;
        tracing::debug!(label, path = %path.display(), "loaded snapshot");
        Ok(Some(state))
    }

    fn exists(&self, label: &str) -> bool {
        self.snapshot_path(label).exists()
    }

    fn delete(&self, label: &str) -> Result<(), RepositoryError> {
        let path = self.snapshot_path(label);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saga_core::{EngineConfig, Principal};

    #[test]
    fn save_load_delete_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path()).unwrap();
        let state = WorldState::new(Principal(9), EngineConfig::default());

        assert!(!repo.exists("main"));
        repo.save("main", &state).unwrap();
        assert!(repo.exists("main"));
        assert_eq!(repo.load("main").unwrap(), Some(state));

        repo.delete("main").unwrap();
        assert!(!repo.exists("main"));
        assert_eq!(repo.load("main").unwrap(), None);
    }

    #[test]
    fn corrupted_file_surfaces_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path()).unwrap();
        let state = WorldState::new(Principal(9), EngineConfig::default());
        repo.save("main", &state).unwrap();

        let path = dir.path().join("main.bin");
        let mut bytes = fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        fs::write(&path, bytes).unwrap();

        assert!(repo.load("main").is_err());
    }
}
