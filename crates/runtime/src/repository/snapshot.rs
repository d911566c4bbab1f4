//! Snapshot envelope: version, integrity digest, payload.

use saga_core::WorldState;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::repository::RepositoryError;

/// Bump on incompatible changes to [`WorldState`] or the envelope itself.
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk form of a world snapshot. The digest covers the serialized state
/// payload, so corruption is detected before a bad world is handed to the
/// engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub saved_at: chrono::DateTime<chrono::Utc>,
    pub digest: String,
    payload: Vec<u8>,
}

impl Snapshot {
    pub fn capture(state: &WorldState) -> Result<Self, RepositoryError> {
        let payload = bincode::serialize(state)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        Ok(Self {
            version: SNAPSHOT_VERSION,
            saved_at: chrono::Utc::now(),
            digest: digest_hex(&payload),
            payload,
        })
    }

    /// Verify version and digest, then decode the payload.
    pub fn restore(&self) -> Result<WorldState, RepositoryError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(RepositoryError::UnsupportedVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        let computed = digest_hex(&self.payload);
        if computed != self.digest {
            return Err(RepositoryError::DigestMismatch {
                stored: self.digest.clone(),
                computed,
            });
        }
        bincode::deserialize(&self.payload)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, RepositoryError> {
        bincode::serialize(self).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RepositoryError> {
        bincode::deserialize(bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }
}

fn digest_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
