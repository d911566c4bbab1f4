//! Level curve loader.

use std::path::Path;

use saga_core::LevelCurve;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Curve structure for RON files: per-level increments, not cumulative
/// totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveSpec {
    pub deltas: Vec<u64>,
}

/// Loader for the level curve from RON files.
pub struct CurveLoader;

impl CurveLoader {
    pub fn load(path: &Path) -> LoadResult<LevelCurve> {
        let content = read_file(path)?;
        let spec: CurveSpec = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse curve RON: {}", e))?;
        if spec.deltas.is_empty() {
            anyhow::bail!("Curve file {} contains no levels", path.display());
        }
        Ok(LevelCurve::from_deltas(&spec.deltas))
    }
}
