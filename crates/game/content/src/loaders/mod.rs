//! Content loaders for reading balance data from RON files.
//!
//! Loaders convert RON files into `saga-core` values the runtime feeds into
//! the engine: the level curve, the item catalog, and recipe catalogs.

pub mod curve;
pub mod items;
pub mod recipes;

pub use curve::CurveLoader;
pub use items::ItemLoader;
pub use recipes::RecipeLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
