//! Data-driven balance content and loaders.
//!
//! This crate houses the stock level curve and provides loaders for RON data
//! files:
//! - Level curves (per-level experience increments)
//! - Item catalogs (equipment definitions)
//! - Recipe catalogs (one file per production variant)
//!
//! Content is consumed by runtime providers and never appears in engine
//! state. All loaders deserialize directly into `saga-core` types.

pub mod curve;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use curve::{LEVEL_DELTAS, default_level_curve};

#[cfg(feature = "loaders")]
pub use loaders::{CurveLoader, ItemLoader, RecipeLoader};
