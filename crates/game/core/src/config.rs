//! Engine-wide tuning values.
//!
//! Game balance (the curve, prices) is external configuration; these are the
//! knobs the engine itself interprets. Everything else admin-adjustable at
//! runtime (upgrade prices, recipe catalogs) lives in [`crate::WorldState`].

use serde::{Deserialize, Serialize};

use crate::experience::LevelCurve;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Points every character can allocate before any level is earned.
    pub base_points: u32,

    /// Seconds between free pool refreshes, and the width of the rolling
    /// window for token refreshes (separate clocks, same width).
    pub refresh_cooldown_secs: u64,

    /// Hard cap on production slots per character per variant.
    pub max_slots: u8,

    /// Cumulative experience thresholds driving level derivation.
    pub level_curve: LevelCurve,
}

impl EngineConfig {
    pub fn new(level_curve: LevelCurve) -> Self {
        Self {
            level_curve,
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_points: 6,
            refresh_cooldown_secs: 24 * 60 * 60,
            max_slots: 3,
            level_curve: LevelCurve::default(),
        }
    }
}
