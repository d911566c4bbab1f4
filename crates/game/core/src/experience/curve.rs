//! Level derivation from cumulative experience.

use serde::{Deserialize, Serialize};

/// Monotonically non-decreasing cumulative thresholds. `thresholds[n]` is the
/// total experience at which a character reaches level `n + 1`; the curve's
/// length is the level cap.
///
/// Levels are derived, never stored: the same experience total always maps to
/// the same level, so replacing the curve retroactively re-levels everyone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCurve {
    thresholds: Vec<u64>,
}

impl LevelCurve {
    pub fn new(thresholds: Vec<u64>) -> Self {
        debug_assert!(thresholds.windows(2).all(|w| w[0] <= w[1]));
        Self { thresholds }
    }

    /// Build from per-level increments (the cost of each next level).
    pub fn from_deltas(deltas: &[u64]) -> Self {
        let mut total = 0u64;
        let thresholds = deltas
            .iter()
            .map(|d| {
                total += d;
                total
            })
            .collect();
        Self { thresholds }
    }

    /// Level reached with `experience` total points.
    pub fn level_for(&self, experience: u64) -> u32 {
        self.thresholds.partition_point(|&t| t <= experience) as u32
    }

    /// Total experience needed to reach `level`, or `None` past the cap.
    /// Level 0 is free.
    pub fn threshold(&self, level: u32) -> Option<u64> {
        if level == 0 {
            Some(0)
        } else {
            self.thresholds.get(level as usize - 1).copied()
        }
    }

    pub fn max_level(&self) -> u32 {
        self.thresholds.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}
