//! The three-axis stat vector shared by every accounting operation.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// One of the three character resource stats.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum StatKind {
    Might,
    Speed,
    Intellect,
}

impl StatKind {
    /// Declaration order, which is also the error-precedence order for
    /// per-stat checks.
    pub const ALL: [StatKind; 3] = [StatKind::Might, StatKind::Speed, StatKind::Intellect];
}

/// A (might, speed, intellect) triple used for bases, pools, costs, deltas,
/// and modifier totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub might: u32,
    pub speed: u32,
    pub intellect: u32,
}

impl StatBlock {
    pub const ZERO: Self = Self {
        might: 0,
        speed: 0,
        intellect: 0,
    };

    pub const fn new(might: u32, speed: u32, intellect: u32) -> Self {
        Self {
            might,
            speed,
            intellect,
        }
    }

    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Might => self.might,
            StatKind::Speed => self.speed,
            StatKind::Intellect => self.intellect,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut u32 {
        match kind {
            StatKind::Might => &mut self.might,
            StatKind::Speed => &mut self.speed,
            StatKind::Intellect => &mut self.intellect,
        }
    }

    /// Total points across all three stats. Widened to avoid overflow when
    /// summing adversarial inputs.
    pub fn sum(&self) -> u64 {
        u64::from(self.might) + u64::from(self.speed) + u64::from(self.intellect)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// True if every component of `self` is at least the matching component
    /// of `other`.
    pub fn covers(&self, other: &StatBlock) -> bool {
        StatKind::ALL
            .iter()
            .all(|&k| self.get(k) >= other.get(k))
    }

    pub fn saturating_add(&self, other: &StatBlock) -> StatBlock {
        StatBlock {
            might: self.might.saturating_add(other.might),
            speed: self.speed.saturating_add(other.speed),
            intellect: self.intellect.saturating_add(other.intellect),
        }
    }

    pub fn saturating_sub(&self, other: &StatBlock) -> StatBlock {
        StatBlock {
            might: self.might.saturating_sub(other.might),
            speed: self.speed.saturating_sub(other.speed),
            intellect: self.intellect.saturating_sub(other.intellect),
        }
    }

    /// Component-wise minimum.
    pub fn min(&self, other: &StatBlock) -> StatBlock {
        StatBlock {
            might: self.might.min(other.might),
            speed: self.speed.min(other.speed),
            intellect: self.intellect.min(other.intellect),
        }
    }
}
