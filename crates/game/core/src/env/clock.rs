//! Trusted time source.

use crate::common::Timestamp;

/// Monotonically non-decreasing wall clock. Cooldowns are stored absolute
/// deadlines compared against this; nothing in the engine sleeps or waits.
pub trait Clock {
    fn now(&self) -> Timestamp;
}
