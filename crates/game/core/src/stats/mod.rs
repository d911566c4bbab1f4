//! Stat pools and point accounting.

mod accountant;
mod block;

pub use accountant::{StatRecord, StatsState};
pub use block::{StatBlock, StatKind};
