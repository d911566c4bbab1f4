//! Experience accounting and level derivation.

mod curve;
mod ledger;

pub use curve::LevelCurve;
pub use ledger::ExperienceState;
