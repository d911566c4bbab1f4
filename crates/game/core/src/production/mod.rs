//! Cooldown-gated production slots shared by craft, forge, and quest.

mod engine;
mod recipe;
mod slot;
mod variant;

pub use recipe::{MaterialLine, Recipe, RecipeSpec};
pub use slot::{CharacterSlots, ProductionState, SlotState};
pub use variant::Variant;
