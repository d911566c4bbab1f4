//! Equipment slots and modifier aggregation.

mod aggregator;
mod slots;

pub use slots::{CharacterEquipment, EquipmentSlot, EquipmentState, HandSlots};
