//! Read-only item catalog consumed by the equipment aggregator.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::common::ItemId;
use crate::equipment::EquipmentSlot;
use crate::stats::StatBlock;

/// Which equipment position an item is declared for.
///
/// Body kinds map 1:1 onto a slot. `OneHanded` fits either hand slot;
/// `TwoHanded` occupies both hand slots atomically, so `equip` can
/// pattern-match "one slot" vs "paired hand slots" without inspecting the
/// item further.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ItemSlotKind {
    Helmet,
    ShoulderGuards,
    ArmGuards,
    Hands,
    Rings,
    Necklace,
    Chest,
    Legs,
    Belt,
    Feet,
    Cape,
    OneHanded,
    TwoHanded,
}

impl ItemSlotKind {
    /// The single body slot this kind maps to, if it is not a hand kind.
    pub fn body_slot(self) -> Option<EquipmentSlot> {
        match self {
            ItemSlotKind::Helmet => Some(EquipmentSlot::Helmet),
            ItemSlotKind::ShoulderGuards => Some(EquipmentSlot::ShoulderGuards),
            ItemSlotKind::ArmGuards => Some(EquipmentSlot::ArmGuards),
            ItemSlotKind::Hands => Some(EquipmentSlot::Hands),
            ItemSlotKind::Rings => Some(EquipmentSlot::Rings),
            ItemSlotKind::Necklace => Some(EquipmentSlot::Necklace),
            ItemSlotKind::Chest => Some(EquipmentSlot::Chest),
            ItemSlotKind::Legs => Some(EquipmentSlot::Legs),
            ItemSlotKind::Belt => Some(EquipmentSlot::Belt),
            ItemSlotKind::Feet => Some(EquipmentSlot::Feet),
            ItemSlotKind::Cape => Some(EquipmentSlot::Cape),
            ItemSlotKind::OneHanded | ItemSlotKind::TwoHanded => None,
        }
    }
}

/// Flat combat attribute vector carried by items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeBlock {
    pub atk: u32,
    pub def: u32,
    pub range: u32,
    pub mag_atk: u32,
    pub mag_def: u32,
    pub rate: u32,
}

impl AttributeBlock {
    pub fn saturating_add(&self, other: &AttributeBlock) -> AttributeBlock {
        AttributeBlock {
            atk: self.atk.saturating_add(other.atk),
            def: self.def.saturating_add(other.def),
            range: self.range.saturating_add(other.range),
            mag_atk: self.mag_atk.saturating_add(other.mag_atk),
            mag_def: self.mag_def.saturating_add(other.mag_def),
            rate: self.rate.saturating_add(other.rate),
        }
    }
}

/// A (bonus, reducer) pair. Items can both grant and suppress values;
/// aggregation keeps the two directions separate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierPair<T> {
    pub bonus: T,
    pub reducer: T,
}

/// Catalog entry for an equippable item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemId,
    pub level_required: u32,
    pub slot: ItemSlotKind,
    pub stats: ModifierPair<StatBlock>,
    pub attributes: ModifierPair<AttributeBlock>,
    pub available: bool,
}

/// The administrator-owned item catalog. Entries are disabled, never
/// removed, so an id stays resolvable for items already equipped.
pub trait ItemCatalog {
    fn item(&self, id: ItemId) -> Option<ItemDefinition>;
}
