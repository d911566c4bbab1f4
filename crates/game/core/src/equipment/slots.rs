//! Equipment slot layout per character.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::common::ItemId;
use crate::identity::CharacterId;

/// The thirteen wearable positions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentSlot {
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
    LeftHand,
    RightHand,
}

impl EquipmentSlot {
    pub fn is_hand(self) -> bool {
        matches!(self, EquipmentSlot::LeftHand | EquipmentSlot::RightHand)
    }
}

/// The two hand slots as one value, so a two-handed item cannot exist in
/// only one of them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandSlots {
    #[default]
    Empty,
    Split {
        left: Option<ItemId>,
        right: Option<ItemId>,
    },
    TwoHanded(ItemId),
}

impl HandSlots {
    pub fn item_in(self, slot: EquipmentSlot) -> Option<ItemId> {
        match self {
            HandSlots::Empty => None,
            HandSlots::TwoHanded(item) => Some(item),
            HandSlots::Split { left, right } => match slot {
                EquipmentSlot::LeftHand => left,
                EquipmentSlot::RightHand => right,
                _ => None,
            },
        }
    }

    /// Normalize `Split { None, None }` back to `Empty`.
    fn normalized(self) -> Self {
        match self {
            HandSlots::Split {
                left: None,
                right: None,
            } => HandSlots::Empty,
            other => other,
        }
    }

    pub(crate) fn set(self, slot: EquipmentSlot, item: Option<ItemId>) -> Self {
        let (mut left, mut right) = match self {
            HandSlots::Split { left, right } => (left, right),
            _ => (None, None),
        };
        match slot {
            EquipmentSlot::LeftHand => left = item,
            EquipmentSlot::RightHand => right = item,
            _ => {}
        }
        HandSlots::Split { left, right }.normalized()
    }
}

/// What one character wears. Body slots are independent options; the hands
/// share [`HandSlots`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterEquipment {
    pub helmet: Option<ItemId>,
    pub shoulder_guards: Option<ItemId>,
    pub arm_guards: Option<ItemId>,
    pub hands: Option<ItemId>,
    pub rings: Option<ItemId>,
    pub necklace: Option<ItemId>,
    pub chest: Option<ItemId>,
    pub legs: Option<ItemId>,
    pub belt: Option<ItemId>,
    pub feet: Option<ItemId>,
    pub cape: Option<ItemId>,
    pub held: HandSlots,
}

impl CharacterEquipment {
    pub fn item_in(&self, slot: EquipmentSlot) -> Option<ItemId> {
        if slot.is_hand() {
            return self.held.item_in(slot);
        }
        *self.body(slot)
    }

    pub(crate) fn body(&self, slot: EquipmentSlot) -> &Option<ItemId> {
        match slot {
            EquipmentSlot::Helmet => &self.helmet,
            EquipmentSlot::ShoulderGuards => &self.shoulder_guards,
            EquipmentSlot::ArmGuards => &self.arm_guards,
            EquipmentSlot::Hands => &self.hands,
            EquipmentSlot::Rings => &self.rings,
            EquipmentSlot::Necklace => &self.necklace,
            EquipmentSlot::Chest => &self.chest,
            EquipmentSlot::Legs => &self.legs,
            EquipmentSlot::Belt => &self.belt,
            EquipmentSlot::Feet => &self.feet,
            EquipmentSlot::Cape => &self.cape,
            EquipmentSlot::LeftHand | EquipmentSlot::RightHand => &None,
        }
    }

    pub(crate) fn body_mut(&mut self, slot: EquipmentSlot) -> Option<&mut Option<ItemId>> {
        match slot {
            EquipmentSlot::Helmet => Some(&mut self.helmet),
            EquipmentSlot::ShoulderGuards => Some(&mut self.shoulder_guards),
            EquipmentSlot::ArmGuards => Some(&mut self.arm_guards),
            EquipmentSlot::Hands => Some(&mut self.hands),
            EquipmentSlot::Rings => Some(&mut self.rings),
            EquipmentSlot::Necklace => Some(&mut self.necklace),
            EquipmentSlot::Chest => Some(&mut self.chest),
            EquipmentSlot::Legs => Some(&mut self.legs),
            EquipmentSlot::Belt => Some(&mut self.belt),
            EquipmentSlot::Feet => Some(&mut self.feet),
            EquipmentSlot::Cape => Some(&mut self.cape),
            EquipmentSlot::LeftHand | EquipmentSlot::RightHand => None,
        }
    }

    /// Every equipped item id, with a two-handed item reported once.
    pub fn equipped_items(&self) -> Vec<ItemId> {
        let mut items: Vec<ItemId> = [
            self.helmet,
            self.shoulder_guards,
            self.arm_guards,
            self.hands,
            self.rings,
            self.necklace,
            self.chest,
            self.legs,
            self.belt,
            self.feet,
            self.cape,
        ]
        .into_iter()
        .flatten()
        .collect();
        match self.held {
            HandSlots::Empty => {}
            HandSlots::TwoHanded(item) => items.push(item),
            HandSlots::Split { left, right } => {
                items.extend(left);
                items.extend(right);
            }
        }
        items
    }

    pub fn is_bare(&self) -> bool {
        self.equipped_items().is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentState {
    pub paused: bool,
    pub characters: BTreeMap<CharacterId, CharacterEquipment>,
}

impl EquipmentState {
    pub fn loadout(&self, id: CharacterId) -> CharacterEquipment {
        self.characters.get(&id).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_slots_normalize_to_empty() {
        let hands = HandSlots::Split {
            left: Some(ItemId(7)),
            right: None,
        };
        assert_eq!(hands.set(EquipmentSlot::LeftHand, None), HandSlots::Empty);
    }

    #[test]
    fn two_handed_item_visible_from_either_hand() {
        let hands = HandSlots::TwoHanded(ItemId(3));
        assert_eq!(hands.item_in(EquipmentSlot::LeftHand), Some(ItemId(3)));
        assert_eq!(hands.item_in(EquipmentSlot::RightHand), Some(ItemId(3)));
    }

    #[test]
    fn equipped_items_counts_two_hander_once() {
        let loadout = CharacterEquipment {
            helmet: Some(ItemId(1)),
            held: HandSlots::TwoHanded(ItemId(2)),
            ..CharacterEquipment::default()
        };
        assert_eq!(loadout.equipped_items(), vec![ItemId(1), ItemId(2)]);
    }
}
