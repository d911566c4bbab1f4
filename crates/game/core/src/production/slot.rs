//! Per-character production slots and the per-variant state table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::{RecipeId, Timestamp};
use crate::identity::CharacterId;
use crate::production::{MaterialLine, Recipe, Variant};

/// One production slot. A cooking slot carries a frozen copy of the timing,
/// fulfillment, and payout decided at start, so later catalog edits cannot
/// change what an in-flight job pays out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotState {
    #[default]
    Idle,
    Cooking {
        recipe: RecipeId,
        ready_at: Timestamp,
        /// Reward/experience scale in whole percent, 100 outside quests.
        fulfillment_pct: u8,
        /// Reward lines copied from the recipe at start.
        rewards: Vec<MaterialLine>,
        /// Experience copied from the recipe at start.
        experience: u64,
    },
}

impl SlotState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SlotState::Idle)
    }
}

/// A character's slots within one variant. The first slot is free; further
/// slots are purchased up to the engine-wide cap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSlots {
    pub purchased: u8,
    pub slots: Vec<SlotState>,
}

impl Default for CharacterSlots {
    fn default() -> Self {
        Self {
            purchased: 1,
            slots: Vec::new(),
        }
    }
}

impl CharacterSlots {
    pub fn slot(&self, index: u8) -> SlotState {
        self.slots.get(index as usize).cloned().unwrap_or_default()
    }

    pub fn set_slot(&mut self, index: u8, state: SlotState) {
        let index = index as usize;
        if self.slots.len() <= index {
            self.slots.resize(index + 1, SlotState::Idle);
        }
        self.slots[index] = state;
    }
}

/// One variant's catalog and slot tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionState {
    pub variant: Variant,
    pub paused: bool,
    /// Payment-token price of each additional slot.
    pub slot_price: u64,
    next_recipe: u32,
    pub recipes: BTreeMap<RecipeId, Recipe>,
    pub characters: BTreeMap<CharacterId, CharacterSlots>,
}

impl ProductionState {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            paused: false,
            slot_price: 0,
            next_recipe: 0,
            recipes: BTreeMap::new(),
            characters: BTreeMap::new(),
        }
    }

    pub fn recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.get(&id)
    }

    pub fn character(&self, id: CharacterId) -> CharacterSlots {
        self.characters.get(&id).cloned().unwrap_or_default()
    }

    /// Allocate the next sequential recipe id, starting at 1.
    pub(crate) fn allocate_recipe_id(&mut self) -> RecipeId {
        self.next_recipe += 1;
        RecipeId(self.next_recipe)
    }
}
