//! Recipe catalog entries.

use serde::{Deserialize, Serialize};

use crate::common::{RecipeId, ResourceId};
use crate::error::EngineError;
use crate::stats::StatBlock;

/// One material line of a recipe cost or reward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialLine {
    pub resource: ResourceId,
    pub amount: u64,
}

/// A validated catalog entry. Disabled recipes stay in the catalog so slots
/// already cooking them can still be claimed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub enabled: bool,
    pub level_required: u32,
    /// Pool points consumed on start. For quests, the ceiling the committed
    /// effort is measured against.
    pub stats_cost: StatBlock,
    pub cooldown_secs: u64,
    pub materials: Vec<MaterialLine>,
    pub rewards: Vec<MaterialLine>,
    pub experience: u64,
}

/// Unvalidated recipe input, with costs and rewards as parallel id/amount
/// arrays as catalog tooling supplies them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSpec {
    pub level_required: u32,
    pub stats_cost: StatBlock,
    pub cooldown_secs: u64,
    pub materials: Vec<ResourceId>,
    pub material_amounts: Vec<u64>,
    pub rewards: Vec<ResourceId>,
    pub reward_amounts: Vec<u64>,
    pub experience: u64,
}

impl RecipeSpec {
    /// Validate and zip the parallel arrays into a catalog entry.
    pub fn into_recipe(self, id: RecipeId) -> Result<Recipe, EngineError> {
        if self.materials.len() != self.material_amounts.len() {
            return Err(EngineError::Validation(
                "material ids and amounts differ in length",
            ));
        }
        if self.rewards.len() != self.reward_amounts.len() {
            return Err(EngineError::Validation(
                "reward ids and amounts differ in length",
            ));
        }
        if self.material_amounts.iter().any(|&a| a == 0)
            || self.reward_amounts.iter().any(|&a| a == 0)
        {
            return Err(EngineError::Validation("zero amount in recipe line"));
        }

        let zip = |ids: Vec<ResourceId>, amounts: Vec<u64>| {
            ids.into_iter()
                .zip(amounts)
                .map(|(resource, amount)| MaterialLine { resource, amount })
                .collect()
        };
        Ok(Recipe {
            id,
            enabled: true,
            level_required: self.level_required,
            stats_cost: self.stats_cost,
            cooldown_secs: self.cooldown_secs,
            materials: zip(self.materials, self.material_amounts),
            rewards: zip(self.rewards, self.reward_amounts),
            experience: self.experience,
        })
    }
}
