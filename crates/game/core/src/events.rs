//! Structured change records emitted by every mutation.
//!
//! One variant per mutating operation, carrying the character id and the
//! before/after values a downstream indexer or audit log needs to replay the
//! change without re-executing it. A single call may emit several records
//! (e.g. one experience grant plus several level-ups).

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::common::{ItemId, Principal, RecipeId, ResourceId, Timestamp};
use crate::equipment::EquipmentSlot;
use crate::identity::{CharacterId, CivilizationId};
use crate::production::Variant;
use crate::stats::StatBlock;

/// Snapshot of a character's stat accounting, captured around a mutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsView {
    pub base: StatBlock,
    pub pool: StatBlock,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeEvent {
    CivilizationRegistered {
        id: CivilizationId,
        label: String,
    },
    CharacterMinted {
        id: CharacterId,
        owner: Principal,
    },
    AccountUpgradePurchased {
        id: CharacterId,
        upgrade: u8,
        price: u64,
    },

    AuthorityAdded {
        authority: Principal,
    },
    AuthorityRemoved {
        authority: Principal,
    },
    ExperienceGained {
        id: CharacterId,
        amount: u64,
        total: u64,
    },
    LevelUp {
        id: CharacterId,
        level: u32,
    },

    PointsAssigned {
        id: CharacterId,
        before: StatsView,
        after: StatsView,
    },
    PointsConsumed {
        id: CharacterId,
        before: StatsView,
        after: StatsView,
    },
    PointsSacrificed {
        id: CharacterId,
        before: StatsView,
        after: StatsView,
    },
    PoolRefreshed {
        id: CharacterId,
        with_token: bool,
        before: StatsView,
        after: StatsView,
    },
    PointVitalized {
        id: CharacterId,
        before: StatsView,
        after: StatsView,
    },

    Equipped {
        id: CharacterId,
        slot: EquipmentSlot,
        item: ItemId,
        evicted: Vec<ItemId>,
    },
    Unequipped {
        id: CharacterId,
        slot: EquipmentSlot,
        item: ItemId,
    },

    ProductionStarted {
        variant: Variant,
        id: CharacterId,
        slot: u8,
        recipe: RecipeId,
        ready_at: Timestamp,
        fulfillment_pct: u8,
    },
    ProductionClaimed {
        variant: Variant,
        id: CharacterId,
        slot: u8,
        recipe: RecipeId,
        rewards: Vec<(ResourceId, u64)>,
        experience: u64,
    },
    SlotPurchased {
        variant: Variant,
        id: CharacterId,
        purchased: u8,
    },

    RecipeAdded {
        variant: Variant,
        recipe: RecipeId,
    },
    RecipeUpdated {
        variant: Variant,
        recipe: RecipeId,
    },
    RecipeEnabled {
        variant: Variant,
        recipe: RecipeId,
    },
    RecipeDisabled {
        variant: Variant,
        recipe: RecipeId,
    },

    PauseChanged {
        component: Cow<'static, str>,
        paused: bool,
    },
}

impl ChangeEvent {
    /// Stable operation name for log indexing.
    pub fn operation(&self) -> &'static str {
        match self {
            ChangeEvent::CivilizationRegistered { .. } => "register_civilization",
            ChangeEvent::CharacterMinted { .. } => "mint",
            ChangeEvent::AccountUpgradePurchased { .. } => "buy_account_upgrade",
            ChangeEvent::AuthorityAdded { .. } => "add_authority",
            ChangeEvent::AuthorityRemoved { .. } => "remove_authority",
            ChangeEvent::ExperienceGained { .. } => "assign_experience",
            ChangeEvent::LevelUp { .. } => "level_up",
            ChangeEvent::PointsAssigned { .. } => "assign_points",
            ChangeEvent::PointsConsumed { .. } => "consume",
            ChangeEvent::PointsSacrificed { .. } => "sacrifice",
            ChangeEvent::PoolRefreshed { with_token: false, .. } => "refresh",
            ChangeEvent::PoolRefreshed { with_token: true, .. } => "refresh_with_token",
            ChangeEvent::PointVitalized { .. } => "vitalize",
            ChangeEvent::Equipped { .. } => "equip",
            ChangeEvent::Unequipped { .. } => "unequip",
            ChangeEvent::ProductionStarted { .. } => "production_start",
            ChangeEvent::ProductionClaimed { .. } => "production_claim",
            ChangeEvent::SlotPurchased { .. } => "buy_upgrade",
            ChangeEvent::RecipeAdded { .. } => "add_recipe",
            ChangeEvent::RecipeUpdated { .. } => "update_recipe",
            ChangeEvent::RecipeEnabled { .. } => "enable_recipe",
            ChangeEvent::RecipeDisabled { .. } => "disable_recipe",
            ChangeEvent::PauseChanged { .. } => "set_paused",
        }
    }

    /// Character the record concerns, when the operation is character-scoped.
    pub fn character(&self) -> Option<CharacterId> {
        match self {
            ChangeEvent::CharacterMinted { id, .. }
            | ChangeEvent::AccountUpgradePurchased { id, .. }
            | ChangeEvent::ExperienceGained { id, .. }
            | ChangeEvent::LevelUp { id, .. }
            | ChangeEvent::PointsAssigned { id, .. }
            | ChangeEvent::PointsConsumed { id, .. }
            | ChangeEvent::PointsSacrificed { id, .. }
            | ChangeEvent::PoolRefreshed { id, .. }
            | ChangeEvent::PointVitalized { id, .. }
            | ChangeEvent::Equipped { id, .. }
            | ChangeEvent::Unequipped { id, .. }
            | ChangeEvent::ProductionStarted { id, .. }
            | ChangeEvent::ProductionClaimed { id, .. }
            | ChangeEvent::SlotPurchased { id, .. } => Some(*id),
            _ => None,
        }
    }
}
