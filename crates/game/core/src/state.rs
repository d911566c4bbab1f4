//! Aggregate persistent state.
//!
//! Logically a key-value store keyed by character id for the per-character
//! tables, plus global tables for the civilization registry and the recipe
//! catalogs. Everything is serde-serializable; the runtime wraps it in a
//! versioned snapshot for persistence.

use serde::{Deserialize, Serialize};

use crate::common::Principal;
use crate::config::EngineConfig;
use crate::equipment::EquipmentState;
use crate::experience::ExperienceState;
use crate::identity::IdentityState;
use crate::production::{ProductionState, Variant};
use crate::stats::StatsState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    /// The privileged authority for admin operations (catalog management,
    /// pausing, authority-set changes, prices).
    pub admin: Principal,
    pub config: EngineConfig,

    pub identity: IdentityState,
    pub experience: ExperienceState,
    pub stats: StatsState,
    pub equipment: EquipmentState,

    pub craft: ProductionState,
    pub forge: ProductionState,
    pub quest: ProductionState,
}

impl WorldState {
    pub fn new(admin: Principal, config: EngineConfig) -> Self {
        Self {
            admin,
            config,
            identity: IdentityState::default(),
            experience: ExperienceState::default(),
            stats: StatsState::default(),
            equipment: EquipmentState::default(),
            craft: ProductionState::new(Variant::Craft),
            forge: ProductionState::new(Variant::Forge),
            quest: ProductionState::new(Variant::Quest),
        }
    }

    pub fn production(&self, variant: Variant) -> &ProductionState {
        match variant {
            Variant::Craft => &self.craft,
            Variant::Forge => &self.forge,
            Variant::Quest => &self.quest,
        }
    }

    pub fn production_mut(&mut self, variant: Variant) -> &mut ProductionState {
        match variant {
            Variant::Craft => &mut self.craft,
            Variant::Forge => &mut self.forge,
            Variant::Quest => &mut self.quest,
        }
    }
}
