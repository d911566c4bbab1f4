//! Deterministic progression and resource-economy rules.
//!
//! `saga-core` defines the canonical rules (identity, experience, stats,
//! equipment, production) and exposes pure APIs reusable by the runtime and
//! offline tools. All state mutation flows through [`engine::Engine`]; the
//! external world (ownership, token balances, the clock) arrives through the
//! [`env`] traits, so the crate itself performs no I/O.
pub mod common;
pub mod config;
pub mod engine;
pub mod env;
pub mod equipment;
pub mod error;
pub mod events;
pub mod experience;
pub mod identity;
pub mod production;
pub mod state;
pub mod stats;
#[cfg(test)]
pub(crate) mod testkit;
pub use common::{ItemId, Principal, RecipeId, ResourceId, Timestamp};
pub use config::EngineConfig;
pub use engine::{Component, Engine};
pub use env::{
    AttributeBlock, Clock, Env, ItemCatalog, ItemDefinition, ItemSlotKind, LedgerError,
    ModifierPair, OwnershipRegistry, PaymentError, PaymentToken, ResourceLedger,
};
pub use equipment::{CharacterEquipment, EquipmentSlot, EquipmentState, HandSlots};
pub use error::{EngineError, ErrorKind};
pub use events::{ChangeEvent, StatsView};
pub use experience::{ExperienceState, LevelCurve};
pub use identity::{
    CharacterId, CivilizationEntry, CivilizationId, IdentityState, TokenNumber, UpgradeConfig,
    ACCOUNT_UPGRADES,
};
pub use production::{
    CharacterSlots, MaterialLine, ProductionState, Recipe, RecipeSpec, SlotState, Variant,
};
pub use state::WorldState;
pub use stats::{StatBlock, StatKind, StatRecord, StatsState};
