//! Unified error taxonomy for every engine operation.
//!
//! Each variant carries the context a caller needs to resolve the condition;
//! [`EngineError::kind`] collapses variants into the coarse categories used
//! by tests, metrics, and API mapping. Checks inside an operation run in a
//! fixed order (existence, authorization, pause, validation, level,
//! resources) so error precedence is reproducible.

use crate::common::{ItemId, Principal, RecipeId, ResourceId, Timestamp};
use crate::equipment::EquipmentSlot;
use crate::identity::{CharacterId, CivilizationId};
use crate::production::Variant;
use crate::stats::StatKind;

/// Coarse error category, stable across variant renames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    Validation,
    InsufficientResource,
    InsufficientAllowance,
    InsufficientLevel,
    StateConflict,
    NotReady,
    Cooldown,
    Paused,
}

impl ErrorKind {
    /// `NotReady` and `Cooldown` are named kinds of state conflict: the
    /// caller retries after time passes rather than after changing input.
    pub fn is_conflict(self) -> bool {
        matches!(
            self,
            ErrorKind::StateConflict | ErrorKind::NotReady | ErrorKind::Cooldown
        )
    }
}

/// The single error type surfaced by [`crate::Engine`] operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    // Existence
    #[error("unknown civilization {0}")]
    CivilizationNotFound(CivilizationId),

    #[error("character {0} is not minted")]
    CharacterNotFound(CharacterId),

    #[error("{variant} recipe {recipe} does not exist")]
    RecipeNotFound { variant: Variant, recipe: RecipeId },

    #[error("item {0} is not in the catalog")]
    ItemNotFound(ItemId),

    // Authorization
    #[error("{actor} is not allowed to access {character}")]
    NotAllowed {
        actor: Principal,
        character: CharacterId,
    },

    #[error("{0} is not an experience authority")]
    NotAuthority(Principal),

    #[error("{0} is not the engine admin")]
    NotAdmin(Principal),

    // Pause
    #[error("component is paused: {0}")]
    ComponentPaused(&'static str),

    // Validation
    #[error("invalid input: {0}")]
    Validation(&'static str),

    #[error("item {item} does not fit equipment slot {slot}")]
    WrongSlot { item: ItemId, slot: EquipmentSlot },

    #[error("equipment slot {0} is empty")]
    SlotEmpty(EquipmentSlot),

    #[error("account upgrade index {0} is invalid (expected 1..=3)")]
    InvalidUpgrade(u8),

    // Level
    #[error("level {required} required, character is level {actual}")]
    InsufficientLevel { required: u32, actual: u32 },

    // Resources
    #[error("not enough stat points: requested {requested}, available {available}")]
    InsufficientPoints { requested: u64, available: u64 },

    #[error("not enough {stat}: need {needed}, have {available}")]
    InsufficientStat {
        stat: StatKind,
        needed: u32,
        available: u32,
    },

    #[error("not enough {resource}: need {needed}, have {available}")]
    InsufficientMaterial {
        resource: ResourceId,
        needed: u64,
        available: u64,
    },

    #[error("payment balance too low: need {needed}, have {available}")]
    PaymentBalance { needed: u64, available: u64 },

    #[error("payment allowance too low: need {needed}, approved {approved}")]
    PaymentAllowance { needed: u64, approved: u64 },

    // State conflicts
    #[error("{variant} slot {slot} is locked (purchased {purchased})")]
    SlotLocked {
        variant: Variant,
        slot: u8,
        purchased: u8,
    },

    #[error("{variant} slot {slot} is busy")]
    SlotBusy { variant: Variant, slot: u8 },

    #[error("{variant} slot {slot} has nothing to claim")]
    NothingToClaim { variant: Variant, slot: u8 },

    #[error("{variant} slot {slot} is not ready until {ready_at}")]
    SlotNotReady {
        variant: Variant,
        slot: u8,
        ready_at: Timestamp,
    },

    #[error("no {0} slot upgrade available")]
    NoUpgradeAvailable(Variant),

    #[error("{variant} recipe {recipe} is disabled")]
    RecipeDisabled { variant: Variant, recipe: RecipeId },

    #[error("item {0} is not available")]
    ItemDisabled(ItemId),

    #[error("no sacrificed {0} point to restore")]
    NothingToRestore(StatKind),

    #[error("account upgrade {0} is not purchasable yet")]
    UpgradeNotInitialized(u8),

    #[error("account upgrade {0} already purchased")]
    UpgradeAlreadyPurchased(u8),

    // Cooldowns
    #[error("free refresh on cooldown until {0}")]
    RefreshCooldown(Timestamp),

    #[error("token refresh window used, next at {0}")]
    TokenRefreshCooldown(Timestamp),
}

impl From<crate::env::LedgerError> for EngineError {
    fn from(err: crate::env::LedgerError) -> Self {
        match err {
            crate::env::LedgerError::InsufficientBalance {
                resource,
                needed,
                available,
            } => EngineError::InsufficientMaterial {
                resource,
                needed,
                available,
            },
        }
    }
}

impl From<crate::env::PaymentError> for EngineError {
    fn from(err: crate::env::PaymentError) -> Self {
        match err {
            crate::env::PaymentError::InsufficientBalance { needed, available } => {
                EngineError::PaymentBalance { needed, available }
            }
            crate::env::PaymentError::InsufficientAllowance { needed, approved } => {
                EngineError::PaymentAllowance { needed, approved }
            }
        }
    }
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        use EngineError::*;
        match self {
            CivilizationNotFound(_)
            | CharacterNotFound(_)
            | RecipeNotFound { .. }
            | ItemNotFound(_) => ErrorKind::NotFound,

            NotAllowed { .. } | NotAuthority(_) | NotAdmin(_) => ErrorKind::Unauthorized,

            ComponentPaused(_) => ErrorKind::Paused,

            Validation(_) | WrongSlot { .. } | SlotEmpty(_) | InvalidUpgrade(_) => {
                ErrorKind::Validation
            }

            InsufficientLevel { .. } => ErrorKind::InsufficientLevel,

            InsufficientPoints { .. } | InsufficientStat { .. } | InsufficientMaterial { .. }
            | PaymentBalance { .. } => ErrorKind::InsufficientResource,

            PaymentAllowance { .. } => ErrorKind::InsufficientAllowance,

            SlotLocked { .. }
            | SlotBusy { .. }
            | NothingToClaim { .. }
            | NoUpgradeAvailable(_)
            | RecipeDisabled { .. }
            | ItemDisabled(_)
            | NothingToRestore(_)
            | UpgradeNotInitialized(_)
            | UpgradeAlreadyPurchased(_) => ErrorKind::StateConflict,

            SlotNotReady { .. } => ErrorKind::NotReady,

            RefreshCooldown(_) | TokenRefreshCooldown(_) => ErrorKind::Cooldown,
        }
    }
}
