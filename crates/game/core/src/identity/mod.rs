//! Character identity: civilizations, minting, account upgrades.

mod id;
mod registry;

pub use id::{CharacterId, CivilizationId, TokenNumber};
pub use registry::{CivilizationEntry, IdentityState, UpgradeConfig, ACCOUNT_UPGRADES};
