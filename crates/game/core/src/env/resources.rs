//! The fungible-resource ledger holding materials, currencies, and item
//! inventories, keyed by character.

use crate::common::ResourceId;
use crate::identity::CharacterId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("insufficient balance of {resource}: need {needed}, have {available}")]
    InsufficientBalance {
        resource: ResourceId,
        needed: u64,
        available: u64,
    },
}

/// External balance book. Credits cannot fail; debits fail when the balance
/// is short. Implementations are internally synchronized.
pub trait ResourceLedger {
    fn balance_of(&self, id: CharacterId, resource: ResourceId) -> u64;

    fn credit(&self, id: CharacterId, resource: ResourceId, amount: u64);

    fn debit(&self, id: CharacterId, resource: ResourceId, amount: u64)
    -> Result<(), LedgerError>;
}
