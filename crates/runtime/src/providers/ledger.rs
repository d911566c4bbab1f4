//! In-memory fungible-resource ledger.

use std::collections::HashMap;
use std::sync::RwLock;

use saga_core::{CharacterId, LedgerError, ResourceId, ResourceLedger};

/// Balance book keyed by (character, resource).
#[derive(Default)]
pub struct InMemoryLedger {
    balances: RwLock<HashMap<(CharacterId, ResourceId), u64>>,
}

impl InMemoryLedger {
    /// Set a balance directly, for seeding worlds and tests.
    pub fn set_balance(&self, id: CharacterId, resource: ResourceId, amount: u64) {
        self.balances
            .write()
            .expect("ledger lock poisoned")
            .insert((id, resource), amount);
    }
}

impl ResourceLedger for InMemoryLedger {
    fn balance_of(&self, id: CharacterId, resource: ResourceId) -> u64 {
        self.balances
            .read()
            .expect("ledger lock poisoned")
            .get(&(id, resource))
            .copied()
            .unwrap_or(0)
    }

    fn credit(&self, id: CharacterId, resource: ResourceId, amount: u64) {
        let mut balances = self.balances.write().expect("ledger lock poisoned");
        let entry = balances.entry((id, resource)).or_default();
        *entry = entry.saturating_add(amount);
    }

    fn debit(
        &self,
        id: CharacterId,
        resource: ResourceId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let mut balances = self.balances.write().expect("ledger lock poisoned");
        let entry = balances.entry((id, resource)).or_default();
        if *entry < amount {
            return Err(LedgerError::InsufficientBalance {
                resource,
                needed: amount,
                available: *entry,
            });
        }
        *entry -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saga_core::{CivilizationId, TokenNumber};

    #[test]
    fn debit_is_checked_under_one_lock() {
        let ledger = InMemoryLedger::default();
        let id = CharacterId::new(CivilizationId(1), TokenNumber(1));
        ledger.credit(id, ResourceId(7), 10);
        assert!(ledger.debit(id, ResourceId(7), 4).is_ok());
        assert_eq!(ledger.balance_of(id, ResourceId(7)), 6);
        assert!(matches!(
            ledger.debit(id, ResourceId(7), 7),
            Err(LedgerError::InsufficientBalance { available: 6, .. })
        ));
    }
}
