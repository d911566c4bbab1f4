//! In-memory allowance-based payment token.

use std::collections::HashMap;
use std::sync::RwLock;

use saga_core::{PaymentError, PaymentToken, Principal};

/// A fungible token with engine allowances. `transfer_from` burns from the
/// holder's balance and the engine's allowance in one step, mirroring how
/// the engine treasury pulls payment.
#[derive(Default)]
pub struct InMemoryToken {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    balances: HashMap<Principal, u64>,
    allowances: HashMap<Principal, u64>,
}

impl InMemoryToken {
    pub fn mint_to(&self, owner: Principal, amount: u64) {
        let mut inner = self.inner.write().expect("token lock poisoned");
        *inner.balances.entry(owner).or_default() += amount;
    }

    /// Approve the engine to spend `amount` on behalf of `owner`.
    pub fn approve(&self, owner: Principal, amount: u64) {
        self.inner
            .write()
            .expect("token lock poisoned")
            .allowances
            .insert(owner, amount);
    }
}

impl PaymentToken for InMemoryToken {
    fn balance_of(&self, owner: Principal) -> u64 {
        self.inner
            .read()
            .expect("token lock poisoned")
            .balances
            .get(&owner)
            .copied()
            .unwrap_or(0)
    }

    fn allowance(&self, owner: Principal) -> u64 {
        self.inner
            .read()
            .expect("token lock poisoned")
            .allowances
            .get(&owner)
            .copied()
            .unwrap_or(0)
    }

    fn transfer_from(&self, owner: Principal, amount: u64) -> Result<(), PaymentError> {
        let mut inner = self.inner.write().expect("token lock poisoned");
        let balance = inner.balances.get(&owner).copied().unwrap_or(0);
        if balance < amount {
            return Err(PaymentError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }
        let approved = inner.allowances.get(&owner).copied().unwrap_or(0);
        if approved < amount {
            return Err(PaymentError::InsufficientAllowance {
                needed: amount,
                approved,
            });
        }
        inner.balances.insert(owner, balance - amount);
        inner.allowances.insert(owner, approved - amount);
        Ok(())
    }
}
