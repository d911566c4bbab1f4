//! In-memory character ownership registry.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use saga_core::{CharacterId, OwnershipRegistry, Principal};

/// Owner, per-token approval, and operator bookkeeping for character tokens.
#[derive(Default)]
pub struct InMemoryOwnership {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    owners: HashMap<CharacterId, Principal>,
    token_approvals: HashMap<CharacterId, Principal>,
    /// (owner, operator) pairs with collection-wide approval.
    operators: HashSet<(Principal, Principal)>,
}

impl InMemoryOwnership {
    /// Grant `approved` control over the single token `id`.
    pub fn approve(&self, id: CharacterId, approved: Principal) {
        self.inner
            .write()
            .expect("ownership lock poisoned")
            .token_approvals
            .insert(id, approved);
    }

    /// Grant or revoke `operator` control over everything `owner` holds.
    pub fn set_operator(&self, owner: Principal, operator: Principal, approved: bool) {
        let mut inner = self.inner.write().expect("ownership lock poisoned");
        if approved {
            inner.operators.insert((owner, operator));
        } else {
            inner.operators.remove(&(owner, operator));
        }
    }

    pub fn transfer(&self, id: CharacterId, to: Principal) {
        let mut inner = self.inner.write().expect("ownership lock poisoned");
        inner.owners.insert(id, to);
        // Transfers void single-token approvals.
        inner.token_approvals.remove(&id);
    }
}

impl OwnershipRegistry for InMemoryOwnership {
    fn exists(&self, id: CharacterId) -> bool {
        self.inner
            .read()
            .expect("ownership lock poisoned")
            .owners
            .contains_key(&id)
    }

    fn owner_of(&self, id: CharacterId) -> Option<Principal> {
        self.inner
            .read()
            .expect("ownership lock poisoned")
            .owners
            .get(&id)
            .copied()
    }

    fn is_approved_or_owner(&self, actor: Principal, id: CharacterId) -> bool {
        let inner = self.inner.read().expect("ownership lock poisoned");
        let Some(&owner) = inner.owners.get(&id) else {
            return false;
        };
        owner == actor
            || inner.token_approvals.get(&id) == Some(&actor)
            || inner.operators.contains(&(owner, actor))
    }

    fn mint(&self, id: CharacterId, owner: Principal) {
        self.inner
            .write()
            .expect("ownership lock poisoned")
            .owners
            .insert(id, owner);
    }
}
