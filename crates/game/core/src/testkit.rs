//! In-memory fakes for the [`crate::env`] traits, test-only.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::common::{ItemId, Principal, ResourceId, Timestamp};
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::env::{
    Clock, Env, ItemCatalog, ItemDefinition, LedgerError, OwnershipRegistry, PaymentError,
    PaymentToken,
};
use crate::env::ResourceLedger;
use crate::error::EngineError;
use crate::events::ChangeEvent;
use crate::experience::LevelCurve;
use crate::identity::{CharacterId, CivilizationId};
use crate::state::WorldState;

pub const ADMIN: Principal = Principal(1);
pub const ALICE: Principal = Principal(10);
pub const BOB: Principal = Principal(11);

#[derive(Default)]
pub struct FakeOwnership {
    owners: RefCell<BTreeMap<CharacterId, Principal>>,
}

impl OwnershipRegistry for FakeOwnership {
    fn exists(&self, id: CharacterId) -> bool {
        self.owners.borrow().contains_key(&id)
    }

    fn owner_of(&self, id: CharacterId) -> Option<Principal> {
        self.owners.borrow().get(&id).copied()
    }

    fn is_approved_or_owner(&self, actor: Principal, id: CharacterId) -> bool {
        self.owner_of(id) == Some(actor)
    }

    fn mint(&self, id: CharacterId, owner: Principal) {
        self.owners.borrow_mut().insert(id, owner);
    }
}

#[derive(Default)]
pub struct FakeLedger {
    balances: RefCell<BTreeMap<(CharacterId, ResourceId), u64>>,
}

impl FakeLedger {
    pub fn seed(&self, id: CharacterId, resource: ResourceId, amount: u64) {
        self.balances.borrow_mut().insert((id, resource), amount);
    }
}

impl ResourceLedger for FakeLedger {
    fn balance_of(&self, id: CharacterId, resource: ResourceId) -> u64 {
        self.balances
            .borrow()
            .get(&(id, resource))
            .copied()
            .unwrap_or(0)
    }

    fn credit(&self, id: CharacterId, resource: ResourceId, amount: u64) {
        *self.balances.borrow_mut().entry((id, resource)).or_default() += amount;
    }

    fn debit(
        &self,
        id: CharacterId,
        resource: ResourceId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let mut balances = self.balances.borrow_mut();
        let available = balances.get(&(id, resource)).copied().unwrap_or(0);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                resource,
                needed: amount,
                available,
            });
        }
        balances.insert((id, resource), available - amount);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    pub items: BTreeMap<ItemId, ItemDefinition>,
}

impl FakeCatalog {
    pub fn with(items: impl IntoIterator<Item = ItemDefinition>) -> Self {
        Self {
            items: items.into_iter().map(|def| (def.id, def)).collect(),
        }
    }
}

impl ItemCatalog for FakeCatalog {
    fn item(&self, id: ItemId) -> Option<ItemDefinition> {
        self.items.get(&id).cloned()
    }
}

#[derive(Default)]
pub struct FakeToken {
    balances: RefCell<BTreeMap<Principal, u64>>,
    allowances: RefCell<BTreeMap<Principal, u64>>,
}

impl FakeToken {
    pub fn fund(&self, owner: Principal, balance: u64, allowance: u64) {
        self.balances.borrow_mut().insert(owner, balance);
        self.allowances.borrow_mut().insert(owner, allowance);
    }
}

impl PaymentToken for FakeToken {
    fn balance_of(&self, owner: Principal) -> u64 {
        self.balances.borrow().get(&owner).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: Principal) -> u64 {
        self.allowances.borrow().get(&owner).copied().unwrap_or(0)
    }

    fn transfer_from(&self, owner: Principal, amount: u64) -> Result<(), PaymentError> {
        let balance = self.balance_of(owner);
        if balance < amount {
            return Err(PaymentError::InsufficientBalance {
                needed: amount,
                available: balance,
            });
        }
        let approved = self.allowance(owner);
        if approved < amount {
            return Err(PaymentError::InsufficientAllowance {
                needed: amount,
                approved,
            });
        }
        self.balances.borrow_mut().insert(owner, balance - amount);
        self.allowances.borrow_mut().insert(owner, approved - amount);
        Ok(())
    }
}

#[derive(Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn set(&self, secs: u64) {
        self.now.set(secs);
    }

    pub fn advance(&self, secs: u64) {
        self.now.set(self.now.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.now.get())
    }
}

/// A world plus one of every fake, with an `Env` builder.
pub struct TestWorld {
    pub state: WorldState,
    pub ownership: FakeOwnership,
    pub resources: FakeLedger,
    pub catalog: FakeCatalog,
    pub payment: FakeToken,
    pub refresher: FakeToken,
    pub vitalizer: FakeToken,
    pub clock: ManualClock,
}

impl TestWorld {
    pub fn new() -> Self {
        let curve = LevelCurve::from_deltas(&[1000, 1020, 1040, 1061, 1082]);
        Self {
            state: WorldState::new(ADMIN, EngineConfig::new(curve)),
            ownership: FakeOwnership::default(),
            resources: FakeLedger::default(),
            catalog: FakeCatalog::default(),
            payment: FakeToken::default(),
            refresher: FakeToken::default(),
            vitalizer: FakeToken::default(),
            clock: ManualClock::default(),
        }
    }

    pub fn env(&self) -> Env<'_> {
        Env::new(
            &self.ownership,
            &self.resources,
            &self.catalog,
            &self.payment,
            &self.refresher,
            &self.vitalizer,
            &self.clock,
        )
    }

    /// Register one civilization and mint a character to `owner`.
    pub fn mint_character(&mut self, owner: Principal) -> CharacterId {
        let env = Env::new(
            &self.ownership,
            &self.resources,
            &self.catalog,
            &self.payment,
            &self.refresher,
            &self.vitalizer,
            &self.clock,
        );
        let mut engine = Engine::new(&mut self.state);
        if engine.state().identity.civilizations.is_empty() {
            engine
                .register_civilization(ADMIN, "test civilization")
                .unwrap();
        }
        let events = engine.mint(&env, owner, CivilizationId(1)).unwrap();
        match events.as_slice() {
            [ChangeEvent::CharacterMinted { id, .. }] => *id,
            other => panic!("unexpected mint events: {other:?}"),
        }
    }

    /// Run one engine call against this world.
    pub fn run<T>(
        &mut self,
        op: impl FnOnce(&mut Engine<'_>, &Env<'_>) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let env = Env::new(
            &self.ownership,
            &self.resources,
            &self.catalog,
            &self.payment,
            &self.refresher,
            &self.vitalizer,
            &self.clock,
        );
        let mut engine = Engine::new(&mut self.state);
        op(&mut engine, &env)
    }
}
