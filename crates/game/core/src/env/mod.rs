//! Traits describing the external collaborators the engine consumes.
//!
//! The engine never owns token balances, item definitions, or wall-clock
//! time; those live behind the traits here and arrive bundled in an [`Env`]
//! so operations stay decoupled from concrete implementations (and tests can
//! inject fakes).

mod clock;
mod items;
mod ownership;
mod payment;
mod resources;

pub use clock::Clock;
pub use items::{AttributeBlock, ItemCatalog, ItemDefinition, ItemSlotKind, ModifierPair};
pub use ownership::OwnershipRegistry;
pub use payment::{PaymentError, PaymentToken};
pub use resources::{LedgerError, ResourceLedger};

/// Aggregates the collaborators required by engine operations.
///
/// `payment` is the upgrade/mint currency; `refresher` and `vitalizer` are
/// the two consumable gadget tokens the stats accountant burns. All three
/// share the [`PaymentToken`] interface.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    ownership: &'a dyn OwnershipRegistry,
    resources: &'a dyn ResourceLedger,
    items: &'a dyn ItemCatalog,
    payment: &'a dyn PaymentToken,
    refresher: &'a dyn PaymentToken,
    vitalizer: &'a dyn PaymentToken,
    clock: &'a dyn Clock,
}

impl<'a> Env<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ownership: &'a dyn OwnershipRegistry,
        resources: &'a dyn ResourceLedger,
        items: &'a dyn ItemCatalog,
        payment: &'a dyn PaymentToken,
        refresher: &'a dyn PaymentToken,
        vitalizer: &'a dyn PaymentToken,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            ownership,
            resources,
            items,
            payment,
            refresher,
            vitalizer,
            clock,
        }
    }

    pub fn ownership(&self) -> &'a dyn OwnershipRegistry {
        self.ownership
    }

    pub fn resources(&self) -> &'a dyn ResourceLedger {
        self.resources
    }

    pub fn items(&self) -> &'a dyn ItemCatalog {
        self.items
    }

    pub fn payment(&self) -> &'a dyn PaymentToken {
        self.payment
    }

    pub fn refresher(&self) -> &'a dyn PaymentToken {
        self.refresher
    }

    pub fn vitalizer(&self) -> &'a dyn PaymentToken {
        self.vitalizer
    }

    pub fn clock(&self) -> &'a dyn Clock {
        self.clock
    }

    /// Current time from the trusted clock.
    pub fn now(&self) -> crate::common::Timestamp {
        self.clock.now()
    }
}
