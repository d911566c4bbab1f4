//! In-memory implementations of the `saga-core` collaborator traits.
//!
//! These stand in for the external systems (token ownership, balance
//! ledgers, catalogs, clocks) in tests, local tools, and single-process
//! deployments. All of them synchronize internally with `std::sync` locks,
//! as the core traits take `&self`.

mod catalog;
mod clock;
mod ledger;
mod ownership;
mod token;

pub use catalog::InMemoryCatalog;
pub use clock::{ManualClock, SystemClock};
pub use ledger::InMemoryLedger;
pub use ownership::InMemoryOwnership;
pub use token::InMemoryToken;

use std::sync::Arc;

use saga_core::{Clock, Env, ItemCatalog, OwnershipRegistry, PaymentToken, ResourceLedger};

/// The full provider bundle an [`crate::EngineService`] runs against.
#[derive(Clone)]
pub struct ProviderSet {
    pub ownership: Arc<dyn OwnershipRegistry + Send + Sync>,
    pub resources: Arc<dyn ResourceLedger + Send + Sync>,
    pub items: Arc<dyn ItemCatalog + Send + Sync>,
    pub payment: Arc<dyn PaymentToken + Send + Sync>,
    pub refresher: Arc<dyn PaymentToken + Send + Sync>,
    pub vitalizer: Arc<dyn PaymentToken + Send + Sync>,
    pub clock: Arc<dyn Clock + Send + Sync>,
}

impl ProviderSet {
    /// All-in-memory bundle with the system clock, for local deployments.
    pub fn in_memory() -> Self {
        Self {
            ownership: Arc::new(InMemoryOwnership::default()),
            resources: Arc::new(InMemoryLedger::default()),
            items: Arc::new(InMemoryCatalog::default()),
            payment: Arc::new(InMemoryToken::default()),
            refresher: Arc::new(InMemoryToken::default()),
            vitalizer: Arc::new(InMemoryToken::default()),
            clock: Arc::new(SystemClock),
        }
    }

    /// Borrow the bundle as the engine's oracle aggregate.
    pub fn env(&self) -> Env<'_> {
        Env::new(
            self.ownership.as_ref(),
            self.resources.as_ref(),
            self.items.as_ref(),
            self.payment.as_ref(),
            self.refresher.as_ref(),
            self.vitalizer.as_ref(),
            self.clock.as_ref(),
        )
    }
}
