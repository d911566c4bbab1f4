//! Payment-token interface for upgrade purchases and gadget burns.

use crate::common::Principal;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("payment balance too low: need {needed}, have {available}")]
    InsufficientBalance { needed: u64, available: u64 },

    #[error("payment allowance too low: need {needed}, approved {approved}")]
    InsufficientAllowance { needed: u64, approved: u64 },
}

/// An allowance-based fungible token the engine is authorized to pull from.
///
/// The allowance is the amount `owner` has approved the engine to spend;
/// balance shortfalls and allowance shortfalls are reported distinctly.
pub trait PaymentToken {
    fn balance_of(&self, owner: Principal) -> u64;

    /// Amount `owner` has approved the engine to transfer.
    fn allowance(&self, owner: Principal) -> u64;

    /// Pull `amount` from `owner` to the engine treasury (or burn it, for
    /// consumable gadget tokens).
    fn transfer_from(&self, owner: Principal, amount: u64) -> Result<(), PaymentError>;
}
