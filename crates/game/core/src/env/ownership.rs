//! Character token ownership and approvals.

use crate::common::Principal;
use crate::identity::CharacterId;

/// The ownership/transfer registry for character tokens.
///
/// The engine mints through this interface and consults it for every
/// per-character authorization decision; transfers and approvals themselves
/// happen outside the engine. Implementations are internally synchronized;
/// all methods take `&self`.
pub trait OwnershipRegistry {
    /// True if the underlying token has been minted.
    fn exists(&self, id: CharacterId) -> bool;

    fn owner_of(&self, id: CharacterId) -> Option<Principal>;

    /// True iff `actor` is the owner, holds single-token approval, or holds
    /// collection-wide operator approval for `id`.
    fn is_approved_or_owner(&self, actor: Principal, id: CharacterId) -> bool;

    /// Record a newly minted token for `owner`. The engine guarantees `id`
    /// was not minted before.
    fn mint(&self, id: CharacterId, owner: Principal);
}
