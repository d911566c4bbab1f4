//! The authoritative mutation facade.
//!
//! Every state change flows through [`Engine`], which borrows the world
//! state for the duration of one call and returns the change records the
//! call produced. Component modules contribute the operation impls; this
//! module owns the shared gate checks so the precedence
//! (existence → authorization → pause → validation → level → resources)
//! is identical everywhere.

use crate::common::Principal;
use crate::env::Env;
use crate::error::EngineError;
use crate::events::ChangeEvent;
use crate::identity::CharacterId;
use crate::production::Variant;
use crate::state::WorldState;

/// A pausable engine component, for the admin pause switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Component {
    Identity,
    Experience,
    Stats,
    Equipment,
    Production(Variant),
}

impl Component {
    pub fn name(self) -> &'static str {
        match self {
            Component::Identity => "identity",
            Component::Experience => "experience",
            Component::Stats => "stats",
            Component::Equipment => "equipment",
            Component::Production(Variant::Craft) => "craft",
            Component::Production(Variant::Forge) => "forge",
            Component::Production(Variant::Quest) => "quest",
        }
    }
}

pub struct Engine<'a> {
    pub(crate) state: &'a mut WorldState,
}

impl<'a> Engine<'a> {
    pub fn new(state: &'a mut WorldState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &WorldState {
        self.state
    }

    /// True iff `actor` may mutate `id`: the character exists and `actor`
    /// is its owner or holds (single-token or operator) approval.
    pub fn is_authorized(&self, env: &Env<'_>, actor: Principal, id: CharacterId) -> bool {
        self.state.identity.exists(id) && env.ownership().is_approved_or_owner(actor, id)
    }

    /// Current level derived from cumulative experience; 0 with no record.
    pub fn level_of(&self, id: CharacterId) -> u32 {
        self.state
            .config
            .level_curve
            .level_for(self.state.experience.experience_of(id))
    }

    /// Flip a component's pause flag (admin only).
    pub fn set_paused(
        &mut self,
        actor: Principal,
        component: Component,
        paused: bool,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.ensure_admin(actor)?;
        let flag = match component {
            Component::Identity => &mut self.state.identity.paused,
            Component::Experience => &mut self.state.experience.paused,
            Component::Stats => &mut self.state.stats.paused,
            Component::Equipment => &mut self.state.equipment.paused,
            Component::Production(v) => &mut self.state.production_mut(v).paused,
        };
        *flag = paused;
        Ok(vec![ChangeEvent::PauseChanged {
            component: component.name().into(),
            paused,
        }])
    }

    // ------------------------------------------------------------------
    // Shared gates
    // ------------------------------------------------------------------

    pub(crate) fn ensure_exists(&self, id: CharacterId) -> Result<(), EngineError> {
        self.state.identity.ensure_exists(id)
    }

    pub(crate) fn ensure_allowed(
        &self,
        env: &Env<'_>,
        actor: Principal,
        id: CharacterId,
    ) -> Result<(), EngineError> {
        if env.ownership().is_approved_or_owner(actor, id) {
            Ok(())
        } else {
            Err(EngineError::NotAllowed {
                actor,
                character: id,
            })
        }
    }

    pub(crate) fn ensure_admin(&self, actor: Principal) -> Result<(), EngineError> {
        if actor == self.state.admin {
            Ok(())
        } else {
            Err(EngineError::NotAdmin(actor))
        }
    }

    pub(crate) fn ensure_active(
        &self,
        paused: bool,
        component: &'static str,
    ) -> Result<(), EngineError> {
        if paused {
            Err(EngineError::ComponentPaused(component))
        } else {
            Ok(())
        }
    }

    /// Pull `amount` from `owner`, reporting balance and allowance
    /// shortfalls distinctly (balance is checked first).
    pub(crate) fn charge(
        &self,
        token: &dyn crate::env::PaymentToken,
        owner: Principal,
        amount: u64,
    ) -> Result<(), EngineError> {
        if amount == 0 {
            return Ok(());
        }
        let balance = token.balance_of(owner);
        if balance < amount {
            return Err(EngineError::PaymentBalance {
                needed: amount,
                available: balance,
            });
        }
        let approved = token.allowance(owner);
        if approved < amount {
            return Err(EngineError::PaymentAllowance {
                needed: amount,
                approved,
            });
        }
        token.transfer_from(owner, amount)?;
        Ok(())
    }

    /// The standard gate for character-scoped mutations, in taxonomy order.
    pub(crate) fn character_gate(
        &self,
        env: &Env<'_>,
        actor: Principal,
        id: CharacterId,
        paused: bool,
        component: &'static str,
    ) -> Result<(), EngineError> {
        self.ensure_exists(id)?;
        self.ensure_allowed(env, actor, id)?;
        self.ensure_active(paused, component)
    }
}
