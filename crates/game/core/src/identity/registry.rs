//! Civilization registry, minting, and per-account upgrades.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::Principal;
use crate::engine::Engine;
use crate::env::Env;
use crate::error::EngineError;
use crate::events::ChangeEvent;
use crate::identity::{CharacterId, CivilizationId, TokenNumber};

pub const ACCOUNT_UPGRADES: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilizationEntry {
    pub id: CivilizationId,
    pub label: String,
    /// Highest token number minted so far; numbers run 1..=minted.
    pub minted: u64,
}

/// Price and availability of one account-upgrade tier. A tier cannot be
/// bought until the admin has set its price at least once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeConfig {
    pub price: u64,
    pub initialized: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityState {
    pub paused: bool,
    pub civilizations: Vec<CivilizationEntry>,
    pub mint_price: u64,
    pub upgrade_configs: [UpgradeConfig; ACCOUNT_UPGRADES],
    /// Purchased upgrade flags per character, indexed by tier - 1.
    pub upgrades: BTreeMap<CharacterId, [bool; ACCOUNT_UPGRADES]>,
}

impl IdentityState {
    pub fn civilization(&self, id: CivilizationId) -> Option<&CivilizationEntry> {
        // Sequential ids from 1 make the Vec index the id.
        self.civilizations.get(id.0.checked_sub(1)? as usize)
    }

    pub fn exists(&self, id: CharacterId) -> bool {
        self.civilization(id.civilization)
            .is_some_and(|c| id.token.0 >= 1 && id.token.0 <= c.minted)
    }

    pub fn ensure_exists(&self, id: CharacterId) -> Result<(), EngineError> {
        if self.civilization(id.civilization).is_none() {
            Err(EngineError::CivilizationNotFound(id.civilization))
        } else if !self.exists(id) {
            Err(EngineError::CharacterNotFound(id))
        } else {
            Ok(())
        }
    }

    pub fn has_upgrade(&self, id: CharacterId, tier: u8) -> bool {
        matches!(tier, 1..=3)
            && self
                .upgrades
                .get(&id)
                .is_some_and(|flags| flags[tier as usize - 1])
    }
}

impl Engine<'_> {
    /// Register a new civilization (admin only). Ids are assigned
    /// sequentially starting at 1.
    pub fn register_civilization(
        &mut self,
        actor: Principal,
        label: &str,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.ensure_admin(actor)?;
        self.ensure_active(self.state.identity.paused, "identity")?;
        if label.trim().is_empty() {
            return Err(EngineError::Validation("civilization label is empty"));
        }

        let id = CivilizationId(self.state.identity.civilizations.len() as u32 + 1);
        self.state.identity.civilizations.push(CivilizationEntry {
            id,
            label: label.to_owned(),
            minted: 0,
        });
        Ok(vec![ChangeEvent::CivilizationRegistered {
            id,
            label: label.to_owned(),
        }])
    }

    /// Mint the next character of `civilization` to `actor`, charging the
    /// configured mint price when one is set.
    pub fn mint(
        &mut self,
        env: &Env<'_>,
        actor: Principal,
        civilization: CivilizationId,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        if self.state.identity.civilization(civilization).is_none() {
            return Err(EngineError::CivilizationNotFound(civilization));
        }
        self.ensure_active(self.state.identity.paused, "identity")?;
        self.charge(env.payment(), actor, self.state.identity.mint_price)?;

        let entry = self
            .state
            .identity
            .civilizations
            .get_mut(civilization.0 as usize - 1)
            .ok_or(EngineError::CivilizationNotFound(civilization))?;
        entry.minted += 1;
        let id = CharacterId::new(civilization, TokenNumber(entry.minted));
        env.ownership().mint(id, actor);
        Ok(vec![ChangeEvent::CharacterMinted { id, owner: actor }])
    }

    /// Buy account-upgrade `tier` (1..=3) for `id`, paying its configured
    /// price with the payment token.
    pub fn buy_account_upgrade(
        &mut self,
        env: &Env<'_>,
        actor: Principal,
        id: CharacterId,
        tier: u8,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.character_gate(env, actor, id, self.state.identity.paused, "identity")?;
        if !(1..=ACCOUNT_UPGRADES as u8).contains(&tier) {
            return Err(EngineError::InvalidUpgrade(tier));
        }
        let config = self.state.identity.upgrade_configs[tier as usize - 1];
        if !config.initialized {
            return Err(EngineError::UpgradeNotInitialized(tier));
        }
        if self.state.identity.has_upgrade(id, tier) {
            return Err(EngineError::UpgradeAlreadyPurchased(tier));
        }
        self.charge(env.payment(), actor, config.price)?;

        self.state.identity.upgrades.entry(id).or_default()[tier as usize - 1] = true;
        Ok(vec![ChangeEvent::AccountUpgradePurchased {
            id,
            upgrade: tier,
            price: config.price,
        }])
    }

    /// Look up the character key for `(civilization, token)`, failing when
    /// either half does not resolve to a minted character.
    pub fn resolve(
        &self,
        civilization: CivilizationId,
        token: TokenNumber,
    ) -> Result<CharacterId, EngineError> {
        let id = CharacterId::new(civilization, token);
        self.ensure_exists(id)?;
        Ok(id)
    }

    pub fn exists(&self, id: CharacterId) -> bool {
        self.state.identity.exists(id)
    }

    pub fn set_mint_price(
        &mut self,
        actor: Principal,
        price: u64,
    ) -> Result<(), EngineError> {
        self.ensure_admin(actor)?;
        self.state.identity.mint_price = price;
        Ok(())
    }

    /// Set (and thereby make purchasable) the price of upgrade `tier`.
    pub fn set_upgrade_price(
        &mut self,
        actor: Principal,
        tier: u8,
        price: u64,
    ) -> Result<(), EngineError> {
        self.ensure_admin(actor)?;
        if !(1..=ACCOUNT_UPGRADES as u8).contains(&tier) {
            return Err(EngineError::InvalidUpgrade(tier));
        }
        self.state.identity.upgrade_configs[tier as usize - 1] = UpgradeConfig {
            price,
            initialized: true,
        };
        Ok(())
    }
}
