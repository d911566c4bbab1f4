//! Experience accrual and the authority set allowed to grant it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::common::Principal;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::events::ChangeEvent;
use crate::identity::CharacterId;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceState {
    pub paused: bool,
    /// Principals allowed to call `assign_experience` directly. Production
    /// claims grant experience internally and bypass this set.
    pub authorities: BTreeSet<Principal>,
    /// Cumulative experience per character. Absent means zero.
    pub records: BTreeMap<CharacterId, u64>,
}

impl ExperienceState {
    pub fn experience_of(&self, id: CharacterId) -> u64 {
        self.records.get(&id).copied().unwrap_or(0)
    }

    pub fn is_authority(&self, principal: Principal) -> bool {
        self.authorities.contains(&principal)
    }
}

impl Engine<'_> {
    pub fn add_authority(
        &mut self,
        actor: Principal,
        authority: Principal,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.ensure_admin(actor)?;
        if !self.state.experience.authorities.insert(authority) {
            return Err(EngineError::Validation("authority already registered"));
        }
        Ok(vec![ChangeEvent::AuthorityAdded { authority }])
    }

    pub fn remove_authority(
        &mut self,
        actor: Principal,
        authority: Principal,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.ensure_admin(actor)?;
        if !self.state.experience.authorities.remove(&authority) {
            return Err(EngineError::Validation("authority not registered"));
        }
        Ok(vec![ChangeEvent::AuthorityRemoved { authority }])
    }

    /// Grant `amount` experience to `id`. Only registered authorities may
    /// call this; the admin is not implicitly one.
    pub fn assign_experience(
        &mut self,
        actor: Principal,
        id: CharacterId,
        amount: u64,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.ensure_exists(id)?;
        if !self.state.experience.is_authority(actor) {
            return Err(EngineError::NotAuthority(actor));
        }
        self.ensure_active(self.state.experience.paused, "experience")?;
        if amount == 0 {
            return Err(EngineError::Validation("experience amount must be positive"));
        }
        Ok(self.grant_experience(id, amount))
    }

    /// Internal accrual path shared with production claims. The caller has
    /// already passed its own gates.
    pub(crate) fn grant_experience(&mut self, id: CharacterId, amount: u64) -> Vec<ChangeEvent> {
        let curve = &self.state.config.level_curve;
        let before = self.state.experience.experience_of(id);
        let total = before.saturating_add(amount);

        let old_level = curve.level_for(before);
        let new_level = curve.level_for(total);

        self.state.experience.records.insert(id, total);

        let mut events = vec![ChangeEvent::ExperienceGained { id, amount, total }];
        for level in old_level + 1..=new_level {
            events.push(ChangeEvent::LevelUp { id, level });
        }
        events
    }

    pub fn get_experience(&self, id: CharacterId) -> Result<u64, EngineError> {
        self.ensure_exists(id)?;
        Ok(self.state.experience.experience_of(id))
    }

    pub fn get_level(&self, id: CharacterId) -> Result<u32, EngineError> {
        self.ensure_exists(id)?;
        Ok(self.level_of(id))
    }

    /// Experience still missing for the next level, `None` at the cap.
    pub fn experience_for_next_level(&self, id: CharacterId) -> Result<Option<u64>, EngineError> {
        self.ensure_exists(id)?;
        let total = self.state.experience.experience_of(id);
        let level = self.state.config.level_curve.level_for(total);
        Ok(self
            .state
            .config
            .level_curve
            .threshold(level + 1)
            .map(|t| t - total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{TestWorld, ADMIN, ALICE, BOB};

    const GRANTER: Principal = Principal(42);

    #[test]
    fn only_registered_authorities_may_assign() {
        let mut world = TestWorld::new();
        let id = world.mint_character(ALICE);

        let err = world
            .run(|engine, _| engine.assign_experience(GRANTER, id, 100))
            .unwrap_err();
        assert_eq!(err, EngineError::NotAuthority(GRANTER));

        // Even the admin must be registered.
        let err = world
            .run(|engine, _| engine.assign_experience(ADMIN, id, 100))
            .unwrap_err();
        assert_eq!(err, EngineError::NotAuthority(ADMIN));

        world
            .run(|engine, _| engine.add_authority(ADMIN, GRANTER))
            .unwrap();
        world
            .run(|engine, _| engine.assign_experience(GRANTER, id, 100))
            .unwrap();
        assert_eq!(world.state.experience.experience_of(id), 100);
    }

    #[test]
    fn level_ups_are_emitted_per_threshold_crossed() {
        let mut world = TestWorld::new();
        let id = world.mint_character(ALICE);
        world
            .run(|engine, _| engine.add_authority(ADMIN, GRANTER))
            .unwrap();

        // 2020 total crosses the 1000 and 2020 thresholds at once.
        let events = world
            .run(|engine, _| engine.assign_experience(GRANTER, id, 2020))
            .unwrap();
        assert_eq!(
            events,
            vec![
                ChangeEvent::ExperienceGained {
                    id,
                    amount: 2020,
                    total: 2020
                },
                ChangeEvent::LevelUp { id, level: 1 },
                ChangeEvent::LevelUp { id, level: 2 },
            ]
        );
        assert_eq!(world.run(|engine, _| engine.get_level(id)).unwrap(), 2);
    }

    #[test]
    fn next_level_gap_shrinks_with_experience() {
        let mut world = TestWorld::new();
        let id = world.mint_character(ALICE);
        world
            .run(|engine, _| engine.add_authority(ADMIN, GRANTER))
            .unwrap();

        assert_eq!(
            world
                .run(|engine, _| engine.experience_for_next_level(id))
                .unwrap(),
            Some(1000)
        );
        world
            .run(|engine, _| engine.assign_experience(GRANTER, id, 400))
            .unwrap();
        assert_eq!(
            world
                .run(|engine, _| engine.experience_for_next_level(id))
                .unwrap(),
            Some(600)
        );
    }

    #[test]
    fn reads_reject_unminted_characters() {
        let mut world = TestWorld::new();
        world.mint_character(ALICE);
        let ghost = CharacterId::new(
            crate::identity::CivilizationId(1),
            crate::identity::TokenNumber(99),
        );
        let err = world.run(|engine, _| engine.get_experience(ghost)).unwrap_err();
        assert_eq!(err, EngineError::CharacterNotFound(ghost));
    }

    #[test]
    fn removing_an_authority_revokes_the_grant_right() {
        let mut world = TestWorld::new();
        let id = world.mint_character(BOB);
        world
            .run(|engine, _| engine.add_authority(ADMIN, GRANTER))
            .unwrap();
        world
            .run(|engine, _| engine.remove_authority(ADMIN, GRANTER))
            .unwrap();
        let err = world
            .run(|engine, _| engine.assign_experience(GRANTER, id, 1))
            .unwrap_err();
        assert_eq!(err, EngineError::NotAuthority(GRANTER));
    }
}
