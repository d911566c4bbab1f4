//! Production operations: start, claim, slot purchase, catalog admin.

use std::collections::BTreeMap;

use crate::common::{Principal, RecipeId, ResourceId};
use crate::engine::Engine;
use crate::env::Env;
use crate::error::EngineError;
use crate::events::ChangeEvent;
use crate::identity::CharacterId;
use crate::production::{CharacterSlots, Recipe, RecipeSpec, SlotState, Variant};
use crate::stats::StatBlock;

impl Engine<'_> {
    /// Begin cooking `recipe` in `slot`. Stat and material costs leave the
    /// character atomically: every check runs before the first write, so a
    /// failure changes nothing.
    ///
    /// `effort` is only meaningful for quests, where it is the stat
    /// commitment (component-wise at most the recipe cost) that scales the
    /// payout. Elsewhere it must be `None` and the full cost is charged.
    pub fn start(
        &mut self,
        env: &Env<'_>,
        actor: Principal,
        variant: Variant,
        id: CharacterId,
        slot: u8,
        recipe: RecipeId,
        effort: Option<StatBlock>,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        let paused = self.state.production(variant).paused;
        self.character_gate(env, actor, id, paused, variant.name())?;

        // Slot gates come before the recipe lookup. An index at or past the
        // cap can never be purchased, so it reports as locked too.
        let character = self.state.production(variant).character(id);
        if slot >= character.purchased {
            return Err(EngineError::SlotLocked {
                variant,
                slot,
                purchased: character.purchased,
            });
        }
        if !character.slot(slot).is_idle() {
            return Err(EngineError::SlotBusy { variant, slot });
        }

        let entry = self
            .state
            .production(variant)
            .recipe(recipe)
            .ok_or(EngineError::RecipeNotFound { variant, recipe })?;
        let stats_cost = entry.stats_cost;
        let cooldown_secs = entry.cooldown_secs;
        let level_required = entry.level_required;
        let enabled = entry.enabled;
        let materials = entry.materials.clone();
        let rewards = entry.rewards.clone();
        let experience = entry.experience;

        let (spent, fulfillment_pct) = resolve_effort(variant, &stats_cost, effort)?;
        if !enabled {
            return Err(EngineError::RecipeDisabled { variant, recipe });
        }

        let level = self.level_of(id);
        if level < level_required {
            return Err(EngineError::InsufficientLevel {
                required: level_required,
                actual: level,
            });
        }

        // Pre-validate every debit, then commit. Material needs are summed
        // per resource so duplicate lines cannot pass individually and fail
        // combined.
        let pool = self.state.stats.record(id).pool;
        if !pool.covers(&spent) {
            // Report the first short stat in declaration order.
            return self.consume_pool(id, &spent);
        }
        let mut needs: BTreeMap<ResourceId, u64> = BTreeMap::new();
        for line in &materials {
            *needs.entry(line.resource).or_default() += line.amount;
        }
        for (&resource, &needed) in &needs {
            let available = env.resources().balance_of(id, resource);
            if available < needed {
                return Err(EngineError::InsufficientMaterial {
                    resource,
                    needed,
                    available,
                });
            }
        }

        let mut events = Vec::new();
        if !spent.is_zero() {
            events.extend(self.consume_pool(id, &spent)?);
        }
        for (&resource, &amount) in &needs {
            env.resources().debit(id, resource, amount)?;
        }

        let ready_at = env.now().plus_secs(cooldown_secs);
        let table = self.state.production_mut(variant);
        let character = table.characters.entry(id).or_default();
        character.set_slot(
            slot,
            SlotState::Cooking {
                recipe,
                ready_at,
                fulfillment_pct,
                rewards,
                experience,
            },
        );
        events.push(ChangeEvent::ProductionStarted {
            variant,
            id,
            slot,
            recipe,
            ready_at,
            fulfillment_pct,
        });
        Ok(events)
    }

    /// Collect a finished slot: rewards and experience scale by the frozen
    /// fulfillment percent, then the slot returns to idle.
    pub fn claim(
        &mut self,
        env: &Env<'_>,
        actor: Principal,
        variant: Variant,
        id: CharacterId,
        slot: u8,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        let paused = self.state.production(variant).paused;
        self.character_gate(env, actor, id, paused, variant.name())?;

        // Out-of-range indices read as idle, so they report NothingToClaim.
        let character = self.state.production(variant).character(id);
        let SlotState::Cooking {
            recipe,
            ready_at,
            fulfillment_pct,
            rewards: reward_lines,
            experience: full_experience,
        } = character.slot(slot)
        else {
            return Err(EngineError::NothingToClaim { variant, slot });
        };
        let now = env.now();
        if now < ready_at {
            return Err(EngineError::SlotNotReady {
                variant,
                slot,
                ready_at,
            });
        }

        // The payout was frozen at start; catalog edits or disables made
        // while the slot cooked do not reach it.
        let pct = u64::from(fulfillment_pct);
        let rewards: Vec<(ResourceId, u64)> = reward_lines
            .iter()
            .map(|line| (line.resource, line.amount * pct / 100))
            .collect();
        let experience = full_experience * pct / 100;

        for &(resource, amount) in &rewards {
            if amount > 0 {
                env.resources().credit(id, resource, amount);
            }
        }

        let table = self.state.production_mut(variant);
        let character = table.characters.entry(id).or_default();
        character.set_slot(slot, SlotState::Idle);

        let mut events = vec![ChangeEvent::ProductionClaimed {
            variant,
            id,
            slot,
            recipe,
            rewards,
            experience,
        }];
        if experience > 0 {
            events.extend(self.grant_experience(id, experience));
        }
        Ok(events)
    }

    /// Buy the next slot of `variant` for `id` at the configured price.
    pub fn buy_upgrade(
        &mut self,
        env: &Env<'_>,
        actor: Principal,
        variant: Variant,
        id: CharacterId,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        let paused = self.state.production(variant).paused;
        self.character_gate(env, actor, id, paused, variant.name())?;

        let character = self.state.production(variant).character(id);
        if character.purchased >= self.state.config.max_slots {
            return Err(EngineError::NoUpgradeAvailable(variant));
        }
        self.charge(env.payment(), actor, self.state.production(variant).slot_price)?;

        let table = self.state.production_mut(variant);
        let character = table.characters.entry(id).or_default();
        character.purchased += 1;
        let purchased = character.purchased;
        Ok(vec![ChangeEvent::SlotPurchased {
            variant,
            id,
            purchased,
        }])
    }

    // ------------------------------------------------------------------
    // Catalog administration
    // ------------------------------------------------------------------

    /// Add a recipe to `variant`'s catalog under the next sequential id.
    pub fn add_recipe(
        &mut self,
        actor: Principal,
        variant: Variant,
        spec: RecipeSpec,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.ensure_admin(actor)?;
        let table = self.state.production_mut(variant);
        let id = table.allocate_recipe_id();
        let recipe = spec.into_recipe(id)?;
        table.recipes.insert(id, recipe);
        Ok(vec![ChangeEvent::RecipeAdded { variant, recipe: id }])
    }

    /// Replace an existing recipe's definition. Slots already cooking it
    /// keep the timing, fulfillment, and payout frozen at start; only
    /// future starts see the new costs and rewards.
    pub fn update_recipe(
        &mut self,
        actor: Principal,
        variant: Variant,
        recipe: RecipeId,
        spec: RecipeSpec,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.ensure_admin(actor)?;
        let table = self.state.production_mut(variant);
        let enabled = table
            .recipe(recipe)
            .ok_or(EngineError::RecipeNotFound { variant, recipe })?
            .enabled;
        let mut updated = spec.into_recipe(recipe)?;
        updated.enabled = enabled;
        table.recipes.insert(recipe, updated);
        Ok(vec![ChangeEvent::RecipeUpdated { variant, recipe }])
    }

    pub fn enable_recipe(
        &mut self,
        actor: Principal,
        variant: Variant,
        recipe: RecipeId,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.set_recipe_enabled(actor, variant, recipe, true)
    }

    pub fn disable_recipe(
        &mut self,
        actor: Principal,
        variant: Variant,
        recipe: RecipeId,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.set_recipe_enabled(actor, variant, recipe, false)
    }

    fn set_recipe_enabled(
        &mut self,
        actor: Principal,
        variant: Variant,
        recipe: RecipeId,
        enabled: bool,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.ensure_admin(actor)?;
        let table = self.state.production_mut(variant);
        let entry = table
            .recipes
            .get_mut(&recipe)
            .ok_or(EngineError::RecipeNotFound { variant, recipe })?;
        entry.enabled = enabled;
        Ok(vec![if enabled {
            ChangeEvent::RecipeEnabled { variant, recipe }
        } else {
            ChangeEvent::RecipeDisabled { variant, recipe }
        }])
    }

    pub fn set_slot_price(
        &mut self,
        actor: Principal,
        variant: Variant,
        price: u64,
    ) -> Result<(), EngineError> {
        self.ensure_admin(actor)?;
        self.state.production_mut(variant).slot_price = price;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn get_recipe(&self, variant: Variant, recipe: RecipeId) -> Result<Recipe, EngineError> {
        self.state
            .production(variant)
            .recipe(recipe)
            .cloned()
            .ok_or(EngineError::RecipeNotFound { variant, recipe })
    }

    pub fn get_slots(&self, variant: Variant, id: CharacterId) -> Result<CharacterSlots, EngineError> {
        self.ensure_exists(id)?;
        Ok(self.state.production(variant).character(id))
    }
}

/// Decide the stats actually spent and the payout percentage.
fn resolve_effort(
    variant: Variant,
    stats_cost: &StatBlock,
    effort: Option<StatBlock>,
) -> Result<(StatBlock, u8), EngineError> {
    let Some(effort) = effort else {
        return Ok((*stats_cost, 100));
    };
    if !variant.scales_by_effort() {
        return Err(EngineError::Validation("effort only applies to quests"));
    }
    if effort.is_zero() {
        return Err(EngineError::Validation("no effort committed"));
    }
    if !stats_cost.covers(&effort) {
        return Err(EngineError::Validation("effort exceeds recipe stat cost"));
    }
    let pct = if stats_cost.sum() == 0 {
        100
    } else {
        (effort.sum() * 100 / stats_cost.sum()) as u8
    };
    Ok((effort, pct))
}
