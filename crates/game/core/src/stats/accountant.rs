//! Stat point accounting: assignment, consumption, sacrifice, refreshes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::{Principal, Timestamp};
use crate::engine::Engine;
use crate::env::Env;
use crate::error::EngineError;
use crate::events::{ChangeEvent, StatsView};
use crate::identity::CharacterId;
use crate::stats::{StatBlock, StatKind};

/// Per-character stat accounting record.
///
/// `base` is the committed allocation; `pool` is the spendable copy that
/// drains through consumption and refills via refreshes (never above base).
/// `sacrificed` counts points permanently traded away per stat, which is
/// what vitalize restores from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    pub base: StatBlock,
    pub pool: StatBlock,
    pub sacrificed: StatBlock,
    /// Last free refresh. The free refresh and the token refresh run on
    /// separate clocks with the same cooldown width.
    pub last_free_refresh: Timestamp,
    pub last_token_refresh: Timestamp,
    pub token_refresh_count: u64,
}

impl StatRecord {
    fn view(&self) -> StatsView {
        StatsView {
            base: self.base,
            pool: self.pool,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsState {
    pub paused: bool,
    pub records: BTreeMap<CharacterId, StatRecord>,
}

impl StatsState {
    pub fn record(&self, id: CharacterId) -> StatRecord {
        self.records.get(&id).copied().unwrap_or_default()
    }
}

impl Engine<'_> {
    /// Unassigned points: the per-character budget (base allowance plus one
    /// per level) minus what is already committed to base stats.
    pub fn available_points(&self, id: CharacterId) -> Result<u64, EngineError> {
        self.ensure_exists(id)?;
        let budget = u64::from(self.state.config.base_points) + u64::from(self.level_of(id));
        let committed = self.state.stats.record(id).base.sum();
        Ok(budget.saturating_sub(committed))
    }

    /// Commit unassigned points to base stats. The pool grows by the same
    /// delta, so fresh points are immediately spendable.
    pub fn assign_points(
        &mut self,
        env: &Env<'_>,
        actor: Principal,
        id: CharacterId,
        delta: StatBlock,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.character_gate(env, actor, id, self.state.stats.paused, "stats")?;
        if delta.is_zero() {
            return Err(EngineError::Validation("no points requested"));
        }
        let available = self.available_points(id)?;
        if delta.sum() > available {
            return Err(EngineError::InsufficientPoints {
                requested: delta.sum(),
                available,
            });
        }

        let record = self.state.stats.records.entry(id).or_default();
        let before = record.view();
        record.base = record.base.saturating_add(&delta);
        record.pool = record.pool.saturating_add(&delta);
        let after = record.view();
        Ok(vec![ChangeEvent::PointsAssigned { id, before, after }])
    }

    /// Spend pool points without touching base. Fails on the first stat (in
    /// declaration order) whose pool is short.
    pub fn consume(
        &mut self,
        env: &Env<'_>,
        actor: Principal,
        id: CharacterId,
        cost: StatBlock,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.character_gate(env, actor, id, self.state.stats.paused, "stats")?;
        if cost.is_zero() {
            return Err(EngineError::Validation("no points requested"));
        }
        self.consume_pool(id, &cost)
    }

    /// Shared pool-debit path, also used by production starts. The caller
    /// has already passed its own gates.
    pub(crate) fn consume_pool(
        &mut self,
        id: CharacterId,
        cost: &StatBlock,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        let record = self.state.stats.record(id);
        for kind in StatKind::ALL {
            if record.pool.get(kind) < cost.get(kind) {
                return Err(EngineError::InsufficientStat {
                    stat: kind,
                    needed: cost.get(kind),
                    available: record.pool.get(kind),
                });
            }
        }

        let record = self.state.stats.records.entry(id).or_default();
        let before = record.view();
        record.pool = record.pool.saturating_sub(cost);
        let after = record.view();
        Ok(vec![ChangeEvent::PointsConsumed { id, before, after }])
    }

    /// Permanently trade base points away. Each sacrificed point leaves base
    /// (and pool, where present) and increments the per-stat sacrifice
    /// counter that vitalize draws from.
    pub fn sacrifice(
        &mut self,
        env: &Env<'_>,
        actor: Principal,
        id: CharacterId,
        points: StatBlock,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.character_gate(env, actor, id, self.state.stats.paused, "stats")?;
        if points.is_zero() {
            return Err(EngineError::Validation("no points requested"));
        }
        let record = self.state.stats.record(id);
        for kind in StatKind::ALL {
            if record.base.get(kind) < points.get(kind) {
                return Err(EngineError::InsufficientStat {
                    stat: kind,
                    needed: points.get(kind),
                    available: record.base.get(kind),
                });
            }
        }

        let record = self.state.stats.records.entry(id).or_default();
        let before = record.view();
        record.base = record.base.saturating_sub(&points);
        // The pool loses at most what it still holds per stat.
        record.pool = record.pool.saturating_sub(&points.min(&before.pool));
        record.sacrificed = record.sacrificed.saturating_add(&points);
        let after = record.view();
        Ok(vec![ChangeEvent::PointsSacrificed { id, before, after }])
    }

    /// Free pool refresh, gated by the cooldown. Restores pool to base.
    pub fn refresh(
        &mut self,
        env: &Env<'_>,
        actor: Principal,
        id: CharacterId,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.character_gate(env, actor, id, self.state.stats.paused, "stats")?;
        let now = env.now();
        let cooldown = self.state.config.refresh_cooldown_secs;
        let record = self.state.stats.record(id);
        let ready_at = record.last_free_refresh.plus_secs(cooldown);
        if record.last_free_refresh != Timestamp::ZERO && now < ready_at {
            return Err(EngineError::RefreshCooldown(ready_at));
        }

        let record = self.state.stats.records.entry(id).or_default();
        let before = record.view();
        record.pool = record.base;
        record.last_free_refresh = now;
        let after = record.view();
        Ok(vec![ChangeEvent::PoolRefreshed {
            id,
            with_token: false,
            before,
            after,
        }])
    }

    /// Token-paid refresh. Burns one refresher token and restores pool to
    /// base; runs on its own cooldown clock, independent of the free one.
    pub fn refresh_with_token(
        &mut self,
        env: &Env<'_>,
        actor: Principal,
        id: CharacterId,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.character_gate(env, actor, id, self.state.stats.paused, "stats")?;
        let now = env.now();
        let cooldown = self.state.config.refresh_cooldown_secs;
        let record = self.state.stats.record(id);
        let ready_at = record.last_token_refresh.plus_secs(cooldown);
        if record.last_token_refresh != Timestamp::ZERO && now < ready_at {
            return Err(EngineError::TokenRefreshCooldown(ready_at));
        }
        self.charge(env.refresher(), actor, 1)?;

        let record = self.state.stats.records.entry(id).or_default();
        let before = record.view();
        record.pool = record.base;
        record.last_token_refresh = now;
        record.token_refresh_count += 1;
        let after = record.view();
        Ok(vec![ChangeEvent::PoolRefreshed {
            id,
            with_token: true,
            before,
            after,
        }])
    }

    /// Restore exactly one previously sacrificed point to base, burning one
    /// vitalizer token. `point` must name exactly one stat with value 1.
    pub fn vitalize(
        &mut self,
        env: &Env<'_>,
        actor: Principal,
        id: CharacterId,
        point: StatBlock,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.character_gate(env, actor, id, self.state.stats.paused, "stats")?;
        let kind = single_point(&point)
            .ok_or(EngineError::Validation("vitalize restores exactly one point"))?;
        let record = self.state.stats.record(id);
        if record.sacrificed.get(kind) == 0 {
            return Err(EngineError::NothingToRestore(kind));
        }
        self.charge(env.vitalizer(), actor, 1)?;

        let record = self.state.stats.records.entry(id).or_default();
        let before = record.view();
        *record.sacrificed.get_mut(kind) -= 1;
        *record.base.get_mut(kind) += 1;
        *record.pool.get_mut(kind) += 1;
        let after = record.view();
        Ok(vec![ChangeEvent::PointVitalized { id, before, after }])
    }

    pub fn get_stats(&self, id: CharacterId) -> Result<StatRecord, EngineError> {
        self.ensure_exists(id)?;
        Ok(self.state.stats.record(id))
    }
}

/// `Some(kind)` iff exactly one component is set and it equals 1.
fn single_point(block: &StatBlock) -> Option<StatKind> {
    if block.sum() != 1 {
        return None;
    }
    StatKind::ALL.into_iter().find(|&k| block.get(k) == 1)
}
