//! The engine service: serialized command execution over shared state.
//!
//! One [`EngineService`] owns the world state behind an async mutex.
//! Engine calls are short and synchronous, so a single lock serializes
//! mutations without meaningful contention; readers take the same lock for
//! a consistent view. Successful commands fan their change records out on
//! the broadcast bus.

use std::sync::atomic::{AtomicU64, Ordering};

use saga_core::{
    ChangeEvent, CharacterId, CivilizationId, Component, Engine, EngineError, Env, EquipmentSlot,
    ItemId, Principal, RecipeId, RecipeSpec, StatBlock, Variant, WorldState,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::Result;
use crate::events::{EventBus, EventEnvelope};
use crate::providers::ProviderSet;
use crate::repository::StateRepository;

/// Every mutating engine operation as a serializable command, so transports
/// and replay tooling share one entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Command {
    RegisterCivilization { label: String },
    Mint { civilization: CivilizationId },
    BuyAccountUpgrade { id: CharacterId, tier: u8 },

    AddAuthority { authority: Principal },
    RemoveAuthority { authority: Principal },
    AssignExperience { id: CharacterId, amount: u64 },

    AssignPoints { id: CharacterId, points: StatBlock },
    ConsumePoints { id: CharacterId, points: StatBlock },
    SacrificePoints { id: CharacterId, points: StatBlock },
    Refresh { id: CharacterId },
    RefreshWithToken { id: CharacterId },
    Vitalize { id: CharacterId, point: StatBlock },

    Equip { id: CharacterId, item: ItemId, slot: EquipmentSlot },
    Unequip { id: CharacterId, slot: EquipmentSlot },

    StartProduction {
        variant: Variant,
        id: CharacterId,
        slot: u8,
        recipe: RecipeId,
        effort: Option<StatBlock>,
    },
    ClaimProduction { variant: Variant, id: CharacterId, slot: u8 },
    BuySlot { variant: Variant, id: CharacterId },

    AddRecipe { variant: Variant, spec: RecipeSpec },
    UpdateRecipe { variant: Variant, recipe: RecipeId, spec: RecipeSpec },
    EnableRecipe { variant: Variant, recipe: RecipeId },
    DisableRecipe { variant: Variant, recipe: RecipeId },

    SetPaused { component: Component, paused: bool },
    SetMintPrice { price: u64 },
    SetUpgradePrice { tier: u8, price: u64 },
    SetSlotPrice { variant: Variant, price: u64 },
}

impl Command {
    /// Stable name for log indexing.
    pub fn name(&self) -> &'static str {
        match self {
            Command::RegisterCivilization { .. } => "register_civilization",
            Command::Mint { .. } => "mint",
            Command::BuyAccountUpgrade { .. } => "buy_account_upgrade",
            Command::AddAuthority { .. } => "add_authority",
            Command::RemoveAuthority { .. } => "remove_authority",
            Command::AssignExperience { .. } => "assign_experience",
            Command::AssignPoints { .. } => "assign_points",
            Command::ConsumePoints { .. } => "consume",
            Command::SacrificePoints { .. } => "sacrifice",
            Command::Refresh { .. } => "refresh",
            Command::RefreshWithToken { .. } => "refresh_with_token",
            Command::Vitalize { .. } => "vitalize",
            Command::Equip { .. } => "equip",
            Command::Unequip { .. } => "unequip",
            Command::StartProduction { .. } => "production_start",
            Command::ClaimProduction { .. } => "production_claim",
            Command::BuySlot { .. } => "buy_upgrade",
            Command::AddRecipe { .. } => "add_recipe",
            Command::UpdateRecipe { .. } => "update_recipe",
            Command::EnableRecipe { .. } => "enable_recipe",
            Command::DisableRecipe { .. } => "disable_recipe",
            Command::SetPaused { .. } => "set_paused",
            Command::SetMintPrice { .. } => "set_mint_price",
            Command::SetUpgradePrice { .. } => "set_upgrade_price",
            Command::SetSlotPrice { .. } => "set_slot_price",
        }
    }
}

pub struct EngineService {
    state: Mutex<WorldState>,
    providers: ProviderSet,
    bus: EventBus,
    seq: AtomicU64,
}

impl EngineService {
    pub fn new(state: WorldState, providers: ProviderSet) -> Self {
        Self {
            state: Mutex::new(state),
            providers,
            bus: EventBus::new(),
            seq: AtomicU64::new(0),
        }
    }

    /// Restore the world from `repo`, or start fresh with `initial` when no
    /// snapshot exists under `label`.
    pub fn hydrate(
        repo: &dyn StateRepository,
        label: &str,
        initial: WorldState,
        providers: ProviderSet,
    ) -> Result<Self> {
        let state = match repo.load(label)? {
            Some(state) => {
                tracing::info!(label, "restored world from snapshot");
                state
            }
            None => initial,
        };
        Ok(Self::new(state, providers))
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<EventEnvelope> {
        self.bus.subscribe()
    }

    pub fn providers(&self) -> &ProviderSet {
        &self.providers
    }

    /// Execute one command as `actor`. On success the change records are
    /// broadcast and returned; on failure the state is untouched.
    pub async fn execute(&self, actor: Principal, command: Command) -> Result<Vec<ChangeEvent>> {
        let span = tracing::info_span!("execute", operation = command.name(), %actor);

        let mut state = self.state.lock().await;
        let _guard = span.enter();
        let env = self.providers.env();
        let mut engine = Engine::new(&mut state);

        let result = dispatch(&mut engine, &env, actor, command);
        match result {
            Ok(events) => {
                let at = env.now();
                for change in &events {
                    let envelope = EventEnvelope {
                        seq: self.seq.fetch_add(1, Ordering::SeqCst),
                        at,
                        change: change.clone(),
                    };
                    self.bus.publish(envelope);
                }
                tracing::info!(changes = events.len(), "command applied");
                Ok(events)
            }
            Err(err) => {
                tracing::warn!(error = %err, kind = ?err.kind(), "command rejected");
                Err(err.into())
            }
        }
    }

    /// Run a read-only closure against the engine under the state lock.
    pub async fn query<T>(
        &self,
        f: impl FnOnce(&Engine<'_>, &Env<'_>) -> std::result::Result<T, EngineError>,
    ) -> Result<T> {
        let mut state = self.state.lock().await;
        let env = self.providers.env();
        let engine = Engine::new(&mut state);
        Ok(f(&engine, &env)?)
    }

    /// Snapshot the current world into `repo` under `label`.
    pub async fn persist(&self, repo: &dyn StateRepository, label: &str) -> Result<()> {
        let state = self.state.lock().await;
        repo.save(label, &state)?;
        Ok(())
    }

    /// Current world as pretty JSON, for inspection tooling.
    pub async fn export_json(&self) -> Result<String> {
        let state = self.state.lock().await;
        serde_json::to_string_pretty(&*state)
            .map_err(|e| crate::error::RuntimeError::Content(e.to_string()))
    }
}

fn dispatch(
    engine: &mut Engine<'_>,
    env: &Env<'_>,
    actor: Principal,
    command: Command,
) -> std::result::Result<Vec<ChangeEvent>, EngineError> {
    match command {
        Command::RegisterCivilization { label } => engine.register_civilization(actor, &label),
        Command::Mint { civilization } => engine.mint(env, actor, civilization),
        Command::BuyAccountUpgrade { id, tier } => {
            engine.buy_account_upgrade(env, actor, id, tier)
        }
        Command::AddAuthority { authority } => engine.add_authority(actor, authority),
        Command::RemoveAuthority { authority } => engine.remove_authority(actor, authority),
        Command::AssignExperience { id, amount } => engine.assign_experience(actor, id, amount),
        Command::AssignPoints { id, points } => engine.assign_points(env, actor, id, points),
        Command::ConsumePoints { id, points } => engine.consume(env, actor, id, points),
        Command::SacrificePoints { id, points } => engine.sacrifice(env, actor, id, points),
        Command::Refresh { id } => engine.refresh(env, actor, id),
        Command::RefreshWithToken { id } => engine.refresh_with_token(env, actor, id),
        Command::Vitalize { id, point } => engine.vitalize(env, actor, id, point),
        Command::Equip { id, item, slot } => engine.equip(env, actor, id, item, slot),
        Command::Unequip { id, slot } => engine.unequip(env, actor, id, slot),
        Command::StartProduction {
            variant,
            id,
            slot,
            recipe,
            effort,
        } => engine.start(env, actor, variant, id, slot, recipe, effort),
        Command::ClaimProduction { variant, id, slot } => {
            engine.claim(env, actor, variant, id, slot)
        }
        Command::BuySlot { variant, id } => engine.buy_upgrade(env, actor, variant, id),
        Command::AddRecipe { variant, spec } => engine.add_recipe(actor, variant, spec),
        Command::UpdateRecipe {
            variant,
            recipe,
            spec,
        } => engine.update_recipe(actor, variant, recipe, spec),
        Command::EnableRecipe { variant, recipe } => {
            engine.enable_recipe(actor, variant, recipe)
        }
        Command::DisableRecipe { variant, recipe } => {
            engine.disable_recipe(actor, variant, recipe)
        }
        Command::SetPaused { component, paused } => engine.set_paused(actor, component, paused),
        Command::SetMintPrice { price } => {
            engine.set_mint_price(actor, price)?;
            Ok(Vec::new())
        }
        Command::SetUpgradePrice { tier, price } => {
            engine.set_upgrade_price(actor, tier, price)?;
            Ok(Vec::new())
        }
        Command::SetSlotPrice { variant, price } => {
            engine.set_slot_price(actor, variant, price)?;
            Ok(Vec::new())
        }
    }
}
