use std::sync::Arc;

use saga_core::{
    AttributeBlock, ChangeEvent, CharacterId, CivilizationId, EngineConfig, EquipmentSlot,
    ErrorKind, ItemDefinition, ItemId, ItemSlotKind, ModifierPair, Principal, RecipeId,
    RecipeSpec, ResourceId, ResourceLedger as _, StatBlock, Variant, WorldState,
};
use saga_runtime::{
    Command, EngineService, FileStateRepository, InMemoryCatalog, InMemoryLedger,
    InMemoryOwnership, InMemoryToken, ManualClock, ProviderSet,
};

const ADMIN: Principal = Principal(1);
const ALICE: Principal = Principal(10);
const BOB: Principal = Principal(11);

const ORE: ResourceId = ResourceId(100);
const INGOT: ResourceId = ResourceId(101);

/// Provider bundle with concrete handles kept for seeding and clock control.
struct Harness {
    service: EngineService,
    ledger: Arc<InMemoryLedger>,
    catalog: Arc<InMemoryCatalog>,
    payment: Arc<InMemoryToken>,
    clock: Arc<ManualClock>,
}

fn harness() -> Harness {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let ownership = Arc::new(InMemoryOwnership::default());
    let ledger = Arc::new(InMemoryLedger::default());
    let catalog = Arc::new(InMemoryCatalog::default());
    let payment = Arc::new(InMemoryToken::default());
    let refresher = Arc::new(InMemoryToken::default());
    let vitalizer = Arc::new(InMemoryToken::default());
    let clock = Arc::new(ManualClock::at(1_000));

    let providers = ProviderSet {
        ownership,
        resources: ledger.clone(),
        items: catalog.clone(),
        payment: payment.clone(),
        refresher,
        vitalizer,
        clock: clock.clone(),
    };
    let state = WorldState::new(
        ADMIN,
        EngineConfig::new(saga_content::default_level_curve()),
    );
    Harness {
        service: EngineService::new(state, providers),
        ledger,
        catalog,
        payment,
        clock,
    }
}

async fn mint(harness: &Harness, owner: Principal) -> CharacterId {
    let events = harness
        .service
        .execute(
            owner,
            Command::Mint {
                civilization: CivilizationId(1),
            },
        )
        .await
        .expect("mint");
    match events.as_slice() {
        [ChangeEvent::CharacterMinted { id, .. }] => *id,
        other => panic!("unexpected mint events: {other:?}"),
    }
}

#[tokio::test]
async fn complete_progression_scenario() {
    let harness = harness();
    let service = &harness.service;
    let mut events = service.subscribe();

    // World setup: one civilization, one forge recipe.
    service
        .execute(
            ADMIN,
            Command::RegisterCivilization {
                label: "northmen".into(),
            },
        )
        .await
        .expect("register");
    service
        .execute(
            ADMIN,
            Command::AddRecipe {
                variant: Variant::Forge,
                spec: RecipeSpec {
                    level_required: 0,
                    stats_cost: StatBlock::new(2, 0, 1),
                    cooldown_secs: 300,
                    materials: vec![ORE],
                    material_amounts: vec![4],
                    rewards: vec![INGOT],
                    reward_amounts: vec![2],
                    experience: 1_000,
                },
            },
        )
        .await
        .expect("add recipe");

    let id = mint(&harness, ALICE).await;
    harness.ledger.set_balance(id, ORE, 10);

    // Six base points are spendable immediately.
    service
        .execute(
            ALICE,
            Command::AssignPoints {
                id,
                points: StatBlock::new(3, 1, 2),
            },
        )
        .await
        .expect("assign");

    // Forge a batch: stats and ore leave the character atomically.
    service
        .execute(
            ALICE,
            Command::StartProduction {
                variant: Variant::Forge,
                id,
                slot: 0,
                recipe: RecipeId(1),
                effort: None,
            },
        )
        .await
        .expect("start");
    let record = service.query(|e, _| e.get_stats(id)).await.expect("stats");
    assert_eq!(record.pool, StatBlock::new(1, 1, 1));
    assert_eq!(harness.ledger.balance_of(id, ORE), 6);

    // Too early to claim.
    let err = service
        .execute(
            ALICE,
            Command::ClaimProduction {
                variant: Variant::Forge,
                id,
                slot: 0,
            },
        )
        .await
        .expect_err("claim too early");
    assert_engine_kind(&err, ErrorKind::NotReady);

    // After the cooldown the claim pays out materials and experience, and
    // 1000 experience is exactly level 1.
    harness.clock.advance(300);
    service
        .execute(
            ALICE,
            Command::ClaimProduction {
                variant: Variant::Forge,
                id,
                slot: 0,
            },
        )
        .await
        .expect("claim");
    assert_eq!(harness.ledger.balance_of(id, INGOT), 2);
    assert_eq!(service.query(|e, _| e.get_level(id)).await.expect("level"), 1);
    assert_eq!(
        service
            .query(|e, _| e.available_points(id))
            .await
            .expect("points"),
        1
    );

    // The broadcast bus saw every change in order.
    let mut seen = Vec::new();
    while let Ok(envelope) = events.try_recv() {
        seen.push(envelope.change.operation());
    }
    assert_eq!(
        seen,
        vec![
            "register_civilization",
            "add_recipe",
            "mint",
            "assign_points",
            "consume",
            "production_start",
            "production_claim",
            "assign_experience",
            "level_up",
        ]
    );
}

#[tokio::test]
async fn rejected_commands_leave_state_unchanged() {
    let harness = harness();
    let service = &harness.service;
    service
        .execute(
            ADMIN,
            Command::RegisterCivilization {
                label: "southmen".into(),
            },
        )
        .await
        .expect("register");
    let id = mint(&harness, ALICE).await;
    service
        .execute(
            ALICE,
            Command::AssignPoints {
                id,
                points: StatBlock::new(2, 2, 2),
            },
        )
        .await
        .expect("assign");

    let before = service.export_json().await.expect("export");

    // Bob holds no approval for Alice's character.
    let err = service
        .execute(
            BOB,
            Command::ConsumePoints {
                id,
                points: StatBlock::new(1, 0, 0),
            },
        )
        .await
        .expect_err("unauthorized");
    assert_engine_kind(&err, ErrorKind::Unauthorized);

    // Overdraw attempts fail whole.
    let err = service
        .execute(
            ALICE,
            Command::AssignPoints {
                id,
                points: StatBlock::new(10, 0, 0),
            },
        )
        .await
        .expect_err("overdraw");
    assert_engine_kind(&err, ErrorKind::InsufficientResource);

    let after = service.export_json().await.expect("export");
    assert_eq!(before, after);
}

#[tokio::test]
async fn equipment_round_trip_through_the_ledger() {
    let harness = harness();
    let service = &harness.service;
    harness.catalog.upsert(ItemDefinition {
        id: ItemId(7),
        level_required: 0,
        slot: ItemSlotKind::Necklace,
        stats: ModifierPair {
            bonus: StatBlock::new(0, 0, 2),
            reducer: StatBlock::ZERO,
        },
        attributes: ModifierPair::<AttributeBlock>::default(),
        available: true,
    });
    service
        .execute(
            ADMIN,
            Command::RegisterCivilization {
                label: "islanders".into(),
            },
        )
        .await
        .expect("register");
    let id = mint(&harness, ALICE).await;
    harness.ledger.set_balance(id, ItemId(7).as_resource(), 1);

    service
        .execute(
            ALICE,
            Command::Equip {
                id,
                item: ItemId(7),
                slot: EquipmentSlot::Necklace,
            },
        )
        .await
        .expect("equip");
    assert_eq!(harness.ledger.balance_of(id, ItemId(7).as_resource()), 0);
    let mods = service
        .query(|e, env| e.get_total_stats_modifiers(env, id))
        .await
        .expect("mods");
    assert_eq!(mods.bonus, StatBlock::new(0, 0, 2));

    service
        .execute(
            ALICE,
            Command::Unequip {
                id,
                slot: EquipmentSlot::Necklace,
            },
        )
        .await
        .expect("unequip");
    assert_eq!(harness.ledger.balance_of(id, ItemId(7).as_resource()), 1);
}

#[tokio::test]
async fn snapshots_survive_a_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = FileStateRepository::new(dir.path()).expect("repo");

    let harness = harness();
    harness
        .service
        .execute(
            ADMIN,
            Command::RegisterCivilization {
                label: "highlanders".into(),
            },
        )
        .await
        .expect("register");
    let id = mint(&harness, ALICE).await;
    harness
        .service
        .execute(
            ALICE,
            Command::AssignPoints {
                id,
                points: StatBlock::new(1, 2, 3),
            },
        )
        .await
        .expect("assign");
    harness
        .service
        .persist(&repo, "main")
        .await
        .expect("persist");

    // A new service hydrated from the snapshot sees the same world.
    let restored = EngineService::hydrate(
        &repo,
        "main",
        WorldState::new(ADMIN, EngineConfig::default()),
        ProviderSet::in_memory(),
    )
    .expect("hydrate");
    let record = restored.query(|e, _| e.get_stats(id)).await.expect("stats");
    assert_eq!(record.base, StatBlock::new(1, 2, 3));
}

#[tokio::test]
async fn slot_purchases_charge_the_payment_token() {
    let harness = harness();
    let service = &harness.service;
    service
        .execute(
            ADMIN,
            Command::RegisterCivilization {
                label: "lowlanders".into(),
            },
        )
        .await
        .expect("register");
    let id = mint(&harness, ALICE).await;
    service
        .execute(
            ADMIN,
            Command::SetSlotPrice {
                variant: Variant::Craft,
                price: 40,
            },
        )
        .await
        .expect("price");

    harness.payment.mint_to(ALICE, 40);
    let err = service
        .execute(
            ALICE,
            Command::BuySlot {
                variant: Variant::Craft,
                id,
            },
        )
        .await
        .expect_err("no allowance");
    assert_engine_kind(&err, ErrorKind::InsufficientAllowance);

    harness.payment.approve(ALICE, 40);
    let events = service
        .execute(
            ALICE,
            Command::BuySlot {
                variant: Variant::Craft,
                id,
            },
        )
        .await
        .expect("buy");
    assert!(matches!(
        events.as_slice(),
        [ChangeEvent::SlotPurchased { purchased: 2, .. }]
    ));
}

fn assert_engine_kind(err: &saga_runtime::RuntimeError, kind: ErrorKind) {
    match err {
        saga_runtime::RuntimeError::Engine(engine_err) => {
            assert_eq!(engine_err.kind(), kind, "unexpected error: {engine_err}")
        }
        other => panic!("expected engine error, got {other}"),
    }
}
