//! Equip/unequip transitions and modifier aggregation.
//!
//! Item inventory lives in the resource ledger under the item's resource id.
//! Equipping debits one unit; unequipping (or being evicted) credits it
//! back, so an item is never both worn and spendable.

use crate::common::{ItemId, Principal};
use crate::engine::Engine;
use crate::env::{AttributeBlock, Env, ItemDefinition, ItemSlotKind, ModifierPair};
use crate::equipment::{EquipmentSlot, HandSlots};
use crate::error::EngineError;
use crate::events::ChangeEvent;
use crate::identity::CharacterId;
use crate::stats::StatBlock;

impl Engine<'_> {
    /// Equip `item` into `slot`, evicting whatever occupied the affected
    /// slot(s). Evicted items return to the ledger.
    pub fn equip(
        &mut self,
        env: &Env<'_>,
        actor: Principal,
        id: CharacterId,
        item: ItemId,
        slot: EquipmentSlot,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.character_gate(env, actor, id, self.state.equipment.paused, "equipment")?;
        let def = env.items().item(item).ok_or(EngineError::ItemNotFound(item))?;
        if !def.available {
            return Err(EngineError::ItemDisabled(item));
        }
        ensure_slot_fit(&def, slot)?;
        let level = self.level_of(id);
        if level < def.level_required {
            return Err(EngineError::InsufficientLevel {
                required: def.level_required,
                actual: level,
            });
        }
        env.resources().debit(id, item.as_resource(), 1)?;

        let mut loadout = self.state.equipment.loadout(id);
        let evicted = match def.slot {
            ItemSlotKind::TwoHanded => {
                let out = match loadout.held {
                    HandSlots::Empty => vec![],
                    HandSlots::TwoHanded(prev) => vec![prev],
                    HandSlots::Split { left, right } => {
                        left.into_iter().chain(right).collect()
                    }
                };
                loadout.held = HandSlots::TwoHanded(item);
                out
            }
            ItemSlotKind::OneHanded => {
                let out = match loadout.held {
                    // A two-hander blocks both hands, so it leaves whichever
                    // hand the new item targets.
                    HandSlots::TwoHanded(prev) => {
                        loadout.held = HandSlots::Empty;
                        vec![prev]
                    }
                    _ => loadout.held.item_in(slot).into_iter().collect(),
                };
                loadout.held = loadout.held.set(slot, Some(item));
                out
            }
            _ => {
                // ensure_slot_fit guarantees this is a body slot.
                let target = loadout
                    .body_mut(slot)
                    .ok_or(EngineError::WrongSlot { item, slot })?;
                let out = target.take().into_iter().collect();
                *target = Some(item);
                out
            }
        };

        for prev in &evicted {
            env.resources().credit(id, prev.as_resource(), 1);
        }
        self.state.equipment.characters.insert(id, loadout);
        Ok(vec![ChangeEvent::Equipped {
            id,
            slot,
            item,
            evicted,
        }])
    }

    /// Remove whatever occupies `slot`, returning it to the ledger. Removing
    /// either hand of a two-handed item removes the item entirely.
    pub fn unequip(
        &mut self,
        env: &Env<'_>,
        actor: Principal,
        id: CharacterId,
        slot: EquipmentSlot,
    ) -> Result<Vec<ChangeEvent>, EngineError> {
        self.character_gate(env, actor, id, self.state.equipment.paused, "equipment")?;
        let mut loadout = self.state.equipment.loadout(id);

        let item = if slot.is_hand() {
            let item = loadout.held.item_in(slot).ok_or(EngineError::SlotEmpty(slot))?;
            loadout.held = match loadout.held {
                HandSlots::TwoHanded(_) => HandSlots::Empty,
                other => other.set(slot, None),
            };
            item
        } else {
            let target = loadout
                .body_mut(slot)
                .ok_or(EngineError::SlotEmpty(slot))?;
            target.take().ok_or(EngineError::SlotEmpty(slot))?
        };

        env.resources().credit(id, item.as_resource(), 1);
        self.state.equipment.characters.insert(id, loadout);
        Ok(vec![ChangeEvent::Unequipped { id, slot, item }])
    }

    /// Sum of stat (bonus, reducer) pairs across the loadout. A two-handed
    /// item contributes once.
    pub fn get_total_stats_modifiers(
        &self,
        env: &Env<'_>,
        id: CharacterId,
    ) -> Result<ModifierPair<StatBlock>, EngineError> {
        self.ensure_exists(id)?;
        let mut total = ModifierPair::<StatBlock>::default();
        for def in self.equipped_definitions(env, id) {
            total.bonus = total.bonus.saturating_add(&def.stats.bonus);
            total.reducer = total.reducer.saturating_add(&def.stats.reducer);
        }
        Ok(total)
    }

    /// Sum of attribute (bonus, reducer) pairs across the loadout.
    pub fn get_total_attributes(
        &self,
        env: &Env<'_>,
        id: CharacterId,
    ) -> Result<ModifierPair<AttributeBlock>, EngineError> {
        self.ensure_exists(id)?;
        let mut total = ModifierPair::<AttributeBlock>::default();
        for def in self.equipped_definitions(env, id) {
            total.bonus = total.bonus.saturating_add(&def.attributes.bonus);
            total.reducer = total.reducer.saturating_add(&def.attributes.reducer);
        }
        Ok(total)
    }

    fn equipped_definitions(&self, env: &Env<'_>, id: CharacterId) -> Vec<ItemDefinition> {
        let catalog = env.items();
        self.state
            .equipment
            .loadout(id)
            .equipped_items()
            .into_iter()
            .filter_map(|item| catalog.item(item))
            .collect()
    }
}

fn ensure_slot_fit(def: &ItemDefinition, slot: EquipmentSlot) -> Result<(), EngineError> {
    let fits = match def.slot {
        ItemSlotKind::OneHanded | ItemSlotKind::TwoHanded => slot.is_hand(),
        kind => kind.body_slot() == Some(slot),
    };
    if fits {
        Ok(())
    } else {
        Err(EngineError::WrongSlot { item: def.id, slot })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ResourceLedger as _;
    use crate::error::ErrorKind;
    use crate::testkit::{FakeCatalog, TestWorld, ALICE, BOB};

    fn item(id: u32, kind: ItemSlotKind) -> ItemDefinition {
        ItemDefinition {
            id: ItemId(id),
            level_required: 0,
            slot: kind,
            stats: ModifierPair::default(),
            attributes: ModifierPair::default(),
            available: true,
        }
    }

    fn world_with_items(items: Vec<ItemDefinition>) -> (TestWorld, CharacterId) {
        let mut world = TestWorld::new();
        world.catalog = FakeCatalog::with(items);
        let id = world.mint_character(ALICE);
        (world, id)
    }

    fn give(world: &TestWorld, id: CharacterId, item: u32) {
        world.resources.seed(id, ItemId(item).as_resource(), 1);
    }

    #[test]
    fn equip_moves_the_item_out_of_the_ledger() {
        let (mut world, id) = world_with_items(vec![item(1, ItemSlotKind::Helmet)]);
        give(&world, id, 1);

        world
            .run(|engine, env| engine.equip(env, ALICE, id, ItemId(1), EquipmentSlot::Helmet))
            .unwrap();
        assert_eq!(
            world.resources.balance_of(id, ItemId(1).as_resource()),
            0
        );
        assert_eq!(
            world.state.equipment.loadout(id).helmet,
            Some(ItemId(1))
        );
    }

    #[test]
    fn equip_without_owning_the_item_fails() {
        let (mut world, id) = world_with_items(vec![item(1, ItemSlotKind::Helmet)]);
        let err = world
            .run(|engine, env| engine.equip(env, ALICE, id, ItemId(1), EquipmentSlot::Helmet))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientResource);
    }

    #[test]
    fn equip_into_the_wrong_slot_is_rejected() {
        let (mut world, id) = world_with_items(vec![item(1, ItemSlotKind::Helmet)]);
        give(&world, id, 1);
        let err = world
            .run(|engine, env| engine.equip(env, ALICE, id, ItemId(1), EquipmentSlot::Chest))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::WrongSlot {
                item: ItemId(1),
                slot: EquipmentSlot::Chest
            }
        );
    }

    #[test]
    fn equip_respects_item_level_requirements() {
        let mut def = item(1, ItemSlotKind::Helmet);
        def.level_required = 3;
        let (mut world, id) = world_with_items(vec![def]);
        give(&world, id, 1);
        let err = world
            .run(|engine, env| engine.equip(env, ALICE, id, ItemId(1), EquipmentSlot::Helmet))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientLevel {
                required: 3,
                actual: 0
            }
        );
    }

    #[test]
    fn replacing_an_item_returns_the_old_one() {
        let (mut world, id) =
            world_with_items(vec![item(1, ItemSlotKind::Helmet), item(2, ItemSlotKind::Helmet)]);
        give(&world, id, 1);
        give(&world, id, 2);

        world
            .run(|engine, env| engine.equip(env, ALICE, id, ItemId(1), EquipmentSlot::Helmet))
            .unwrap();
        let events = world
            .run(|engine, env| engine.equip(env, ALICE, id, ItemId(2), EquipmentSlot::Helmet))
            .unwrap();
        assert_eq!(
            events,
            vec![ChangeEvent::Equipped {
                id,
                slot: EquipmentSlot::Helmet,
                item: ItemId(2),
                evicted: vec![ItemId(1)],
            }]
        );
        assert_eq!(world.resources.balance_of(id, ItemId(1).as_resource()), 1);
    }

    #[test]
    fn two_handed_item_evicts_both_hands() {
        let (mut world, id) = world_with_items(vec![
            item(1, ItemSlotKind::OneHanded),
            item(2, ItemSlotKind::OneHanded),
            item(3, ItemSlotKind::TwoHanded),
        ]);
        for i in 1..=3 {
            give(&world, id, i);
        }

        world
            .run(|engine, env| engine.equip(env, ALICE, id, ItemId(1), EquipmentSlot::LeftHand))
            .unwrap();
        world
            .run(|engine, env| engine.equip(env, ALICE, id, ItemId(2), EquipmentSlot::RightHand))
            .unwrap();
        let events = world
            .run(|engine, env| engine.equip(env, ALICE, id, ItemId(3), EquipmentSlot::LeftHand))
            .unwrap();
        assert_eq!(
            events,
            vec![ChangeEvent::Equipped {
                id,
                slot: EquipmentSlot::LeftHand,
                item: ItemId(3),
                evicted: vec![ItemId(1), ItemId(2)],
            }]
        );
        let loadout = world.state.equipment.loadout(id);
        assert_eq!(loadout.held, HandSlots::TwoHanded(ItemId(3)));
    }

    #[test]
    fn one_hander_displaces_an_equipped_two_hander() {
        let (mut world, id) = world_with_items(vec![
            item(1, ItemSlotKind::TwoHanded),
            item(2, ItemSlotKind::OneHanded),
        ]);
        give(&world, id, 1);
        give(&world, id, 2);

        world
            .run(|engine, env| engine.equip(env, ALICE, id, ItemId(1), EquipmentSlot::RightHand))
            .unwrap();
        world
            .run(|engine, env| engine.equip(env, ALICE, id, ItemId(2), EquipmentSlot::RightHand))
            .unwrap();
        let loadout = world.state.equipment.loadout(id);
        assert_eq!(loadout.item_in(EquipmentSlot::LeftHand), None);
        assert_eq!(loadout.item_in(EquipmentSlot::RightHand), Some(ItemId(2)));
        assert_eq!(world.resources.balance_of(id, ItemId(1).as_resource()), 1);
    }

    #[test]
    fn unequip_either_hand_removes_a_two_hander() {
        let (mut world, id) = world_with_items(vec![item(1, ItemSlotKind::TwoHanded)]);
        give(&world, id, 1);
        world
            .run(|engine, env| engine.equip(env, ALICE, id, ItemId(1), EquipmentSlot::LeftHand))
            .unwrap();
        world
            .run(|engine, env| engine.unequip(env, ALICE, id, EquipmentSlot::RightHand))
            .unwrap();
        assert!(world.state.equipment.loadout(id).is_bare());
        assert_eq!(world.resources.balance_of(id, ItemId(1).as_resource()), 1);
    }

    #[test]
    fn unequip_empty_slot_fails() {
        let (mut world, id) = world_with_items(vec![]);
        let err = world
            .run(|engine, env| engine.unequip(env, ALICE, id, EquipmentSlot::Belt))
            .unwrap_err();
        assert_eq!(err, EngineError::SlotEmpty(EquipmentSlot::Belt));
    }

    #[test]
    fn disabled_items_cannot_be_equipped() {
        let mut def = item(1, ItemSlotKind::Cape);
        def.available = false;
        let (mut world, id) = world_with_items(vec![def]);
        give(&world, id, 1);
        let err = world
            .run(|engine, env| engine.equip(env, ALICE, id, ItemId(1), EquipmentSlot::Cape))
            .unwrap_err();
        assert_eq!(err, EngineError::ItemDisabled(ItemId(1)));
    }

    #[test]
    fn non_owner_cannot_touch_equipment() {
        let (mut world, id) = world_with_items(vec![item(1, ItemSlotKind::Helmet)]);
        give(&world, id, 1);
        let err = world
            .run(|engine, env| engine.equip(env, BOB, id, ItemId(1), EquipmentSlot::Helmet))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn modifier_totals_sum_bonuses_and_reducers_separately() {
        let mut helmet = item(1, ItemSlotKind::Helmet);
        helmet.stats = ModifierPair {
            bonus: StatBlock::new(2, 0, 1),
            reducer: StatBlock::new(0, 1, 0),
        };
        helmet.attributes = ModifierPair {
            bonus: AttributeBlock {
                def: 5,
                ..AttributeBlock::default()
            },
            reducer: AttributeBlock::default(),
        };
        let mut sword = item(2, ItemSlotKind::TwoHanded);
        sword.stats = ModifierPair {
            bonus: StatBlock::new(3, 0, 0),
            reducer: StatBlock::new(0, 0, 2),
        };
        sword.attributes = ModifierPair {
            bonus: AttributeBlock {
                atk: 7,
                ..AttributeBlock::default()
            },
            reducer: AttributeBlock::default(),
        };

        let (mut world, id) = world_with_items(vec![helmet, sword]);
        give(&world, id, 1);
        give(&world, id, 2);
        world
            .run(|engine, env| engine.equip(env, ALICE, id, ItemId(1), EquipmentSlot::Helmet))
            .unwrap();
        world
            .run(|engine, env| engine.equip(env, ALICE, id, ItemId(2), EquipmentSlot::LeftHand))
            .unwrap();

        let stats = world
            .run(|engine, env| engine.get_total_stats_modifiers(env, id))
            .unwrap();
        // The two-hander counts once despite filling both hands.
        assert_eq!(stats.bonus, StatBlock::new(5, 0, 1));
        assert_eq!(stats.reducer, StatBlock::new(0, 1, 2));

        let attrs = world
            .run(|engine, env| engine.get_total_attributes(env, id))
            .unwrap();
        assert_eq!(attrs.bonus.atk, 7);
        assert_eq!(attrs.bonus.def, 5);
    }
}
