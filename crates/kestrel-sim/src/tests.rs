//! Tests for the simulation engine, the avatar state machine and the
//! carried-object hand-off.

use std::rc::Rc;

use kestrel_core::commands::{AvatarCommand, EngineCommand, InputEvent};
use kestrel_core::config::SimConfig;
use kestrel_core::constants::*;
use kestrel_core::enums::*;
use kestrel_core::events::GameEvent;
use kestrel_core::state::FrameSnapshot;
use kestrel_core::types::{Point, Rect};

use crate::carried::CarriedRef;
use crate::components::{Arrow, Boomerang, Hookshot, Thrown};
use crate::equipment::Equipment;
use crate::engine::SimulationEngine;
use crate::map::Map;
use crate::movement::MovementTarget;
use crate::states::{CarryingState, FreeState, State, StateCore};
use kestrel_core::enums::ResourcePolicy;
use crate::world_setup;

fn open_map() -> Map {
    Map::filled(40, 30, Ground::Traversable)
}

fn engine_on(map: Map) -> SimulationEngine {
    SimulationEngine::new(SimConfig::default(), map)
}

fn input(event: InputEvent) -> EngineCommand {
    EngineCommand::Input(event)
}

fn avatar_command(command: AvatarCommand) -> EngineCommand {
    EngineCommand::Avatar(command)
}

/// Tick until the avatar is in `kind`. Returns the number of ticks taken.
fn tick_until(engine: &mut SimulationEngine, kind: StateKind, max_ticks: u32) -> Option<u32> {
    (1..=max_ticks).find(|_| {
        engine.tick();
        engine.state_kind() == kind
    })
}

/// Tick `count` times and collect every event.
fn tick_collect(engine: &mut SimulationEngine, count: u32) -> Vec<GameEvent> {
    (0..count)
        .flat_map(|_| engine.tick().events)
        .collect()
}

fn carried(engine: &SimulationEngine) -> Option<CarriedRef> {
    engine.avatar().state().carried().cloned()
}

/// Avatar at (64, 64) facing down, with a pot right in front of it, lifted
/// and carried.
fn carrying_engine() -> (SimulationEngine, CarriedRef) {
    let mut engine = engine_on(open_map());
    world_setup::spawn_liftable(engine.world_mut(), Point::new(64, 80), Layer::Low, CarriedKind::Pot);
    engine.queue_command(input(InputEvent::ActionPressed));
    engine.queue_command(input(InputEvent::ActionReleased));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Lifting);
    let object = carried(&engine).expect("lifting state holds the object");
    tick_until(&mut engine, StateKind::Carrying, 100).expect("lifting ends");
    (engine, object)
}

/// Replace the avatar's equipment through a save round trip.
fn equip(engine: &mut SimulationEngine, change: impl FnOnce(&mut Equipment)) {
    let mut save = engine.avatar().to_save();
    change(&mut save.equipment);
    engine
        .load_save(&save.to_json().expect("serializable"))
        .expect("valid save");
}

// ---- Initial state ----

#[test]
fn test_starts_free_with_player_movement() {
    let mut engine = engine_on(open_map());
    assert_eq!(engine.state_kind(), StateKind::Free);
    let movement = engine.avatar().body().movement().expect("free state moves the avatar");
    assert_eq!(movement.target(), MovementTarget::Avatar);

    let snapshot = engine.tick();
    assert_eq!(snapshot.avatar.state, StateKind::Free);
    assert_eq!(snapshot.time.tick, 1);
    assert_eq!(snapshot.time.now_ms, DEFAULT_TIMESTEP_MS);
}

#[test]
fn test_walking_moves_the_avatar() {
    let mut engine = engine_on(open_map());
    engine.queue_command(input(InputEvent::DirectionPressed {
        direction: Direction4::Right,
    }));
    for _ in 0..50 {
        engine.tick();
    }
    let position = engine.avatar().body().position;
    assert!(position.x > 100, "avatar should have walked right, at {position:?}");
    assert_eq!(position.y, 64);
    assert_eq!(engine.avatar().body().direction, Direction4::Right);
}

#[test]
fn test_walls_block_walking() {
    let mut map = open_map();
    map.fill_rect(Layer::Low, &Rect::new(96, 0, 8, 240), Ground::Wall);
    let mut engine = engine_on(map);
    engine.queue_command(input(InputEvent::DirectionPressed {
        direction: Direction4::Right,
    }));
    for _ in 0..100 {
        engine.tick();
    }
    assert_eq!(engine.avatar().body().position.x, 80);
}

// ---- Scenario A: lifting then carrying ----

#[test]
fn test_lifting_hands_the_same_object_to_carrying() {
    let (engine, object) = carrying_engine();
    let held = carried(&engine).expect("carrying state holds the object");
    assert!(Rc::ptr_eq(&held, &object), "carrying must hold the lifted object");
    assert_eq!(object.borrow().kind(), CarriedKind::Pot);
    // The liftable entity left the world when it was lifted.
    assert_eq!(engine.world().len(), 0);
}

#[test]
fn test_too_heavy_object_is_grabbed() {
    let mut engine = engine_on(open_map());
    world_setup::spawn_liftable(engine.world_mut(), Point::new(64, 80), Layer::Low, CarriedKind::Stone);
    engine.queue_command(input(InputEvent::ActionPressed));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Grabbing);
    assert!(engine.avatar().state().is_grabbing_or_pulling());

    engine.queue_command(input(InputEvent::ActionReleased));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Free);
}

#[test]
fn test_throwing_from_carrying() {
    let (mut engine, object) = carrying_engine();
    engine.queue_command(input(InputEvent::ActionPressed));
    let snapshot = engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Free);
    assert!(carried(&engine).is_none());
    assert_eq!(Rc::strong_count(&object), 1, "only the test still holds the object");
    assert!(snapshot
        .events
        .iter()
        .any(|event| matches!(event, GameEvent::ObjectThrown { kind: CarriedKind::Pot, .. })));

    // The projectile lands and breaks.
    let events = tick_collect(&mut engine, 60);
    assert!(events
        .iter()
        .any(|event| matches!(event, GameEvent::ObjectBroken { kind: CarriedKind::Pot, .. })));
    assert_eq!(engine.world().query::<&Thrown>().iter().count(), 0);
}

// ---- Scenario B: jumping while carrying ----

#[test]
fn test_jump_keeps_the_carried_object() {
    let (mut engine, object) = carrying_engine();
    engine.queue_command(avatar_command(AvatarCommand::Jump {
        direction8: 6,
        distance: 16,
        ignore_obstacles: false,
    }));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Jumping);
    let held = carried(&engine).expect("jumping keeps the object");
    assert!(Rc::ptr_eq(&held, &object));
    drop(held);

    tick_until(&mut engine, StateKind::Carrying, 100).expect("landing");
    let held = carried(&engine).expect("carrying again after landing");
    assert!(Rc::ptr_eq(&held, &object));
    // The test, the state and `held`.
    assert_eq!(Rc::strong_count(&object), 3);
    assert_eq!(engine.world().query::<&Thrown>().iter().count(), 0);
    assert_eq!(engine.avatar().body().position, Point::new(64, 80));
}

#[test]
fn test_throw_requested_during_jump_throws_on_landing() {
    let (mut engine, object) = carrying_engine();
    engine.queue_command(avatar_command(AvatarCommand::Jump {
        direction8: 6,
        distance: 16,
        ignore_obstacles: false,
    }));
    engine.tick();
    engine.queue_command(input(InputEvent::ActionPressed));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Jumping);

    tick_until(&mut engine, StateKind::Free, 100).expect("landing");
    assert!(carried(&engine).is_none(), "the carried slot is empty");
    assert_eq!(Rc::strong_count(&object), 1);
    assert_eq!(engine.world().query::<&Thrown>().iter().count(), 1);
}

// ---- Scenario E: obstacle-ignoring jump ----

fn walled_map() -> Map {
    let mut map = open_map();
    map.fill_rect(Layer::Low, &Rect::new(88, 0, 8, 240), Ground::Wall);
    map
}

#[test]
fn test_obstacle_ignoring_jump_crosses_walls() {
    let mut engine = engine_on(walled_map());
    engine.queue_command(avatar_command(AvatarCommand::Jump {
        direction8: 0,
        distance: 32,
        ignore_obstacles: true,
    }));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Jumping);
    tick_until(&mut engine, StateKind::Free, 100).expect("jump finishes by distance");
    assert_eq!(engine.avatar().body().position, Point::new(96, 64));
}

#[test]
fn test_blocked_jump_stops_at_the_wall() {
    let mut engine = engine_on(walled_map());
    engine.queue_command(avatar_command(AvatarCommand::Jump {
        direction8: 0,
        distance: 32,
        ignore_obstacles: false,
    }));
    tick_until(&mut engine, StateKind::Free, 100).expect("jump still finishes");
    assert_eq!(engine.avatar().body().position, Point::new(72, 64));
}

// ---- Invariants ----

#[test]
fn test_movement_always_targets_the_avatar() {
    let (mut engine, _object) = carrying_engine();
    engine.queue_command(avatar_command(AvatarCommand::Jump {
        direction8: 0,
        distance: 24,
        ignore_obstacles: false,
    }));
    for _ in 0..100 {
        engine.tick();
        if let Some(movement) = engine.avatar().body().movement() {
            assert_eq!(movement.target(), MovementTarget::Avatar);
        }
    }
}

#[test]
fn test_suspension_is_idempotent_and_shifts_deadlines() {
    let mut engine = engine_on(open_map());
    world_setup::spawn_liftable(engine.world_mut(), Point::new(64, 80), Layer::Low, CarriedKind::Pot);
    engine.queue_command(input(InputEvent::ActionPressed));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Lifting);

    engine.set_suspended(true);
    engine.set_suspended(true);
    assert!(engine.is_suspended());
    assert!(engine.avatar().is_suspended());
    assert!(engine.avatar().state().is_suspended());
    let object = carried(&engine).expect("lifting");
    assert!(object.borrow().is_suspended());

    for _ in 0..50 {
        engine.tick();
    }
    assert_eq!(engine.state_kind(), StateKind::Lifting);

    engine.set_suspended(false);
    engine.set_suspended(false);
    assert!(!object.borrow().is_suspended());
    for _ in 0..20 {
        engine.tick();
    }
    assert_eq!(
        engine.state_kind(),
        StateKind::Lifting,
        "the lift deadline moved by the suspended time"
    );
    let ticks = tick_until(&mut engine, StateKind::Carrying, 10);
    assert!(ticks.is_some());
}

#[test]
fn test_suspend_command_stops_the_avatar() {
    let mut engine = engine_on(open_map());
    engine.queue_command(input(InputEvent::DirectionPressed {
        direction: Direction4::Right,
    }));
    engine.tick();
    engine.queue_command(avatar_command(AvatarCommand::SetSuspended { suspended: true }));
    engine.tick();
    let frozen_at = engine.avatar().body().position;
    for _ in 0..20 {
        let snapshot = engine.tick();
        assert!(snapshot.avatar.suspended);
    }
    assert_eq!(engine.avatar().body().position, frozen_at);
}

// ---- Forbidden transitions ----

#[test]
fn test_second_boomerang_falls_back_to_free() {
    let mut engine = engine_on(open_map());
    engine.queue_command(avatar_command(AvatarCommand::StartItem {
        item: ItemKind::Boomerang,
    }));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Boomerang);
    tick_until(&mut engine, StateKind::Free, 100).expect("boomerang thrown");
    assert_eq!(engine.world().query::<&Boomerang>().iter().count(), 1);

    engine.queue_command(avatar_command(AvatarCommand::StartItem {
        item: ItemKind::Boomerang,
    }));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Free);
    assert_eq!(engine.world().query::<&Boomerang>().iter().count(), 1);
}

#[test]
fn test_boomerang_comes_back() {
    let mut engine = engine_on(open_map());
    engine.queue_command(avatar_command(AvatarCommand::StartItem {
        item: ItemKind::Boomerang,
    }));
    tick_until(&mut engine, StateKind::Free, 100).expect("boomerang thrown");
    let mut gone = false;
    for _ in 0..500 {
        engine.tick();
        if engine.world().query::<&Boomerang>().iter().count() == 0 {
            gone = true;
            break;
        }
    }
    assert!(gone, "the boomerang should return and vanish");
}

#[test]
fn test_bow_without_arrows_falls_back_to_free() {
    let mut engine = engine_on(open_map());
    engine.queue_command(avatar_command(AvatarCommand::StartItem { item: ItemKind::Bow }));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Free);
}

#[test]
fn test_item_forbidden_while_carrying() {
    let (mut engine, object) = carrying_engine();
    engine.queue_command(avatar_command(AvatarCommand::StartItem {
        item: ItemKind::Boomerang,
    }));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Carrying);
    let held = carried(&engine).expect("still holding the object");
    assert!(Rc::ptr_eq(&held, &object));
    assert_eq!(engine.world().query::<&Thrown>().iter().count(), 0);
    assert_eq!(engine.world().query::<&Boomerang>().iter().count(), 0);
}

#[test]
fn test_invalid_walk_path_is_rejected() {
    let mut engine = engine_on(open_map());
    engine.queue_command(avatar_command(AvatarCommand::Walk {
        path: "0x9".into(),
        looping: false,
        ignore_obstacles: false,
    }));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Free);
}

// ---- Items and abilities ----

#[test]
fn test_running_dashes_until_an_obstacle() {
    let mut engine = engine_on(open_map());
    equip(&mut engine, |equipment| equipment.can_run = true);
    engine.queue_command(input(InputEvent::ActionPressed));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Running);
    assert!(
        !engine.avatar().state().can_avoid(Hazard::Hole),
        "charging does not jump over holes"
    );

    for _ in 0..60 {
        engine.tick();
    }
    assert!(engine.avatar().state().can_avoid(Hazard::Hole));
    assert!(engine.avatar().state().is_cutting_with_sword());

    tick_until(&mut engine, StateKind::Free, 300).expect("bounces off the map edge");
    let y = engine.avatar().body().position.y;
    assert!(y > 200 && y < 224, "recoiled from the bottom edge, y = {y}");
}

#[test]
fn test_running_needs_the_action_held() {
    let mut engine = engine_on(open_map());
    equip(&mut engine, |equipment| equipment.can_run = true);
    engine.queue_command(input(InputEvent::ActionPressed));
    engine.tick();
    engine.queue_command(input(InputEvent::ActionReleased));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Free);
}

#[test]
fn test_hookshot_pulls_towards_hook_target() {
    let mut engine = engine_on(open_map());
    equip(&mut engine, |equipment| {
        equipment.slots[0] = Some(ItemKind::Hookshot)
    });
    world_setup::spawn_hook_target(engine.world_mut(), Point::new(120, 64), Layer::Low);
    engine.queue_command(avatar_command(AvatarCommand::SetDirection {
        direction: Direction4::Right,
    }));
    engine.queue_command(input(InputEvent::ItemPressed { slot: 0 }));
    let snapshot = engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Hookshot);
    assert!(snapshot.events.contains(&GameEvent::ItemUsed {
        item: ItemKind::Hookshot
    }));

    tick_until(&mut engine, StateKind::Free, 200).expect("pulled all the way");
    assert_eq!(engine.avatar().body().position, Point::new(104, 64));
    assert_eq!(engine.world().query::<&Hookshot>().iter().count(), 0);
}

#[test]
fn test_hookshot_without_target_comes_back() {
    let mut engine = engine_on(open_map());
    equip(&mut engine, |equipment| {
        equipment.slots[0] = Some(ItemKind::Hookshot)
    });
    engine.queue_command(input(InputEvent::ItemPressed { slot: 0 }));
    engine.tick();
    tick_until(&mut engine, StateKind::Free, 300).expect("hookshot returns");
    assert_eq!(engine.avatar().body().position, Point::new(64, 64));
    assert_eq!(engine.world().query::<&Hookshot>().iter().count(), 0);
}

#[test]
fn test_bow_fires_an_arrow() {
    let mut engine = engine_on(open_map());
    equip(&mut engine, |equipment| {
        equipment.slots[1] = Some(ItemKind::Bow);
        equipment.arrows = 2;
    });
    engine.queue_command(input(InputEvent::ItemPressed { slot: 1 }));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Bow);

    tick_until(&mut engine, StateKind::Free, 50).expect("arrow released");
    assert_eq!(engine.avatar().body().equipment.arrows, 1);
    assert_eq!(engine.world().query::<&Arrow>().iter().count(), 1);

    tick_collect(&mut engine, 200);
    assert_eq!(
        engine.world().query::<&Arrow>().iter().count(),
        0,
        "the arrow stops at the map edge"
    );
}

#[test]
fn test_victory_returns_to_free() {
    let mut engine = engine_on(open_map());
    engine.queue_command(avatar_command(AvatarCommand::StartVictory));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Victory);
    let ticks = tick_until(&mut engine, StateKind::Free, 200).expect("victory ends");
    assert!(ticks * 10 >= 1_490);
}

// ---- Scripted requests ----

#[test]
fn test_forced_walk_follows_the_path() {
    let mut engine = engine_on(open_map());
    engine.queue_command(avatar_command(AvatarCommand::Walk {
        path: "0066".into(),
        looping: false,
        ignore_obstacles: false,
    }));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::ForcedWalking);
    tick_until(&mut engine, StateKind::Free, 200).expect("walk ends");
    assert_eq!(engine.avatar().body().position, Point::new(80, 80));
}

#[test]
fn test_freeze_and_unfreeze() {
    let mut engine = engine_on(open_map());
    engine.queue_command(avatar_command(AvatarCommand::Freeze));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Frozen);
    engine.queue_command(input(InputEvent::AttackPressed));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Frozen);
    engine.queue_command(avatar_command(AvatarCommand::Unfreeze));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Free);
}

#[test]
fn test_give_treasure_emits_event() {
    let mut engine = engine_on(open_map());
    engine.queue_command(avatar_command(AvatarCommand::GiveTreasure {
        name: "heart_container".into(),
        variant: 1,
    }));
    let snapshot = engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Treasure);
    assert!(snapshot.events.contains(&GameEvent::TreasureObtained {
        name: "heart_container".into(),
        variant: 1,
    }));
    let ticks = tick_until(&mut engine, StateKind::Free, 200).expect("brandish ends");
    assert!(u64::from(ticks) * DEFAULT_TIMESTEP_MS >= TREASURE_DURATION_MS - DEFAULT_TIMESTEP_MS);
}

#[test]
fn test_treasure_destroys_the_carried_object() {
    let (mut engine, object) = carrying_engine();
    engine.queue_command(avatar_command(AvatarCommand::GiveTreasure {
        name: "key".into(),
        variant: 0,
    }));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Treasure);
    assert_eq!(Rc::strong_count(&object), 1);
    assert_eq!(engine.world().query::<&Thrown>().iter().count(), 0);
}

#[test]
fn test_sword_swing_returns_to_free() {
    let mut engine = engine_on(open_map());
    engine.queue_command(input(InputEvent::AttackPressed));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::SwordSwinging);
    tick_until(&mut engine, StateKind::Free, 100).expect("swing ends");
}

// ---- Damage ----

#[test]
fn test_hurt_knocks_back_and_recovers() {
    let mut engine = engine_on(open_map());
    engine.queue_command(avatar_command(AvatarCommand::Hurt {
        from_x: 72,
        from_y: 40,
        damage: 3,
    }));
    let snapshot = engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Hurt);
    assert!(snapshot
        .events
        .contains(&GameEvent::AvatarHurt { damage: 3, life: DEFAULT_MAX_LIFE - 3 }));
    tick_until(&mut engine, StateKind::Free, 100).expect("recovers");
    assert!(engine.avatar().body().position.y > 64, "pushed away from the source");
}

#[test]
fn test_fatal_hurt_leads_to_game_over() {
    let mut engine = engine_on(open_map());
    engine.queue_command(avatar_command(AvatarCommand::Hurt {
        from_x: 0,
        from_y: 0,
        damage: 99,
    }));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::GameOver);
    assert_eq!(engine.avatar().body().life, 0);

    let events = tick_collect(&mut engine, 250);
    assert_eq!(events.iter().filter(|e| **e == GameEvent::GameOver).count(), 1);
    assert_eq!(engine.state_kind(), StateKind::GameOver);
}

#[test]
fn test_game_over_ignores_scripted_requests() {
    let mut engine = engine_on(open_map());
    engine.queue_command(avatar_command(AvatarCommand::Hurt {
        from_x: 0,
        from_y: 0,
        damage: 99,
    }));
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::GameOver);

    let requests = [
        AvatarCommand::StartItem {
            item: ItemKind::Boomerang,
        },
        AvatarCommand::Jump {
            direction8: 0,
            distance: 16,
            ignore_obstacles: false,
        },
        AvatarCommand::Freeze,
        AvatarCommand::Walk {
            path: "00".into(),
            looping: false,
            ignore_obstacles: false,
        },
        AvatarCommand::GiveTreasure {
            name: "rupee".into(),
            variant: 1,
        },
        AvatarCommand::StartVictory,
    ];
    for request in requests {
        engine.queue_command(avatar_command(request.clone()));
        engine.tick();
        assert_eq!(
            engine.state_kind(),
            StateKind::GameOver,
            "{request:?} revived the avatar"
        );
    }
    assert_eq!(engine.avatar().body().life, 0);
    assert_eq!(engine.world().query::<&Boomerang>().iter().count(), 0);
}

#[test]
fn test_game_over_waits_for_solid_ground() {
    let mut map = open_map();
    map.fill_rect(Layer::Low, &Rect::new(96, 64, 16, 16), Ground::Hole);
    let mut engine = engine_on(map);
    let mut save = engine.avatar().to_save();
    save.life = FALL_DAMAGE;
    engine
        .load_save(&save.to_json().expect("serializable"))
        .expect("valid save");

    engine.queue_command(input(InputEvent::DirectionPressed {
        direction: Direction4::Right,
    }));
    tick_until(&mut engine, StateKind::Falling, 100).expect("walks into the hole");
    engine.queue_command(input(InputEvent::DirectionReleased {
        direction: Direction4::Right,
    }));
    tick_until(&mut engine, StateKind::BackToSolidGround, 100).expect("fall ends");
    assert_eq!(engine.avatar().body().life, 0);
    assert!(!engine.avatar().state().can_start_game_over());

    tick_until(&mut engine, StateKind::GameOver, 100).expect("dies once back on the ground");
    assert!(engine.avatar().body().ground_under(engine.map()).is_solid());
}

#[test]
fn test_falling_into_a_hole() {
    let mut map = open_map();
    map.fill_rect(Layer::Low, &Rect::new(96, 64, 16, 16), Ground::Hole);
    let mut engine = engine_on(map);
    engine.queue_command(input(InputEvent::DirectionPressed {
        direction: Direction4::Right,
    }));
    tick_until(&mut engine, StateKind::Falling, 100).expect("walks into the hole");
    engine.queue_command(input(InputEvent::DirectionReleased {
        direction: Direction4::Right,
    }));
    tick_until(&mut engine, StateKind::BackToSolidGround, 100).expect("fall ends");
    tick_until(&mut engine, StateKind::Free, 100).expect("back on solid ground");

    let body = engine.avatar().body();
    assert_eq!(body.life, DEFAULT_MAX_LIFE - FALL_DAMAGE);
    assert!(body.ground_under(engine.map()).is_solid());
}

#[test]
fn test_swimmer_swims_in_deep_water() {
    let mut map = open_map();
    map.fill_rect(Layer::Low, &Rect::new(96, 0, 64, 240), Ground::DeepWater);
    let mut engine = engine_on(map);
    let mut save = engine.avatar().to_save();
    save.equipment.can_swim = true;
    engine
        .load_save(&save.to_json().expect("serializable"))
        .expect("valid save");

    engine.queue_command(input(InputEvent::DirectionPressed {
        direction: Direction4::Right,
    }));
    tick_until(&mut engine, StateKind::Swimming, 100).expect("enters the water");
    assert!(engine.avatar().state().can_avoid(Hazard::DeepWater));
}

#[test]
fn test_non_swimmer_plunges() {
    let mut map = open_map();
    map.fill_rect(Layer::Low, &Rect::new(96, 0, 64, 240), Ground::DeepWater);
    let mut engine = engine_on(map);
    engine.queue_command(input(InputEvent::DirectionPressed {
        direction: Direction4::Right,
    }));
    tick_until(&mut engine, StateKind::Plunging, 100).expect("plunges");
}

// ---- Map entities ----

#[test]
fn test_teletransporter_fires_once_per_entry() {
    let mut engine = engine_on(open_map());
    world_setup::spawn_teletransporter(
        engine.world_mut(),
        Rect::new(64, 64, 16, 16),
        Layer::Low,
        "cave",
    );
    let events = tick_collect(&mut engine, 10);
    let teleports = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Teleport { destination } if destination == "cave"))
        .count();
    assert_eq!(teleports, 1);
}

#[test]
fn test_pickable_is_collected() {
    let mut engine = engine_on(open_map());
    world_setup::spawn_pickable(engine.world_mut(), Point::new(68, 68), Layer::Low, "rupee", 5);
    let snapshot = engine.tick();
    assert!(snapshot.events.contains(&GameEvent::TreasureObtained {
        name: "rupee".into(),
        variant: 5,
    }));
    assert_eq!(engine.world().len(), 0);
}

#[test]
fn test_stream_carries_the_avatar() {
    let mut engine = engine_on(open_map());
    world_setup::spawn_stream(
        engine.world_mut(),
        Rect::new(56, 56, 32, 32),
        Layer::Low,
        crate::components::Stream {
            direction8: 0,
            speed: 64,
            allow_attack: false,
            allow_item: false,
        },
    );
    tick_until(&mut engine, StateKind::Stream, 10).expect("caught by the stream");
    assert!(!engine.avatar().state().can_start_sword());
    tick_until(&mut engine, StateKind::Free, 300).expect("leaves the stream");
    assert!(engine.avatar().body().position.x > 64);
}

#[test]
fn test_stairs_change_layer() {
    let mut engine = engine_on(open_map());
    world_setup::spawn_stairs(
        engine.world_mut(),
        Rect::new(64, 80, 16, 16),
        Layer::Low,
        Direction4::Down,
        StairsWay::Up,
        true,
    );
    engine.queue_command(input(InputEvent::DirectionPressed {
        direction: Direction4::Down,
    }));
    tick_until(&mut engine, StateKind::Stairs, 10).expect("takes the stairs");
    let snapshot_events = {
        let mut events = Vec::new();
        for _ in 0..100 {
            events.extend(engine.tick().events);
            if engine.state_kind() != StateKind::Stairs {
                break;
            }
        }
        events
    };
    assert_eq!(engine.avatar().body().layer, Layer::Intermediate);
    assert!(snapshot_events.contains(&GameEvent::LayerChanged {
        layer: Layer::Intermediate
    }));
}

// ---- Protocol violations ----

/// Declares Keep but has nowhere to put the object.
#[derive(Default)]
struct EmptyHandedState {
    core: StateCore,
}

impl State for EmptyHandedState {
    fn kind(&self) -> StateKind {
        StateKind::Frozen
    }

    fn core(&self) -> &StateCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore {
        &mut self.core
    }

    fn previous_carried_policy(&self) -> ResourcePolicy {
        ResourcePolicy::Keep
    }
}

#[test]
#[should_panic(expected = "requires a carried object")]
fn test_carrying_without_an_object_panics() {
    let mut engine = engine_on(open_map());
    engine.set_avatar_state(Box::new(CarryingState::new()));
}

#[test]
#[should_panic(expected = "started twice")]
fn test_state_started_twice_panics() {
    let mut engine = engine_on(open_map());
    let mut state = FreeState::new();
    state.core_mut().started = true;
    engine.set_avatar_state(Box::new(state));
}

#[test]
#[should_panic(expected = "cannot hold a carried object")]
fn test_keep_into_a_state_without_slot_panics() {
    let (mut engine, _object) = carrying_engine();
    engine.set_avatar_state(Box::new(EmptyHandedState::default()));
}

// ---- Scheduled commands ----

#[test]
fn test_scheduled_quit_is_processed_on_its_tick() {
    let mut engine = engine_on(open_map());
    engine.schedule_command(2, EngineCommand::Quit);
    engine.tick();
    assert!(!engine.is_quit_requested());
    engine.tick();
    assert!(engine.is_quit_requested());
}

#[test]
fn test_scheduled_avatar_command() {
    let mut engine = engine_on(open_map());
    engine.schedule_command(3, avatar_command(AvatarCommand::Freeze));
    engine.tick();
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Free);
    engine.tick();
    assert_eq!(engine.state_kind(), StateKind::Frozen);
}

// ---- Snapshots, determinism and saves ----

#[test]
fn test_snapshot_sorted_by_layer_then_y() {
    let mut engine = engine_on(open_map());
    let world = engine.world_mut();
    world_setup::spawn_block(world, Point::new(10, 120), Layer::Intermediate);
    world_setup::spawn_block(world, Point::new(10, 100), Layer::Low);
    world_setup::spawn_hook_target(world, Point::new(10, 20), Layer::Intermediate);
    let snapshot: FrameSnapshot = engine.tick();
    let order: Vec<(Layer, i32)> = snapshot
        .entities
        .iter()
        .map(|view| (view.layer, view.bounds.y))
        .collect();
    assert_eq!(
        order,
        vec![(Layer::Low, 100), (Layer::Intermediate, 20), (Layer::Intermediate, 120)]
    );
}

#[test]
fn test_determinism_same_seed() {
    let build = || {
        let mut engine = engine_on(open_map());
        world_setup::spawn_wanderer(engine.world_mut(), Point::new(160, 120), Layer::Low, 7, 0);
        engine
    };
    let mut engine_a = build();
    let mut engine_b = build();
    for _ in 0..300 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged with the same seed");
    }
}

#[test]
fn test_save_round_trip() {
    let mut engine = engine_on(open_map());
    engine.queue_command(avatar_command(AvatarCommand::SetDirection {
        direction: Direction4::Left,
    }));
    engine.queue_command(avatar_command(AvatarCommand::Hurt {
        from_x: 0,
        from_y: 0,
        damage: 2,
    }));
    tick_until(&mut engine, StateKind::Free, 100).expect("recovers");
    let json = engine.to_save().unwrap();

    let mut restored = engine_on(open_map());
    restored.load_save(&json).unwrap();
    assert_eq!(restored.avatar().to_save(), engine.avatar().to_save());
    assert_eq!(restored.avatar().body().life, DEFAULT_MAX_LIFE - 2);
    assert_eq!(restored.state_kind(), StateKind::Free);
}

#[test]
fn test_corrupt_save_is_an_error() {
    let mut engine = engine_on(open_map());
    assert!(engine.load_save("{ not json").is_err());
    assert_eq!(engine.state_kind(), StateKind::Free);
}
