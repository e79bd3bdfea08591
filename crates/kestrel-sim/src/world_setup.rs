//! Entity spawn factories for populating the map.

use hecs::{Entity, World};

use kestrel_core::constants::*;
use kestrel_core::enums::{CarriedKind, Direction4, Layer, StairsWay};
use kestrel_core::types::{direction8_angle, Point, Rect};

use crate::components::*;
use crate::movement::{FallingMovement, RandomMovement, StraightMovement};

pub fn spawn_liftable(world: &mut World, at: Point, layer: Layer, kind: CarriedKind) -> Entity {
    world.spawn((Body::new(at, 16, 16, layer), Liftable { kind }))
}

pub fn spawn_block(world: &mut World, at: Point, layer: Layer) -> Entity {
    world.spawn((Body::new(at, 16, 16, layer), Block))
}

pub fn spawn_hook_target(world: &mut World, at: Point, layer: Layer) -> Entity {
    world.spawn((Body::new(at, 16, 16, layer), HookTarget))
}

pub fn spawn_pickable(
    world: &mut World,
    at: Point,
    layer: Layer,
    treasure: &str,
    variant: u32,
) -> Entity {
    world.spawn((
        Body::new(at, PROJECTILE_SIZE, PROJECTILE_SIZE, layer),
        Pickable {
            treasure: treasure.to_string(),
            variant,
        },
    ))
}

pub fn spawn_stream(world: &mut World, area: Rect, layer: Layer, stream: Stream) -> Entity {
    world.spawn((Body { bounds: area, layer }, stream))
}

pub fn spawn_stairs(
    world: &mut World,
    area: Rect,
    layer: Layer,
    direction: Direction4,
    way: StairsWay,
    changes_layer: bool,
) -> Entity {
    world.spawn((
        Body { bounds: area, layer },
        Stairs {
            direction,
            way,
            changes_layer,
        },
    ))
}

pub fn spawn_teletransporter(
    world: &mut World,
    area: Rect,
    layer: Layer,
    destination: &str,
) -> Entity {
    world.spawn((
        Body { bounds: area, layer },
        Teletransporter {
            destination: destination.to_string(),
            avatar_inside: false,
        },
    ))
}

pub fn spawn_sensor(world: &mut World, area: Rect, layer: Layer, name: &str) -> Entity {
    world.spawn((
        Body { bounds: area, layer },
        Sensor {
            name: name.to_string(),
            avatar_inside: false,
        },
    ))
}

pub fn spawn_jumper(
    world: &mut World,
    area: Rect,
    layer: Layer,
    direction8: u8,
    distance: u32,
) -> Entity {
    world.spawn((
        Body { bounds: area, layer },
        Jumper {
            direction8,
            distance,
            pressing_since: None,
        },
    ))
}

pub fn spawn_wanderer(world: &mut World, at: Point, layer: Layer, seed: u64, now: u64) -> Entity {
    world.spawn((
        Body::new(at, 16, 16, layer),
        Wanderer,
        Motion(Box::new(RandomMovement::new(WANDERER_SPEED, 48, seed, now))),
    ))
}

/// Top-left corner of a projectile centred on `center`.
fn projectile_origin(center: Point) -> Point {
    center.translated(-PROJECTILE_SIZE / 2, -PROJECTILE_SIZE / 2)
}

/// Release a carried object as a projectile flying towards `direction`.
pub fn spawn_thrown(
    world: &mut World,
    kind: CarriedKind,
    center: Point,
    layer: Layer,
    direction: Direction4,
    now: u64,
) -> Entity {
    let movement = StraightMovement::new(THROW_SPEED, direction8_angle(direction.to_direction8()), now)
        .with_max_distance(THROW_DISTANCE);
    world.spawn((
        Body::new(projectile_origin(center), PROJECTILE_SIZE, PROJECTILE_SIZE, layer),
        Thrown {
            kind,
            fall: FallingMovement::new(THROW_HEIGHT, now),
        },
        Motion(Box::new(movement)),
    ))
}

pub fn spawn_boomerang(
    world: &mut World,
    center: Point,
    layer: Layer,
    direction8: u8,
    now: u64,
) -> Entity {
    let movement = StraightMovement::new(BOOMERANG_SPEED, direction8_angle(direction8), now)
        .with_max_distance(BOOMERANG_DISTANCE);
    world.spawn((
        Body::new(projectile_origin(center), PROJECTILE_SIZE, PROJECTILE_SIZE, layer),
        Boomerang { returning: false },
        Motion(Box::new(movement)),
    ))
}

pub fn spawn_arrow(
    world: &mut World,
    center: Point,
    layer: Layer,
    direction: Direction4,
    now: u64,
) -> Entity {
    let movement = StraightMovement::new(ARROW_SPEED, direction8_angle(direction.to_direction8()), now);
    world.spawn((
        Body::new(projectile_origin(center), PROJECTILE_SIZE, PROJECTILE_SIZE, layer),
        Arrow,
        Motion(Box::new(movement)),
    ))
}

pub fn spawn_hookshot(
    world: &mut World,
    center: Point,
    layer: Layer,
    direction: Direction4,
    now: u64,
) -> Entity {
    let movement =
        StraightMovement::new(HOOKSHOT_SPEED, direction8_angle(direction.to_direction8()), now)
            .with_max_distance(HOOKSHOT_DISTANCE);
    world.spawn((
        Body::new(projectile_origin(center), PROJECTILE_SIZE, PROJECTILE_SIZE, layer),
        Hookshot {
            phase: HookshotPhase::Flying,
        },
        Motion(Box::new(movement)),
    ))
}
