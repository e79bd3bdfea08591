//! Motion system: advances the movement of every entity that has one.

use hecs::{Entity, World};

use kestrel_core::enums::Layer;
use kestrel_core::types::Point;

use crate::collision::{capture_positions, collect_obstacles, MapCollision};
use crate::components::{Body, Motion, Thrown};
use crate::map::Map;
use crate::movement::{MoveContext, Movement, NoObstacles, PositionIndex, StepOutcome};

/// Update every `Body` + `Motion` entity and record the entities whose
/// update reported something other than [`StepOutcome::Idle`] in
/// `outcomes`.
pub fn run(
    world: &mut World,
    map: &Map,
    avatar: Point,
    now: u64,
    outcomes: &mut Vec<(Entity, StepOutcome)>,
) {
    outcomes.clear();

    let positions = capture_positions(world, Some(avatar));
    let obstacles = [Layer::Low, Layer::Intermediate, Layer::High]
        .map(|layer| collect_obstacles(world, layer));

    for (entity, (body, motion)) in world.query_mut::<(&mut Body, &mut Motion)>() {
        let collision = MapCollision {
            map,
            layer: body.layer,
            obstacles: &obstacles[body.layer.index()],
        };
        let ctx = MoveContext {
            now,
            size: (body.bounds.width, body.bounds.height),
            collision: &collision,
            positions: &positions,
            wanted_direction8: None,
        };
        let mut position = body.position();
        let outcome = motion.0.update(&ctx, &mut position);
        body.set_position(position);
        if outcome != StepOutcome::Idle {
            outcomes.push((entity, outcome));
        }
    }
}

/// Advance the height of thrown objects. Returns those that touched the
/// ground during this step.
pub fn run_falls(world: &mut World, now: u64) -> Vec<Entity> {
    let positions = PositionIndex::default();
    let mut landed = Vec::new();
    for (entity, thrown) in world.query_mut::<&mut Thrown>() {
        let ctx = MoveContext {
            now,
            size: (0, 0),
            collision: &NoObstacles,
            positions: &positions,
            wanted_direction8: None,
        };
        let mut unused = Point::default();
        if thrown.fall.update(&ctx, &mut unused) == StepOutcome::Finished {
            landed.push(entity);
        }
    }
    landed
}

/// Suspend or resume every entity movement.
pub fn set_suspended(world: &mut World, suspended: bool, now: u64) {
    for (_entity, motion) in world.query_mut::<&mut Motion>() {
        motion.0.set_suspended(suspended, now);
    }
    for (_entity, thrown) in world.query_mut::<&mut Thrown>() {
        thrown.fall.set_suspended(suspended, now);
    }
}
