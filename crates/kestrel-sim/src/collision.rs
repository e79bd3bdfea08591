//! Obstacle tests and position snapshots handed to movements.

use hecs::World;

use kestrel_core::enums::{Ground, Layer, Obstacle};
use kestrel_core::types::{Point, Rect};

use crate::components::*;
use crate::map::Map;
use crate::movement::{CollisionTest, PositionIndex};
use crate::states::State;

/// How a map entity blocks the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocking {
    /// Always solid.
    Solid,
    /// Solid depending on the avatar state.
    Classed(Obstacle),
}

/// Blocking entities on one layer.
pub fn collect_obstacles(world: &World, layer: Layer) -> Vec<(Rect, Blocking)> {
    let mut obstacles = Vec::new();
    let mut push = |body: &Body, blocking: Blocking| {
        if body.layer == layer {
            obstacles.push((body.bounds, blocking));
        }
    };
    for (_e, (body, _)) in world.query::<(&Body, &Liftable)>().iter() {
        push(body, Blocking::Solid);
    }
    for (_e, (body, _)) in world.query::<(&Body, &Block)>().iter() {
        push(body, Blocking::Solid);
    }
    for (_e, (body, _)) in world.query::<(&Body, &HookTarget)>().iter() {
        push(body, Blocking::Solid);
    }
    for (_e, (body, _)) in world.query::<(&Body, &Stairs)>().iter() {
        push(body, Blocking::Classed(Obstacle::Stairs));
    }
    for (_e, (body, _)) in world.query::<(&Body, &Sensor)>().iter() {
        push(body, Blocking::Classed(Obstacle::Sensor));
    }
    for (_e, (body, _)) in world.query::<(&Body, &Jumper)>().iter() {
        push(body, Blocking::Classed(Obstacle::Jumper));
    }
    for (_e, (body, _)) in world.query::<(&Body, &Teletransporter)>().iter() {
        push(body, Blocking::Classed(Obstacle::Teletransporter));
    }
    obstacles
}

/// Positions of the avatar and of every entity with a [`Body`].
pub fn capture_positions(world: &World, avatar: Option<Point>) -> PositionIndex {
    PositionIndex {
        avatar,
        entities: world
            .query::<&Body>()
            .iter()
            .map(|(entity, body)| (entity, body.position()))
            .collect(),
    }
}

/// Walls and solid entities. Used for every entity but the avatar.
pub struct MapCollision<'a> {
    pub map: &'a Map,
    pub layer: Layer,
    pub obstacles: &'a [(Rect, Blocking)],
}

impl CollisionTest for MapCollision<'_> {
    fn collides(&self, bounds: &Rect) -> bool {
        self.map.collides_with_walls(self.layer, bounds)
            || self
                .obstacles
                .iter()
                .any(|(rect, blocking)| *blocking == Blocking::Solid && rect.overlaps(bounds))
    }
}

/// Obstacle test of the avatar: walls, solid entities, and entities that
/// the current state declares blocking.
pub struct AvatarCollision<'a> {
    pub map: &'a Map,
    pub layer: Layer,
    pub obstacles: &'a [(Rect, Blocking)],
    pub state: &'a dyn State,
    pub ground: Ground,
}

impl CollisionTest for AvatarCollision<'_> {
    fn collides(&self, bounds: &Rect) -> bool {
        if self.state.are_collisions_ignored() {
            return false;
        }
        if self.map.collides_with_walls(self.layer, bounds) {
            return true;
        }
        self.obstacles.iter().any(|(rect, blocking)| {
            rect.overlaps(bounds)
                && match blocking {
                    Blocking::Solid => true,
                    Blocking::Classed(obstacle) => self.state.is_obstacle(*obstacle, self.ground),
                }
        })
    }
}
