//! Cleanup system: removes entities flagged by other systems and
//! projectiles that left the map.

use hecs::{Entity, World};

use crate::components::{Body, Motion};
use crate::map::Map;

pub fn run(world: &mut World, map: &Map, despawn_buffer: &mut Vec<Entity>) {
    let (width, height) = map.pixel_size();

    for (entity, (body, _motion)) in world.query_mut::<(&Body, &Motion)>() {
        let bounds = body.bounds;
        if bounds.right() < 0 || bounds.bottom() < 0 || bounds.x > width || bounds.y > height {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
