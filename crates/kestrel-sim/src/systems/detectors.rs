//! Detector system: map entities reacting to the avatar's presence.

use hecs::{Entity, World};
use tracing::{debug, info};

use kestrel_core::constants::JUMPER_DELAY_MS;
use kestrel_core::enums::Hazard;
use kestrel_core::events::GameEvent;

use crate::avatar::Avatar;
use crate::components::*;
use crate::controls::Controls;
use crate::services::Services;
use crate::states::{JumpingState, StairsState, StreamState, Transition};

pub fn run(
    world: &mut World,
    avatar: &mut Avatar,
    controls: &Controls,
    services: &mut Services,
    despawn_buffer: &mut Vec<Entity>,
) -> Transition {
    let now = services.now();
    let state = avatar.state();
    let body = avatar.body();
    let bounds = body.bounds();
    let center = body.center();
    let facing = body.facing_rect();
    let layer = body.layer;
    let wanted = controls.wanted_direction8();

    let can_pick = state.can_pick_treasure();
    let can_take_stairs = state.can_take_stairs();
    let can_take_jumper = state.can_take_jumper();
    let stream_applies = state.is_touching_ground() && !state.can_avoid(Hazard::Stream);
    let teleports = !state.can_avoid(Hazard::Teletransporter);
    let senses = !state.can_avoid(Hazard::Sensor);

    // Pickables.
    if can_pick {
        for (entity, (body, pickable)) in world.query::<(&Body, &Pickable)>().iter() {
            if body.layer == layer && body.bounds.overlaps(&bounds) {
                info!(treasure = %pickable.treasure, "picked up");
                services.emit(GameEvent::TreasureObtained {
                    name: pickable.treasure.clone(),
                    variant: pickable.variant,
                });
                services.play_sound("picked_item");
                despawn_buffer.push(entity);
            }
        }
    }

    // Teletransporters and sensors fire once per entry.
    for (_entity, (body, teletransporter)) in
        world.query_mut::<(&Body, &mut Teletransporter)>()
    {
        let inside = teleports && body.layer == layer && body.bounds.contains(center);
        if inside && !teletransporter.avatar_inside {
            info!(destination = %teletransporter.destination, "teletransporter");
            services.emit(GameEvent::Teleport {
                destination: teletransporter.destination.clone(),
            });
        }
        teletransporter.avatar_inside = inside;
    }
    for (_entity, (body, sensor)) in world.query_mut::<(&Body, &mut Sensor)>() {
        let inside = senses && body.layer == layer && body.bounds.contains(center);
        if inside && !sensor.avatar_inside {
            debug!(sensor = %sensor.name, "sensor activated");
            services.emit(GameEvent::SensorActivated {
                name: sensor.name.clone(),
            });
        }
        sensor.avatar_inside = inside;
    }

    let mut transition: Transition = None;

    // Jumpers: push against one long enough to jump.
    for (_entity, (body, jumper)) in world.query_mut::<(&Body, &mut Jumper)>() {
        let pushing = can_take_jumper
            && body.layer == layer
            && body.bounds.overlaps(&facing)
            && wanted == Some(jumper.direction8);
        if !pushing {
            jumper.pressing_since = None;
            continue;
        }
        let since = *jumper.pressing_since.get_or_insert(now);
        if transition.is_none() && now.saturating_sub(since) >= JUMPER_DELAY_MS {
            jumper.pressing_since = None;
            transition = Some(Box::new(JumpingState::new(
                jumper.direction8,
                jumper.distance,
                true,
            )));
        }
    }
    if transition.is_some() {
        return transition;
    }

    // Stairs: walking into them from outside.
    if can_take_stairs {
        let stairs = world
            .query::<(&Body, &Stairs)>()
            .iter()
            .find(|(_, (body, stairs))| {
                body.layer == layer
                    && body.bounds.overlaps(&facing)
                    && !body.bounds.overlaps(&bounds)
                    && wanted == Some(stairs.direction.to_direction8())
            })
            .map(|(_, (_, stairs))| *stairs);
        if let Some(stairs) = stairs {
            return Some(Box::new(StairsState::new(stairs)));
        }
    }

    // Streams.
    let stream = world
        .query::<(&Body, &Stream)>()
        .iter()
        .find(|(_, (body, _))| body.layer == layer && body.bounds.contains(center))
        .map(|(entity, (_, stream))| (entity, *stream));
    if let Some((entity, stream)) = stream {
        avatar.body_mut().on_stream = true;
        if stream_applies {
            return Some(Box::new(StreamState::new(entity, &stream)));
        }
    }

    None
}
