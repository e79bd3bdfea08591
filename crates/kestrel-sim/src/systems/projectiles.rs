//! Projectile system: what happens to thrown objects, boomerangs, arrows
//! and hookshots once their movement reports an outcome.

use hecs::{Entity, World};
use tracing::debug;

use kestrel_core::constants::{BOOMERANG_SPEED, EXPLOSION_DAMAGE, EXPLOSION_RADIUS, HOOKSHOT_SPEED};
use kestrel_core::enums::{Attacker, CarriedKind, Hazard, Layer};
use kestrel_core::events::GameEvent;
use kestrel_core::types::{Point, Rect};

use crate::avatar::Avatar;
use crate::components::*;
use crate::movement::{FollowMovement, StepOutcome, TargetMovement, Tracked};
use crate::services::Services;
use crate::states::{HurtState, Transition};

/// Offset putting a projectile's top-left corner on the avatar's centre
/// area.
const RETURN_OFFSET: (i32, i32) = (4, 4);

pub fn run(
    world: &mut World,
    avatar: &Avatar,
    services: &mut Services,
    outcomes: &[(Entity, StepOutcome)],
    landed: &[Entity],
    despawn_buffer: &mut Vec<Entity>,
) -> Transition {
    let now = services.now();
    let transition = break_thrown(world, avatar, services, outcomes, landed, despawn_buffer);

    for &(entity, outcome) in outcomes {
        let stopped = matches!(outcome, StepOutcome::Blocked | StepOutcome::Finished);

        if world.get::<&Arrow>(entity).is_ok() && stopped {
            despawn_buffer.push(entity);
            continue;
        }

        if let Ok(returning) = world.get::<&Boomerang>(entity).map(|b| b.returning) {
            match (returning, stopped) {
                (false, true) => {
                    debug!(?entity, "boomerang turns back");
                    if let Ok(mut boomerang) = world.get::<&mut Boomerang>(entity) {
                        boomerang.returning = true;
                    }
                    send_back(world, entity, BOOMERANG_SPEED, now);
                }
                (true, _) if outcome == StepOutcome::Finished => despawn_buffer.push(entity),
                _ => {}
            }
            continue;
        }

        if let Ok(phase) = world.get::<&Hookshot>(entity).map(|h| h.phase) {
            match (phase, stopped) {
                (HookshotPhase::Flying, true) => {
                    let hooked = touches_hook_target(world, entity);
                    let next = if hooked {
                        HookshotPhase::Pulling
                    } else {
                        HookshotPhase::Returning
                    };
                    debug!(?entity, ?next, "hookshot stopped");
                    if let Ok(mut hookshot) = world.get::<&mut Hookshot>(entity) {
                        hookshot.phase = next;
                    }
                    if hooked {
                        let _ = world.remove_one::<Motion>(entity);
                    } else {
                        send_back(world, entity, HOOKSHOT_SPEED, now);
                    }
                }
                (HookshotPhase::Returning, _) if outcome == StepOutcome::Finished => {
                    despawn_buffer.push(entity)
                }
                _ => {}
            }
        }
    }

    catch_pickables(world);
    transition
}

/// Break thrown objects that landed or hit something. An exploding bomb
/// may hurt the avatar.
fn break_thrown(
    world: &World,
    avatar: &Avatar,
    services: &mut Services,
    outcomes: &[(Entity, StepOutcome)],
    landed: &[Entity],
    despawn_buffer: &mut Vec<Entity>,
) -> Transition {
    let mut broken: Vec<Entity> = landed.to_vec();
    for &(entity, outcome) in outcomes {
        if outcome == StepOutcome::Blocked
            && world.get::<&Thrown>(entity).is_ok()
            && !broken.contains(&entity)
        {
            broken.push(entity);
        }
    }

    let mut transition: Transition = None;
    for entity in broken {
        let Some((kind, at, layer)) = thrown_at(world, entity) else {
            continue;
        };
        despawn_buffer.push(entity);
        services.emit(GameEvent::ObjectBroken { kind, at });
        if kind != CarriedKind::Bomb {
            services.play_sound("object_breaks");
            continue;
        }
        services.play_sound("explosion");
        if transition.is_none() && caught_in_explosion(avatar, at, layer) {
            transition = Some(Box::new(HurtState::new(at, EXPLOSION_DAMAGE)));
        }
    }
    transition
}

fn thrown_at(world: &World, entity: Entity) -> Option<(CarriedKind, Point, Layer)> {
    let thrown = world.get::<&Thrown>(entity).ok()?;
    let body = world.get::<&Body>(entity).ok()?;
    Some((thrown.kind, body.bounds.center(), body.layer))
}

fn caught_in_explosion(avatar: &Avatar, at: Point, layer: Layer) -> bool {
    let body = avatar.body();
    let state = avatar.state();
    let distance = body.center().as_vec2().distance(at.as_vec2());
    body.layer == layer
        && f64::from(distance) <= EXPLOSION_RADIUS
        && !state.can_avoid(Hazard::Explosion)
        && state.can_be_hurt(Attacker::Explosion)
}

/// Replace a projectile's movement with one flying back to the avatar.
fn send_back(world: &mut World, entity: Entity, speed: u32, now: u64) {
    if let Ok(mut motion) = world.get::<&mut Motion>(entity) {
        motion.0 = Box::new(TargetMovement::tracking(
            Tracked::Avatar,
            RETURN_OFFSET,
            speed,
            true,
            now,
        ));
    }
}

fn touches_hook_target(world: &World, entity: Entity) -> bool {
    let Ok((bounds, layer)) = world.get::<&Body>(entity).map(|b| (b.bounds, b.layer)) else {
        return false;
    };
    let reach = Rect::new(bounds.x - 1, bounds.y - 1, bounds.width + 2, bounds.height + 2);
    world
        .query::<(&Body, &HookTarget)>()
        .iter()
        .any(|(_, (body, _))| body.layer == layer && body.bounds.overlaps(&reach))
}

/// Boomerangs and flying hookshots drag the pickables they touch along.
fn catch_pickables(world: &mut World) {
    let mut catchers: Vec<(Entity, Rect, Layer)> = world
        .query::<(&Body, &Boomerang)>()
        .iter()
        .map(|(entity, (body, _))| (entity, body.bounds, body.layer))
        .collect();
    catchers.extend(
        world
            .query::<(&Body, &Hookshot)>()
            .iter()
            .filter(|(_, (_, hookshot))| hookshot.phase != HookshotPhase::Pulling)
            .map(|(entity, (body, _))| (entity, body.bounds, body.layer)),
    );
    if catchers.is_empty() {
        return;
    }

    let caught: Vec<(Entity, Entity)> = world
        .query::<(&Body, &Pickable, Option<&Caught>)>()
        .iter()
        .filter(|(_, (_, _, caught))| caught.is_none())
        .filter_map(|(pickable, (body, _, _))| {
            catchers
                .iter()
                .find(|(_, bounds, layer)| *layer == body.layer && bounds.overlaps(&body.bounds))
                .map(|(catcher, _, _)| (pickable, *catcher))
        })
        .collect();

    for (pickable, catcher) in caught {
        debug!(?pickable, ?catcher, "pickable caught");
        let follow = FollowMovement::new(Tracked::Entity(catcher), (0, 0), true);
        let _ = world.insert(pickable, (Caught, Motion(Box::new(follow))));
    }
}
