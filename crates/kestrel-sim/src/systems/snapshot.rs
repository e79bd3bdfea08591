//! Snapshot system: builds the read-only frame handed to the renderer.

use hecs::World;

use kestrel_core::events::GameEvent;
use kestrel_core::state::{AvatarView, EntityKind, EntityView, FrameSnapshot};
use kestrel_core::types::SimTime;

use crate::avatar::Avatar;
use crate::components::*;

pub fn build_snapshot(
    world: &World,
    avatar: &Avatar,
    time: SimTime,
    events: Vec<GameEvent>,
) -> FrameSnapshot {
    FrameSnapshot {
        time,
        avatar: build_avatar(avatar),
        entities: build_entities(world),
        events,
    }
}

fn build_avatar(avatar: &Avatar) -> AvatarView {
    let body = avatar.body();
    let state = avatar.state();
    AvatarView {
        position: body.position,
        layer: body.layer,
        direction: body.direction,
        state: state.kind(),
        animation: body.animation.to_string(),
        life: body.life,
        max_life: body.max_life,
        carried: state.carried().map(|object| object.borrow().kind()),
        height: body.movement().map_or(0, |movement| movement.displayed_height()),
        visible: state.is_visible(),
        suspended: avatar.is_suspended(),
    }
}

fn build_entities(world: &World) -> Vec<EntityView> {
    let mut views = Vec::new();
    let mut push = |body: &Body, kind: EntityKind, height: i32| {
        views.push(EntityView {
            kind,
            bounds: body.bounds,
            layer: body.layer,
            height,
        });
    };

    for (_e, (body, liftable)) in world.query::<(&Body, &Liftable)>().iter() {
        push(body, EntityKind::Liftable(liftable.kind), 0);
    }
    for (_e, (body, _)) in world.query::<(&Body, &Block)>().iter() {
        push(body, EntityKind::Block, 0);
    }
    for (_e, (body, _)) in world.query::<(&Body, &HookTarget)>().iter() {
        push(body, EntityKind::HookTarget, 0);
    }
    for (_e, (body, _)) in world.query::<(&Body, &Pickable)>().iter() {
        push(body, EntityKind::Pickable, 0);
    }
    for (_e, (body, thrown)) in world.query::<(&Body, &Thrown)>().iter() {
        push(body, EntityKind::Thrown(thrown.kind), thrown.fall.height());
    }
    for (_e, (body, _)) in world.query::<(&Body, &Boomerang)>().iter() {
        push(body, EntityKind::Boomerang, 0);
    }
    for (_e, (body, _)) in world.query::<(&Body, &Arrow)>().iter() {
        push(body, EntityKind::Arrow, 0);
    }
    for (_e, (body, _)) in world.query::<(&Body, &Hookshot)>().iter() {
        push(body, EntityKind::Hookshot, 0);
    }
    for (_e, (body, _)) in world.query::<(&Body, &Wanderer)>().iter() {
        push(body, EntityKind::Wanderer, 0);
    }

    views.sort_by_key(|view| (view.layer, view.bounds.y));
    views
}
