//! Normal walking state.

use tracing::debug;

use kestrel_core::commands::Intent;
use kestrel_core::constants::WALKING_SPEED;
use kestrel_core::enums::StateKind;

use super::{
    default_intent, update_walking, GrabbingState, LiftingState, RunningState, State,
    StateContext, StateCore, Transition,
};
use crate::carried::CarriedObject;
use crate::components::{Block, Body, Liftable};
use crate::movement::PlayerMovement;

#[derive(Debug, Default)]
pub struct FreeState {
    core: StateCore,
}

impl FreeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Action key: lift what is in front, grab a wall or a block, or
    /// start running.
    fn action(&self, ctx: &mut StateContext<'_>) -> Transition {
        let facing = ctx.body.facing_rect();
        let layer = ctx.body.layer;

        let liftable = ctx
            .world
            .query::<(&Body, &Liftable)>()
            .iter()
            .find(|(_, (body, _))| body.layer == layer && body.bounds.overlaps(&facing))
            .map(|(entity, (_, liftable))| (entity, liftable.kind));
        if let Some((entity, kind)) = liftable {
            if ctx.body.equipment.can_lift(kind) {
                let _ = ctx.world.despawn(entity);
                return Some(Box::new(LiftingState::new(CarriedObject::shared(kind))));
            }
            debug!(%kind, "too heavy to lift");
            return Some(Box::new(GrabbingState::new()));
        }

        let facing_block = ctx
            .world
            .query::<(&Body, &Block)>()
            .iter()
            .any(|(_, (body, _))| body.layer == layer && body.bounds.overlaps(&facing));
        if facing_block || ctx.map.collides_with_walls(layer, &facing) {
            return Some(Box::new(GrabbingState::new()));
        }

        if ctx.body.equipment.can_run {
            return Some(Box::new(RunningState::new()));
        }
        None
    }
}

impl State for FreeState {
    state_core!(StateKind::Free);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        ctx.body
            .set_movement(Box::new(PlayerMovement::new(WALKING_SPEED, ctx.now())));
        ctx.body.set_animation("stopped");
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        update_walking(ctx, "walking", "stopped");
        None
    }

    fn notify_intent(&mut self, ctx: &mut StateContext<'_>, intent: Intent) -> Transition {
        match intent {
            Intent::Action => self.action(ctx),
            _ => default_intent(self, ctx, intent),
        }
    }

    fn can_control_movement(&self) -> bool {
        true
    }
}
