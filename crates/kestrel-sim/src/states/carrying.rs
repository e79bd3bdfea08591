//! Walking around with an object above the head.

use tracing::debug;

use kestrel_core::commands::Intent;
use kestrel_core::constants::{CARRYING_SPEED, EXPLOSION_DAMAGE};
use kestrel_core::enums::{CarriedKind, Hazard, ItemKind, ResourcePolicy, StateKind};
use kestrel_core::events::GameEvent;

use super::{
    default_intent, hand_off_carried, throw_carried, update_carried, update_walking, FreeState,
    HurtState, State, StateContext, StateCore, Transition,
};
use crate::carried::CarriedRef;
use crate::movement::PlayerMovement;

#[derive(Debug, Default)]
pub struct CarryingState {
    core: StateCore,
    object: Option<CarriedRef>,
}

impl CarryingState {
    /// A carrying state waiting for the outgoing state to hand over its
    /// object.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(object: CarriedRef) -> Self {
        Self {
            core: StateCore::default(),
            object: Some(object),
        }
    }
}

impl State for CarryingState {
    state_core!(StateKind::Carrying);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        ctx.body
            .set_movement(Box::new(PlayerMovement::new(CARRYING_SPEED, ctx.now())));
        ctx.body.set_animation("carrying_stopped");
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        update_walking(ctx, "carrying_walking", "carrying_stopped");
        update_carried(ctx, self.object.as_ref());

        let broken = self
            .object
            .as_ref()
            .is_some_and(|object| object.borrow().is_broken());
        if !broken {
            return None;
        }
        let object = self.object.take()?;
        let kind = object.borrow().kind();
        let at = ctx.body.center();
        debug!(%kind, "carried object broke");
        ctx.services.emit(GameEvent::ObjectBroken { kind, at });
        if kind == CarriedKind::Bomb && !self.can_avoid(Hazard::Explosion) {
            ctx.services.play_sound("explosion");
            return Some(Box::new(HurtState::new(at.translated(0, -8), EXPLOSION_DAMAGE)));
        }
        Some(Box::new(FreeState::new()))
    }

    fn notify_intent(&mut self, ctx: &mut StateContext<'_>, intent: Intent) -> Transition {
        match intent {
            Intent::Action => {
                let object = self.object.take()?;
                throw_carried(ctx, object);
                Some(Box::new(FreeState::new()))
            }
            _ => default_intent(self, ctx, intent),
        }
    }

    fn stop(&mut self, ctx: &mut StateContext<'_>, next: &mut dyn State) {
        hand_off_carried(&mut self.object, ctx, next);
    }

    fn previous_carried_policy(&self) -> ResourcePolicy {
        ResourcePolicy::Keep
    }

    fn requires_carried(&self) -> bool {
        true
    }

    fn carried(&self) -> Option<&CarriedRef> {
        self.object.as_ref()
    }

    fn receive_carried(&mut self, object: CarriedRef) {
        assert!(self.object.is_none(), "carrying state already holds an object");
        self.object = Some(object);
    }

    fn can_control_movement(&self) -> bool {
        true
    }

    fn can_use_shield(&self) -> bool {
        false
    }

    fn can_start_item(&self, _item: ItemKind) -> bool {
        false
    }
}
