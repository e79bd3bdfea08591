//! Lifting an object above the head.

use kestrel_core::enums::{ItemKind, StateKind};
use kestrel_core::events::GameEvent;

use super::{hand_off_carried, update_carried, CarryingState, State, StateContext, StateCore, Transition};
use crate::carried::CarriedRef;

/// Lasts until the object finishes being lifted, then hands the very same
/// object to [`CarryingState`].
#[derive(Debug)]
pub struct LiftingState {
    core: StateCore,
    lifted: Option<CarriedRef>,
}

impl LiftingState {
    pub fn new(object: CarriedRef) -> Self {
        Self {
            core: StateCore::default(),
            lifted: Some(object),
        }
    }
}

impl State for LiftingState {
    state_core!(StateKind::Lifting);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        if let Some(object) = &self.lifted {
            object.borrow_mut().start_lifting(ctx.now());
            let kind = object.borrow().kind();
            ctx.services.emit(GameEvent::ObjectLifted { kind });
        }
        ctx.services.play_sound("lift");
        ctx.body.set_animation("lifting");
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        update_carried(ctx, self.lifted.as_ref());
        let lifted = self
            .lifted
            .as_ref()
            .is_some_and(|object| !object.borrow().is_being_lifted(ctx.now()));
        if !lifted {
            return None;
        }
        let object = self.lifted.take()?;
        Some(Box::new(CarryingState::with_object(object)))
    }

    fn stop(&mut self, ctx: &mut StateContext<'_>, next: &mut dyn State) {
        hand_off_carried(&mut self.lifted, ctx, next);
    }

    fn requires_carried(&self) -> bool {
        true
    }

    fn carried(&self) -> Option<&CarriedRef> {
        self.lifted.as_ref()
    }

    fn can_start_sword(&self) -> bool {
        false
    }

    fn can_start_item(&self, _item: ItemKind) -> bool {
        false
    }

    fn can_use_shield(&self) -> bool {
        false
    }

    fn can_take_stairs(&self) -> bool {
        false
    }

    fn can_take_jumper(&self) -> bool {
        false
    }
}
