//! Holding on to a wall or a heavy object.

use kestrel_core::commands::Intent;
use kestrel_core::enums::{ItemKind, StateKind};

use super::{FreeState, State, StateContext, StateCore, Transition};

#[derive(Debug, Default)]
pub struct GrabbingState {
    core: StateCore,
}

impl GrabbingState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State for GrabbingState {
    state_core!(StateKind::Grabbing);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        ctx.body.set_animation("grabbing");
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if !ctx.controls.is_action_held() {
            return Some(Box::new(FreeState::new()));
        }
        None
    }

    fn notify_intent(&mut self, _ctx: &mut StateContext<'_>, intent: Intent) -> Transition {
        match intent {
            Intent::ActionReleased => Some(Box::new(FreeState::new())),
            _ => None,
        }
    }

    fn can_start_sword(&self) -> bool {
        false
    }

    fn can_start_item(&self, _item: ItemKind) -> bool {
        false
    }

    fn can_take_stairs(&self) -> bool {
        false
    }

    fn can_take_jumper(&self) -> bool {
        false
    }

    fn is_grabbing_or_pulling(&self) -> bool {
        true
    }
}
