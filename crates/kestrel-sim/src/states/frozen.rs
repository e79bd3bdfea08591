//! Frozen by a script: the player has no control, whatever moved the
//! avatar keeps moving it.

use kestrel_core::commands::Intent;
use kestrel_core::enums::{ItemKind, StateKind};

use super::{State, StateContext, StateCore, Transition};

#[derive(Debug, Default)]
pub struct FrozenState {
    core: StateCore,
}

impl FrozenState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State for FrozenState {
    state_core!(StateKind::Frozen);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        ctx.body.set_animation("stopped");
        None
    }

    fn notify_intent(&mut self, _ctx: &mut StateContext<'_>, _intent: Intent) -> Transition {
        None
    }

    fn inherits_movement(&self) -> bool {
        true
    }

    fn can_pick_treasure(&self) -> bool {
        false
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
}
