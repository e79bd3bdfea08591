//! Swimming in deep water.

use kestrel_core::commands::Intent;
use kestrel_core::constants::SWIMMING_SPEED;
use kestrel_core::enums::{Ground, Immunities, ItemKind, StateKind};

use super::{update_walking, FreeState, State, StateContext, StateCore, Transition};
use crate::movement::PlayerMovement;

#[derive(Debug, Default)]
pub struct SwimmingState {
    core: StateCore,
}

impl SwimmingState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State for SwimmingState {
    state_core!(StateKind::Swimming);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        ctx.body
            .set_movement(Box::new(PlayerMovement::new(SWIMMING_SPEED, ctx.now())));
        ctx.body.set_animation("swimming_stopped");
        ctx.services.play_sound("splash");
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if ctx.ground() != Ground::DeepWater {
            return Some(Box::new(FreeState::new()));
        }
        update_walking(ctx, "swimming", "swimming_stopped");
        None
    }

    fn notify_intent(&mut self, _ctx: &mut StateContext<'_>, _intent: Intent) -> Transition {
        None
    }

    fn immunities(&self) -> Immunities {
        Immunities::DEEP_WATER
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

    fn can_take_jumper(&self) -> bool {
        false
    }

    fn can_control_movement(&self) -> bool {
        true
    }
}
