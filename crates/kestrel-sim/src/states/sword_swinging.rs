//! Swinging the sword.

use kestrel_core::commands::Intent;
use kestrel_core::constants::SWORD_SWING_DURATION_MS;
use kestrel_core::enums::{Immunities, ItemKind, StateKind};

use super::{state_from_ground, State, StateContext, StateCore, Transition};

#[derive(Debug, Default)]
pub struct SwordSwingingState {
    core: StateCore,
    end_date: u64,
}

impl SwordSwingingState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State for SwordSwingingState {
    state_core!(StateKind::SwordSwinging);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        self.end_date = ctx.now() + SWORD_SWING_DURATION_MS;
        ctx.body.set_animation("sword");
        ctx.services.play_sound("sword");
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if ctx.now() >= self.end_date {
            return Some(state_from_ground(ctx, false));
        }
        None
    }

    fn notify_intent(&mut self, ctx: &mut StateContext<'_>, intent: Intent) -> Transition {
        // Attacking again restarts the swing.
        if intent == Intent::Attack && ctx.body.equipment.sword > 0 {
            return Some(Box::new(SwordSwingingState::new()));
        }
        None
    }

    fn shift_deadlines(&mut self, by_ms: u64) {
        self.end_date += by_ms;
    }

    fn immunities(&self) -> Immunities {
        Immunities::STREAM
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

    fn is_cutting_with_sword(&self) -> bool {
        true
    }
}
