//! Falling into a hole.

use kestrel_core::commands::Intent;
use kestrel_core::constants::{FALLING_DURATION_MS, FALL_DAMAGE};
use kestrel_core::enums::{Attacker, Immunities, ItemKind, StateKind};

use super::{apply_damage, BackToSolidGroundState, State, StateContext, StateCore, Transition};

#[derive(Debug, Default)]
pub struct FallingState {
    core: StateCore,
    end_date: u64,
}

impl FallingState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State for FallingState {
    state_core!(StateKind::Falling);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        self.end_date = ctx.now() + FALLING_DURATION_MS;
        ctx.body.set_animation("falling");
        ctx.services.play_sound("hero_falls");
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if ctx.now() < self.end_date {
            return None;
        }
        apply_damage(ctx, FALL_DAMAGE);
        Some(Box::new(BackToSolidGroundState::new(0, true)))
    }

    fn notify_intent(&mut self, _ctx: &mut StateContext<'_>, _intent: Intent) -> Transition {
        None
    }

    fn shift_deadlines(&mut self, by_ms: u64) {
        self.end_date += by_ms;
    }

    fn immunities(&self) -> Immunities {
        Immunities::all()
    }

    fn can_be_hurt(&self, _attacker: Attacker) -> bool {
        false
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

    fn can_start_game_over(&self) -> bool {
        false
    }
}
