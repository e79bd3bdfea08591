//! Returning to the last solid ground after a fall.

use kestrel_core::commands::Intent;
use kestrel_core::constants::BACK_TO_SOLID_GROUND_SPEED;
use kestrel_core::enums::{Attacker, Immunities, ItemKind, StateKind};

use super::{FreeState, State, StateContext, StateCore, Transition};
use crate::movement::TargetMovement;

#[derive(Debug, Default)]
pub struct BackToSolidGroundState {
    core: StateCore,
    end_delay: u64,
    end_date: Option<u64>,
    with_sound: bool,
}

impl BackToSolidGroundState {
    /// `end_delay` is how long the avatar stays still once arrived.
    pub fn new(end_delay: u64, with_sound: bool) -> Self {
        Self {
            end_delay,
            with_sound,
            ..Self::default()
        }
    }
}

impl State for BackToSolidGroundState {
    state_core!(StateKind::BackToSolidGround);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        let (target, layer) = ctx
            .body
            .last_solid_ground
            .unwrap_or((ctx.body.position, ctx.body.layer));
        ctx.body.layer = layer;
        ctx.body.set_animation("stopped");
        ctx.body.set_movement(Box::new(TargetMovement::to_point(
            target,
            BACK_TO_SOLID_GROUND_SPEED,
            true,
            ctx.now(),
        )));
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        match self.end_date {
            Some(date) if ctx.now() >= date => Some(Box::new(FreeState::new())),
            _ => None,
        }
    }

    fn notify_intent(&mut self, _ctx: &mut StateContext<'_>, _intent: Intent) -> Transition {
        None
    }

    fn notify_movement_finished(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if self.with_sound {
            ctx.services.play_sound("hero_lands");
        }
        if self.end_delay == 0 {
            return Some(Box::new(FreeState::new()));
        }
        self.end_date = Some(ctx.now() + self.end_delay);
        None
    }

    fn shift_deadlines(&mut self, by_ms: u64) {
        if let Some(date) = self.end_date.as_mut() {
            *date += by_ms;
        }
    }

    fn immunities(&self) -> Immunities {
        Immunities::all()
    }

    fn is_touching_ground(&self) -> bool {
        false
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

    fn are_collisions_ignored(&self) -> bool {
        true
    }
}
