//! Preparing to throw the boomerang.

use tracing::warn;

use kestrel_core::commands::Intent;
use kestrel_core::constants::BOOMERANG_PREPARING_MS;
use kestrel_core::enums::{Immunities, ItemKind, StateKind};
use kestrel_core::events::GameEvent;

use super::{FreeState, State, StateContext, StateCore, Transition};
use crate::components::Boomerang;
use crate::world_setup;

/// Only one boomerang may fly at a time.
#[derive(Debug, Default)]
pub struct BoomerangState {
    core: StateCore,
    end_date: u64,
    direction_pressed8: Option<u8>,
}

impl BoomerangState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State for BoomerangState {
    state_core!(StateKind::Boomerang);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        let flying = ctx.world.query::<&Boomerang>().iter().next().is_some();
        if flying {
            warn!("a boomerang is already flying");
            return Some(Box::new(FreeState::new()));
        }
        self.end_date = ctx.now() + BOOMERANG_PREPARING_MS;
        self.direction_pressed8 = ctx.controls.wanted_direction8();
        ctx.body.set_animation("boomerang");
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if self.direction_pressed8.is_none() {
            self.direction_pressed8 = ctx.controls.wanted_direction8();
        }
        if ctx.now() < self.end_date {
            return None;
        }
        // Diagonals only when pressed; otherwise straight ahead.
        let direction8 = match self.direction_pressed8 {
            Some(pressed) if pressed % 2 == 1 => pressed,
            _ => ctx.body.direction.to_direction8(),
        };
        world_setup::spawn_boomerang(
            ctx.world,
            ctx.body.center(),
            ctx.body.layer,
            direction8,
            ctx.services.now(),
        );
        ctx.services.emit(GameEvent::ItemUsed {
            item: ItemKind::Boomerang,
        });
        ctx.services.play_sound("boomerang");
        Some(Box::new(FreeState::new()))
    }

    fn notify_intent(&mut self, _ctx: &mut StateContext<'_>, _intent: Intent) -> Transition {
        None
    }

    fn shift_deadlines(&mut self, by_ms: u64) {
        self.end_date += by_ms;
    }

    fn immunities(&self) -> Immunities {
        Immunities::STREAM
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
