//! Drawing the bow.

use tracing::warn;

use kestrel_core::commands::Intent;
use kestrel_core::constants::BOW_DRAWING_MS;
use kestrel_core::enums::{ItemKind, StateKind};
use kestrel_core::events::GameEvent;

use super::{FreeState, State, StateContext, StateCore, Transition};
use crate::world_setup;

#[derive(Debug, Default)]
pub struct BowState {
    core: StateCore,
    end_date: u64,
}

impl BowState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State for BowState {
    state_core!(StateKind::Bow);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        if !ctx.body.equipment.take_arrow() {
            warn!("no arrow left");
            ctx.services.play_sound("wrong");
            return Some(Box::new(FreeState::new()));
        }
        self.end_date = ctx.now() + BOW_DRAWING_MS;
        ctx.body.set_animation("bow");
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if ctx.now() < self.end_date {
            return None;
        }
        world_setup::spawn_arrow(
            ctx.world,
            ctx.body.center(),
            ctx.body.layer,
            ctx.body.direction,
            ctx.services.now(),
        );
        ctx.services.emit(GameEvent::ItemUsed { item: ItemKind::Bow });
        ctx.services.play_sound("bow");
        Some(Box::new(FreeState::new()))
    }

    fn notify_intent(&mut self, _ctx: &mut StateContext<'_>, _intent: Intent) -> Transition {
        None
    }

    fn shift_deadlines(&mut self, by_ms: u64) {
        self.end_date += by_ms;
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
