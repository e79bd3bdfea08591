//! The avatar is dying. Nothing gets it out of this state.

use tracing::info;

use kestrel_core::commands::Intent;
use kestrel_core::constants::GAME_OVER_DELAY_MS;
use kestrel_core::enums::{Attacker, Ground, Immunities, ItemKind, Obstacle, StateKind};
use kestrel_core::events::GameEvent;

use super::{State, StateContext, StateCore, Transition};

#[derive(Debug, Default)]
pub struct GameOverState {
    core: StateCore,
    end_date: u64,
    notified: bool,
}

impl GameOverState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State for GameOverState {
    state_core!(StateKind::GameOver);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        self.end_date = ctx.now() + GAME_OVER_DELAY_MS;
        ctx.body.set_animation("dying");
        ctx.services.play_sound("hero_dying");
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if !self.notified && ctx.now() >= self.end_date {
            self.notified = true;
            info!("game over");
            ctx.services.emit(GameEvent::GameOver);
        }
        None
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

    fn can_use_shield(&self) -> bool {
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

    fn is_obstacle(&self, _obstacle: Obstacle, _ground: Ground) -> bool {
        true
    }
}
