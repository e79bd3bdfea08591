//! Victory pose.

use kestrel_core::commands::Intent;
use kestrel_core::constants::VICTORY_DURATION_MS;
use kestrel_core::enums::{Attacker, ItemKind, ResourcePolicy, StateKind};

use super::{FreeState, State, StateContext, StateCore, Transition};

#[derive(Debug, Default)]
pub struct VictoryState {
    core: StateCore,
    end_date: u64,
}

impl VictoryState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State for VictoryState {
    state_core!(StateKind::Victory);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        self.end_date = ctx.now() + VICTORY_DURATION_MS;
        ctx.body.set_animation("victory");
        ctx.services.play_sound("victory");
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if ctx.now() >= self.end_date {
            return Some(Box::new(FreeState::new()));
        }
        None
    }

    fn notify_intent(&mut self, _ctx: &mut StateContext<'_>, _intent: Intent) -> Transition {
        None
    }

    fn shift_deadlines(&mut self, by_ms: u64) {
        self.end_date += by_ms;
    }

    fn previous_carried_policy(&self) -> ResourcePolicy {
        ResourcePolicy::Destroy
    }

    fn can_be_hurt(&self, _attacker: Attacker) -> bool {
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
