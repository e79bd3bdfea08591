//! Brandishing a treasure that was just obtained.

use tracing::info;

use kestrel_core::commands::Intent;
use kestrel_core::constants::TREASURE_DURATION_MS;
use kestrel_core::enums::{Attacker, ItemKind, ResourcePolicy, StateKind};
use kestrel_core::events::GameEvent;

use super::{FreeState, State, StateContext, StateCore, Transition};

#[derive(Debug)]
pub struct TreasureState {
    core: StateCore,
    name: String,
    variant: u32,
    end_date: u64,
}

impl TreasureState {
    pub fn new(name: &str, variant: u32) -> Self {
        Self {
            core: StateCore::default(),
            name: name.to_string(),
            variant,
            end_date: 0,
        }
    }
}

impl State for TreasureState {
    state_core!(StateKind::Treasure);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        info!(treasure = %self.name, variant = self.variant, "treasure obtained");
        self.end_date = ctx.now() + TREASURE_DURATION_MS;
        ctx.body.set_animation("brandish");
        ctx.services.emit(GameEvent::TreasureObtained {
            name: self.name.clone(),
            variant: self.variant,
        });
        ctx.services.play_sound("treasure");
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
