//! Generic usage of an inventory item that has no dedicated state.

use kestrel_core::commands::Intent;
use kestrel_core::constants::ITEM_USAGE_DURATION_MS;
use kestrel_core::enums::{Immunities, ItemKind, StateKind};
use kestrel_core::events::GameEvent;

use super::{state_from_ground, State, StateContext, StateCore, Transition};

#[derive(Debug)]
pub struct UsingItemState {
    core: StateCore,
    item: ItemKind,
    end_date: u64,
}

impl UsingItemState {
    pub fn new(item: ItemKind) -> Self {
        Self {
            core: StateCore::default(),
            item,
            end_date: 0,
        }
    }

    pub fn item(&self) -> ItemKind {
        self.item
    }
}

impl State for UsingItemState {
    state_core!(StateKind::UsingItem);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        self.end_date = ctx.now() + ITEM_USAGE_DURATION_MS;
        ctx.body.set_animation("using_item");
        ctx.services.emit(GameEvent::ItemUsed { item: self.item });
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if ctx.now() >= self.end_date {
            return Some(state_from_ground(ctx, false));
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
        Immunities::STREAM
    }

    fn can_start_sword(&self) -> bool {
        false
    }

    fn can_start_item(&self, _item: ItemKind) -> bool {
        false
    }

    fn is_using_item(&self) -> bool {
        true
    }
}
