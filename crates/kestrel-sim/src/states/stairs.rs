//! Walking through stairs, possibly to another layer.

use tracing::warn;

use kestrel_core::commands::Intent;
use kestrel_core::constants::STAIRS_SPEED;
use kestrel_core::enums::{Attacker, ItemKind, ResourcePolicy, StairsWay, StateKind};
use kestrel_core::events::GameEvent;

use super::{hand_off_carried, state_from_ground, update_carried, State, StateContext, StateCore, Transition};
use crate::carried::CarriedRef;
use crate::components::Stairs;
use crate::movement::PathMovement;

#[derive(Debug)]
pub struct StairsState {
    core: StateCore,
    stairs: Stairs,
    carried: Option<CarriedRef>,
}

impl StairsState {
    pub fn new(stairs: Stairs) -> Self {
        Self {
            core: StateCore::default(),
            stairs,
            carried: None,
        }
    }
}

impl State for StairsState {
    state_core!(StateKind::Stairs);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        let direction8 = self.stairs.direction.to_direction8();
        ctx.body.direction = self.stairs.direction;
        ctx.body.set_movement(Box::new(PathMovement::new(
            vec![direction8; 2],
            STAIRS_SPEED,
            false,
            true,
            ctx.now(),
        )));
        ctx.body.set_animation(if self.carried.is_some() {
            "carrying_walking"
        } else {
            "walking"
        });
        ctx.services.play_sound(match self.stairs.way {
            StairsWay::Up => "stairs_up",
            StairsWay::Down => "stairs_down",
        });
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        update_carried(ctx, self.carried.as_ref());
        None
    }

    fn notify_intent(&mut self, _ctx: &mut StateContext<'_>, _intent: Intent) -> Transition {
        None
    }

    fn notify_movement_finished(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if self.stairs.changes_layer {
            let layer = match self.stairs.way {
                StairsWay::Up => ctx.body.layer.above(),
                StairsWay::Down => ctx.body.layer.below(),
            };
            match layer {
                Some(layer) => {
                    ctx.body.layer = layer;
                    ctx.services.emit(GameEvent::LayerChanged { layer });
                }
                None => warn!(layer = ?ctx.body.layer, "stairs lead out of the layer range"),
            }
        }
        Some(state_from_ground(ctx, self.carried.is_some()))
    }

    fn stop(&mut self, ctx: &mut StateContext<'_>, next: &mut dyn State) {
        hand_off_carried(&mut self.carried, ctx, next);
    }

    fn previous_carried_policy(&self) -> ResourcePolicy {
        ResourcePolicy::Keep
    }

    fn carried(&self) -> Option<&CarriedRef> {
        self.carried.as_ref()
    }

    fn receive_carried(&mut self, object: CarriedRef) {
        assert!(self.carried.is_none(), "stairs state already holds an object");
        self.carried = Some(object);
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

    fn can_use_shield(&self) -> bool {
        false
    }

    fn can_take_jumper(&self) -> bool {
        false
    }

    fn can_start_game_over(&self) -> bool {
        false
    }
}
