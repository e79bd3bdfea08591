//! Jumping, with or without a carried object.

use kestrel_core::commands::Intent;
use kestrel_core::enums::{
    Attacker, Direction4, Ground, Immunities, ItemKind, Obstacle, ResourcePolicy, StateKind,
};

use super::{
    hand_off_carried, state_from_ground, update_carried, CarryingState, FreeState, State,
    StateContext, StateCore, Transition,
};
use crate::carried::CarriedRef;
use crate::movement::JumpMovement;

/// Keeps the object held by the previous state. Pressing action in the air
/// throws it on landing.
#[derive(Debug)]
pub struct JumpingState {
    core: StateCore,
    direction8: u8,
    distance: u32,
    ignore_obstacles: bool,
    carried: Option<CarriedRef>,
    throw_requested: bool,
}

impl JumpingState {
    pub fn new(direction8: u8, distance: u32, ignore_obstacles: bool) -> Self {
        Self {
            core: StateCore::default(),
            direction8: direction8 % 8,
            distance,
            ignore_obstacles,
            carried: None,
            throw_requested: false,
        }
    }

    pub fn is_throw_requested(&self) -> bool {
        self.throw_requested
    }

    fn land(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        ctx.services.play_sound("hero_lands");
        if self.carried.is_none() {
            return Some(state_from_ground(ctx, false));
        }
        if self.throw_requested {
            // Free throws the object on the way in.
            Some(Box::new(FreeState::new()))
        } else {
            Some(Box::new(CarryingState::new()))
        }
    }
}

impl State for JumpingState {
    state_core!(StateKind::Jumping);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        ctx.body.direction = Direction4::from_direction8(self.direction8, ctx.body.direction);
        ctx.body.set_movement(Box::new(JumpMovement::new(
            self.direction8,
            self.distance,
            self.ignore_obstacles,
            ctx.now(),
        )));
        ctx.body.set_animation(if self.carried.is_some() {
            "carrying_walking"
        } else {
            "jumping"
        });
        ctx.services.play_sound("jump");
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        update_carried(ctx, self.carried.as_ref());
        None
    }

    fn notify_intent(&mut self, _ctx: &mut StateContext<'_>, intent: Intent) -> Transition {
        if intent == Intent::Action && self.carried.is_some() {
            self.throw_requested = true;
        }
        None
    }

    fn notify_movement_finished(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        self.land(ctx)
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
        assert!(self.carried.is_none(), "jumping state already holds an object");
        self.carried = Some(object);
    }

    fn immunities(&self) -> Immunities {
        Immunities::AIRBORNE
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

    fn is_obstacle(&self, obstacle: Obstacle, _ground: Ground) -> bool {
        // Jumps pass over everything but map separators.
        obstacle == Obstacle::Separator
    }
}
