//! Walking along a path imposed by a script.

use kestrel_core::commands::Intent;
use kestrel_core::constants::WALKING_SPEED;
use kestrel_core::enums::{Direction4, Immunities, ItemKind, StateKind};

use super::{state_from_ground, State, StateContext, StateCore, Transition};
use crate::error::MovementError;
use crate::movement::PathMovement;

#[derive(Debug)]
pub struct ForcedWalkingState {
    core: StateCore,
    path: Vec<u8>,
    looping: bool,
    ignore_obstacles: bool,
}

impl ForcedWalkingState {
    /// Fails on a path that is not made of direction8 digits.
    pub fn new(path: &str, looping: bool, ignore_obstacles: bool) -> Result<Self, MovementError> {
        let movement = PathMovement::parse(path, WALKING_SPEED, looping, ignore_obstacles, 0)?;
        Ok(Self {
            core: StateCore::default(),
            path: movement.path().to_vec(),
            looping,
            ignore_obstacles,
        })
    }
}

impl State for ForcedWalkingState {
    state_core!(StateKind::ForcedWalking);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        if let Some(&first) = self.path.first() {
            ctx.body.direction = Direction4::from_direction8(first, ctx.body.direction);
        }
        ctx.body.set_movement(Box::new(PathMovement::new(
            self.path.clone(),
            WALKING_SPEED,
            self.looping,
            self.ignore_obstacles,
            ctx.now(),
        )));
        ctx.body.set_animation("walking");
        None
    }

    fn notify_intent(&mut self, _ctx: &mut StateContext<'_>, _intent: Intent) -> Transition {
        None
    }

    fn notify_movement_finished(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        Some(state_from_ground(ctx, false))
    }

    fn immunities(&self) -> Immunities {
        Immunities::AIRBORNE | Immunities::SENSOR
    }

    fn can_start_sword(&self) -> bool {
        false
    }

    fn can_start_item(&self, _item: ItemKind) -> bool {
        false
    }

    fn can_pick_treasure(&self) -> bool {
        false
    }

    fn can_take_jumper(&self) -> bool {
        false
    }
}
