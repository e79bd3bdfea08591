//! Charging then dashing straight ahead.

use tracing::debug;

use kestrel_core::commands::Intent;
use kestrel_core::constants::{HURT_DISTANCE, HURT_SPEED, RUNNING_BOUNCE_MS, RUNNING_CHARGE_MS, RUNNING_SPEED};
use kestrel_core::enums::{Immunities, ItemKind, StateKind};
use kestrel_core::types::direction8_angle;

use super::{state_from_ground, FreeState, State, StateContext, StateCore, Transition};
use crate::movement::StraightMovement;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunningPhase {
    #[default]
    Charging,
    Running,
    /// Recoil after hitting an obstacle at full speed.
    Bouncing,
}

#[derive(Debug, Default)]
pub struct RunningState {
    core: StateCore,
    phase: RunningPhase,
    next_phase_date: u64,
}

impl RunningState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RunningPhase {
        self.phase
    }

    fn bounce(&mut self, ctx: &mut StateContext<'_>) {
        debug!("ran into an obstacle");
        self.phase = RunningPhase::Bouncing;
        self.next_phase_date = ctx.now() + RUNNING_BOUNCE_MS;
        let back = ctx.body.direction.opposite().to_direction8();
        ctx.body.set_movement(Box::new(
            StraightMovement::new(HURT_SPEED, direction8_angle(back), ctx.now())
                .with_max_distance(HURT_DISTANCE / 2),
        ));
        ctx.body.set_animation("hurt");
        ctx.services.play_sound("running_obstacle");
    }
}

impl State for RunningState {
    state_core!(StateKind::Running);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        self.phase = RunningPhase::Charging;
        self.next_phase_date = ctx.now() + RUNNING_CHARGE_MS;
        ctx.body.set_animation("running_charge");
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if ctx.now() < self.next_phase_date {
            return None;
        }
        match self.phase {
            RunningPhase::Charging => {
                if !ctx.controls.is_action_held() {
                    return Some(Box::new(FreeState::new()));
                }
                self.phase = RunningPhase::Running;
                let ahead = ctx.body.direction.to_direction8();
                ctx.body.set_movement(Box::new(StraightMovement::new(
                    RUNNING_SPEED,
                    direction8_angle(ahead),
                    ctx.now(),
                )));
                ctx.body.set_animation("running");
                ctx.services.play_sound("running");
                None
            }
            RunningPhase::Running => None,
            RunningPhase::Bouncing => Some(state_from_ground(ctx, false)),
        }
    }

    fn notify_intent(&mut self, ctx: &mut StateContext<'_>, intent: Intent) -> Transition {
        match (self.phase, intent) {
            (RunningPhase::Charging, Intent::ActionReleased) => Some(Box::new(FreeState::new())),
            (RunningPhase::Running, Intent::Move { direction8: Some(direction8) })
                if direction8 != ctx.body.direction.to_direction8() =>
            {
                // Any other direction stops the run.
                Some(Box::new(FreeState::new()))
            }
            _ => None,
        }
    }

    fn notify_obstacle_reached(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if self.phase == RunningPhase::Running {
            self.bounce(ctx);
        }
        None
    }

    fn shift_deadlines(&mut self, by_ms: u64) {
        self.next_phase_date += by_ms;
    }

    fn immunities(&self) -> Immunities {
        if self.phase == RunningPhase::Running {
            Immunities::HOLE | Immunities::DEEP_WATER | Immunities::PRICKLE
        } else {
            Immunities::empty()
        }
    }

    fn can_pick_treasure(&self) -> bool {
        self.phase != RunningPhase::Bouncing
    }

    fn can_start_sword(&self) -> bool {
        false
    }

    fn can_start_item(&self, _item: ItemKind) -> bool {
        false
    }

    fn can_take_stairs(&self) -> bool {
        self.phase != RunningPhase::Running
    }

    fn can_take_jumper(&self) -> bool {
        self.phase == RunningPhase::Running
    }

    fn is_cutting_with_sword(&self) -> bool {
        self.phase == RunningPhase::Running
    }

    fn sword_damage_factor(&self) -> u32 {
        2
    }
}
