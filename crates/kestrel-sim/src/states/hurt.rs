//! Knocked back by a hit.

use kestrel_core::commands::Intent;
use kestrel_core::constants::{HURT_DISTANCE, HURT_DURATION_MS, HURT_SPEED};
use kestrel_core::enums::{Attacker, ItemKind, StateKind};
use kestrel_core::types::Point;

use super::{apply_damage, state_from_ground, State, StateContext, StateCore, Transition};
use crate::movement::StraightMovement;

/// Pushed away from `source`, invulnerable until the knock-back is over.
#[derive(Debug)]
pub struct HurtState {
    core: StateCore,
    source: Point,
    damage: u32,
    end_date: u64,
}

impl HurtState {
    pub fn new(source: Point, damage: u32) -> Self {
        Self {
            core: StateCore::default(),
            source,
            damage,
            end_date: 0,
        }
    }
}

impl State for HurtState {
    state_core!(StateKind::Hurt);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        ctx.services.play_sound("hero_hurt");
        apply_damage(ctx, self.damage);
        self.end_date = ctx.now() + HURT_DURATION_MS;
        let angle = self.source.angle_to(&ctx.body.center());
        ctx.body.set_movement(Box::new(
            StraightMovement::new(HURT_SPEED, angle, ctx.now()).with_max_distance(HURT_DISTANCE),
        ));
        ctx.body.set_animation("hurt");
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

    fn can_take_stairs(&self) -> bool {
        false
    }

    fn can_take_jumper(&self) -> bool {
        false
    }
}
