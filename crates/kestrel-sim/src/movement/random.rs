//! Wandering movement that changes direction at random intervals.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use kestrel_core::constants::{RANDOM_MAX_DIRECTION_MS, RANDOM_MIN_DIRECTION_MS};
use kestrel_core::types::{direction8_angle, Point};

use super::{MoveContext, Movement, MovementCore, StepOutcome, StraightMovement};

/// Stays within `max_radius` pixels of the point where it started.
#[derive(Debug, Clone)]
pub struct RandomMovement {
    inner: StraightMovement,
    speed: u32,
    max_radius: u32,
    rng: ChaCha8Rng,
    origin: Option<Point>,
    next_change: u64,
    returning: bool,
}

impl RandomMovement {
    pub fn new(speed: u32, max_radius: u32, seed: u64, now: u64) -> Self {
        Self {
            inner: StraightMovement::new(0, 0.0, now),
            speed,
            max_radius,
            rng: ChaCha8Rng::seed_from_u64(seed),
            origin: None,
            next_change: now,
            returning: false,
        }
    }

    fn change_direction(&mut self, position: Point, now: u64) {
        let origin = self.origin.unwrap_or(position);
        let angle = if self.max_radius > 0 && origin.distance_to(&position) >= f64::from(self.max_radius)
        {
            position.angle_to(&origin)
        } else {
            direction8_angle(self.rng.gen_range(0..8))
        };
        self.inner
            .set_speed_and_angle(f64::from(self.speed), angle, now);
        self.next_change = now + self.rng.gen_range(RANDOM_MIN_DIRECTION_MS..=RANDOM_MAX_DIRECTION_MS);
    }
}

impl Movement for RandomMovement {
    fn core(&self) -> &MovementCore {
        self.inner.core()
    }

    fn core_mut(&mut self) -> &mut MovementCore {
        self.inner.core_mut()
    }

    fn advance(&mut self, ctx: &MoveContext<'_>, position: &mut Point) -> StepOutcome {
        if self.origin.is_none() {
            self.origin = Some(*position);
        }
        let far = match self.origin {
            Some(origin) if self.max_radius > 0 => {
                origin.distance_to(position) > f64::from(self.max_radius)
            }
            _ => false,
        };
        if far && !self.returning {
            self.returning = true;
            self.change_direction(*position, ctx.now);
        } else if !far {
            self.returning = false;
        }
        if ctx.now >= self.next_change {
            self.change_direction(*position, ctx.now);
        }
        let outcome = self.inner.advance(ctx, position);
        if outcome == StepOutcome::Blocked {
            self.next_change = ctx.now;
        }
        outcome
    }

    fn shift_deadlines(&mut self, by_ms: u64) {
        self.inner.shift_deadlines(by_ms);
        self.next_change += by_ms;
    }

    fn direction8(&self) -> Option<u8> {
        self.inner.direction8()
    }
}
