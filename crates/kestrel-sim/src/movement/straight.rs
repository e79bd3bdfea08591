//! Straight-line movement at a constant speed and angle.

use kestrel_core::types::{angle_to_direction8, Point};

use super::{pixel_delay, MoveContext, Movement, MovementCore, StepOutcome};

/// Two axes stepped independently, each with its own per-pixel delay.
#[derive(Debug, Clone)]
pub struct StraightMovement {
    core: MovementCore,
    speed: f64,
    angle: f64,
    x_move: i32,
    y_move: i32,
    x_delay: f64,
    y_delay: f64,
    next_x: f64,
    next_y: f64,
    /// Zero means unlimited.
    max_distance: u32,
    origin: Option<Point>,
}

impl StraightMovement {
    /// `speed` in pixels per second, `angle` in radians.
    pub fn new(speed: u32, angle: f64, now: u64) -> Self {
        let mut movement = Self {
            core: MovementCore::new(false),
            speed: 0.0,
            angle: 0.0,
            x_move: 0,
            y_move: 0,
            x_delay: f64::INFINITY,
            y_delay: f64::INFINITY,
            next_x: 0.0,
            next_y: 0.0,
            max_distance: 0,
            origin: None,
        };
        movement.set_speed_and_angle(f64::from(speed), angle, now);
        movement
    }

    /// Finish after travelling this many pixels from the first update.
    pub fn with_max_distance(mut self, max_distance: u32) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn ignoring_obstacles(mut self) -> Self {
        self.core.ignore_obstacles = true;
        self
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_speed_and_angle(&mut self, speed: f64, angle: f64, now: u64) {
        self.speed = speed.max(0.0);
        self.angle = angle;
        let now = now as f64;

        let x_speed = self.speed * angle.cos();
        let y_speed = -self.speed * angle.sin();

        if x_speed.abs() < 1e-6 {
            self.x_move = 0;
            self.x_delay = f64::INFINITY;
        } else {
            self.x_move = x_speed.signum() as i32;
            self.x_delay = pixel_delay(x_speed.abs());
            self.next_x = now + self.x_delay;
        }
        if y_speed.abs() < 1e-6 {
            self.y_move = 0;
            self.y_delay = f64::INFINITY;
        } else {
            self.y_move = y_speed.signum() as i32;
            self.y_delay = pixel_delay(y_speed.abs());
            self.next_y = now + self.y_delay;
        }
    }

    /// Restart the distance count from `origin`.
    pub(crate) fn reset_origin(&mut self, origin: Point) {
        self.origin = Some(origin);
    }

    fn reached_max_distance(&self, position: Point) -> bool {
        match (self.max_distance, self.origin) {
            (0, _) | (_, None) => false,
            (max, Some(origin)) => origin.distance_to(&position) >= f64::from(max),
        }
    }
}

impl Movement for StraightMovement {
    fn core(&self) -> &MovementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut MovementCore {
        &mut self.core
    }

    fn advance(&mut self, ctx: &MoveContext<'_>, position: &mut Point) -> StepOutcome {
        if self.origin.is_none() {
            self.origin = Some(*position);
        }
        let now = ctx.now as f64;
        let mut outcome = StepOutcome::Idle;

        loop {
            let x_due = self.x_move != 0 && self.next_x <= now;
            let y_due = self.y_move != 0 && self.next_y <= now;
            if !x_due && !y_due {
                break;
            }

            // Take the earliest pending axis; both when they are due together.
            let step_x = x_due && (!y_due || self.next_x <= self.next_y + 1e-9);
            let step_y = y_due && (!x_due || self.next_y <= self.next_x + 1e-9);
            let dx = if step_x {
                self.next_x += self.x_delay;
                self.x_move
            } else {
                0
            };
            let dy = if step_y {
                self.next_y += self.y_delay;
                self.y_move
            } else {
                0
            };

            let mut step = self.core.try_translate(ctx, position, dx, dy);
            if step == StepOutcome::Blocked && dx != 0 && dy != 0 {
                // Slide along the obstacle.
                step = self.core.try_translate(ctx, position, dx, 0);
                if step == StepOutcome::Blocked {
                    step = self.core.try_translate(ctx, position, 0, dy);
                }
            }
            outcome = outcome.merge(step);

            if self.reached_max_distance(*position) {
                self.core.finished = true;
                return outcome.merge(StepOutcome::Finished);
            }
        }
        outcome
    }

    fn shift_deadlines(&mut self, by_ms: u64) {
        self.next_x += by_ms as f64;
        self.next_y += by_ms as f64;
    }

    fn direction8(&self) -> Option<u8> {
        (self.speed > 0.0).then(|| angle_to_direction8(self.angle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::testing::*;
    use crate::movement::{NoObstacles, PositionIndex};
    use kestrel_core::types::{direction8_angle, Rect};

    #[test]
    fn test_moves_one_pixel_per_delay() {
        let mut movement = StraightMovement::new(100, 0.0, 0);
        let mut position = Point::new(0, 0);
        let positions = PositionIndex::default();
        let ctx = context(95, &NoObstacles, &positions);
        assert_eq!(movement.update(&ctx, &mut position), StepOutcome::Moved);
        assert_eq!(position, Point::new(9, 0));
        let ctx = context(100, &NoObstacles, &positions);
        movement.update(&ctx, &mut position);
        assert_eq!(position, Point::new(10, 0));
    }

    #[test]
    fn test_max_distance_finishes() {
        let mut movement = StraightMovement::new(100, direction8_angle(6), 0).with_max_distance(5);
        let mut position = Point::new(0, 0);
        let finished_at =
            run_until_finished(&mut movement, &mut position, &NoObstacles, 0, 10, 1000);
        assert_eq!(finished_at, Some(50));
        assert_eq!(position, Point::new(0, 5));
        assert!(movement.is_finished());
    }

    #[test]
    fn test_blocked_by_wall() {
        let walls = Walls::new(vec![Rect::new(12, 0, 8, 8)]);
        let mut movement = StraightMovement::new(100, 0.0, 0);
        let mut position = Point::new(0, 0);
        let positions = PositionIndex::default();
        let ctx = context(100, &walls, &positions);
        assert_eq!(movement.update(&ctx, &mut position), StepOutcome::Blocked);
        assert_eq!(position, Point::new(4, 0));
    }

    #[test]
    fn test_suspension_shifts_dates() {
        let mut movement = StraightMovement::new(100, 0.0, 0);
        let mut position = Point::new(0, 0);
        let positions = PositionIndex::default();
        movement.set_suspended(true, 0);
        movement.set_suspended(true, 30);
        let ctx = context(50, &NoObstacles, &positions);
        assert_eq!(movement.update(&ctx, &mut position), StepOutcome::Idle);
        movement.set_suspended(false, 50);
        // The first pixel was due at 10, it is now due at 60.
        let ctx = context(55, &NoObstacles, &positions);
        assert_eq!(movement.update(&ctx, &mut position), StepOutcome::Idle);
        let ctx = context(60, &NoObstacles, &positions);
        movement.update(&ctx, &mut position);
        assert_eq!(position, Point::new(1, 0));
    }
}
