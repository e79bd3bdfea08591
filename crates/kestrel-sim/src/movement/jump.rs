//! Jump: a pixel trajectory in one direction8 with a displayed height.

use kestrel_core::constants::JUMP_STEP_DELAY_MS;
use kestrel_core::types::{direction8_offset, Point};

use super::{MoveContext, Movement, MovementCore, PixelMovement, StepOutcome};

#[derive(Debug, Clone)]
pub struct JumpMovement {
    pixels: PixelMovement,
    direction8: u8,
    distance: u32,
    height: i32,
}

impl JumpMovement {
    /// Jump `distance` pixels towards `direction8`. Diagonal steps move one
    /// pixel on each axis.
    pub fn new(direction8: u8, distance: u32, ignore_obstacles: bool, now: u64) -> Self {
        let step = direction8_offset(direction8);
        let trajectory = vec![step; distance as usize];
        Self {
            pixels: PixelMovement::new(trajectory, JUMP_STEP_DELAY_MS, false, ignore_obstacles, now),
            direction8: direction8 % 8,
            distance,
            height: 0,
        }
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    fn max_height(&self) -> f64 {
        f64::from((self.distance / 3).clamp(4, 16))
    }
}

impl Movement for JumpMovement {
    fn core(&self) -> &MovementCore {
        self.pixels.core()
    }

    fn core_mut(&mut self) -> &mut MovementCore {
        self.pixels.core_mut()
    }

    fn advance(&mut self, ctx: &MoveContext<'_>, position: &mut Point) -> StepOutcome {
        let outcome = self.pixels.advance(ctx, position);
        let (done, total) = self.pixels.progress();
        self.height = if total == 0 || outcome == StepOutcome::Finished {
            0
        } else {
            let progress = done as f64 / total as f64;
            (4.0 * self.max_height() * progress * (1.0 - progress)).round() as i32
        };
        outcome
    }

    fn shift_deadlines(&mut self, by_ms: u64) {
        self.pixels.shift_deadlines(by_ms);
    }

    fn direction8(&self) -> Option<u8> {
        Some(self.direction8)
    }

    fn displayed_height(&self) -> i32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::testing::*;
    use crate::movement::PositionIndex;
    use kestrel_core::types::Rect;

    #[test]
    fn test_jump_ignoring_obstacles_never_consults_them() {
        let walls = Walls::new(vec![Rect::new(0, 0, 1000, 1000)]);
        let mut movement = JumpMovement::new(0, 24, true, 0);
        let mut position = Point::new(0, 0);
        let finished = run_until_finished(&mut movement, &mut position, &walls, 0, 10, 1000);
        assert_eq!(finished, Some(240));
        assert_eq!(position, Point::new(24, 0));
        assert_eq!(walls.calls.get(), 0);
        assert_eq!(movement.displayed_height(), 0);
    }

    #[test]
    fn test_jump_height_peaks_midway() {
        let mut movement = JumpMovement::new(6, 24, true, 0);
        let mut position = Point::new(0, 0);
        let positions = PositionIndex::default();
        let walls = Walls::default();
        let ctx = context(120, &walls, &positions);
        movement.update(&ctx, &mut position);
        assert_eq!(position, Point::new(0, 12));
        assert_eq!(movement.displayed_height(), 8);
    }

    #[test]
    fn test_blocked_jump_still_ends_by_distance() {
        let walls = Walls::new(vec![Rect::new(12, 0, 8, 8)]);
        let mut movement = JumpMovement::new(0, 16, false, 0);
        let mut position = Point::new(0, 0);
        let finished = run_until_finished(&mut movement, &mut position, &walls, 0, 10, 1000);
        assert_eq!(finished, Some(160));
        assert_eq!(position, Point::new(4, 0));
    }
}
