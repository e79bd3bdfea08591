//! Vertical fall of a thrown object, shown as a height above its shadow.

use kestrel_core::constants::FALL_STEP_DELAY_MS;
use kestrel_core::types::Point;

use super::{MoveContext, Movement, MovementCore, StepOutcome};

/// Starts slightly rising, then falls faster and faster until the height
/// reaches zero. The ground position is left untouched.
#[derive(Debug, Clone)]
pub struct FallingMovement {
    core: MovementCore,
    height: i32,
    vertical_speed: i32,
    next_move: u64,
}

impl FallingMovement {
    pub fn new(height: i32, now: u64) -> Self {
        Self {
            core: MovementCore::new(true),
            height,
            vertical_speed: -2,
            next_move: now + FALL_STEP_DELAY_MS,
        }
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

impl Movement for FallingMovement {
    fn core(&self) -> &MovementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut MovementCore {
        &mut self.core
    }

    fn advance(&mut self, ctx: &MoveContext<'_>, _position: &mut Point) -> StepOutcome {
        let mut outcome = StepOutcome::Idle;
        while self.next_move <= ctx.now {
            self.height -= self.vertical_speed;
            self.vertical_speed += 1;
            self.next_move += FALL_STEP_DELAY_MS;
            outcome = StepOutcome::Moved;
            if self.height <= 0 {
                self.height = 0;
                return StepOutcome::Finished;
            }
        }
        outcome
    }

    fn shift_deadlines(&mut self, by_ms: u64) {
        self.next_move += by_ms;
    }

    fn displayed_height(&self) -> i32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::testing::*;
    use crate::movement::NoObstacles;

    #[test]
    fn test_rises_then_lands() {
        let mut movement = FallingMovement::new(18, 0);
        let mut position = Point::new(5, 5);
        let finished = run_until_finished(&mut movement, &mut position, &NoObstacles, 0, 10, 2000);
        // 18 -> 20 -> 21 -> 21 -> 20 -> 18 -> 15 -> 11 -> 6 -> 0
        assert_eq!(finished, Some(360));
        assert_eq!(movement.height(), 0);
        assert_eq!(position, Point::new(5, 5));
    }
}
