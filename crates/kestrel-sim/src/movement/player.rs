//! Input-driven movement: walks towards the direction held by the player.

use kestrel_core::types::{direction8_angle, Point};

use super::{MoveContext, Movement, MovementCore, StepOutcome, StraightMovement};

#[derive(Debug, Clone)]
pub struct PlayerMovement {
    inner: StraightMovement,
    speed: u32,
    wanted: Option<u8>,
}

impl PlayerMovement {
    pub fn new(speed: u32, now: u64) -> Self {
        Self {
            inner: StraightMovement::new(0, 0.0, now),
            speed,
            wanted: None,
        }
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    fn set_wanted(&mut self, wanted: Option<u8>, now: u64) {
        self.wanted = wanted;
        match wanted {
            Some(direction8) => {
                self.inner
                    .set_speed_and_angle(f64::from(self.speed), direction8_angle(direction8), now)
            }
            None => self.inner.set_speed_and_angle(0.0, 0.0, now),
        }
    }
}

impl Movement for PlayerMovement {
    fn core(&self) -> &MovementCore {
        self.inner.core()
    }

    fn core_mut(&mut self) -> &mut MovementCore {
        self.inner.core_mut()
    }

    fn advance(&mut self, ctx: &MoveContext<'_>, position: &mut Point) -> StepOutcome {
        if ctx.wanted_direction8 != self.wanted {
            self.set_wanted(ctx.wanted_direction8, ctx.now);
        }
        self.inner.advance(ctx, position)
    }

    fn shift_deadlines(&mut self, by_ms: u64) {
        self.inner.shift_deadlines(by_ms);
    }

    fn direction8(&self) -> Option<u8> {
        self.wanted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::{NoObstacles, PositionIndex};

    fn ctx<'a>(now: u64, wanted: Option<u8>, positions: &'a PositionIndex) -> MoveContext<'a> {
        MoveContext {
            now,
            size: (16, 16),
            collision: &NoObstacles,
            positions,
            wanted_direction8: wanted,
        }
    }

    #[test]
    fn test_follows_held_direction() {
        let positions = PositionIndex::default();
        let mut movement = PlayerMovement::new(100, 0);
        let mut position = Point::new(50, 50);

        movement.update(&ctx(0, Some(4), &positions), &mut position);
        movement.update(&ctx(100, Some(4), &positions), &mut position);
        assert_eq!(position, Point::new(40, 50));
        assert_eq!(movement.direction8(), Some(4));

        movement.update(&ctx(110, None, &positions), &mut position);
        movement.update(&ctx(500, None, &positions), &mut position);
        assert_eq!(position, Point::new(40, 50));
        assert!(!movement.is_finished());
    }
}
