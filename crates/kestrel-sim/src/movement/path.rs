//! Movement along a string of direction8 digits.
//!
//! Each digit moves the entity by one tile (8 pixels) in that direction.
//! `"0022"` goes 16 pixels east, then 16 pixels north.

use kestrel_core::constants::TILE_SIZE;
use kestrel_core::types::{direction8_offset, Point};

use super::{pixel_delay, MoveContext, Movement, MovementCore, StepOutcome};
use crate::error::MovementError;

#[derive(Debug, Clone)]
pub struct PathMovement {
    core: MovementCore,
    path: Vec<u8>,
    looping: bool,
    index: usize,
    current: Option<u8>,
    remaining: i32,
    delay: f64,
    next_move: f64,
}

impl PathMovement {
    pub fn parse(
        path: &str,
        speed: u32,
        looping: bool,
        ignore_obstacles: bool,
        now: u64,
    ) -> Result<Self, MovementError> {
        let digits = path
            .chars()
            .map(|symbol| match symbol.to_digit(10) {
                Some(digit) if digit < 8 => Ok(digit as u8),
                _ => Err(MovementError::InvalidPath {
                    path: path.to_string(),
                    symbol,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(digits, speed, looping, ignore_obstacles, now))
    }

    pub fn new(path: Vec<u8>, speed: u32, looping: bool, ignore_obstacles: bool, now: u64) -> Self {
        let delay = pixel_delay(f64::from(speed));
        Self {
            core: MovementCore::new(ignore_obstacles),
            path,
            looping,
            index: 0,
            current: None,
            remaining: 0,
            delay,
            next_move: now as f64 + delay,
        }
    }

    pub fn path(&self) -> &[u8] {
        &self.path
    }

    /// Load the next digit. False when the path is over.
    fn next_segment(&mut self) -> bool {
        if self.index >= self.path.len() {
            if !self.looping || self.path.is_empty() {
                return false;
            }
            self.index = 0;
        }
        self.current = Some(self.path[self.index]);
        self.index += 1;
        self.remaining = TILE_SIZE;
        true
    }
}

impl Movement for PathMovement {
    fn core(&self) -> &MovementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut MovementCore {
        &mut self.core
    }

    fn advance(&mut self, ctx: &MoveContext<'_>, position: &mut Point) -> StepOutcome {
        let now = ctx.now as f64;
        let mut outcome = StepOutcome::Idle;
        loop {
            if self.remaining == 0 && !self.next_segment() {
                self.current = None;
                return outcome.merge(StepOutcome::Finished);
            }
            if self.next_move > now {
                return outcome;
            }
            let (dx, dy) = direction8_offset(self.current.unwrap_or_default());
            let step = self.core.try_translate(ctx, position, dx, dy);
            if step == StepOutcome::Moved {
                self.remaining -= 1;
            }
            self.next_move += self.delay;
            outcome = outcome.merge(step);
        }
    }

    fn shift_deadlines(&mut self, by_ms: u64) {
        self.next_move += by_ms as f64;
    }

    fn direction8(&self) -> Option<u8> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::testing::*;
    use crate::movement::NoObstacles;

    #[test]
    fn test_parse_rejects_bad_digits() {
        let err = PathMovement::parse("0a2", 80, false, false, 0).unwrap_err();
        assert_eq!(
            err,
            MovementError::InvalidPath {
                path: "0a2".into(),
                symbol: 'a'
            }
        );
        assert!(PathMovement::parse("8", 80, false, false, 0).is_err());
    }

    #[test]
    fn test_follows_digits_tile_by_tile() {
        let mut movement = PathMovement::parse("06", 100, false, false, 0).unwrap();
        let mut position = Point::new(0, 0);
        let finished = run_until_finished(&mut movement, &mut position, &NoObstacles, 0, 10, 1000);
        assert_eq!(position, Point::new(8, 8));
        assert_eq!(finished, Some(160));
    }

    #[test]
    fn test_empty_path_finishes_at_once() {
        let mut movement = PathMovement::parse("", 100, true, false, 0).unwrap();
        let mut position = Point::new(3, 3);
        let finished = run_until_finished(&mut movement, &mut position, &NoObstacles, 0, 10, 100);
        assert_eq!(finished, Some(0));
        assert_eq!(position, Point::new(3, 3));
    }

    #[test]
    fn test_looping_never_finishes() {
        let mut movement = PathMovement::parse("04", 100, true, false, 0).unwrap();
        let mut position = Point::new(0, 0);
        let finished = run_until_finished(&mut movement, &mut position, &NoObstacles, 0, 10, 1000);
        assert_eq!(finished, None);
        assert!(position.x >= 0 && position.x <= 8);
    }
}
