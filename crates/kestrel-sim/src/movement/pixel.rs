//! Movement along an explicit list of pixel offsets.

use kestrel_core::types::Point;

use super::{MoveContext, Movement, MovementCore, StepOutcome};
use crate::error::MovementError;

/// One offset is applied every `delay` milliseconds. A refused offset is
/// skipped, not retried.
#[derive(Debug, Clone)]
pub struct PixelMovement {
    core: MovementCore,
    trajectory: Vec<(i32, i32)>,
    delay: u64,
    looping: bool,
    index: usize,
    next_move: u64,
}

impl PixelMovement {
    pub fn new(
        trajectory: Vec<(i32, i32)>,
        delay: u64,
        looping: bool,
        ignore_obstacles: bool,
        now: u64,
    ) -> Self {
        Self {
            core: MovementCore::new(ignore_obstacles),
            trajectory,
            delay: delay.max(1),
            looping,
            index: 0,
            next_move: now + delay,
        }
    }

    /// Parse a whitespace-separated list of `dx dy` pairs.
    pub fn parse(
        trajectory: &str,
        delay: u64,
        looping: bool,
        ignore_obstacles: bool,
        now: u64,
    ) -> Result<Self, MovementError> {
        let values = trajectory
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<i32>()
                    .map_err(|_| MovementError::InvalidCoordinate {
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if values.len() % 2 != 0 {
            return Err(MovementError::OddTrajectory(trajectory.to_string()));
        }
        let pairs = values.chunks(2).map(|pair| (pair[0], pair[1])).collect();
        Ok(Self::new(pairs, delay, looping, ignore_obstacles, now))
    }

    /// Steps done so far and total steps.
    pub fn progress(&self) -> (usize, usize) {
        (self.index, self.trajectory.len())
    }
}

impl Movement for PixelMovement {
    fn core(&self) -> &MovementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut MovementCore {
        &mut self.core
    }

    fn advance(&mut self, ctx: &MoveContext<'_>, position: &mut Point) -> StepOutcome {
        let mut outcome = StepOutcome::Idle;
        loop {
            if self.index >= self.trajectory.len() {
                if !self.looping || self.trajectory.is_empty() {
                    return outcome.merge(StepOutcome::Finished);
                }
                self.index = 0;
            }
            if self.next_move > ctx.now {
                return outcome;
            }
            let (dx, dy) = self.trajectory[self.index];
            outcome = outcome.merge(self.core.try_translate(ctx, position, dx, dy));
            self.index += 1;
            self.next_move += self.delay;
        }
    }

    fn shift_deadlines(&mut self, by_ms: u64) {
        self.next_move += by_ms;
    }
}
