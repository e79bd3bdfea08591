//! Rigid attachment to another entity at a fixed offset.

use kestrel_core::types::Point;

use super::{MoveContext, Movement, MovementCore, StepOutcome, Tracked};

/// Finishes when the followed entity disappears or, unless obstacles are
/// ignored, when the attached position would overlap an obstacle.
#[derive(Debug, Clone)]
pub struct FollowMovement {
    core: MovementCore,
    followed: Tracked,
    offset: (i32, i32),
}

impl FollowMovement {
    pub fn new(followed: Tracked, offset: (i32, i32), ignore_obstacles: bool) -> Self {
        Self {
            core: MovementCore::new(ignore_obstacles),
            followed,
            offset,
        }
    }

    pub fn followed(&self) -> Tracked {
        self.followed
    }
}

impl Movement for FollowMovement {
    fn core(&self) -> &MovementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut MovementCore {
        &mut self.core
    }

    fn advance(&mut self, ctx: &MoveContext<'_>, position: &mut Point) -> StepOutcome {
        let Some(anchor) = ctx.positions.position_of(self.followed) else {
            return StepOutcome::Finished;
        };
        let wanted = anchor.translated(self.offset.0, self.offset.1);
        if wanted == *position {
            return StepOutcome::Idle;
        }
        if !self.core.ignore_obstacles && ctx.collision.collides(&ctx.bounds_at(wanted)) {
            self.core.finished = true;
            return StepOutcome::Blocked;
        }
        *position = wanted;
        StepOutcome::Moved
    }

    fn shift_deadlines(&mut self, _by_ms: u64) {}
}
