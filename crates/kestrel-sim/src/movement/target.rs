//! Straight movement towards a point or a moving entity.

use kestrel_core::constants::TARGET_RECOMPUTATION_MS;
use kestrel_core::types::Point;

use super::{MoveContext, Movement, MovementCore, StepOutcome, StraightMovement, Tracked};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Goal {
    Point(Point),
    Tracked { tracked: Tracked, offset: (i32, i32) },
}

/// The angle is recomputed periodically so that a moving target is
/// eventually reached. If a tracked entity is removed, the movement keeps
/// going to the last point where it was seen.
#[derive(Debug, Clone)]
pub struct TargetMovement {
    inner: StraightMovement,
    goal: Goal,
    target: Point,
    speed: u32,
    sign: (i32, i32),
    next_recompute: u64,
    started: bool,
}

impl TargetMovement {
    pub fn to_point(target: Point, speed: u32, ignore_obstacles: bool, now: u64) -> Self {
        Self::with_goal(Goal::Point(target), target, speed, ignore_obstacles, now)
    }

    /// Track an entity, aiming at its position plus `offset`.
    pub fn tracking(
        tracked: Tracked,
        offset: (i32, i32),
        speed: u32,
        ignore_obstacles: bool,
        now: u64,
    ) -> Self {
        Self::with_goal(
            Goal::Tracked { tracked, offset },
            Point::default(),
            speed,
            ignore_obstacles,
            now,
        )
    }

    fn with_goal(goal: Goal, target: Point, speed: u32, ignore_obstacles: bool, now: u64) -> Self {
        let mut inner = StraightMovement::new(0, 0.0, now);
        inner.set_ignore_obstacles(ignore_obstacles);
        Self {
            inner,
            goal,
            target,
            speed,
            sign: (0, 0),
            next_recompute: now,
            started: false,
        }
    }

    /// Last known target point.
    pub fn target_point(&self) -> Point {
        self.target
    }

    /// Whether the target is an entity that is still being tracked.
    pub fn is_tracking(&self) -> bool {
        matches!(self.goal, Goal::Tracked { .. })
    }

    fn recompute(&mut self, position: Point, now: u64) {
        let dx = self.target.x - position.x;
        let dy = self.target.y - position.y;
        self.sign = (dx.signum(), dy.signum());
        if dx == 0 && dy == 0 {
            self.inner.set_speed_and_angle(0.0, 0.0, now);
        } else {
            let angle = position.angle_to(&self.target);
            self.inner
                .set_speed_and_angle(f64::from(self.speed), angle, now);
        }
        self.inner.reset_origin(position);
        self.next_recompute = now + TARGET_RECOMPUTATION_MS;
    }

    /// Whether neither axis has anything left to travel.
    fn reached(&self, position: Point) -> bool {
        let dx = self.target.x - position.x;
        let dy = self.target.y - position.y;
        dx * self.sign.0 <= 0 && dy * self.sign.1 <= 0
    }

    /// Whether one axis went past the target while the other one did not.
    fn overshot(&self, position: Point) -> bool {
        let dx = self.target.x - position.x;
        let dy = self.target.y - position.y;
        dx * self.sign.0 < 0 || dy * self.sign.1 < 0
    }
}

impl Movement for TargetMovement {
    fn core(&self) -> &MovementCore {
        self.inner.core()
    }

    fn core_mut(&mut self) -> &mut MovementCore {
        self.inner.core_mut()
    }

    fn advance(&mut self, ctx: &MoveContext<'_>, position: &mut Point) -> StepOutcome {
        if let Goal::Tracked { tracked, offset } = self.goal {
            match ctx.positions.position_of(tracked) {
                Some(point) => {
                    let target = point.translated(offset.0, offset.1);
                    if target != self.target && self.started {
                        // The target moved: aim again right away.
                        self.next_recompute = ctx.now;
                    }
                    self.target = target;
                }
                None => self.goal = Goal::Point(self.target),
            }
        }

        if !self.started || ctx.now >= self.next_recompute {
            self.started = true;
            self.recompute(*position, ctx.now);
        }

        let outcome = if self.reached(*position) {
            StepOutcome::Idle
        } else {
            self.inner.advance(ctx, position)
        };

        if self.reached(*position) {
            let ignore = self.core().ignore_obstacles;
            if ignore || !ctx.collision.collides(&ctx.bounds_at(self.target)) {
                *position = self.target;
            }
            return StepOutcome::Finished;
        }
        if self.overshot(*position) {
            self.recompute(*position, ctx.now);
        }
        outcome
    }

    fn shift_deadlines(&mut self, by_ms: u64) {
        self.inner.shift_deadlines(by_ms);
        self.next_recompute += by_ms;
    }

    fn direction8(&self) -> Option<u8> {
        self.inner.direction8()
    }
}
