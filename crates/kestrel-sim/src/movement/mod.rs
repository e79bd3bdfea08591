//! Movement strategies.
//!
//! A movement owns its timing: on every update it steps the position it
//! is given one pixel at a time until it has caught up with the simulated
//! clock. Movements never read real time. They query obstacles through a
//! [`CollisionTest`] and other entities' positions through a
//! [`PositionLookup`], both supplied by the caller in a [`MoveContext`].

mod falling;
mod follow;
mod jump;
mod path;
mod pixel;
mod player;
mod random;
mod straight;
mod target;

pub use falling::FallingMovement;
pub use follow::FollowMovement;
pub use jump::JumpMovement;
pub use path::PathMovement;
pub use pixel::PixelMovement;
pub use player::PlayerMovement;
pub use random::RandomMovement;
pub use straight::StraightMovement;
pub use target::TargetMovement;

use std::collections::HashMap;

use hecs::Entity;

use kestrel_core::types::{Point, Rect};

/// What a movement is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MovementTarget {
    /// Not attached yet, or driving a free point owned by the caller.
    #[default]
    Point,
    Avatar,
    Entity(Entity),
}

/// An entity whose position a movement can track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tracked {
    Avatar,
    Entity(Entity),
}

/// Result of one movement update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing was due.
    Idle,
    Moved,
    /// At least one pixel step was refused by the obstacle test.
    Blocked,
    /// The movement reached its end during this update.
    Finished,
}

impl StepOutcome {
    /// Fold the outcome of one pixel step into the outcome of the update.
    fn merge(self, other: StepOutcome) -> StepOutcome {
        use StepOutcome::*;
        match (self, other) {
            (Finished, _) | (_, Finished) => Finished,
            (Blocked, _) | (_, Blocked) => Blocked,
            (Moved, _) | (_, Moved) => Moved,
            _ => Idle,
        }
    }
}

/// Obstacle test used by movements that do not ignore obstacles.
pub trait CollisionTest {
    /// Whether a bounding box at this place overlaps an obstacle.
    fn collides(&self, bounds: &Rect) -> bool;
}

/// No obstacles at all.
pub struct NoObstacles;

impl CollisionTest for NoObstacles {
    fn collides(&self, _bounds: &Rect) -> bool {
        false
    }
}

/// Position lookup for movements that track another entity.
pub trait PositionLookup {
    /// `None` once the entity has been removed.
    fn position_of(&self, tracked: Tracked) -> Option<Point>;
}

/// Positions of the avatar and of every positioned entity, taken before a
/// round of movement updates.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    pub avatar: Option<Point>,
    pub entities: HashMap<Entity, Point>,
}

impl PositionLookup for PositionIndex {
    fn position_of(&self, tracked: Tracked) -> Option<Point> {
        match tracked {
            Tracked::Avatar => self.avatar,
            Tracked::Entity(entity) => self.entities.get(&entity).copied(),
        }
    }
}

/// Everything a movement may consult during an update.
pub struct MoveContext<'a> {
    /// Current simulated date, in milliseconds.
    pub now: u64,
    /// Size of the bounding box being moved.
    pub size: (i32, i32),
    pub collision: &'a dyn CollisionTest,
    pub positions: &'a dyn PositionLookup,
    /// Direction held by the player, for input-driven movements.
    pub wanted_direction8: Option<u8>,
}

impl<'a> MoveContext<'a> {
    pub fn bounds_at(&self, position: Point) -> Rect {
        Rect::at(position, self.size.0, self.size.1)
    }
}

/// Bookkeeping shared by every movement.
#[derive(Debug, Clone, Default)]
pub struct MovementCore {
    pub target: MovementTarget,
    pub ignore_obstacles: bool,
    pub suspended: bool,
    pub when_suspended: u64,
    pub finished: bool,
}

impl MovementCore {
    pub fn new(ignore_obstacles: bool) -> Self {
        Self {
            ignore_obstacles,
            ..Default::default()
        }
    }

    /// Move by one offset unless an obstacle is in the way. The obstacle
    /// test is not consulted at all when obstacles are ignored.
    pub fn try_translate(
        &self,
        ctx: &MoveContext<'_>,
        position: &mut Point,
        dx: i32,
        dy: i32,
    ) -> StepOutcome {
        let candidate = position.translated(dx, dy);
        if !self.ignore_obstacles && ctx.collision.collides(&ctx.bounds_at(candidate)) {
            return StepOutcome::Blocked;
        }
        *position = candidate;
        StepOutcome::Moved
    }
}

/// A strategy producing position changes over simulated time.
pub trait Movement: Send + Sync {
    fn core(&self) -> &MovementCore;
    fn core_mut(&mut self) -> &mut MovementCore;

    /// Perform every step due at `ctx.now`.
    fn advance(&mut self, ctx: &MoveContext<'_>, position: &mut Point) -> StepOutcome;

    /// Push every pending date `by_ms` later, after a suspension.
    fn shift_deadlines(&mut self, by_ms: u64);

    /// Current direction of travel, if moving.
    fn direction8(&self) -> Option<u8> {
        None
    }

    /// Height above the ground shown by the renderer.
    fn displayed_height(&self) -> i32 {
        0
    }

    fn update(&mut self, ctx: &MoveContext<'_>, position: &mut Point) -> StepOutcome {
        if self.core().suspended || self.core().finished {
            return StepOutcome::Idle;
        }
        let outcome = self.advance(ctx, position);
        if outcome == StepOutcome::Finished || self.core().finished {
            self.core_mut().finished = true;
            return StepOutcome::Finished;
        }
        outcome
    }

    fn is_finished(&self) -> bool {
        self.core().finished
    }

    /// Halt for good. Later updates do nothing.
    fn stop(&mut self) {
        self.core_mut().finished = true;
    }

    fn target(&self) -> MovementTarget {
        self.core().target
    }

    fn set_target(&mut self, target: MovementTarget) {
        self.core_mut().target = target;
    }

    fn set_ignore_obstacles(&mut self, ignore: bool) {
        self.core_mut().ignore_obstacles = ignore;
    }

    /// Suspend or resume. Idempotent; resuming shifts every pending date by
    /// the time spent suspended.
    fn set_suspended(&mut self, suspended: bool, now: u64) {
        let elapsed = {
            let core = self.core_mut();
            if core.suspended == suspended {
                return;
            }
            core.suspended = suspended;
            if suspended {
                core.when_suspended = now;
                return;
            }
            now.saturating_sub(core.when_suspended)
        };
        self.shift_deadlines(elapsed);
    }
}

/// Per-pixel delay in milliseconds for a speed in pixels per second.
pub(crate) fn pixel_delay(speed: f64) -> f64 {
    if speed <= 0.0 {
        f64::INFINITY
    } else {
        1000.0 / speed
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixtures for movement tests.

    use std::cell::Cell;

    use super::*;

    /// Blocks every box overlapping one of its rectangles and counts calls.
    #[derive(Default)]
    pub struct Walls {
        pub rects: Vec<Rect>,
        pub calls: Cell<u32>,
    }

    impl Walls {
        pub fn new(rects: Vec<Rect>) -> Self {
            Self {
                rects,
                calls: Cell::new(0),
            }
        }
    }

    impl CollisionTest for Walls {
        fn collides(&self, bounds: &Rect) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.rects.iter().any(|rect| rect.overlaps(bounds))
        }
    }

    pub fn context<'a>(
        now: u64,
        collision: &'a dyn CollisionTest,
        positions: &'a PositionIndex,
    ) -> MoveContext<'a> {
        MoveContext {
            now,
            size: (8, 8),
            collision,
            positions,
            wanted_direction8: None,
        }
    }

    /// Run a movement at `step_ms` intervals until it finishes or `max_ms`
    /// is reached. Returns the finishing date.
    pub fn run_until_finished(
        movement: &mut dyn Movement,
        position: &mut Point,
        collision: &dyn CollisionTest,
        start: u64,
        step_ms: u64,
        max_ms: u64,
    ) -> Option<u64> {
        let positions = PositionIndex::default();
        let mut now = start;
        while now <= start + max_ms {
            let ctx = context(now, collision, &positions);
            if movement.update(&ctx, position) == StepOutcome::Finished {
                return Some(now);
            }
            now += step_ms;
        }
        None
    }
}
