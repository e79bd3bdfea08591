//! Fundamental geometric and simulation types.
//!
//! Map coordinates are integer pixels with x growing east and y growing
//! south. Angles follow the usual math convention (counter-clockwise, 0 =
//! east), so a positive angle moves towards negative y.

use std::ops::{Add, Sub};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A point on the map, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle from this point to another one, in radians.
    pub fn angle_to(&self, other: &Point) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(self.y - other.y);
        dy.atan2(dx)
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned rectangle in pixels. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(position: Point, width: i32, height: i32) -> Self {
        Self::new(position.x, position.y, width, height)
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether the two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Simulated time tracking. Advances by one timestep per simulation step and
/// never follows the wall clock directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of simulation steps run so far.
    pub tick: u64,
    /// Simulated milliseconds elapsed since the session started.
    pub now_ms: u64,
}

impl SimTime {
    /// Advance by one step of `timestep_ms`.
    pub fn advance(&mut self, timestep_ms: u64) {
        self.tick += 1;
        self.now_ms += timestep_ms;
    }
}

/// Unit offset of a direction8 value (0 = east, counter-clockwise).
pub fn direction8_offset(direction8: u8) -> (i32, i32) {
    match direction8 % 8 {
        0 => (1, 0),
        1 => (1, -1),
        2 => (0, -1),
        3 => (-1, -1),
        4 => (-1, 0),
        5 => (-1, 1),
        6 => (0, 1),
        _ => (1, 1),
    }
}

/// Angle of a direction8 value, in radians.
pub fn direction8_angle(direction8: u8) -> f64 {
    f64::from(direction8 % 8) * std::f64::consts::FRAC_PI_4
}

/// Closest direction8 to an angle in radians.
pub fn angle_to_direction8(angle: f64) -> u8 {
    let turns = angle.rem_euclid(std::f64::consts::TAU) / std::f64::consts::FRAC_PI_4;
    (turns.round() as u8) % 8
}

/// Direction8 of the offset `(dx, dy)`, or `None` for a null offset.
pub fn offset_to_direction8(dx: i32, dy: i32) -> Option<u8> {
    match (dx.signum(), dy.signum()) {
        (0, 0) => None,
        (1, 0) => Some(0),
        (1, -1) => Some(1),
        (0, -1) => Some(2),
        (-1, -1) => Some(3),
        (-1, 0) => Some(4),
        (-1, 1) => Some(5),
        (0, 1) => Some(6),
        _ => Some(7),
    }
}
