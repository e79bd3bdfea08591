//! hecs components of map entities.
//!
//! The avatar is not an ECS entity; everything else on the map is.

use kestrel_core::enums::{CarriedKind, Direction4, Layer, StairsWay};
use kestrel_core::types::{Point, Rect};

use crate::movement::{FallingMovement, Movement};

/// Placement of a map entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Body {
    pub bounds: Rect,
    pub layer: Layer,
}

impl Body {
    pub fn new(position: Point, width: i32, height: i32, layer: Layer) -> Self {
        Self {
            bounds: Rect::at(position, width, height),
            layer,
        }
    }

    pub fn position(&self) -> Point {
        self.bounds.position()
    }

    pub fn set_position(&mut self, position: Point) {
        self.bounds.x = position.x;
        self.bounds.y = position.y;
    }
}

/// Something the avatar can lift. Solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Liftable {
    pub kind: CarriedKind,
}

/// A heavy block the avatar can grab. Solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block;

/// Something the hookshot can attach to. Solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookTarget;

/// A small treasure lying on the ground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pickable {
    pub treasure: String,
    pub variant: u32,
}

/// A pickable being brought back by a boomerang or a hookshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caught;

/// A conveyor zone pushing the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stream {
    pub direction8: u8,
    pub speed: u32,
    pub allow_attack: bool,
    pub allow_item: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stairs {
    /// Direction the avatar walks to take the stairs.
    pub direction: Direction4,
    pub way: StairsWay,
    /// Whether taking the stairs moves the avatar to another layer.
    pub changes_layer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teletransporter {
    pub destination: String,
    pub avatar_inside: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sensor {
    pub name: String,
    pub avatar_inside: bool,
}

/// A ledge the avatar jumps down from after pushing against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jumper {
    pub direction8: u8,
    pub distance: u32,
    pub pressing_since: Option<u64>,
}

/// Movement driving an entity's [`Body`].
pub struct Motion(pub Box<dyn Movement>);

/// A carried object released into the world.
pub struct Thrown {
    pub kind: CarriedKind,
    pub fall: FallingMovement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boomerang {
    pub returning: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookshotPhase {
    Flying,
    /// Attached to a hook target; the avatar is being pulled.
    Pulling,
    Returning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hookshot {
    pub phase: HookshotPhase,
}

/// A harmless critter wandering around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wanderer;
