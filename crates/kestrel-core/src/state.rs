//! Frame snapshot: the visible state handed to the renderer after each step.

use serde::{Deserialize, Serialize};

use crate::enums::{CarriedKind, Direction4, Layer, StateKind};
use crate::events::GameEvent;
use crate::types::{Point, Rect, SimTime};

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub avatar: AvatarView,
    /// Map entities in drawing order: by layer, then from top to bottom.
    pub entities: Vec<EntityView>,
    /// Events emitted since the previous snapshot.
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarView {
    pub position: Point,
    pub layer: Layer,
    pub direction: Direction4,
    pub state: StateKind,
    pub animation: String,
    pub life: u32,
    pub max_life: u32,
    pub carried: Option<CarriedKind>,
    /// Height above the ground, while jumping.
    pub height: i32,
    pub visible: bool,
    pub suspended: bool,
}

/// What kind of map entity a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Liftable(CarriedKind),
    Block,
    HookTarget,
    Pickable,
    Thrown(CarriedKind),
    Boomerang,
    Arrow,
    Hookshot,
    Wanderer,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub bounds: Rect,
    pub layer: Layer,
    pub height: i32,
}
