//! The avatar's physical side: placement, facing, life and movement slot.

use kestrel_core::constants::{AVATAR_HEIGHT, AVATAR_WIDTH, FACING_REACH};
use kestrel_core::enums::{Direction4, Ground, Layer};
use kestrel_core::types::{Point, Rect};

use crate::equipment::Equipment;
use crate::map::Map;
use crate::movement::{Movement, MovementTarget};

pub struct AvatarBody {
    /// Top-left corner of the bounding box.
    pub position: Point,
    pub layer: Layer,
    pub direction: Direction4,
    pub animation: &'static str,
    pub equipment: Equipment,
    pub life: u32,
    pub max_life: u32,
    /// Where to put the avatar back after a fall.
    pub last_solid_ground: Option<(Point, Layer)>,
    /// Set by the detector system while a stream overlaps the avatar.
    pub on_stream: bool,
    movement: Option<Box<dyn Movement>>,
}

impl AvatarBody {
    pub fn new(position: Point, layer: Layer, direction: Direction4, max_life: u32) -> Self {
        Self {
            position,
            layer,
            direction,
            animation: "stopped",
            equipment: Equipment::default(),
            life: max_life,
            max_life,
            last_solid_ground: None,
            on_stream: false,
            movement: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::at(self.position, AVATAR_WIDTH, AVATAR_HEIGHT)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// The strip just in front of the avatar.
    pub fn facing_rect(&self) -> Rect {
        let (dx, dy) = self.direction.offset();
        self.bounds().translated(dx * FACING_REACH, dy * FACING_REACH)
    }

    pub fn ground_under(&self, map: &Map) -> Ground {
        map.ground_below(self.layer, self.center())
    }

    pub fn set_animation(&mut self, animation: &'static str) {
        self.animation = animation;
    }

    pub fn movement(&self) -> Option<&dyn Movement> {
        self.movement.as_deref()
    }

    pub(crate) fn movement_mut(&mut self) -> Option<&mut Box<dyn Movement>> {
        self.movement.as_mut()
    }

    /// Replace the movement driving the avatar. The previous one is stopped.
    pub fn set_movement(&mut self, mut movement: Box<dyn Movement>) {
        self.clear_movement();
        movement.set_target(MovementTarget::Avatar);
        self.movement = Some(movement);
    }

    pub fn clear_movement(&mut self) {
        if let Some(mut previous) = self.movement.take() {
            previous.stop();
        }
    }

    /// Split borrow used to update the movement in place.
    pub(crate) fn movement_and_position(&mut self) -> (Option<&mut Box<dyn Movement>>, &mut Point) {
        (self.movement.as_mut(), &mut self.position)
    }
}
