//! Being carried by a stream.

use hecs::Entity;

use kestrel_core::enums::{Immunities, ItemKind, StateKind};

use super::{state_from_ground, FreeState, State, StateContext, StateCore, Transition};
use crate::components::{Body, Stream};
use crate::movement::{PathMovement, TargetMovement, Tracked};

/// Two phases: first snap onto the stream's centre, then follow its
/// direction one tile at a time. Ends when the avatar is no longer on a
/// stream.
#[derive(Debug)]
pub struct StreamState {
    core: StateCore,
    stream: Entity,
    direction8: u8,
    speed: u32,
    allow_attack: bool,
    allow_item: bool,
    snapping: bool,
}

impl StreamState {
    pub fn new(stream: Entity, properties: &Stream) -> Self {
        Self {
            core: StateCore::default(),
            stream,
            direction8: properties.direction8 % 8,
            speed: properties.speed,
            allow_attack: properties.allow_attack,
            allow_item: properties.allow_item,
            snapping: true,
        }
    }

    pub fn is_snapping(&self) -> bool {
        self.snapping
    }
}

impl State for StreamState {
    state_core!(StateKind::Stream);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        ctx.body.set_animation("stopped");
        let offset = match ctx.world.get::<&Body>(self.stream) {
            Ok(body) => (body.bounds.width / 2 - 8, body.bounds.height / 2 - 8),
            Err(_) => return Some(Box::new(FreeState::new())),
        };
        ctx.body.set_movement(Box::new(TargetMovement::tracking(
            Tracked::Entity(self.stream),
            offset,
            self.speed,
            true,
            ctx.now(),
        )));
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        let on_stream = std::mem::take(&mut ctx.body.on_stream);
        if !self.snapping && !on_stream {
            return Some(state_from_ground(ctx, false));
        }
        None
    }

    fn notify_movement_finished(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if self.snapping {
            self.snapping = false;
            ctx.body.set_movement(Box::new(PathMovement::new(
                vec![self.direction8; 2],
                self.speed,
                false,
                false,
                ctx.now(),
            )));
            return None;
        }
        Some(state_from_ground(ctx, false))
    }

    fn notify_obstacle_reached(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if self.snapping {
            return None;
        }
        Some(state_from_ground(ctx, false))
    }

    fn immunities(&self) -> Immunities {
        Immunities::STREAM
    }

    fn can_start_sword(&self) -> bool {
        self.allow_attack
    }

    fn can_start_item(&self, _item: ItemKind) -> bool {
        self.allow_item
    }

    fn can_take_stairs(&self) -> bool {
        false
    }

    fn can_take_jumper(&self) -> bool {
        false
    }
}
