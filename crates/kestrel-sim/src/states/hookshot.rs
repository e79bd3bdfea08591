//! Firing the hookshot, and being pulled when it catches something.

use hecs::Entity;
use tracing::{debug, warn};

use kestrel_core::commands::Intent;
use kestrel_core::constants::HOOKSHOT_SPEED;
use kestrel_core::enums::{Attacker, Ground, Immunities, ItemKind, Layer, Obstacle, StateKind};
use kestrel_core::events::GameEvent;

use super::{
    state_from_ground, BackToSolidGroundState, FreeState, State, StateContext, StateCore,
    Transition,
};
use crate::components::{Hookshot, HookshotPhase};
use crate::movement::{TargetMovement, Tracked};
use crate::world_setup;

/// The hookshot entity flies on its own. When it reports a catch, the
/// avatar is pulled towards it, ignoring obstacles. When it is gone, the
/// state ends.
#[derive(Debug, Default)]
pub struct HookshotState {
    core: StateCore,
    hookshot: Option<Entity>,
    pulling: bool,
}

impl HookshotState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pulling(&self) -> bool {
        self.pulling
    }

    /// The avatar arrived where the hookshot caught something.
    fn finish(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if let Some(entity) = self.hookshot.take() {
            let _ = ctx.world.despawn(entity);
        }
        let bounds = ctx.body.bounds();
        let layer = ctx.body.layer;
        if layer == Layer::Low || !ctx.map.is_empty_under(layer, &bounds) {
            return Some(state_from_ground(ctx, false));
        }
        // Pulled over a gap: drop to the layer below if there is room.
        match layer.below() {
            Some(lower) if !ctx.map.collides_with_walls(lower, &bounds) => {
                ctx.body.layer = lower;
                ctx.services.emit(GameEvent::LayerChanged { layer: lower });
                Some(state_from_ground(ctx, false))
            }
            _ => Some(Box::new(BackToSolidGroundState::new(0, true))),
        }
    }
}

impl State for HookshotState {
    state_core!(StateKind::Hookshot);

    fn start(&mut self, ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        let flying = ctx.world.query::<&Hookshot>().iter().next().is_some();
        if flying {
            warn!("a hookshot is already on the map");
            return Some(Box::new(FreeState::new()));
        }
        let entity = world_setup::spawn_hookshot(
            ctx.world,
            ctx.body.center(),
            ctx.body.layer,
            ctx.body.direction,
            ctx.services.now(),
        );
        self.hookshot = Some(entity);
        ctx.body.set_animation("hookshot");
        ctx.services.emit(GameEvent::ItemUsed {
            item: ItemKind::Hookshot,
        });
        ctx.services.play_sound("hookshot");
        None
    }

    fn update(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        let Some(entity) = self.hookshot else {
            return Some(state_from_ground(ctx, false));
        };
        let phase = match ctx.world.get::<&Hookshot>(entity) {
            Ok(hookshot) => hookshot.phase,
            Err(_) => {
                // Came back and was removed.
                self.hookshot = None;
                return Some(state_from_ground(ctx, false));
            }
        };
        if phase == HookshotPhase::Pulling && !self.pulling {
            debug!("hookshot caught something, pulling the avatar");
            self.pulling = true;
            let (dx, dy) = ctx.body.direction.offset();
            let offset = (-4 - dx * 4, -4 - dy * 4);
            ctx.body.set_movement(Box::new(TargetMovement::tracking(
                Tracked::Entity(entity),
                offset,
                HOOKSHOT_SPEED,
                true,
                ctx.now(),
            )));
        }
        None
    }

    fn notify_intent(&mut self, _ctx: &mut StateContext<'_>, _intent: Intent) -> Transition {
        None
    }

    fn notify_movement_finished(&mut self, ctx: &mut StateContext<'_>) -> Transition {
        if self.pulling {
            return self.finish(ctx);
        }
        None
    }

    fn stop(&mut self, ctx: &mut StateContext<'_>, _next: &mut dyn State) {
        if let Some(entity) = self.hookshot.take() {
            let _ = ctx.world.despawn(entity);
        }
    }

    fn immunities(&self) -> Immunities {
        Immunities::AIRBORNE
    }

    fn is_touching_ground(&self) -> bool {
        false
    }

    fn can_be_hurt(&self, _attacker: Attacker) -> bool {
        false
    }

    fn can_start_sword(&self) -> bool {
        false
    }

    fn can_start_item(&self, _item: ItemKind) -> bool {
        false
    }

    fn can_take_stairs(&self) -> bool {
        false
    }

    fn can_take_jumper(&self) -> bool {
        false
    }

    fn can_start_game_over(&self) -> bool {
        false
    }

    fn is_grabbing_or_pulling(&self) -> bool {
        self.pulling
    }

    fn is_obstacle(&self, obstacle: Obstacle, _ground: Ground) -> bool {
        obstacle == Obstacle::Separator
    }
}
