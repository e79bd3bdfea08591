//! The avatar: its body plus exactly one active [`State`].
//!
//! All state switches go through [`Avatar::set_state`], which runs the
//! hand-off protocol: stop the outgoing state (it enacts the incoming
//! state's carried-object policy), clear the movement unless inherited,
//! swap, start the incoming state, then drop the outgoing one.

mod body;
mod save;

pub use body::AvatarBody;
pub use save::AvatarSave;

use hecs::World;
use tracing::{debug, info, trace};

use kestrel_core::commands::Intent;
use kestrel_core::config::SimConfig;
use kestrel_core::constants::{AVATAR_HEIGHT, AVATAR_WIDTH};
use kestrel_core::enums::{ItemKind, StateKind};
use kestrel_core::events::GameEvent;

use crate::collision::{capture_positions, collect_obstacles, AvatarCollision};
use crate::controls::Controls;
use crate::map::Map;
use crate::movement::{MoveContext, StepOutcome};
use crate::services::Services;
use crate::states::{item_state, FreeState, GameOverState, State, StateContext, Transition};

/// Fallback chains longer than this mean two states keep rejecting each
/// other.
const MAX_CHAINED_TRANSITIONS: usize = 8;

/// The world the avatar acts upon during one call.
pub struct AvatarEnv<'a> {
    pub world: &'a mut World,
    pub map: &'a Map,
    pub services: &'a mut Services,
    pub controls: &'a Controls,
}

fn context<'b>(body: &'b mut AvatarBody, env: &'b mut AvatarEnv<'_>) -> StateContext<'b> {
    StateContext {
        body,
        world: &mut *env.world,
        map: env.map,
        services: &mut *env.services,
        controls: env.controls,
    }
}

pub struct Avatar {
    body: AvatarBody,
    state: Box<dyn State>,
    suspended: bool,
}

impl Avatar {
    /// A new avatar in the free state. Call [`Avatar::start`] before the
    /// first update.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            body: AvatarBody::new(
                config.start_position,
                config.start_layer,
                config.start_direction,
                config.max_life,
            ),
            state: Box::new(FreeState::new()),
            suspended: false,
        }
    }

    /// Start the initial state.
    pub fn start(&mut self, env: &mut AvatarEnv<'_>) {
        assert!(!self.state.core().started, "avatar started twice");
        self.state.core_mut().started = true;
        let mut ctx = context(&mut self.body, env);
        let follow_up = self.state.start(&mut ctx, None);
        ctx.services.emit(GameEvent::StateChanged {
            name: self.state.name().to_string(),
        });
        if let Some(next) = follow_up {
            self.set_state(env, next);
        }
    }

    pub fn body(&self) -> &AvatarBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut AvatarBody {
        &mut self.body
    }

    pub fn state(&self) -> &dyn State {
        self.state.as_ref()
    }

    pub fn state_kind(&self) -> StateKind {
        self.state.kind()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Replace the active state.
    pub fn set_state(&mut self, env: &mut AvatarEnv<'_>, next: Box<dyn State>) {
        let mut pending = Some(next);
        let mut chained = 0;
        while let Some(mut next) = pending.take() {
            chained += 1;
            assert!(
                chained <= MAX_CHAINED_TRANSITIONS,
                "state {} keeps being rejected",
                next.name()
            );
            assert!(!next.core().started, "state {} started twice", next.name());
            debug!(from = self.state.name(), to = next.name(), "avatar state change");

            let mut ctx = context(&mut self.body, env);

            self.state.core_mut().stopping = true;
            self.state.stop(&mut ctx, next.as_mut());
            assert!(
                !next.requires_carried() || next.carried().is_some(),
                "state {} requires a carried object but none was handed over",
                next.name()
            );

            if !next.inherits_movement() {
                ctx.body.clear_movement();
            }
            if self.suspended {
                next.set_suspended(true, ctx.now());
            }

            let previous = std::mem::replace(&mut self.state, next);
            self.state.core_mut().started = true;
            pending = self.state.start(&mut ctx, Some(previous.as_ref()));
            if self.suspended {
                let now = ctx.now();
                if let Some(movement) = ctx.body.movement_mut() {
                    movement.set_suspended(true, now);
                }
            }
            ctx.services.emit(GameEvent::StateChanged {
                name: self.state.name().to_string(),
            });
            drop(previous);
        }
    }

    /// Apply a transition request, if any.
    pub fn apply(&mut self, env: &mut AvatarEnv<'_>, transition: Transition) {
        if let Some(next) = transition {
            self.set_state(env, next);
        }
    }

    /// One simulation step: the state first, then the movement.
    pub fn update(&mut self, env: &mut AvatarEnv<'_>) {
        if self.suspended {
            return;
        }
        let transition = self.state.update(&mut context(&mut self.body, env));
        self.apply(env, transition);

        let outcome = self.update_movement(env);
        let transition = {
            let mut ctx = context(&mut self.body, env);
            match outcome {
                StepOutcome::Blocked => self.state.notify_obstacle_reached(&mut ctx),
                StepOutcome::Finished => self.state.notify_movement_finished(&mut ctx),
                StepOutcome::Idle | StepOutcome::Moved => None,
            }
        };
        self.apply(env, transition);
        self.check_game_over(env);
    }

    /// Start dying once life is out, as soon as the active state allows it.
    pub fn check_game_over(&mut self, env: &mut AvatarEnv<'_>) {
        if self.suspended || self.body.life > 0 || !self.state.can_start_game_over() {
            return;
        }
        info!(state = self.state.name(), "out of life");
        self.set_state(env, Box::new(GameOverState::new()));
    }

    fn update_movement(&mut self, env: &mut AvatarEnv<'_>) -> StepOutcome {
        let now = env.services.now();
        let layer = self.body.layer;
        let ground = self.body.ground_under(env.map);
        let wanted_direction8 = if self.state.can_control_movement() {
            env.controls.wanted_direction8()
        } else {
            None
        };
        let obstacles = collect_obstacles(env.world, layer);
        let positions = capture_positions(env.world, Some(self.body.position));

        let (movement, position) = self.body.movement_and_position();
        let Some(movement) = movement else {
            return StepOutcome::Idle;
        };
        let collision = AvatarCollision {
            map: env.map,
            layer,
            obstacles: &obstacles,
            state: self.state.as_ref(),
            ground,
        };
        let ctx = MoveContext {
            now,
            size: (AVATAR_WIDTH, AVATAR_HEIGHT),
            collision: &collision,
            positions: &positions,
            wanted_direction8,
        };
        let outcome = movement.update(&ctx, position);
        if outcome != StepOutcome::Idle {
            trace!(?outcome, x = position.x, y = position.y, "avatar moved");
        }
        outcome
    }

    /// Forward an intent to the active state.
    pub fn notify_intent(&mut self, env: &mut AvatarEnv<'_>, intent: Intent) {
        if self.suspended {
            return;
        }
        let transition = self
            .state
            .notify_intent(&mut context(&mut self.body, env), intent);
        self.apply(env, transition);
    }

    /// Start using an inventory item. Ignored when the active state
    /// forbids it.
    pub fn start_item(&mut self, env: &mut AvatarEnv<'_>, item: ItemKind) {
        if !self.state.can_start_item(item) {
            debug!(state = self.state.name(), %item, "item not usable now");
            return;
        }
        let next = item_state(&context(&mut self.body, env), item);
        self.set_state(env, next);
    }

    /// Suspend or resume the avatar, its movement and its carried object.
    /// Idempotent.
    pub fn set_suspended(&mut self, suspended: bool, now: u64) {
        if self.suspended == suspended {
            return;
        }
        self.suspended = suspended;
        self.state.set_suspended(suspended, now);
        if let Some(movement) = self.body.movement_mut() {
            movement.set_suspended(suspended, now);
        }
        if let Some(object) = self.state.carried() {
            object.borrow_mut().set_suspended(suspended, now);
        }
    }

    /// Persistent part of the avatar.
    pub fn to_save(&self) -> AvatarSave {
        AvatarSave {
            position: self.body.position,
            layer: self.body.layer,
            direction: self.body.direction,
            life: self.body.life,
            max_life: self.body.max_life,
            equipment: self.body.equipment.clone(),
        }
    }

    /// Restore a saved avatar. Only meaningful at a session boundary.
    pub fn load_save(&mut self, save: &AvatarSave) {
        self.body.position = save.position;
        self.body.layer = save.layer;
        self.body.direction = save.direction;
        self.body.max_life = save.max_life.max(1);
        self.body.life = save.life.min(self.body.max_life);
        self.body.equipment = save.equipment.clone();
        self.body.last_solid_ground = None;
    }
}
