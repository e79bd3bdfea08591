//! Simulation engine: one fixed step of the game per call.
//!
//! `SimulationEngine` owns the map, the hecs world of map entities, the
//! avatar and the simulated clock. It processes queued commands, updates
//! the avatar, runs every system, and produces a [`FrameSnapshot`].
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use tracing::{debug, info, warn};

use kestrel_core::commands::{AvatarCommand, EngineCommand};
use kestrel_core::config::SimConfig;
use kestrel_core::enums::{Attacker, StateKind};
use kestrel_core::events::GameEvent;
use kestrel_core::state::FrameSnapshot;
use kestrel_core::types::{Point, SimTime};

use crate::avatar::{Avatar, AvatarEnv, AvatarSave};
use crate::controls::Controls;
use crate::error::SimError;
use crate::map::Map;
use crate::movement::StepOutcome;
use crate::services::Services;
use crate::states::{
    ForcedWalkingState, FreeState, FrozenState, HurtState, JumpingState, State, Transition,
    TreasureState, VictoryState,
};
use crate::systems;

/// The simulation engine. Owns the world and all simulation state.
pub struct SimulationEngine {
    world: World,
    map: Map,
    avatar: Avatar,
    services: Services,
    controls: Controls,
    command_queue: VecDeque<EngineCommand>,
    despawn_buffer: Vec<Entity>,
    motion_outcomes: Vec<(Entity, StepOutcome)>,
    /// Commands waiting for a given tick, in queuing order.
    scheduled: Vec<(u64, EngineCommand)>,
    suspended: bool,
    quit_requested: bool,
}

impl SimulationEngine {
    /// Create an engine on `map`, with the avatar already started.
    pub fn new(config: SimConfig, map: Map) -> Self {
        let mut engine = Self {
            world: World::new(),
            map,
            avatar: Avatar::new(&config),
            services: Services::new(config.seed, config.timestep_ms),
            controls: Controls::new(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            motion_outcomes: Vec::new(),
            scheduled: Vec::new(),
            suspended: false,
            quit_requested: false,
        };
        info!(seed = config.seed, timestep_ms = config.timestep_ms, "simulation created");
        engine.with_avatar(|avatar, env| avatar.start(env));
        engine
    }

    /// Queue a command for processing at the next step boundary.
    pub fn queue_command(&mut self, command: EngineCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = EngineCommand>) {
        self.command_queue.extend(commands);
    }

    /// Queue a command for the step that brings the tick counter to `tick`.
    pub fn schedule_command(&mut self, tick: u64, command: EngineCommand) {
        self.scheduled.push((tick, command));
    }

    /// Whether a [`EngineCommand::Quit`] was processed.
    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Run one simulation step and return the resulting snapshot.
    ///
    /// Simulated time advances even while suspended so that resuming can
    /// shift deadlines by the time spent suspended.
    pub fn tick(&mut self) -> FrameSnapshot {
        self.process_commands();
        self.services.advance();

        if !self.suspended {
            self.with_avatar(|avatar, env| avatar.update(env));
            self.run_systems();
            self.with_avatar(|avatar, env| avatar.check_game_over(env));
        }

        let events = self.services.drain_events();
        systems::snapshot::build_snapshot(&self.world, &self.avatar, self.services.time(), events)
    }

    fn run_systems(&mut self) {
        let now = self.services.now();

        systems::motion::run(
            &mut self.world,
            &self.map,
            self.avatar.body().position,
            now,
            &mut self.motion_outcomes,
        );
        let landed = systems::motion::run_falls(&mut self.world, now);

        let transition = systems::projectiles::run(
            &mut self.world,
            &self.avatar,
            &mut self.services,
            &self.motion_outcomes,
            &landed,
            &mut self.despawn_buffer,
        );
        self.apply(transition);

        let transition = systems::detectors::run(
            &mut self.world,
            &mut self.avatar,
            &self.controls,
            &mut self.services,
            &mut self.despawn_buffer,
        );
        self.apply(transition);

        let transition = systems::ground::run(&self.map, &mut self.avatar);
        self.apply(transition);

        systems::cleanup::run(&mut self.world, &self.map, &mut self.despawn_buffer);
    }

    /// Run `f` on the avatar with the rest of the engine as its world.
    fn with_avatar<R>(&mut self, f: impl FnOnce(&mut Avatar, &mut AvatarEnv<'_>) -> R) -> R {
        let mut env = AvatarEnv {
            world: &mut self.world,
            map: &self.map,
            services: &mut self.services,
            controls: &self.controls,
        };
        f(&mut self.avatar, &mut env)
    }

    fn apply(&mut self, transition: Transition) {
        if let Some(next) = transition {
            self.set_avatar_state(next);
        }
    }

    /// Switch the avatar to `next` through the transition protocol.
    pub fn set_avatar_state(&mut self, next: Box<dyn State>) {
        self.with_avatar(|avatar, env| avatar.set_state(env, next));
    }

    /// Suspend or resume the whole simulation. Idempotent.
    pub fn set_suspended(&mut self, suspended: bool) {
        if self.suspended == suspended {
            return;
        }
        debug!(suspended, "simulation suspension");
        self.suspended = suspended;
        let now = self.services.now();
        self.avatar.set_suspended(suspended, now);
        systems::motion::set_suspended(&mut self.world, suspended, now);
        if suspended {
            self.controls.release_all();
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn state_kind(&self) -> StateKind {
        self.avatar.state_kind()
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the map entities, for spawning.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn time(&self) -> SimTime {
        self.services.time()
    }

    pub fn now(&self) -> u64 {
        self.services.now()
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Events emitted outside of [`SimulationEngine::tick`].
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.services.drain_events()
    }

    /// Serialize the persistent part of the avatar.
    pub fn to_save(&self) -> Result<String, SimError> {
        self.avatar.to_save().to_json()
    }

    /// Restore the avatar from a save and put it back in the free state.
    pub fn load_save(&mut self, json: &str) -> Result<(), SimError> {
        let save = AvatarSave::from_json(json)?;
        self.avatar.load_save(&save);
        self.set_avatar_state(Box::new(FreeState::new()));
        info!("save loaded");
        Ok(())
    }

    fn process_commands(&mut self) {
        let next_tick = self.services.time().tick + 1;
        if self.scheduled.iter().any(|(tick, _)| *tick <= next_tick) {
            let (due, later): (Vec<_>, Vec<_>) = std::mem::take(&mut self.scheduled)
                .into_iter()
                .partition(|(tick, _)| *tick <= next_tick);
            self.scheduled = later;
            self.command_queue
                .extend(due.into_iter().map(|(_, command)| command));
        }
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::Input(event) => {
                let Some(intent) = self.controls.apply(event) else {
                    return;
                };
                if !self.suspended {
                    self.with_avatar(|avatar, env| avatar.notify_intent(env, intent));
                }
            }
            EngineCommand::Avatar(command) => self.handle_avatar_command(command),
            EngineCommand::Quit => {
                info!(tick = self.services.time().tick, "quit requested");
                self.quit_requested = true;
            }
        }
    }

    fn handle_avatar_command(&mut self, command: AvatarCommand) {
        let replaces_state = !matches!(
            command,
            AvatarCommand::SetDirection { .. } | AvatarCommand::SetSuspended { .. }
        );
        if replaces_state && self.avatar.state_kind() == StateKind::GameOver {
            debug!(?command, "avatar is dying, request ignored");
            return;
        }
        match command {
            AvatarCommand::Freeze => self.set_avatar_state(Box::new(FrozenState::new())),
            AvatarCommand::Unfreeze => {
                if self.avatar.state_kind() == StateKind::Frozen {
                    self.set_avatar_state(Box::new(FreeState::new()));
                }
            }
            AvatarCommand::Walk {
                path,
                looping,
                ignore_obstacles,
            } => match ForcedWalkingState::new(&path, looping, ignore_obstacles) {
                Ok(state) => self.set_avatar_state(Box::new(state)),
                Err(err) => warn!(%err, "walk command rejected"),
            },
            AvatarCommand::Jump {
                direction8,
                distance,
                ignore_obstacles,
            } => self.set_avatar_state(Box::new(JumpingState::new(
                direction8,
                distance,
                ignore_obstacles,
            ))),
            AvatarCommand::StartItem { item } => {
                self.with_avatar(|avatar, env| avatar.start_item(env, item));
            }
            AvatarCommand::GiveTreasure { name, variant } => {
                self.set_avatar_state(Box::new(TreasureState::new(&name, variant)));
            }
            AvatarCommand::StartVictory => self.set_avatar_state(Box::new(VictoryState::new())),
            AvatarCommand::Hurt {
                from_x,
                from_y,
                damage,
            } => {
                if self.avatar.state().can_be_hurt(Attacker::Script) {
                    let source = Point::new(from_x, from_y);
                    self.set_avatar_state(Box::new(HurtState::new(source, damage)));
                } else {
                    debug!(state = self.avatar.state().name(), "hurt ignored");
                }
            }
            AvatarCommand::SetDirection { direction } => {
                self.avatar.body_mut().direction = direction;
            }
            AvatarCommand::SetSuspended { suspended } => self.set_suspended(suspended),
        }
    }
}
