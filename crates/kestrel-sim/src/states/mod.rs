//! Avatar states.
//!
//! Every behavioral mode of the avatar is a small struct implementing
//! [`State`]. The trait's default answers describe an avatar standing on
//! ordinary ground; each state overrides only what differs.
//!
//! States never switch themselves. Lifecycle calls return a [`Transition`]
//! that the [`Avatar`](crate::avatar::Avatar) applies once the call has
//! returned.

/// Bookkeeping accessors shared by every state struct with a `core` field.
macro_rules! state_core {
    ($kind:expr) => {
        fn kind(&self) -> ::kestrel_core::enums::StateKind {
            $kind
        }

        fn core(&self) -> &$crate::states::StateCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut $crate::states::StateCore {
            &mut self.core
        }
    };
}

mod back_to_solid_ground;
mod boomerang;
mod bow;
mod carrying;
mod falling;
mod forced_walking;
mod free;
mod frozen;
mod game_over;
mod grabbing;
mod hookshot;
mod hurt;
mod jumping;
mod lifting;
mod plunging;
mod running;
mod stairs;
mod stream;
mod swimming;
mod sword_swinging;
mod treasure;
mod using_item;
mod victory;

pub use back_to_solid_ground::BackToSolidGroundState;
pub use boomerang::BoomerangState;
pub use bow::BowState;
pub use carrying::CarryingState;
pub use falling::FallingState;
pub use forced_walking::ForcedWalkingState;
pub use free::FreeState;
pub use frozen::FrozenState;
pub use game_over::GameOverState;
pub use grabbing::GrabbingState;
pub use hookshot::HookshotState;
pub use hurt::HurtState;
pub use jumping::JumpingState;
pub use lifting::LiftingState;
pub use plunging::PlungingState;
pub use running::RunningState;
pub use stairs::StairsState;
pub use stream::StreamState;
pub use swimming::SwimmingState;
pub use sword_swinging::SwordSwingingState;
pub use treasure::TreasureState;
pub use using_item::UsingItemState;
pub use victory::VictoryState;

use std::rc::Rc;

use hecs::World;
use tracing::debug;

use kestrel_core::commands::Intent;
use kestrel_core::enums::{
    Attacker, Direction4, Ground, Hazard, Immunities, ItemKind, Obstacle, ResourcePolicy, StateKind,
};
use kestrel_core::events::GameEvent;

use crate::avatar::AvatarBody;
use crate::carried::CarriedRef;
use crate::controls::Controls;
use crate::map::Map;
use crate::services::Services;
use crate::world_setup;

/// A requested replacement for the current state.
pub type Transition = Option<Box<dyn State>>;

/// Everything a state may touch while it runs.
pub struct StateContext<'a> {
    pub body: &'a mut AvatarBody,
    pub world: &'a mut World,
    pub map: &'a Map,
    pub services: &'a mut Services,
    pub controls: &'a Controls,
}

impl StateContext<'_> {
    pub fn now(&self) -> u64 {
        self.services.now()
    }

    /// Ground seen under the avatar's centre.
    pub fn ground(&self) -> Ground {
        self.body.ground_under(self.map)
    }
}

/// Lifecycle and suspension bookkeeping common to every state.
#[derive(Debug, Clone, Default)]
pub struct StateCore {
    pub started: bool,
    pub stopping: bool,
    pub suspended: bool,
    pub when_suspended: u64,
}

pub trait State {
    fn kind(&self) -> StateKind;
    fn core(&self) -> &StateCore;
    fn core_mut(&mut self) -> &mut StateCore;

    fn name(&self) -> &'static str {
        self.kind().into()
    }

    // ---- Lifecycle ----

    /// Called once, right after this state became the active one. A
    /// returned state replaces this one immediately.
    fn start(&mut self, _ctx: &mut StateContext<'_>, _previous: Option<&dyn State>) -> Transition {
        None
    }

    /// Called once, before `next` becomes the active state. A state holding
    /// a carried object hands it off here.
    fn stop(&mut self, _ctx: &mut StateContext<'_>, _next: &mut dyn State) {}

    /// Called once per simulation step while active and not suspended.
    fn update(&mut self, _ctx: &mut StateContext<'_>) -> Transition {
        None
    }

    fn notify_intent(&mut self, ctx: &mut StateContext<'_>, intent: Intent) -> Transition {
        default_intent(self, ctx, intent)
    }

    fn notify_obstacle_reached(&mut self, _ctx: &mut StateContext<'_>) -> Transition {
        None
    }

    fn notify_movement_finished(&mut self, _ctx: &mut StateContext<'_>) -> Transition {
        None
    }

    /// Push every pending deadline `by_ms` later.
    fn shift_deadlines(&mut self, _by_ms: u64) {}

    /// Idempotent. Resuming shifts deadlines by the suspended duration.
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

    fn is_suspended(&self) -> bool {
        self.core().suspended
    }

    // ---- Carried object hand-off ----

    /// What the outgoing state must do with its carried object when this
    /// state replaces it.
    fn previous_carried_policy(&self) -> ResourcePolicy {
        ResourcePolicy::Throw
    }

    /// Whether this state cannot start without a carried object.
    fn requires_carried(&self) -> bool {
        false
    }

    fn carried(&self) -> Option<&CarriedRef> {
        None
    }

    /// Take over the outgoing state's carried object.
    fn receive_carried(&mut self, _object: CarriedRef) {
        panic!("state {} cannot hold a carried object", self.name());
    }

    /// Whether the avatar's current movement survives the switch to this
    /// state.
    fn inherits_movement(&self) -> bool {
        false
    }

    // ---- Capabilities ----

    fn immunities(&self) -> Immunities {
        Immunities::empty()
    }

    fn can_avoid(&self, hazard: Hazard) -> bool {
        self.immunities().contains(hazard.into())
    }

    fn is_touching_ground(&self) -> bool {
        true
    }

    fn can_be_hurt(&self, _attacker: Attacker) -> bool {
        true
    }

    fn can_pick_treasure(&self) -> bool {
        true
    }

    fn can_start_sword(&self) -> bool {
        true
    }

    fn can_start_item(&self, _item: ItemKind) -> bool {
        true
    }

    fn can_use_shield(&self) -> bool {
        true
    }

    fn can_take_stairs(&self) -> bool {
        true
    }

    fn can_take_jumper(&self) -> bool {
        true
    }

    fn can_start_game_over(&self) -> bool {
        true
    }

    /// Whether the player steers the avatar in this state.
    fn can_control_movement(&self) -> bool {
        false
    }

    fn is_visible(&self) -> bool {
        true
    }

    fn are_collisions_ignored(&self) -> bool {
        false
    }

    fn is_using_item(&self) -> bool {
        false
    }

    fn is_grabbing_or_pulling(&self) -> bool {
        false
    }

    fn is_cutting_with_sword(&self) -> bool {
        false
    }

    fn sword_damage_factor(&self) -> u32 {
        1
    }

    fn is_obstacle(&self, obstacle: Obstacle, _ground: Ground) -> bool {
        match obstacle {
            Obstacle::Stairs => !self.can_take_stairs(),
            Obstacle::Jumper => !self.can_take_jumper(),
            Obstacle::Sensor | Obstacle::Separator | Obstacle::Teletransporter => false,
        }
    }
}

/// Attack and item intents, shared by every state that does not override
/// [`State::notify_intent`].
pub fn default_intent<S: State + ?Sized>(
    state: &S,
    ctx: &mut StateContext<'_>,
    intent: Intent,
) -> Transition {
    match intent {
        Intent::Attack if ctx.body.equipment.sword > 0 && state.can_start_sword() => {
            Some(Box::new(SwordSwingingState::new()))
        }
        Intent::UseItem { slot } => {
            let item = ctx.body.equipment.item_in_slot(slot)?;
            if !state.can_start_item(item) {
                debug!(state = state.name(), %item, "item not usable now");
                return None;
            }
            Some(item_state(ctx, item))
        }
        _ => None,
    }
}

/// The state that uses an inventory item.
pub fn item_state(ctx: &StateContext<'_>, item: ItemKind) -> Box<dyn State> {
    match item {
        ItemKind::Boomerang => Box::new(BoomerangState::new()),
        ItemKind::Hookshot => Box::new(HookshotState::new()),
        ItemKind::Bow => Box::new(BowState::new()),
        ItemKind::Feather => Box::new(JumpingState::new(
            ctx.body.direction.to_direction8(),
            32,
            false,
        )),
        ItemKind::Lamp | ItemKind::Bottle => Box::new(UsingItemState::new(item)),
    }
}

/// State to return to once an action is over, depending on the ground
/// and on whether an object is still held.
pub fn state_from_ground(ctx: &StateContext<'_>, carrying: bool) -> Box<dyn State> {
    if carrying {
        return Box::new(CarryingState::new());
    }
    match ctx.ground() {
        Ground::DeepWater if ctx.body.equipment.can_swim => Box::new(SwimmingState::new()),
        _ => Box::new(FreeState::new()),
    }
}

/// Enact `next`'s carried-object policy on the object in `slot`.
pub fn hand_off_carried(
    slot: &mut Option<CarriedRef>,
    ctx: &mut StateContext<'_>,
    next: &mut dyn State,
) {
    let Some(object) = slot.take() else {
        return;
    };
    let policy = next.previous_carried_policy();
    let policy_name: &'static str = policy.into();
    debug!(to = next.name(), policy = policy_name, "carried object hand-off");
    match policy {
        ResourcePolicy::Keep => {
            next.receive_carried(Rc::clone(&object));
            assert!(
                Rc::strong_count(&object) > 1,
                "state {} did not keep the carried object it was handed",
                next.name()
            );
        }
        ResourcePolicy::Throw => throw_carried(ctx, object),
        ResourcePolicy::Destroy => {}
    }
}

/// Release a carried object into the world as a thrown projectile.
pub fn throw_carried(ctx: &mut StateContext<'_>, object: CarriedRef) {
    let kind = object.borrow().kind();
    let center = ctx.body.center();
    world_setup::spawn_thrown(
        ctx.world,
        kind,
        center,
        ctx.body.layer,
        ctx.body.direction,
        ctx.services.now(),
    );
    ctx.services.emit(GameEvent::ObjectThrown { kind, at: center });
    ctx.services.play_sound("throw");
}

/// Remove life points and notify. Dying is left to the avatar's game-over
/// watch.
pub fn apply_damage(ctx: &mut StateContext<'_>, damage: u32) {
    let life = ctx.body.life.saturating_sub(damage);
    ctx.body.life = life;
    ctx.services.emit(GameEvent::AvatarHurt { damage, life });
}

/// Walking animation and facing direction from the held arrows.
pub fn update_walking(ctx: &mut StateContext<'_>, moving: &'static str, stopped: &'static str) {
    match ctx.controls.wanted_direction8() {
        Some(direction8) => {
            ctx.body.direction = Direction4::from_direction8(direction8, ctx.body.direction);
            ctx.body.set_animation(moving);
        }
        None => ctx.body.set_animation(stopped),
    }
}

/// Advance the timers of a held object.
pub fn update_carried(ctx: &StateContext<'_>, carried: Option<&CarriedRef>) {
    if let Some(object) = carried {
        object.borrow_mut().update(ctx.now());
    }
}
