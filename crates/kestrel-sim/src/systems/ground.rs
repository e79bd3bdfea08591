//! Ground system: hazards of the ground under the avatar.

use tracing::{debug, trace};

use kestrel_core::constants::PRICKLE_DAMAGE;
use kestrel_core::enums::{Attacker, Hazard};

use crate::avatar::Avatar;
use crate::map::Map;
use crate::states::{FallingState, HurtState, PlungingState, SwimmingState, Transition};

pub fn run(map: &Map, avatar: &mut Avatar) -> Transition {
    let state = avatar.state();
    if !state.is_touching_ground() {
        return None;
    }
    let body = avatar.body();
    let ground = body.ground_under(map);
    let hazard = ground.hazard().filter(|hazard| !state.can_avoid(*hazard));

    let transition: Transition = match hazard {
        None => None,
        Some(Hazard::Hole) => Some(Box::new(FallingState::new())),
        Some(Hazard::DeepWater) if body.equipment.can_swim => Some(Box::new(SwimmingState::new())),
        Some(Hazard::DeepWater) | Some(Hazard::Lava) => Some(Box::new(PlungingState::new())),
        Some(Hazard::Prickle) if state.can_be_hurt(Attacker::Enemy) => {
            let (dx, dy) = body.direction.offset();
            let source = body.center().translated(dx * 8, dy * 8);
            Some(Box::new(HurtState::new(source, PRICKLE_DAMAGE)))
        }
        Some(other) => {
            trace!(?other, "ground hazard without effect");
            None
        }
    };
    if let Some(next) = &transition {
        debug!(%ground, to = next.name(), "ground hazard");
        return transition;
    }

    if ground.is_solid() {
        let spot = (body.position, body.layer);
        avatar.body_mut().last_solid_ground = Some(spot);
    }
    None
}
