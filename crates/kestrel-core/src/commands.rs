//! Commands flowing into the simulation.
//!
//! Raw [`InputEvent`]s come from the input collaborator once per real frame.
//! They are translated into [`Intent`]s consumed by the active avatar state.
//! [`AvatarCommand`]s are requests from the scripting collaborator. All of
//! them are queued and processed at the next step boundary.

use serde::{Deserialize, Serialize};

use crate::enums::{Direction4, ItemKind};

/// Low-level input events delivered by the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    DirectionPressed { direction: Direction4 },
    DirectionReleased { direction: Direction4 },
    ActionPressed,
    ActionReleased,
    AttackPressed,
    ItemPressed { slot: u8 },
    /// The window is being closed: the main loop must exit.
    WindowClosed,
}

/// High-level intents derived from input, consumed by avatar states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Intent {
    /// The wanted movement direction changed (`None` = no direction).
    Move { direction8: Option<u8> },
    Action,
    ActionReleased,
    Attack,
    UseItem { slot: u8 },
}

/// Requests the scripting collaborator can make on the avatar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AvatarCommand {
    Freeze,
    Unfreeze,
    /// Walk along a path of direction8 digits.
    Walk {
        path: String,
        looping: bool,
        ignore_obstacles: bool,
    },
    Jump {
        direction8: u8,
        distance: u32,
        ignore_obstacles: bool,
    },
    StartItem { item: ItemKind },
    GiveTreasure { name: String, variant: u32 },
    StartVictory,
    Hurt { from_x: i32, from_y: i32, damage: u32 },
    SetDirection { direction: Direction4 },
    SetSuspended { suspended: bool },
}

/// Everything that can be queued on the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EngineCommand {
    Input(InputEvent),
    Avatar(AvatarCommand),
    /// Ask the main loop to shut down after the current step.
    Quit,
}
