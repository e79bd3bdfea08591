//! Events emitted by the simulation for scripting, audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{CarriedKind, ItemKind, Layer};
use crate::types::Point;

/// Notifications drained by the caller after each step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// The avatar entered a new state.
    StateChanged { name: String },
    /// An object was lifted and is now carried.
    ObjectLifted { kind: CarriedKind },
    /// A carried object was released into the world.
    ObjectThrown { kind: CarriedKind, at: Point },
    /// A thrown or carried object broke.
    ObjectBroken { kind: CarriedKind, at: Point },
    TreasureObtained { name: String, variant: u32 },
    ItemUsed { item: ItemKind },
    /// The avatar activated a teletransporter.
    Teleport { destination: String },
    SensorActivated { name: String },
    AvatarHurt { damage: u32, life: u32 },
    /// The avatar took stairs to another layer.
    LayerChanged { layer: Layer },
    GameOver,
    /// A sound the audio collaborator should play.
    Sound { name: String },
}
