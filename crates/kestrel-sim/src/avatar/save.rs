//! Avatar persistence, written and read at session boundaries only.

use serde::{Deserialize, Serialize};

use kestrel_core::enums::{Direction4, Layer};
use kestrel_core::types::Point;

use crate::equipment::Equipment;
use crate::error::SimError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarSave {
    pub position: Point,
    pub layer: Layer,
    pub direction: Direction4,
    pub life: u32,
    pub max_life: u32,
    #[serde(default)]
    pub equipment: Equipment,
}

impl AvatarSave {
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }
}
