//! Abilities and inventory of the avatar.

use serde::{Deserialize, Serialize};

use kestrel_core::enums::{CarriedKind, ItemKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    /// Sword level, 0 when the avatar has no sword.
    pub sword: u8,
    pub shield: u8,
    /// Lift level compared to [`CarriedKind::weight`].
    pub lift: u8,
    pub can_swim: bool,
    pub can_run: bool,
    pub slots: [Option<ItemKind>; 2],
    pub arrows: u32,
}

impl Default for Equipment {
    fn default() -> Self {
        Self {
            sword: 1,
            shield: 1,
            lift: 1,
            can_swim: false,
            can_run: false,
            slots: [None, None],
            arrows: 0,
        }
    }
}

impl Equipment {
    pub fn item_in_slot(&self, slot: u8) -> Option<ItemKind> {
        self.slots.get(slot as usize).copied().flatten()
    }

    pub fn can_lift(&self, kind: CarriedKind) -> bool {
        self.lift >= kind.weight()
    }

    /// Consume one arrow. False when the quiver is empty.
    pub fn take_arrow(&mut self) -> bool {
        if self.arrows == 0 {
            return false;
        }
        self.arrows -= 1;
        true
    }
}
