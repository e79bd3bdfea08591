//! Enumeration types used throughout the simulation.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

/// Map layer. Entities on different layers never collide.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Layer {
    #[default]
    Low,
    Intermediate,
    High,
}

impl Layer {
    pub const COUNT: usize = 3;

    pub fn index(self) -> usize {
        self as usize
    }

    /// The layer just below this one, if any.
    pub fn below(self) -> Option<Layer> {
        match self {
            Layer::Low => None,
            Layer::Intermediate => Some(Layer::Low),
            Layer::High => Some(Layer::Intermediate),
        }
    }

    pub fn above(self) -> Option<Layer> {
        match self {
            Layer::Low => Some(Layer::Intermediate),
            Layer::Intermediate => Some(Layer::High),
            Layer::High => None,
        }
    }
}

/// The four facing directions of the avatar (0 = east, counter-clockwise).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction4 {
    Right,
    Up,
    Left,
    #[default]
    Down,
}

impl Direction4 {
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Direction4::Right,
            1 => Direction4::Up,
            2 => Direction4::Left,
            _ => Direction4::Down,
        }
    }

    pub fn to_direction8(self) -> u8 {
        self.index() * 2
    }

    /// Facing direction for a direction8. Diagonals keep `current` when it
    /// is one of the two components, otherwise the horizontal one wins.
    pub fn from_direction8(direction8: u8, current: Direction4) -> Self {
        let direction8 = direction8 % 8;
        if direction8 % 2 == 0 {
            return Self::from_index(direction8 / 2);
        }
        let a = Self::from_index(direction8 / 2);
        let b = Self::from_index((direction8 / 2 + 1) % 4);
        if current == a || current == b {
            current
        } else if matches!(a, Direction4::Right | Direction4::Left) {
            a
        } else {
            b
        }
    }

    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction4::Right => (1, 0),
            Direction4::Up => (0, -1),
            Direction4::Left => (-1, 0),
            Direction4::Down => (0, 1),
        }
    }
}

/// Kind of ground of a map tile.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Ground {
    /// Nothing here: the layer below shows through.
    Empty,
    #[default]
    Traversable,
    Wall,
    ShallowWater,
    DeepWater,
    Hole,
    Ice,
    Lava,
    Prickle,
    Ladder,
    Grass,
}

impl Ground {
    pub fn is_wall(self) -> bool {
        matches!(self, Ground::Wall)
    }

    /// Grounds where the avatar can safely be put back after a fall.
    pub fn is_solid(self) -> bool {
        matches!(
            self,
            Ground::Traversable | Ground::ShallowWater | Ground::Ladder | Ground::Grass | Ground::Ice
        )
    }

    /// The hazard triggered by standing on this ground, if any.
    pub fn hazard(self) -> Option<Hazard> {
        match self {
            Ground::DeepWater => Some(Hazard::DeepWater),
            Ground::Hole => Some(Hazard::Hole),
            Ground::Ice => Some(Hazard::Ice),
            Ground::Lava => Some(Hazard::Lava),
            Ground::Prickle => Some(Hazard::Prickle),
            _ => None,
        }
    }
}

/// Hazards a state may be immune to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Hazard {
    DeepWater,
    Hole,
    Ice,
    Lava,
    Prickle,
    Teletransporter,
    Stream,
    Sensor,
    Switch,
    Explosion,
}

bitflags! {
    /// Immunity table of a state: one bit per [`Hazard`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Immunities: u16 {
        const DEEP_WATER = 1 << 0;
        const HOLE = 1 << 1;
        const ICE = 1 << 2;
        const LAVA = 1 << 3;
        const PRICKLE = 1 << 4;
        const TELETRANSPORTER = 1 << 5;
        const STREAM = 1 << 6;
        const SENSOR = 1 << 7;
        const SWITCH = 1 << 8;
        const EXPLOSION = 1 << 9;

        /// Ground hazards that only apply while touching the ground.
        const GROUND = Self::DEEP_WATER.bits()
            | Self::HOLE.bits()
            | Self::ICE.bits()
            | Self::LAVA.bits()
            | Self::PRICKLE.bits();

        /// Above the ground: jumps, grapples, scripted walks.
        const AIRBORNE = Self::GROUND.bits()
            | Self::TELETRANSPORTER.bits()
            | Self::STREAM.bits()
            | Self::SWITCH.bits();
    }
}

impl From<Hazard> for Immunities {
    fn from(hazard: Hazard) -> Self {
        match hazard {
            Hazard::DeepWater => Immunities::DEEP_WATER,
            Hazard::Hole => Immunities::HOLE,
            Hazard::Ice => Immunities::ICE,
            Hazard::Lava => Immunities::LAVA,
            Hazard::Prickle => Immunities::PRICKLE,
            Hazard::Teletransporter => Immunities::TELETRANSPORTER,
            Hazard::Stream => Immunities::STREAM,
            Hazard::Sensor => Immunities::SENSOR,
            Hazard::Switch => Immunities::SWITCH,
            Hazard::Explosion => Immunities::EXPLOSION,
        }
    }
}

/// Map entity classes a state may treat as blocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Obstacle {
    Stairs,
    Sensor,
    Jumper,
    Separator,
    Teletransporter,
}

/// What happens to a carried object when the state holding it is replaced.
///
/// Declared by the *receiving* state and enacted by the outgoing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
pub enum ResourcePolicy {
    /// The next state takes over the object.
    Keep,
    /// The object is released into the world as a projectile.
    #[default]
    Throw,
    /// The object is discarded.
    Destroy,
}

/// Kind of liftable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum CarriedKind {
    Pot,
    Bush,
    Stone,
    Bomb,
}

impl CarriedKind {
    /// Lift ability level required to lift this object.
    pub fn weight(self) -> u8 {
        match self {
            CarriedKind::Pot | CarriedKind::Bush | CarriedKind::Bomb => 1,
            CarriedKind::Stone => 2,
        }
    }

    /// Damage dealt to enemies when thrown at them.
    pub fn damage(self) -> u8 {
        match self {
            CarriedKind::Bush => 1,
            CarriedKind::Pot | CarriedKind::Bomb => 2,
            CarriedKind::Stone => 4,
        }
    }
}

/// What is attacking the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attacker {
    Enemy,
    Projectile,
    Explosion,
    Script,
}

/// Inventory items that can be assigned to an item slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ItemKind {
    Boomerang,
    Hookshot,
    Bow,
    Lamp,
    Bottle,
    Feather,
}

/// Way the avatar takes a staircase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StairsWay {
    Up,
    Down,
}

/// Behavioral modes of the avatar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StateKind {
    Free,
    SwordSwinging,
    Lifting,
    Carrying,
    Jumping,
    UsingItem,
    Hookshot,
    Boomerang,
    Bow,
    Stream,
    BackToSolidGround,
    GameOver,
    Frozen,
    ForcedWalking,
    Running,
    Stairs,
    Grabbing,
    Swimming,
    Falling,
    Plunging,
    Hurt,
    Treasure,
    Victory,
}
