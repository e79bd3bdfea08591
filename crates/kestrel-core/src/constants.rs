//! Simulation constants and tuning parameters.

// --- Scheduling ---

/// Default simulated milliseconds per simulation step.
pub const DEFAULT_TIMESTEP_MS: u64 = 10;

/// Default cap on simulation steps run within one real frame.
pub const DEFAULT_MAX_STEPS_PER_FRAME: u32 = 10;

/// Accumulated lag at or above which the scheduler assumes a one-time stall
/// and drops the time instead of catching up.
pub const DEFAULT_STALL_THRESHOLD_MS: u64 = 200;

// --- Map ---

/// Side of a map tile in pixels.
pub const TILE_SIZE: i32 = 8;

/// Avatar bounding box size in pixels.
pub const AVATAR_WIDTH: i32 = 16;
pub const AVATAR_HEIGHT: i32 = 16;

/// Distance in front of the avatar scanned for a facing entity.
pub const FACING_REACH: i32 = 4;

// --- Avatar movement (pixels per second) ---

pub const WALKING_SPEED: u32 = 88;
pub const CARRYING_SPEED: u32 = 88;
pub const SWIMMING_SPEED: u32 = 44;
pub const RUNNING_SPEED: u32 = 300;
pub const HURT_SPEED: u32 = 120;
pub const BACK_TO_SOLID_GROUND_SPEED: u32 = 144;
pub const STAIRS_SPEED: u32 = 40;

/// Distance travelled when bounced back by a hit.
pub const HURT_DISTANCE: u32 = 24;

pub const WANDERER_SPEED: u32 = 32;

// --- State durations (simulated ms) ---

pub const SWORD_SWING_DURATION_MS: u64 = 300;
pub const LIFTING_DURATION_MS: u64 = 240;
pub const BOOMERANG_PREPARING_MS: u64 = 150;
pub const BOW_DRAWING_MS: u64 = 250;
pub const ITEM_USAGE_DURATION_MS: u64 = 500;
pub const RUNNING_CHARGE_MS: u64 = 500;
pub const RUNNING_BOUNCE_MS: u64 = 400;
pub const FALLING_DURATION_MS: u64 = 600;
pub const PLUNGING_DURATION_MS: u64 = 800;
pub const HURT_DURATION_MS: u64 = 200;
pub const TREASURE_DURATION_MS: u64 = 1_500;
pub const VICTORY_DURATION_MS: u64 = 1_500;
pub const GAME_OVER_DELAY_MS: u64 = 2_000;
pub const STAIRS_PHASE_MS: u64 = 200;

/// Delay the avatar must push against a jumper before jumping.
pub const JUMPER_DELAY_MS: u64 = 200;

// --- Projectiles ---

/// Side of the square bounding box of projectiles.
pub const PROJECTILE_SIZE: i32 = 8;

pub const THROW_SPEED: u32 = 200;
/// Horizontal distance covered by a thrown object before it lands.
pub const THROW_DISTANCE: u32 = 64;
/// Initial displayed height of a thrown object.
pub const THROW_HEIGHT: i32 = 18;

pub const BOOMERANG_SPEED: u32 = 160;
pub const BOOMERANG_DISTANCE: u32 = 120;
pub const ARROW_SPEED: u32 = 192;
pub const HOOKSHOT_SPEED: u32 = 192;
pub const HOOKSHOT_DISTANCE: u32 = 120;

/// Delay between two recomputations of a target movement's trajectory.
pub const TARGET_RECOMPUTATION_MS: u64 = 150;

/// Delay between two steps of a jump trajectory.
pub const JUMP_STEP_DELAY_MS: u64 = 10;

/// Delay between two height updates of a falling object.
pub const FALL_STEP_DELAY_MS: u64 = 40;

/// Random walkers pick a new direction after at most this long.
pub const RANDOM_MAX_DIRECTION_MS: u64 = 3_000;
pub const RANDOM_MIN_DIRECTION_MS: u64 = 500;

/// Bombs explode this long after being lifted.
pub const BOMB_FUSE_MS: u64 = 3_000;
pub const EXPLOSION_RADIUS: f64 = 24.0;
pub const EXPLOSION_DAMAGE: u32 = 2;

// --- Life ---

pub const DEFAULT_MAX_LIFE: u32 = 12;
pub const FALL_DAMAGE: u32 = 2;
pub const PLUNGING_DAMAGE: u32 = 1;
pub const PRICKLE_DAMAGE: u32 = 2;
