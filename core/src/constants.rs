use crate::fixed::FixedPoint;

// All values are per-tick unless noted. Raw literals are round(v * 2^32).

// Field
pub const FIELD_WIDTH: usize = 800;
pub const FIELD_HEIGHT: i32 = 600;
pub const FIELD_RIGHT: FixedPoint = FixedPoint::from_int(FIELD_WIDTH as i32);
/// Shots climbing past this are discarded.
pub const CEILING: FixedPoint = FixedPoint::from_int(2000);

// Physics
pub const GRAVITY: FixedPoint = FixedPoint::from_raw(429_496_730); // 0.1
pub const WIND_FACTOR: FixedPoint = FixedPoint::from_raw(42_949_673); // 0.01
pub const SPEED_FACTOR: FixedPoint = FixedPoint::from_raw(644_245_094); // 0.15

// Aiming
pub const ANGLE_SPEED: FixedPoint = FixedPoint::from_raw(85_899_346); // 0.02 rad per step
pub const POWER_SPEED: FixedPoint = FixedPoint::from_raw(2_147_483_648); // 0.5 per step
pub const MIN_ANGLE: FixedPoint = FixedPoint::ZERO;
pub const MAX_ANGLE: FixedPoint = FixedPoint::PI;
pub const MIN_POWER: FixedPoint = FixedPoint::ZERO;
pub const MAX_POWER: FixedPoint = FixedPoint::from_int(100);
pub const DEFAULT_ANGLE: FixedPoint = FixedPoint::QUARTER_PI;
pub const DEFAULT_POWER: FixedPoint = FixedPoint::from_int(50);

// Projectile
pub const SPAWN_OFFSET_Y: FixedPoint = FixedPoint::from_int(20);

// Player hit-box (half extents, axis-aligned)
pub const HIT_BOX_HALF_WIDTH: FixedPoint = FixedPoint::from_int(10);
pub const HIT_BOX_HALF_HEIGHT: FixedPoint = FixedPoint::from_int(10);

// Health / combat
pub const MAX_HEALTH: i32 = 100;
pub const HIT_DAMAGE: i32 = 25;

// Spawns
pub const PLAYER_0_SPAWN_X: i32 = 100;
pub const PLAYER_1_SPAWN_X: i32 = 700;

// Wind
pub const DEFAULT_MAX_WIND: FixedPoint = FixedPoint::from_int(5);
/// Largest `Rules::max_wind` a match config may ask for.
pub const WIND_LIMIT: FixedPoint = FixedPoint::from_int(100);
/// Wind is drawn in whole steps of 1/WIND_STEPS_PER_UNIT.
pub const WIND_STEPS_PER_UNIT: i32 = 10;

// Terrain
pub const TERRAIN_BASE: FixedPoint = FixedPoint::from_int(100);

// Trig
pub const TRIG_TABLE_SIZE: usize = 1024;
