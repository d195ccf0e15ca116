//! Gameplay tuning. Distances are arena units, durations are frames.

// ── Arena & timing ───────────────────────────────────────────────────────────

pub const ARENA_WIDTH: f32 = 1600.0;
pub const ARENA_HEIGHT: f32 = 900.0;
pub const TICKS_PER_SECOND: u32 = 50;
pub const GAME_OVER_PAUSE_MS: u64 = 2000;

// ── Avatar ───────────────────────────────────────────────────────────────────

pub const AVATAR_START: (f32, f32) = (900.0, 400.0);
pub const NORMAL_SPEED: u32 = 10;
pub const BOOST_SPEED: u32 = 20;
pub const STUN_RECOVERY_FRAMES: u32 = 80;
pub const HYPER_LIFE: i32 = 500;

// ── Projectiles ──────────────────────────────────────────────────────────────

pub const BEAM_SPEED: f32 = 10.0;
pub const CONTINUOUS_BEAM_SPEED: f32 = 1.0;
pub const CONTINUOUS_BEAM_LIFE: i32 = 100;
/// Continuous beam centre offset, in avatar extents along the facing.
pub const CONTINUOUS_BEAM_REACH: f32 = 8.5;

// ── Bombs ────────────────────────────────────────────────────────────────────

pub const BOMB_RADIUS_MIN: u32 = 10;
pub const BOMB_RADIUS_MAX: u32 = 50;
pub const AIMED_BOMB_SPEED: f32 = 15.0;
pub const FALLING_BOMB_SPEED: f32 = 10.0;
/// Vertical velocity of bombs dropped while the avatar is not at normal speed.
pub const STUNNED_BOMB_VY: f32 = 3.0;
pub const BOMB_COLORS: [(u8, u8, u8); 6] = [
    (255, 0, 0),
    (0, 255, 0),
    (0, 0, 255),
    (255, 255, 0),
    (255, 0, 255),
    (0, 255, 255),
];

// ── Enemies ──────────────────────────────────────────────────────────────────

pub const ENEMY_DESCENT_SPEED: f32 = 6.0;
pub const ENEMY_STOP_MIN: f32 = 50.0;
pub const ENEMY_DROP_INTERVAL_MIN: u64 = 50;
pub const ENEMY_DROP_INTERVAL_MAX: u64 = 200;
pub const BOSS_DROP_INTERVAL: u64 = 50;
pub const BOSS_SCORE_THRESHOLD: u32 = 100;
pub const ENEMY_SPAWN_EVERY: u64 = 200;
pub const ALIEN_SPAWN_EVERY: u64 = 300;
pub const ALIEN_SPEED: f32 = 8.0;

// ── Effects ──────────────────────────────────────────────────────────────────

pub const SHIELD_THICKNESS: f32 = 20.0;
pub const SHIELD_LIFE: i32 = 400;
pub const GRAVITY_LIFE: i32 = 400;
pub const EXPLOSION_FRAME_TICKS: i32 = 10;

// ── Base ─────────────────────────────────────────────────────────────────────

pub const HEALTH_MAX: i32 = 800;
pub const HEALTH_PER_HIT: i32 = 100;
pub const HEALTH_BAR_SIZE: (f32, f32) = (800.0, 30.0);
pub const BASE_LINE_HEIGHT: f32 = 10.0;
