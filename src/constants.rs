/// Gameplay tunables.  All distances are world units, all durations are ticks
/// of the fixed 60 Hz simulation.

// ── World & viewport ──────────────────────────────────────────────────────────

pub const TICKS_PER_SECOND: u32 = 60;

pub const VIEW_WIDTH: f32 = 800.0;
pub const VIEW_HEIGHT: f32 = 600.0;

/// Every level is two screens wide.
pub const SEGMENT_WIDTH: f32 = 800.0;
pub const SEGMENTS_PER_LEVEL: usize = 2;

pub const GROUND_Y: f32 = 580.0;
pub const GROUND_HEIGHT: f32 = 20.0;

/// Platforms whose top sits above this line are "elevated" and may hold
/// collectibles.
pub const ELEVATED_LIMIT_Y: f32 = 550.0;

/// The camera scrolls once the player leaves the middle band of the viewport.
pub const CAMERA_THRESHOLD: f32 = VIEW_WIDTH * 0.4;

// ── Physics ───────────────────────────────────────────────────────────────────

pub const GRAVITY: f32 = 0.55;
pub const PLAYER_SPEED: f32 = 5.0;
pub const JUMP_STRENGTH: f32 = -13.5;
pub const MAX_JUMPS: u8 = 2;
pub const HEAVY_LANDING_SPEED: f32 = 5.0;

/// Side-wall restitution for the egg form.
pub const EGG_WALL_BOUNCE: f32 = -0.5;
pub const EGG_ACCEL: f32 = 0.2;
pub const EGG_FRICTION: f32 = 0.98;
pub const EGG_MAX_SPEED: f32 = 6.0;
pub const EGG_ACCEL_FAST: f32 = 0.5;
pub const EGG_FRICTION_FAST: f32 = 0.995;
pub const EGG_MAX_SPEED_FAST: f32 = 12.0;
/// Speed kick applied when the trap collectible turns the player into an egg.
pub const EGG_POP_VY: f32 = -5.0;

pub const STATIONARY_EPSILON: f32 = 0.3;
pub const STATIONARY_LIMIT: u32 = 180;
pub const SPARK_THRESHOLD: u32 = 60;
/// Transformations needed before the egg starts attracting lightning.
pub const LIGHTNING_TRANSFORMATIONS: u32 = 3;

/// Patrol enemies turn around this far before the platform edge.
pub const EDGE_PADDING: f32 = 2.0;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 40.0;
pub const EGG_WIDTH: f32 = 36.0;
pub const EGG_HEIGHT: f32 = 40.0;
pub const PLAYER_START_X: f32 = 50.0;
pub const PLAYER_START_Y: f32 = 500.0;
pub const BASE_LIVES: u32 = 3;

pub const ATTACK_TICKS: u32 = 20;
pub const ATTACK_REACH: f32 = 50.0;
pub const INVINCIBLE_TICKS: u32 = 120;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: f32 = 35.0;
pub const ENEMY_SPEED_BASE: f32 = 1.0;
pub const ENEMY_SPEED_PER_LEVEL: f32 = 0.25;
pub const ENEMY_COUNT_CAP: usize = 6;
pub const ENEMY_SAFE_X: f32 = 200.0;

// ── Boss ──────────────────────────────────────────────────────────────────────

pub const BOSS_SIZE: f32 = 60.0;
pub const BOSS_HP_BASE: u32 = 5;
pub const BOSS_HP_PER_LEVEL: u32 = 3;
pub const WORLD_BOSS_HP_FACTOR: u32 = 3;
pub const BOSS_SPEED_FACTOR: f32 = 0.5;
pub const BOSS_TRIGGER_X: f32 = 1100.0;
pub const BOSS_SPAWN_AHEAD: f32 = 400.0;
pub const BOSS_INTRO_TICKS: u32 = 60;
pub const BOSS_FLASH_TICKS: u32 = 60;

pub const ARROW_INTERVAL_SLOW: u32 = 90;
pub const ARROW_INTERVAL_FAST: u32 = 48;
pub const LASER_CHARGE_TIME: u32 = 240;
pub const LASER_DELAY: u32 = 90;
pub const LASER_DURATION: u32 = 72;
pub const LASER_WIDTH: f32 = 600.0;
pub const LASER_HEIGHT: f32 = 15.0;

/// Levels come in cycles of four: plain, archer boss, laser boss, world boss.
pub const LEVEL_CYCLE: u32 = 4;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const PROJECTILE_SPEED: f32 = 9.0;
pub const SHOT_WIDTH: f32 = 24.0;
pub const SHOT_HEIGHT: f32 = 12.0;
pub const SHOT_DAMAGE: u32 = 1;
pub const ARROW_WIDTH: f32 = 30.0;
pub const ARROW_HEIGHT: f32 = 5.0;
pub const ARROW_DAMAGE: u32 = 1;

// ── Collectibles ──────────────────────────────────────────────────────────────

pub const BASE_COLLECTIBLES: usize = 5;
pub const COLLECTIBLE_SIZE: f32 = 20.0;
pub const COLLECTIBLE_LIFT: f32 = 30.0;
pub const FLOAT_STEP: f32 = 0.1;
pub const FLOAT_PHASE_MAX: f32 = 6.0;

// ── Hazards ───────────────────────────────────────────────────────────────────

pub const WIND_FIRST_DELAY: u32 = 60;
pub const WIND_REPEAT_DELAY: u32 = 480;
pub const WIND_WIDTH: f32 = 40.0;
pub const WIND_SPEED: f32 = 8.0;
pub const WIND_START_X: f32 = -100.0;

pub const METEOR_LEVEL_INTERVAL: u32 = 5;
pub const METEOR_DELAY: u32 = 300;
pub const METEOR_COUNT: usize = 8;
pub const METEOR_SIZE: f32 = 30.0;

pub const LIGHTNING_TICKS: u32 = 20;
pub const WHITEOUT_AFTER: u32 = 15;
pub const SPLASH_TICKS: u32 = 30;

// ── State machine timers ──────────────────────────────────────────────────────

pub const LEVEL_TRANSITION_TICKS: u32 = 90;
pub const RESOLVE_TICKS: u32 = 60;

// ── Scoring & shop ────────────────────────────────────────────────────────────

pub const COIN_SCORE: u32 = 50;
pub const ENEMY_SCORE: u32 = 100;
pub const BOSS_SCORE_PER_LEVEL: u32 = 500;

pub const PRICE_HEALTH: u32 = 1500;
pub const PRICE_SPEED: u32 = 2500;
pub const PRICE_ATTACK: u32 = 1000;
pub const HEALTH_UPGRADE_LIVES: u32 = 2;
pub const SPEED_UPGRADE_STEP: f32 = 1.0;
pub const ATTACK_UPGRADE_STEP: f32 = 0.5;

pub const DICE_JACKPOT: u32 = 15;
pub const DICE_BUST: u32 = 5;

// ── Leaderboard ───────────────────────────────────────────────────────────────

pub const LEADERBOARD_SIZE: usize = 10;
pub const NAME_MAX_CHARS: usize = 12;
pub const DEFAULT_NAME: &str = "Ninja";

// ── Cosmetics ─────────────────────────────────────────────────────────────────

pub const PARTICLE_LIFE: u32 = 30;
pub const PARTICLES_PER_BURST: usize = 5;
pub const STAR_COUNT: usize = 30;
pub const CLOUD_COUNT: usize = 5;
