/// All game entity types. Pure data, no game rules.
use std::fmt;

use crate::leaderboard::Leaderboard;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in world units; `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

// ── Shared mobile capability ──────────────────────────────────────────────────

/// Position, velocity and collision box shared by everything that moves
/// under physics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub w: f32,
    pub h: f32,
    pub on_ground: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h, ..Self::default() }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Form {
    Normal,
    /// The egg: bouncy, drifts with momentum, falls through the ground.
    Alternate,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    /// Jumps used since last landing.
    pub jump_count: u8,
    pub facing: Facing,
    pub form: Form,
    /// Counts down from `ATTACK_TICKS`; the attack window is open while > 0.
    pub attack_timer: u32,
    pub stationary_ticks: u32,
    pub invincible_ticks: u32,
    /// Egg roll angle, radians.
    pub rotation: f32,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub body: Body,
    pub alive: bool,
    pub speed: f32,
    /// Cosmetic hop phase.
    pub bounce_phase: f32,
    pub score_value: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossKind {
    /// Mini-boss that fires arrows on a slow cadence.
    Archer,
    /// Mini-boss that fires arrows quickly and charges a laser.
    Warlock,
    /// Bonus-level boss; defeating it opens the shop.
    WorldBoss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossPhase {
    Patrol,
    RangedAttack,
    ChargingSpecial,
    SpecialActive,
}

/// Boss-only state layered on top of a plain `Body`.
#[derive(Clone, Debug)]
pub struct BossBehavior {
    pub kind: BossKind,
    pub hp: u32,
    pub max_hp: u32,
    pub phase: BossPhase,
    /// Ticks spent in the current phase.
    pub phase_timer: u32,
    /// Ticks since the last arrow.
    pub arrow_timer: u32,
    /// Recomputed toward the player on every ranged attack.
    pub attack_dir: Facing,
    pub score_value: u32,
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub body: Body,
    pub behavior: BossBehavior,
}

/// How (and whether) a level produces its boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossPlan {
    None,
    /// Spawns once the collectible quota is met and the player crosses
    /// `trigger_x`.
    Triggered { kind: BossKind, trigger_x: i32 },
    /// Present from the first tick of the level.
    Immediate { kind: BossKind },
}

// ── Collectibles & projectiles ────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectibleKind {
    Normal,
    Trap,
}

#[derive(Clone, Debug)]
pub struct Collectible {
    pub rect: Rect,
    pub active: bool,
    pub kind: CollectibleKind,
    /// Bobbing phase, radians.
    pub float_phase: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileKind {
    PlayerShot,
    EnemyArrow,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub rect: Rect,
    pub vx: f32,
    pub kind: ProjectileKind,
    pub damage: u32,
    pub alive: bool,
}

// ── Level geometry ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Platform {
    pub rect: Rect,
    /// The full-width floor strip; the egg falls straight through it.
    pub ground: bool,
}

// ── Hazards & effects ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardKind {
    WindGust,
    MeteorShower,
}

/// A hazard that starts after `ticks_left` ticks and optionally re-arms.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledHazard {
    pub kind: HazardKind,
    pub ticks_left: u32,
    pub repeat_every: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct WindGust {
    pub rect: Rect,
    pub vx: f32,
    pub active: bool,
}

#[derive(Clone, Debug)]
pub struct Meteor {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    pub rotation: f32,
    pub active: bool,
}

#[derive(Clone, Debug)]
pub enum Hazard {
    Wind(WindGust),
    Meteor(Meteor),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Splash,
    Lightning,
}

/// A death animation anchored at a world point.
#[derive(Clone, Debug)]
pub struct Effect {
    pub kind: EffectKind,
    pub x: f32,
    pub y: f32,
    pub ticks_left: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayKind {
    /// Alternating red/orange wash when a boss appears.
    BossFlash,
    /// Full white screen from a lightning strike.
    Whiteout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overlay {
    pub kind: OverlayKind,
    pub ticks_left: u32,
    pub duration: u32,
}

// ── Cosmetics ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Dust,
    Gold,
    Blood,
    Spark,
    Shell,
    Fire,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: u32,
    pub tint: Tint,
}

#[derive(Clone, Debug)]
pub struct Star {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
}

#[derive(Clone, Debug, Default)]
pub struct Background {
    pub stars: Vec<Star>,
    pub clouds: Vec<Cloud>,
}

// ── Run bookkeeping ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathCause {
    SlainByEnemy,
    EggSplash,
    LightningStrike,
    CrushedByMeteor,
    PiercedByArrow,
    VaporizedByLaser,
}

impl DeathCause {
    pub fn label(self) -> &'static str {
        match self {
            DeathCause::SlainByEnemy => "Slain by Enemy",
            DeathCause::EggSplash => "Egg Splash",
            DeathCause::LightningStrike => "Lightning Strike",
            DeathCause::CrushedByMeteor => "Crushed by Meteor",
            DeathCause::PiercedByArrow => "Pierced by Arrow",
            DeathCause::VaporizedByLaser => "Vaporized by Laser",
        }
    }
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Permanent purchases; survive level changes, reset on game over.
#[derive(Clone, Debug, PartialEq)]
pub struct Upgrades {
    pub max_lives: u32,
    pub speed_multiplier: f32,
    pub damage_multiplier: f32,
    pub health_bought: bool,
    pub speed_bought: bool,
    pub attack_bought: bool,
}

impl Default for Upgrades {
    fn default() -> Self {
        Self {
            max_lives: crate::constants::BASE_LIVES,
            speed_multiplier: 1.0,
            damage_multiplier: 1.0,
            health_bought: false,
            speed_bought: false,
            attack_bought: false,
        }
    }
}

/// Process-wide run state.  One instance; reset on restart.
#[derive(Clone, Debug)]
pub struct RunState {
    pub level: u32,
    pub score: u32,
    pub lives: u32,
    pub collected: usize,
    pub required: usize,
    /// Trap pickups over the whole run.
    pub transformations: u32,
    pub enemy_speed: f32,
    pub boss_plan: BossPlan,
    pub hazards: Vec<Hazard>,
    pub scheduled: Vec<ScheduledHazard>,
    pub effects: Vec<Effect>,
    pub overlay: Option<Overlay>,
    pub death_cause: Option<DeathCause>,
    pub upgrades: Upgrades,
    /// Dice jackpot: immune to damage until the next level is cleared.
    pub invulnerable: bool,
    pub tick: u64,
}

// ── World ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct World {
    pub width: f32,
    pub platforms: Vec<Platform>,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub collectibles: Vec<Collectible>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub background: Background,
    /// Left edge of the viewport in world units.
    pub camera_x: f32,
}

// ── Screens ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiceOutcome {
    Invulnerable,
    Neutral,
    Bust,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiceRoll {
    pub dice: [u32; 3],
    pub total: u32,
    pub outcome: DiceOutcome,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShopPanel {
    pub dice: Option<DiceRoll>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameOverPanel {
    /// `Some` while the player is typing a name for the leaderboard.
    pub name_entry: Option<String>,
    pub final_score: u32,
    pub final_level: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    Menu,
    Playing,
    Paused,
    Transitioning { ticks_left: u32, next_level: u32 },
    /// A death effect is still animating before the game-over panel.
    Resolving { ticks_left: u32 },
    GameOver(GameOverPanel),
    Shop(ShopPanel),
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GameState {
    pub screen: Screen,
    pub run: RunState,
    pub world: World,
    pub leaderboard: Leaderboard,
    pub muted: bool,
}
