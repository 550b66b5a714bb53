/// Level generation: platforms, enemy roster, collectibles and hazard
/// schedule for a 1-based level index.
///
/// Placement is random; counts are not.  Level `n` always carries
/// `BASE_COLLECTIBLES + (n - 1)` normal collectibles plus exactly one trap.
use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::{
    BASE_COLLECTIBLES, BOSS_HP_BASE, BOSS_HP_PER_LEVEL, BOSS_TRIGGER_X, COLLECTIBLE_LIFT,
    COLLECTIBLE_SIZE, ELEVATED_LIMIT_Y, ENEMY_COUNT_CAP, ENEMY_SAFE_X, ENEMY_SCORE, ENEMY_SIZE,
    ENEMY_SPEED_BASE, ENEMY_SPEED_PER_LEVEL, FLOAT_PHASE_MAX, GROUND_HEIGHT, GROUND_Y, LEVEL_CYCLE,
    METEOR_DELAY, METEOR_LEVEL_INTERVAL, SEGMENTS_PER_LEVEL, SEGMENT_WIDTH, WIND_FIRST_DELAY,
    WIND_REPEAT_DELAY, WORLD_BOSS_HP_FACTOR,
};
use crate::entities::{
    Body, BossKind, BossPlan, Collectible, CollectibleKind, Enemy, HazardKind, Platform, Rect,
    ScheduledHazard,
};

/// Elevated platform shapes, one screen wide each: `(x, y, width)`.
const LAYOUTS: [&[(f32, f32, f32)]; 5] = [
    &[(50.0, 480.0, 100.0), (200.0, 400.0, 100.0), (350.0, 320.0, 100.0), (500.0, 240.0, 100.0), (650.0, 160.0, 100.0), (400.0, 100.0, 150.0)],
    &[(100.0, 450.0, 80.0), (100.0, 350.0, 80.0), (100.0, 250.0, 80.0), (600.0, 450.0, 80.0), (600.0, 350.0, 80.0), (600.0, 250.0, 80.0), (350.0, 150.0, 100.0)],
    &[(50.0, 500.0, 100.0), (650.0, 500.0, 100.0), (150.0, 400.0, 100.0), (550.0, 400.0, 100.0), (250.0, 300.0, 100.0), (450.0, 300.0, 100.0), (350.0, 180.0, 100.0)],
    &[(50.0, 450.0, 80.0), (200.0, 350.0, 80.0), (50.0, 250.0, 80.0), (400.0, 250.0, 80.0), (650.0, 450.0, 80.0), (500.0, 350.0, 80.0), (650.0, 250.0, 80.0)],
    &[(350.0, 500.0, 100.0), (150.0, 400.0, 80.0), (550.0, 400.0, 80.0), (50.0, 300.0, 80.0), (650.0, 300.0, 80.0), (250.0, 200.0, 300.0)],
];

pub const THEME_COUNT: usize = LAYOUTS.len();
const PLATFORM_HEIGHT: f32 = 20.0;
/// Horizontal nudge per theme step applied to the second segment.
const THEME_SHIFT: f32 = 10.0;

/// Everything `compute::start_level` needs to populate the world.
#[derive(Clone, Debug)]
pub struct LevelLayout {
    pub index: u32,
    pub theme: usize,
    pub world_width: f32,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    /// Normal collectibles to pick up.
    pub required: usize,
    pub enemy_speed: f32,
    pub boss_plan: BossPlan,
    pub hazards: Vec<ScheduledHazard>,
}

pub fn theme_for(level: u32) -> usize {
    (level.saturating_sub(1) as usize) % THEME_COUNT
}

pub fn collectible_count(level: u32) -> usize {
    BASE_COLLECTIBLES + level.saturating_sub(1) as usize
}

pub fn enemy_count(level: u32) -> usize {
    (level as usize + 1).min(ENEMY_COUNT_CAP)
}

pub fn enemy_speed(level: u32) -> f32 {
    ENEMY_SPEED_BASE + level as f32 * ENEMY_SPEED_PER_LEVEL
}

pub fn boss_hp(level: u32, kind: BossKind) -> u32 {
    let hp = BOSS_HP_BASE + BOSS_HP_PER_LEVEL * level.saturating_sub(1);
    match kind {
        BossKind::WorldBoss => hp * WORLD_BOSS_HP_FACTOR,
        BossKind::Archer | BossKind::Warlock => hp,
    }
}

/// Which boss, if any, a level produces.
pub fn boss_plan(level: u32) -> BossPlan {
    let trigger_x = BOSS_TRIGGER_X as i32;
    match level % LEVEL_CYCLE {
        2 => BossPlan::Triggered { kind: BossKind::Archer, trigger_x },
        3 => BossPlan::Triggered { kind: BossKind::Warlock, trigger_x },
        0 => BossPlan::Immediate { kind: BossKind::WorldBoss },
        _ => BossPlan::None,
    }
}

/// Delayed hazards: wind on odd levels past the first, meteors every
/// fifth level.
pub fn hazard_schedule(level: u32) -> Vec<ScheduledHazard> {
    let mut schedule = Vec::new();
    if level > 1 && level % 2 == 1 {
        schedule.push(ScheduledHazard {
            kind: HazardKind::WindGust,
            ticks_left: WIND_FIRST_DELAY,
            repeat_every: Some(WIND_REPEAT_DELAY),
        });
    }
    if level % METEOR_LEVEL_INTERVAL == 0 {
        schedule.push(ScheduledHazard {
            kind: HazardKind::MeteorShower,
            ticks_left: METEOR_DELAY,
            repeat_every: None,
        });
    }
    schedule
}

/// Ground strip plus one layout per segment.  The first segment uses the
/// level's theme, the next ones rotate through the following themes and are
/// nudged sideways by the theme index.
pub fn platforms_for(theme: usize) -> Vec<Platform> {
    let world_width = SEGMENT_WIDTH * SEGMENTS_PER_LEVEL as f32;
    let mut platforms = vec![Platform {
        rect: Rect::new(0.0, GROUND_Y, world_width, GROUND_HEIGHT),
        ground: true,
    }];

    for segment in 0..SEGMENTS_PER_LEVEL {
        let layout = LAYOUTS[(theme + segment) % THEME_COUNT];
        let origin = segment as f32 * SEGMENT_WIDTH;
        let shift = if segment == 0 { 0.0 } else { theme as f32 * THEME_SHIFT };
        for &(x, y, w) in layout {
            platforms.push(Platform {
                rect: Rect::new(origin + x + shift, y, w, PLATFORM_HEIGHT),
                ground: false,
            });
        }
    }
    platforms
}

fn place_collectibles(platforms: &[Platform], level: u32, rng: &mut impl Rng) -> Vec<Collectible> {
    let mut eligible: Vec<&Platform> = platforms
        .iter()
        .filter(|p| !p.ground && p.rect.y < ELEVATED_LIMIT_Y)
        .collect();
    if eligible.is_empty() {
        return Vec::new();
    }
    eligible.shuffle(rng);

    let total = collectible_count(level) + 1;
    let mut collectibles: Vec<Collectible> = (0..total)
        .map(|i| {
            let plat = eligible[i % eligible.len()].rect;
            let span = (plat.w - COLLECTIBLE_SIZE - 5.0).max(1.0);
            Collectible {
                rect: Rect::new(
                    plat.x + rng.gen_range(0.0..span) + 5.0,
                    plat.y - COLLECTIBLE_LIFT,
                    COLLECTIBLE_SIZE,
                    COLLECTIBLE_SIZE,
                ),
                active: true,
                kind: CollectibleKind::Normal,
                float_phase: rng.gen_range(0.0..FLOAT_PHASE_MAX),
            }
        })
        .collect();

    let trap = rng.gen_range(0..collectibles.len());
    collectibles[trap].kind = CollectibleKind::Trap;
    collectibles
}

fn place_enemies(platforms: &[Platform], level: u32, world_width: f32, rng: &mut impl Rng) -> Vec<Enemy> {
    let speed = enemy_speed(level);
    let elevated: Vec<&Platform> = platforms
        .iter()
        .filter(|p| !p.ground && p.rect.x >= ENEMY_SAFE_X && p.rect.w > ENEMY_SIZE)
        .collect();

    (0..enemy_count(level))
        .map(|i| {
            // Every third enemy walks the ground; the rest start on ledges.
            let (x, y) = match elevated.choose(rng) {
                Some(plat) if i % 3 != 0 => {
                    let plat = plat.rect;
                    (plat.x + rng.gen_range(0.0..(plat.w - ENEMY_SIZE)), plat.y - ENEMY_SIZE)
                }
                _ => (
                    rng.gen_range(ENEMY_SAFE_X..(world_width - ENEMY_SIZE)),
                    GROUND_Y - ENEMY_SIZE,
                ),
            };
            let mut body = Body::new(x, y, ENEMY_SIZE, ENEMY_SIZE);
            body.vx = if rng.gen_bool(0.5) { speed } else { -speed };
            Enemy {
                body,
                alive: true,
                speed,
                bounce_phase: rng.gen_range(0.0..10.0),
                score_value: ENEMY_SCORE,
            }
        })
        .collect()
}

/// Produce a complete level description.
pub fn generate_level(level: u32, rng: &mut impl Rng) -> LevelLayout {
    let level = level.max(1);
    let theme = theme_for(level);
    let world_width = SEGMENT_WIDTH * SEGMENTS_PER_LEVEL as f32;
    let platforms = platforms_for(theme);
    let collectibles = place_collectibles(&platforms, level, rng);
    let required = collectibles
        .iter()
        .filter(|c| c.kind == CollectibleKind::Normal)
        .count();
    let enemies = place_enemies(&platforms, level, world_width, rng);

    LevelLayout {
        index: level,
        theme,
        world_width,
        platforms,
        enemies,
        collectibles,
        required,
        enemy_speed: enemy_speed(level),
        boss_plan: boss_plan(level),
        hazards: hazard_schedule(level),
    }
}
