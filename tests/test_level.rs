use rand::rngs::StdRng;
use rand::SeedableRng;

use arcade_engine::constants::*;
use arcade_engine::entities::*;
use arcade_engine::level::*;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── generate_level ────────────────────────────────────────────────────────────

#[test]
fn every_level_has_exactly_one_trap() {
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        for level in 1..=20 {
            let layout = generate_level(level, &mut rng);
            let traps = layout
                .collectibles
                .iter()
                .filter(|c| c.kind == CollectibleKind::Trap)
                .count();
            let normal = layout.collectibles.len() - traps;
            assert_eq!(traps, 1, "level {level} seed {seed}");
            assert_eq!(normal, BASE_COLLECTIBLES + level as usize - 1);
            assert_eq!(layout.required, normal);
        }
    }
}

#[test]
fn collectibles_float_above_elevated_platforms() {
    let mut rng = seeded_rng();
    for level in 1..=10 {
        let layout = generate_level(level, &mut rng);
        for coin in &layout.collectibles {
            assert!(coin.active);
            let on_ledge = layout.platforms.iter().any(|p| {
                !p.ground
                    && p.rect.y < ELEVATED_LIMIT_Y
                    && coin.rect.y == p.rect.y - COLLECTIBLE_LIFT
                    && coin.rect.x >= p.rect.x
                    && coin.rect.right() <= p.rect.right()
            });
            assert!(on_ledge, "coin at {:?} not over a ledge", coin.rect);
        }
    }
}

#[test]
fn enemy_roster_scales_and_caps() {
    let mut rng = seeded_rng();
    for level in 1..=12 {
        let layout = generate_level(level, &mut rng);
        assert_eq!(layout.enemies.len(), (level as usize + 1).min(ENEMY_COUNT_CAP));
        for enemy in &layout.enemies {
            assert!(enemy.alive);
            assert!(enemy.body.x >= ENEMY_SAFE_X);
            assert_eq!(enemy.body.vx.abs(), enemy_speed(level));
            assert!(enemy.body.x + enemy.body.w <= layout.world_width);
        }
    }
}

#[test]
fn level_zero_is_treated_as_first() {
    let mut rng = seeded_rng();
    let layout = generate_level(0, &mut rng);
    assert_eq!(layout.index, 1);
    assert_eq!(layout.required, BASE_COLLECTIBLES);
}

#[test]
fn layout_is_two_screens_with_one_ground() {
    let mut rng = seeded_rng();
    let layout = generate_level(3, &mut rng);
    assert_eq!(layout.world_width, SEGMENT_WIDTH * 2.0);
    let grounds: Vec<_> = layout.platforms.iter().filter(|p| p.ground).collect();
    assert_eq!(grounds.len(), 1);
    assert_eq!(grounds[0].rect.y, GROUND_Y);
    assert_eq!(grounds[0].rect.w, layout.world_width);
    assert!(layout.platforms.iter().any(|p| !p.ground && p.rect.x >= SEGMENT_WIDTH));
}

#[test]
fn themes_cycle() {
    assert_eq!(theme_for(1), 0);
    assert_eq!(theme_for(5), 4);
    assert_eq!(theme_for(6), 0);
    assert_ne!(platforms_for(0), platforms_for(1));
    assert_eq!(platforms_for(2), platforms_for(THEME_COUNT + 2));
}

// ── Scaling rules ─────────────────────────────────────────────────────────────

#[test]
fn enemy_speed_grows_per_level() {
    assert_eq!(enemy_speed(1), 1.25);
    assert_eq!(enemy_speed(4), 2.0);
    assert!(enemy_speed(9) > enemy_speed(8));
}

#[test]
fn boss_hp_scales_linearly() {
    assert_eq!(boss_hp(2, BossKind::Archer), 8);
    assert_eq!(boss_hp(3, BossKind::Warlock), 11);
    for level in 1..20 {
        assert_eq!(boss_hp(level + 1, BossKind::Archer) - boss_hp(level, BossKind::Archer), 3);
    }
    assert_eq!(boss_hp(4, BossKind::WorldBoss), 3 * boss_hp(4, BossKind::Archer));
}

#[test]
fn boss_plan_follows_four_level_cycle() {
    assert_eq!(boss_plan(1), BossPlan::None);
    assert_eq!(boss_plan(5), BossPlan::None);
    assert!(matches!(boss_plan(2), BossPlan::Triggered { kind: BossKind::Archer, .. }));
    assert!(matches!(boss_plan(3), BossPlan::Triggered { kind: BossKind::Warlock, .. }));
    assert!(matches!(boss_plan(7), BossPlan::Triggered { kind: BossKind::Warlock, .. }));
    assert_eq!(boss_plan(4), BossPlan::Immediate { kind: BossKind::WorldBoss });
    assert_eq!(boss_plan(8), BossPlan::Immediate { kind: BossKind::WorldBoss });
}

#[test]
fn hazard_schedule_per_level() {
    assert!(hazard_schedule(1).is_empty());
    assert!(hazard_schedule(2).is_empty());

    let third = hazard_schedule(3);
    assert_eq!(
        third,
        vec![ScheduledHazard {
            kind: HazardKind::WindGust,
            ticks_left: WIND_FIRST_DELAY,
            repeat_every: Some(WIND_REPEAT_DELAY),
        }]
    );

    let fifth: Vec<HazardKind> = hazard_schedule(5).iter().map(|h| h.kind).collect();
    assert_eq!(fifth, vec![HazardKind::WindGust, HazardKind::MeteorShower]);

    let tenth = hazard_schedule(10);
    assert_eq!(tenth.len(), 1);
    assert_eq!(tenth[0].kind, HazardKind::MeteorShower);
    assert_eq!(tenth[0].repeat_every, None);
}
