use rand::rngs::StdRng;
use rand::SeedableRng;

use arcade_engine::constants::*;
use arcade_engine::entities::*;
use arcade_engine::hazard::*;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn ground() -> Platform {
    Platform { rect: Rect::new(0.0, GROUND_Y, 1600.0, GROUND_HEIGHT), ground: true }
}

fn ledge() -> Platform {
    Platform { rect: Rect::new(1000.0, 400.0, 200.0, 20.0), ground: false }
}

fn coin_at(x: f32, y: f32) -> Collectible {
    Collectible {
        rect: Rect::new(x, y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE),
        active: true,
        kind: CollectibleKind::Normal,
        float_phase: 0.0,
    }
}

fn gust_at(x: f32) -> Hazard {
    Hazard::Wind(WindGust { rect: Rect::new(x, 0.0, WIND_WIDTH, VIEW_HEIGHT), vx: WIND_SPEED, active: true })
}

fn meteor_at(x: f32, y: f32, vy: f32) -> Hazard {
    Hazard::Meteor(Meteor {
        rect: Rect::new(x, y, METEOR_SIZE, METEOR_SIZE),
        vx: 0.0,
        vy,
        rotation: 0.0,
        active: true,
    })
}

// ── tick_schedule ─────────────────────────────────────────────────────────────

#[test]
fn repeating_wind_rearms() {
    let mut schedule = vec![ScheduledHazard {
        kind: HazardKind::WindGust,
        ticks_left: 1,
        repeat_every: Some(WIND_REPEAT_DELAY),
    }];
    assert_eq!(tick_schedule(&mut schedule), vec![HazardKind::WindGust]);
    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule[0].ticks_left, WIND_REPEAT_DELAY);

    for _ in 1..WIND_REPEAT_DELAY {
        assert!(tick_schedule(&mut schedule).is_empty());
    }
    assert_eq!(tick_schedule(&mut schedule), vec![HazardKind::WindGust]);
}

#[test]
fn one_shot_meteors_are_dropped() {
    let mut schedule = vec![
        ScheduledHazard { kind: HazardKind::MeteorShower, ticks_left: 2, repeat_every: None },
        ScheduledHazard { kind: HazardKind::WindGust, ticks_left: 10, repeat_every: Some(5) },
    ];
    assert!(tick_schedule(&mut schedule).is_empty());
    assert_eq!(tick_schedule(&mut schedule), vec![HazardKind::MeteorShower]);
    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule[0].kind, HazardKind::WindGust);
    assert_eq!(schedule[0].ticks_left, 8);
}

// ── spawn_hazard ──────────────────────────────────────────────────────────────

#[test]
fn gust_starts_left_of_the_view() {
    let mut rng = seeded_rng();
    let spawned = spawn_hazard(HazardKind::WindGust, 250.0, &mut rng);
    match spawned.as_slice() {
        [Hazard::Wind(gust)] => {
            assert_eq!(gust.rect.x, 250.0 + WIND_START_X);
            assert!(gust.vx > 0.0);
        }
        other => panic!("expected one gust, got {other:?}"),
    }
}

#[test]
fn shower_drops_from_above_the_view() {
    let mut rng = seeded_rng();
    let spawned = spawn_hazard(HazardKind::MeteorShower, 400.0, &mut rng);
    assert_eq!(spawned.len(), METEOR_COUNT);
    for hazard in &spawned {
        match hazard {
            Hazard::Meteor(m) => {
                assert!(m.rect.bottom() <= 0.0);
                assert!(m.rect.x >= 400.0 && m.rect.x < 400.0 + VIEW_WIDTH);
                assert!(m.vy > 0.0);
            }
            other => panic!("expected a meteor, got {other:?}"),
        }
    }
}

// ── step_hazards ──────────────────────────────────────────────────────────────

#[test]
fn gust_blows_coin_onto_a_ledge() {
    let mut rng = seeded_rng();
    let platforms = vec![ground(), ledge()];
    let mut coins = vec![coin_at(100.0, 550.0), coin_at(110.0, 550.0)];
    coins[1].active = false;
    let mut hazards = vec![gust_at(90.0)];

    step_hazards(&mut hazards, &mut coins, &platforms, 1600.0, &mut rng);

    let moved = coins[0].rect;
    assert_eq!(moved.y, 400.0 - COLLECTIBLE_LIFT);
    assert!(moved.x >= 1000.0 && moved.x <= 1200.0);
    assert_eq!(coins[1].rect.x, 110.0);
    assert_eq!(hazards.len(), 1);
}

#[test]
fn gust_without_ledges_leaves_coins() {
    let mut rng = seeded_rng();
    let mut coins = vec![coin_at(100.0, 550.0)];
    let mut hazards = vec![gust_at(90.0)];
    step_hazards(&mut hazards, &mut coins, &[ground()], 1600.0, &mut rng);
    assert_eq!(coins[0].rect.x, 100.0);
}

#[test]
fn spent_hazards_are_removed() {
    let mut rng = seeded_rng();
    let mut hazards = vec![gust_at(1595.0), meteor_at(100.0, 599.0, 5.0), meteor_at(100.0, 100.0, 5.0)];
    step_hazards(&mut hazards, &mut [], &[ground()], 1600.0, &mut rng);
    assert_eq!(hazards.len(), 1);
    match &hazards[0] {
        Hazard::Meteor(m) => assert_eq!(m.rect.y, 105.0),
        other => panic!("unexpected survivor {other:?}"),
    }
}

#[test]
fn only_meteors_strike() {
    let target = Rect::new(100.0, 100.0, 40.0, 40.0);
    assert!(meteor_strikes(&[meteor_at(110.0, 110.0, 0.0)], &target));
    assert!(!meteor_strikes(&[meteor_at(500.0, 110.0, 0.0)], &target));
    assert!(!meteor_strikes(&[gust_at(100.0)], &target));
}

// ── Effects & overlays ────────────────────────────────────────────────────────

#[test]
fn effects_expire() {
    let mut effects = vec![lightning_at(10.0, 10.0), splash_at(20.0, VIEW_HEIGHT)];
    for _ in 0..LIGHTNING_TICKS {
        step_effects(&mut effects);
    }
    assert_eq!(effects.len(), 1);
    assert_eq!(effects[0].kind, EffectKind::Splash);
    for _ in LIGHTNING_TICKS..SPLASH_TICKS {
        step_effects(&mut effects);
    }
    assert!(effects.is_empty());
}

#[test]
fn overlay_clears_when_done() {
    let mut overlay = Some(boss_flash(3));
    step_overlay(&mut overlay);
    step_overlay(&mut overlay);
    assert_eq!(overlay.map(|o| o.ticks_left), Some(1));
    step_overlay(&mut overlay);
    assert!(overlay.is_none());

    let white = whiteout();
    assert_eq!(white.kind, OverlayKind::Whiteout);
    assert_eq!(white.duration, LIGHTNING_TICKS - WHITEOUT_AFTER);
}

// ── Particles & background ────────────────────────────────────────────────────

#[test]
fn bursts_fade_out() {
    let mut rng = seeded_rng();
    let mut particles = Vec::new();
    burst(&mut particles, 50.0, 50.0, Tint::Gold, &mut rng);
    assert_eq!(particles.len(), PARTICLES_PER_BURST);
    for _ in 0..PARTICLE_LIFE {
        step_particles(&mut particles);
    }
    assert!(particles.is_empty());
}

#[test]
fn clouds_wrap_around() {
    let mut rng = seeded_rng();
    let mut background = make_background(&mut rng);
    assert_eq!(background.stars.len(), STAR_COUNT);
    assert_eq!(background.clouds.len(), CLOUD_COUNT);
    for _ in 0..10_000 {
        step_background(&mut background);
        assert!(background.clouds.iter().all(|c| c.x <= VIEW_WIDTH));
    }
}
