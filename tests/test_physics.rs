use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use arcade_engine::constants::*;
use arcade_engine::entities::*;
use arcade_engine::input::HeldActions;
use arcade_engine::physics::*;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn ground(width: f32) -> Platform {
    Platform { rect: Rect::new(0.0, GROUND_Y, width, GROUND_HEIGHT), ground: true }
}

fn ledge(x: f32, y: f32, w: f32) -> Platform {
    Platform { rect: Rect::new(x, y, w, 20.0), ground: false }
}

fn make_player(x: f32, y: f32) -> Player {
    Player {
        body: Body::new(x, y, PLAYER_SIZE, PLAYER_SIZE),
        jump_count: 0,
        facing: Facing::Right,
        form: Form::Normal,
        attack_timer: 0,
        stationary_ticks: 0,
        invincible_ticks: 0,
        rotation: 0.0,
    }
}

fn make_egg(x: f32, y: f32) -> Player {
    let mut p = make_player(x, y);
    p.form = Form::Alternate;
    p.body.w = EGG_WIDTH;
    p.body.h = EGG_HEIGHT;
    p
}

// ── Platform resolution ───────────────────────────────────────────────────────

#[test]
fn falling_onto_platform_lands() {
    let platforms = vec![ledge(0.0, 300.0, 200.0)];
    let mut body = Body::new(50.0, 258.0, 40.0, 40.0);
    body.vy = 5.0;
    integrate(&mut body);
    let landing = resolve_platforms(&mut body, &platforms, false);

    assert_eq!(landing.map(|l| l.platform), Some(0));
    assert_eq!(body.vy, 0.0);
    assert!(body.on_ground);
    assert_abs_diff_eq!(body.y + body.h, 300.0);
}

#[test]
fn any_fall_from_above_ends_at_rest() {
    let mut rng = seeded_rng();
    let platforms = vec![ledge(100.0, 300.0, 200.0)];
    for _ in 0..500 {
        let vy: f32 = rng.gen_range(0.5..15.0);
        // Previous bottom at or above the top, new bottom below it.
        let gap: f32 = rng.gen_range(0.01..(vy + GRAVITY - 0.01));
        let x: f32 = rng.gen_range(70.0..290.0);
        let mut body = Body::new(x, 300.0 - 40.0 - gap, 40.0, 40.0);
        body.vy = vy;
        integrate(&mut body);
        resolve_platforms(&mut body, &platforms, false);

        assert_eq!(body.vy, 0.0);
        assert!(body.on_ground);
        assert_abs_diff_eq!(body.y + body.h, 300.0, epsilon = 1e-3);
    }
}

#[test]
fn rising_into_platform_bonks() {
    let platforms = vec![ledge(0.0, 300.0, 200.0)];
    let mut body = Body::new(50.0, 322.0, 40.0, 40.0);
    body.vy = -5.0;
    integrate(&mut body);
    let landing = resolve_platforms(&mut body, &platforms, false);

    assert!(landing.is_none());
    assert_eq!(body.vy, 0.0);
    assert!(!body.on_ground);
    assert_abs_diff_eq!(body.y, 320.0);
}

#[test]
fn skip_ground_ignores_floor_only() {
    let platforms = vec![ground(800.0), ledge(0.0, 300.0, 200.0)];
    let mut body = Body::new(400.0, GROUND_Y - 40.0, 40.0, 40.0);
    body.vy = 1.0;
    integrate(&mut body);
    assert!(resolve_platforms(&mut body, &platforms, true).is_none());
    assert!(!body.on_ground);
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_stays_inside_world() {
    let mut rng = seeded_rng();
    let platforms = vec![ground(1600.0)];
    for _ in 0..300 {
        let mut player = if rng.gen_bool(0.5) {
            make_player(rng.gen_range(-50.0..1650.0), 400.0)
        } else {
            make_egg(rng.gen_range(-50.0..1650.0), 400.0)
        };
        player.body.vx = rng.gen_range(-12.0..12.0);
        let held = HeldActions {
            move_left: rng.gen_bool(0.5),
            move_right: rng.gen_bool(0.5),
            ..HeldActions::default()
        };
        for _ in 0..10 {
            step_player(&mut player, &held, &platforms, 1600.0, PLAYER_SPEED * 2.0, 5);
            assert!(player.body.x >= 0.0);
            assert!(player.body.x + player.body.w <= 1600.0);
        }
    }
}

#[test]
fn egg_bounces_off_world_edge() {
    let mut egg = make_egg(2.0, 200.0);
    egg.body.vx = -6.0;
    step_player(&mut egg, &HeldActions::default(), &[], 1600.0, PLAYER_SPEED, 1);
    assert_eq!(egg.body.x, 0.0);
    assert!(egg.body.vx > 0.0);
}

#[test]
fn normal_form_clamps_at_edge_without_bounce() {
    let mut p = make_player(2.0, 200.0);
    let held = HeldActions { move_left: true, ..HeldActions::default() };
    step_player(&mut p, &held, &[], 1600.0, PLAYER_SPEED, 0);
    assert_eq!(p.body.x, 0.0);
    assert_eq!(p.facing, Facing::Left);
}

#[test]
fn egg_falls_through_ground_and_out() {
    let platforms = vec![ground(1600.0)];
    let mut egg = make_egg(400.0, 500.0);
    let mut fell = false;
    for _ in 0..100 {
        let step = step_player(&mut egg, &HeldActions::default(), &platforms, 1600.0, PLAYER_SPEED, 1);
        assert!(step.landing.is_none());
        if step.fell_out {
            fell = true;
            break;
        }
    }
    assert!(fell);
}

#[test]
fn normal_form_lands_on_ground() {
    let platforms = vec![ground(1600.0)];
    let mut p = make_player(400.0, 500.0);
    for _ in 0..60 {
        step_player(&mut p, &HeldActions::default(), &platforms, 1600.0, PLAYER_SPEED, 0);
    }
    assert!(p.body.on_ground);
    assert_abs_diff_eq!(p.body.y + p.body.h, GROUND_Y);
}

#[test]
fn egg_on_ledge_draws_lightning_after_sitting_still() {
    let platforms = vec![ground(1600.0), ledge(300.0, 400.0, 200.0)];
    let mut egg = make_egg(350.0, 400.0 - EGG_HEIGHT);
    let mut expired_at = None;
    for t in 1..=400 {
        let step = step_player(&mut egg, &HeldActions::default(), &platforms, 1600.0, PLAYER_SPEED, 3);
        if step.stationary_expired {
            expired_at = Some(t);
            break;
        }
    }
    assert_eq!(expired_at, Some(STATIONARY_LIMIT + 1));
}

#[test]
fn egg_below_threshold_never_draws_lightning() {
    let platforms = vec![ground(1600.0), ledge(300.0, 400.0, 200.0)];
    let mut egg = make_egg(350.0, 400.0 - EGG_HEIGHT);
    for _ in 0..400 {
        let step = step_player(&mut egg, &HeldActions::default(), &platforms, 1600.0, PLAYER_SPEED, 2);
        assert!(!step.stationary_expired);
    }
    assert_eq!(egg.stationary_ticks, 0);
}

#[test]
fn double_jump_then_land_resets() {
    let platforms = vec![ground(1600.0)];
    let mut p = make_player(400.0, GROUND_Y - PLAYER_SIZE);
    assert!(try_jump(&mut p, JUMP_STRENGTH));
    assert!(try_jump(&mut p, JUMP_STRENGTH));
    assert!(!try_jump(&mut p, JUMP_STRENGTH));
    for _ in 0..200 {
        step_player(&mut p, &HeldActions::default(), &platforms, 1600.0, PLAYER_SPEED, 0);
    }
    assert_eq!(p.jump_count, 0);
    assert!(try_jump(&mut p, JUMP_STRENGTH));
}

#[test]
fn timers_count_down() {
    let mut p = make_player(400.0, 200.0);
    p.attack_timer = 2;
    p.invincible_ticks = 1;
    step_player(&mut p, &HeldActions::default(), &[], 1600.0, PLAYER_SPEED, 0);
    assert_eq!(p.attack_timer, 1);
    assert_eq!(p.invincible_ticks, 0);
    step_player(&mut p, &HeldActions::default(), &[], 1600.0, PLAYER_SPEED, 0);
    assert_eq!(p.attack_timer, 0);
}

// ── Patrollers ────────────────────────────────────────────────────────────────

#[test]
fn patroller_turns_at_ledge_edge() {
    let plat = ledge(100.0, 400.0, 100.0);
    let platforms = vec![plat];
    let mut body = Body::new(164.0, 400.0 - ENEMY_SIZE, ENEMY_SIZE, ENEMY_SIZE);
    body.vx = 1.0;
    let mut turned = false;
    for _ in 0..300 {
        step_patroller(&mut body, &platforms, 1600.0, true);
        assert!(body.on_ground);
        assert_abs_diff_eq!(body.y + body.h, 400.0);
        assert!(body.x >= plat.rect.x - EDGE_PADDING - 1.0);
        assert!(body.x + body.w <= plat.rect.right() + EDGE_PADDING + 1.0);
        turned |= body.vx < 0.0;
    }
    assert!(turned);
}

#[test]
fn patroller_turns_at_world_edge() {
    let platforms = vec![ground(1600.0)];
    let mut body = Body::new(1600.0 - ENEMY_SIZE - 1.0, GROUND_Y - ENEMY_SIZE, ENEMY_SIZE, ENEMY_SIZE);
    body.vx = 2.0;
    for _ in 0..5 {
        step_patroller(&mut body, &platforms, 1600.0, true);
    }
    assert!(body.vx < 0.0);
    assert!(body.x + body.w <= 1600.0);
}

#[test]
fn rooted_patroller_keeps_heading() {
    let platforms = vec![ground(1600.0)];
    let mut body = Body::new(800.0, GROUND_Y - ENEMY_SIZE, ENEMY_SIZE, ENEMY_SIZE);
    body.vx = -1.5;
    step_patroller(&mut body, &platforms, 1600.0, false);
    assert_eq!(body.x, 800.0);
    assert_eq!(body.vx, -1.5);
}

// ── Projectiles & camera ──────────────────────────────────────────────────────

#[test]
fn projectile_dies_leaving_view() {
    let mut shot = Projectile {
        rect: Rect::new(795.0, 300.0, 24.0, 12.0),
        vx: PROJECTILE_SPEED,
        kind: ProjectileKind::PlayerShot,
        damage: 1,
        alive: true,
    };
    step_projectile(&mut shot, 0.0);
    assert!(!shot.alive);
}

#[test]
fn camera_follows_inside_band_and_clamps() {
    let at = |x: f32| Body::new(x, 300.0, 40.0, 40.0);
    assert_eq!(follow_camera(0.0, &at(400.0), 1600.0), 0.0);
    assert_abs_diff_eq!(follow_camera(0.0, &at(1000.0), 1600.0), 1000.0 - (VIEW_WIDTH - CAMERA_THRESHOLD));
    assert_eq!(follow_camera(0.0, &at(1590.0), 1600.0), 1600.0 - VIEW_WIDTH);
    assert_eq!(follow_camera(500.0, &at(10.0), 1600.0), 0.0);
}
