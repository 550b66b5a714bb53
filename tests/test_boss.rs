use arcade_engine::boss::*;
use arcade_engine::constants::*;
use arcade_engine::entities::*;

fn make_boss(kind: BossKind) -> Boss {
    spawn_boss(kind, 2, 200.0, 1.5, 1600.0)
}

/// Run the phase machine `ticks` times, collecting what it did.
fn run_phases(behavior: &mut BossBehavior, ticks: u32, target_x: f32) -> Vec<BossAction> {
    (0..ticks)
        .filter_map(|_| advance_phase(behavior, target_x, 800.0))
        .collect()
}

// ── spawn_boss ────────────────────────────────────────────────────────────────

#[test]
fn spawn_lands_ahead_of_player() {
    let boss = make_boss(BossKind::Archer);
    assert_eq!(boss.body.x, 600.0);
    assert_eq!(boss.body.y + boss.body.h, GROUND_Y);
    assert!(boss.body.vx < 0.0);
    assert_eq!(boss.behavior.phase, BossPhase::Patrol);
    assert_eq!(boss.behavior.hp, boss.behavior.max_hp);
    assert_eq!(boss.behavior.score_value, 1000);
}

#[test]
fn spawn_is_clamped_inside_world() {
    let boss = spawn_boss(BossKind::WorldBoss, 4, 1500.0, 2.0, 1600.0);
    assert!(boss.body.x + boss.body.w <= 1600.0);
    assert_eq!(boss.behavior.hp, 42);
}

// ── advance_phase ─────────────────────────────────────────────────────────────

#[test]
fn archer_only_shoots_arrows() {
    let mut boss = make_boss(BossKind::Archer);
    let intro = run_phases(&mut boss.behavior, BOSS_INTRO_TICKS, 0.0);
    assert!(intro.is_empty());
    assert_eq!(boss.behavior.phase, BossPhase::RangedAttack);

    let actions = run_phases(&mut boss.behavior, ARROW_INTERVAL_SLOW * 10, 0.0);
    assert_eq!(actions.len(), 10);
    assert!(actions.iter().all(|a| *a == BossAction::FiredArrow));
    assert_eq!(boss.behavior.phase, BossPhase::RangedAttack);
}

#[test]
fn warlock_cycles_through_laser() {
    let mut boss = make_boss(BossKind::Warlock);
    run_phases(&mut boss.behavior, BOSS_INTRO_TICKS, 0.0);

    let ranged = run_phases(&mut boss.behavior, LASER_CHARGE_TIME, 0.0);
    let arrows = ranged.iter().filter(|a| **a == BossAction::FiredArrow).count();
    assert_eq!(arrows as u32, (LASER_CHARGE_TIME - 1) / ARROW_INTERVAL_FAST);
    assert_eq!(ranged.last(), Some(&BossAction::StartedCharging));
    assert_eq!(boss.behavior.phase, BossPhase::ChargingSpecial);
    assert!(is_rooted(&boss.behavior));

    let charge = run_phases(&mut boss.behavior, LASER_DELAY, 0.0);
    assert_eq!(charge, vec![BossAction::FiredLaser]);
    assert_eq!(boss.behavior.phase, BossPhase::SpecialActive);
    assert!(laser_rect(&boss).is_some());

    let beam = run_phases(&mut boss.behavior, LASER_DURATION, 0.0);
    assert!(beam.is_empty());
    assert_eq!(boss.behavior.phase, BossPhase::RangedAttack);
    assert!(!is_rooted(&boss.behavior));
    assert!(laser_rect(&boss).is_none());
}

#[test]
fn arrows_aim_at_target() {
    let mut boss = make_boss(BossKind::Warlock);
    run_phases(&mut boss.behavior, BOSS_INTRO_TICKS + ARROW_INTERVAL_FAST, 1500.0);
    assert_eq!(boss.behavior.attack_dir, Facing::Right);
    let arrow = arrow_from(&boss);
    assert_eq!(arrow.kind, ProjectileKind::EnemyArrow);
    assert!(arrow.vx > 0.0);
    assert_eq!(arrow.rect.x, boss.body.rect().right());

    run_phases(&mut boss.behavior, ARROW_INTERVAL_FAST, 10.0);
    assert_eq!(boss.behavior.attack_dir, Facing::Left);
    assert!(arrow_from(&boss).vx < 0.0);
}

#[test]
fn laser_extends_toward_attack_direction() {
    let mut boss = make_boss(BossKind::WorldBoss);
    boss.behavior.phase = BossPhase::SpecialActive;
    boss.behavior.attack_dir = Facing::Left;
    let beam = laser_rect(&boss).expect("laser active");
    assert_eq!(beam.w, LASER_WIDTH);
    assert_eq!(beam.right(), boss.body.x);
}

// ── update_boss ───────────────────────────────────────────────────────────────

#[test]
fn rooted_boss_does_not_walk() {
    let platforms = vec![Platform { rect: Rect::new(0.0, GROUND_Y, 1600.0, GROUND_HEIGHT), ground: true }];
    let mut boss = make_boss(BossKind::Warlock);
    boss.behavior.phase = BossPhase::ChargingSpecial;
    let x = boss.body.x;
    update_boss(&mut boss, &platforms, 1600.0, 0.0);
    assert_eq!(boss.body.x, x);

    boss.behavior.phase = BossPhase::Patrol;
    update_boss(&mut boss, &platforms, 1600.0, 0.0);
    assert!(boss.body.x < x);
}

// ── damage_boss ───────────────────────────────────────────────────────────────

#[test]
fn hp_falls_to_zero_and_stays_there() {
    let mut boss = make_boss(BossKind::Archer);
    let mut last = boss.behavior.hp;
    let mut defeated = 0;
    for _ in 0..20 {
        match damage_boss(&mut boss.behavior, 1) {
            BossHit::Damaged { hp } => {
                assert!(hp < last);
                last = hp;
            }
            BossHit::Defeated => {
                defeated += 1;
                break;
            }
        }
    }
    assert_eq!(defeated, 1);
    assert_eq!(boss.behavior.hp, 0);
    damage_boss(&mut boss.behavior, 5);
    assert_eq!(boss.behavior.hp, 0);
}

#[test]
fn overkill_saturates() {
    let mut boss = make_boss(BossKind::Archer);
    assert_eq!(damage_boss(&mut boss.behavior, 1000), BossHit::Defeated);
    assert_eq!(boss.behavior.hp, 0);
}

#[test]
fn zero_damage_still_counts() {
    let mut boss = make_boss(BossKind::Archer);
    let hp = boss.behavior.hp;
    assert_eq!(damage_boss(&mut boss.behavior, 0), BossHit::Damaged { hp: hp - 1 });
}
