/// Boss behavior: spawning, the attack-phase machine and damage.
///
/// A boss is a plain `Body` plus a `BossBehavior` record.  Movement goes
/// through the same patrol step as ordinary enemies; the phase machine only
/// decides when to shoot and whether the feet stay planted.
use crate::constants::{
    ARROW_DAMAGE, ARROW_HEIGHT, ARROW_INTERVAL_FAST, ARROW_INTERVAL_SLOW, ARROW_WIDTH,
    BOSS_INTRO_TICKS, BOSS_SCORE_PER_LEVEL, BOSS_SIZE, BOSS_SPAWN_AHEAD, BOSS_SPEED_FACTOR,
    GROUND_Y, LASER_CHARGE_TIME, LASER_DELAY, LASER_DURATION, LASER_HEIGHT, LASER_WIDTH,
    PROJECTILE_SPEED,
};
use crate::entities::{
    Body, Boss, BossBehavior, BossKind, BossPhase, Facing, Platform, Projectile, ProjectileKind,
    Rect,
};
use crate::level::boss_hp;
use crate::physics::step_patroller;

/// Something a boss did this tick that the caller needs to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossAction {
    FiredArrow,
    StartedCharging,
    FiredLaser,
}

pub fn has_laser(kind: BossKind) -> bool {
    matches!(kind, BossKind::Warlock | BossKind::WorldBoss)
}

fn arrow_interval(kind: BossKind) -> u32 {
    match kind {
        BossKind::Archer => ARROW_INTERVAL_SLOW,
        BossKind::Warlock | BossKind::WorldBoss => ARROW_INTERVAL_FAST,
    }
}

/// Build a boss for `level`, standing on the ground ahead of the player and
/// clamped inside the world.
pub fn spawn_boss(kind: BossKind, level: u32, player_x: f32, enemy_speed: f32, world_width: f32) -> Boss {
    let hp = boss_hp(level, kind);
    let x = (player_x + BOSS_SPAWN_AHEAD).clamp(0.0, world_width - BOSS_SIZE);
    let mut body = Body::new(x, GROUND_Y - BOSS_SIZE, BOSS_SIZE, BOSS_SIZE);
    body.vx = -(enemy_speed * BOSS_SPEED_FACTOR).max(BOSS_SPEED_FACTOR);

    Boss {
        body,
        behavior: BossBehavior {
            kind,
            hp,
            max_hp: hp,
            phase: BossPhase::Patrol,
            phase_timer: 0,
            arrow_timer: 0,
            attack_dir: Facing::Left,
            score_value: BOSS_SCORE_PER_LEVEL * level.max(1),
        },
    }
}

/// Whether the boss is rooted in place this tick.
pub fn is_rooted(behavior: &BossBehavior) -> bool {
    matches!(behavior.phase, BossPhase::ChargingSpecial | BossPhase::SpecialActive)
}

/// Advance the phase machine by one tick.
///
/// Patrol → RangedAttack after the intro; RangedAttack fires on the arrow
/// cadence and, for laser bosses, rolls into ChargingSpecial → SpecialActive
/// → RangedAttack.
pub fn advance_phase(behavior: &mut BossBehavior, target_x: f32, boss_center_x: f32) -> Option<BossAction> {
    behavior.phase_timer += 1;

    match behavior.phase {
        BossPhase::Patrol => {
            if behavior.phase_timer >= BOSS_INTRO_TICKS {
                enter(behavior, BossPhase::RangedAttack);
            }
            None
        }
        BossPhase::RangedAttack => {
            if has_laser(behavior.kind) && behavior.phase_timer >= LASER_CHARGE_TIME {
                behavior.attack_dir = facing_toward(boss_center_x, target_x);
                enter(behavior, BossPhase::ChargingSpecial);
                return Some(BossAction::StartedCharging);
            }
            behavior.arrow_timer += 1;
            if behavior.arrow_timer >= arrow_interval(behavior.kind) {
                behavior.arrow_timer = 0;
                behavior.attack_dir = facing_toward(boss_center_x, target_x);
                return Some(BossAction::FiredArrow);
            }
            None
        }
        BossPhase::ChargingSpecial => {
            if behavior.phase_timer >= LASER_DELAY {
                enter(behavior, BossPhase::SpecialActive);
                return Some(BossAction::FiredLaser);
            }
            None
        }
        BossPhase::SpecialActive => {
            if behavior.phase_timer >= LASER_DURATION {
                enter(behavior, BossPhase::RangedAttack);
            }
            None
        }
    }
}

fn enter(behavior: &mut BossBehavior, phase: BossPhase) {
    behavior.phase = phase;
    behavior.phase_timer = 0;
    behavior.arrow_timer = 0;
}

fn facing_toward(from_x: f32, to_x: f32) -> Facing {
    if to_x < from_x {
        Facing::Left
    } else {
        Facing::Right
    }
}

/// Move the boss and run its phase machine.
pub fn update_boss(
    boss: &mut Boss,
    platforms: &[Platform],
    world_width: f32,
    target_x: f32,
) -> Option<BossAction> {
    let walk = !is_rooted(&boss.behavior);
    step_patroller(&mut boss.body, platforms, world_width, walk);
    let center = boss.body.rect().center_x();
    advance_phase(&mut boss.behavior, target_x, center)
}

/// An arrow leaving the boss toward its attack direction.
pub fn arrow_from(boss: &Boss) -> Projectile {
    let rect = boss.body.rect();
    let dir = boss.behavior.attack_dir;
    let x = match dir {
        Facing::Left => rect.x - ARROW_WIDTH,
        Facing::Right => rect.right(),
    };
    Projectile {
        rect: Rect::new(x, rect.center_y() - ARROW_HEIGHT / 2.0, ARROW_WIDTH, ARROW_HEIGHT),
        vx: PROJECTILE_SPEED * dir.sign(),
        kind: ProjectileKind::EnemyArrow,
        damage: ARROW_DAMAGE,
        alive: true,
    }
}

/// The laser beam box while `SpecialActive`, extending from the boss in its
/// attack direction.
pub fn laser_rect(boss: &Boss) -> Option<Rect> {
    if boss.behavior.phase != BossPhase::SpecialActive {
        return None;
    }
    let rect = boss.body.rect();
    let y = rect.center_y() - LASER_HEIGHT / 2.0;
    let x = match boss.behavior.attack_dir {
        Facing::Left => rect.x - LASER_WIDTH,
        Facing::Right => rect.right(),
    };
    Some(Rect::new(x, y, LASER_WIDTH, LASER_HEIGHT))
}

/// Outcome of hitting a boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossHit {
    Damaged { hp: u32 },
    Defeated,
}

/// Apply `amount` damage.  HP saturates at zero; the hit that reaches zero
/// reports `Defeated`, and the caller removes the boss so it cannot be
/// reported twice.
pub fn damage_boss(behavior: &mut BossBehavior, amount: u32) -> BossHit {
    behavior.hp = behavior.hp.saturating_sub(amount.max(1));
    if behavior.hp == 0 {
        BossHit::Defeated
    } else {
        BossHit::Damaged { hp: behavior.hp }
    }
}
