/// Physics & collision step: gravity, integration and platform resolution.
///
/// Everything here works on one entity at a time and never looks at the
/// run state; the caller decides what a landing or a fall means.
use crate::constants::{
    CAMERA_THRESHOLD, EDGE_PADDING, EGG_ACCEL, EGG_ACCEL_FAST, EGG_FRICTION, EGG_FRICTION_FAST,
    EGG_MAX_SPEED, EGG_MAX_SPEED_FAST, EGG_WALL_BOUNCE, GRAVITY, LIGHTNING_TRANSFORMATIONS,
    MAX_JUMPS, STATIONARY_EPSILON, STATIONARY_LIMIT, VIEW_HEIGHT, VIEW_WIDTH,
};
use crate::entities::{Body, Facing, Form, Platform, Player, Projectile, Rect};
use crate::input::HeldActions;

// ── Platform resolution ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landing {
    /// Index into the platform slice.
    pub platform: usize,
    /// Downward speed at the moment of contact.
    pub impact: f32,
}

/// Apply gravity and move by one tick.
pub fn integrate(body: &mut Body) {
    body.vy += GRAVITY;
    body.x += body.vx;
    body.y += body.vy;
}

/// Resolve overlaps against platforms after `integrate`.
///
/// The previous-frame edge is recovered as `edge - vy`.  A body moving down
/// whose old bottom was at or above a platform top lands on it; a body moving
/// up whose old top was at or below a platform bottom is pushed under it.
/// Only the vertical axis is resolved, so corner clips resolve vertically.
pub fn resolve_platforms(body: &mut Body, platforms: &[Platform], skip_ground: bool) -> Option<Landing> {
    body.on_ground = false;
    let mut landing = None;

    for (i, plat) in platforms.iter().enumerate() {
        if skip_ground && plat.ground {
            continue;
        }
        if !body.rect().overlaps(&plat.rect) {
            continue;
        }
        if body.vy > 0.0 && body.y + body.h - body.vy <= plat.rect.y {
            landing = Some(Landing { platform: i, impact: body.vy });
            body.y = plat.rect.y - body.h;
            body.vy = 0.0;
            body.on_ground = true;
        } else if body.vy < 0.0 && body.y - body.vy >= plat.rect.bottom() {
            body.y = plat.rect.bottom();
            body.vy = 0.0;
        }
    }
    landing
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerStep {
    pub landing: Option<Landing>,
    /// The egg dropped past the bottom of the world.
    pub fell_out: bool,
    /// The egg sat still long enough to draw lightning.
    pub stationary_expired: bool,
}

fn egg_tuning(transformations: u32) -> (f32, f32, f32) {
    if transformations > LIGHTNING_TRANSFORMATIONS {
        (EGG_ACCEL_FAST, EGG_FRICTION_FAST, EGG_MAX_SPEED_FAST)
    } else {
        (EGG_ACCEL, EGG_FRICTION, EGG_MAX_SPEED)
    }
}

/// Advance the player by one tick.
pub fn step_player(
    player: &mut Player,
    held: &HeldActions,
    platforms: &[Platform],
    world_width: f32,
    speed: f32,
    transformations: u32,
) -> PlayerStep {
    let mut step = PlayerStep::default();
    let body = &mut player.body;

    match player.form {
        Form::Alternate => {
            if transformations >= LIGHTNING_TRANSFORMATIONS {
                if body.vx.abs() < STATIONARY_EPSILON && body.vy.abs() < STATIONARY_EPSILON {
                    player.stationary_ticks += 1;
                } else {
                    player.stationary_ticks = 0;
                }
                if player.stationary_ticks > STATIONARY_LIMIT {
                    step.stationary_expired = true;
                    return step;
                }
            } else {
                player.stationary_ticks = 0;
            }

            let (accel, friction, max_speed) = egg_tuning(transformations);
            if held.move_left {
                body.vx -= accel;
            }
            if held.move_right {
                body.vx += accel;
            }
            body.vx = (body.vx * friction).clamp(-max_speed, max_speed);
            integrate(body);
            player.rotation += body.vx * 0.1;
        }
        Form::Normal => {
            body.vx = 0.0;
            if held.move_left {
                body.vx -= speed;
                player.facing = Facing::Left;
            }
            if held.move_right {
                body.vx += speed;
                player.facing = Facing::Right;
            }
            integrate(body);
        }
    }

    let egg = player.form == Form::Alternate;

    // World side bounds: clamp, and the egg rebounds.
    if body.x < 0.0 {
        body.x = 0.0;
        if egg {
            body.vx *= EGG_WALL_BOUNCE;
        }
    }
    if body.x + body.w > world_width {
        body.x = world_width - body.w;
        if egg {
            body.vx *= EGG_WALL_BOUNCE;
        }
    }

    player.attack_timer = player.attack_timer.saturating_sub(1);
    player.invincible_ticks = player.invincible_ticks.saturating_sub(1);

    step.landing = resolve_platforms(body, platforms, egg);
    if step.landing.is_some() {
        player.jump_count = 0;
    }

    if body.y + body.h > VIEW_HEIGHT {
        if egg {
            step.fell_out = true;
        } else {
            body.y = VIEW_HEIGHT - body.h;
            body.vy = 0.0;
            body.on_ground = true;
            player.jump_count = 0;
        }
    }
    step
}

/// Start a jump if a jump charge is left.  Returns whether it happened.
pub fn try_jump(player: &mut Player, strength: f32) -> bool {
    if player.jump_count >= MAX_JUMPS {
        return false;
    }
    player.body.vy = strength;
    player.body.on_ground = false;
    player.jump_count += 1;
    true
}

// ── Patrollers ────────────────────────────────────────────────────────────────

/// Walk back and forth: fall onto platforms, turn around before walking off
/// the supporting platform or out of the world.
pub fn step_patroller(body: &mut Body, platforms: &[Platform], world_width: f32, walk: bool) {
    if !walk {
        let vx = body.vx;
        body.vx = 0.0;
        integrate(body);
        body.vx = vx;
    } else {
        integrate(body);
    }

    if let Some(landing) = resolve_platforms(body, platforms, false) {
        let plat = platforms[landing.platform].rect;
        let next_x = body.x + body.vx;
        if body.vx > 0.0 && next_x + body.w > plat.right() + EDGE_PADDING {
            body.vx = -body.vx;
        } else if body.vx < 0.0 && next_x < plat.x - EDGE_PADDING {
            body.vx = -body.vx;
        }
    }

    if body.x < 0.0 {
        body.x = 0.0;
        body.vx = body.vx.abs();
    }
    if body.x + body.w > world_width {
        body.x = world_width - body.w;
        body.vx = -body.vx.abs();
    }
    if body.y + body.h > VIEW_HEIGHT {
        body.y = VIEW_HEIGHT - body.h;
        body.vy = 0.0;
        body.on_ground = true;
    }
}

// ── Projectiles & camera ──────────────────────────────────────────────────────

pub fn step_projectile(projectile: &mut Projectile, camera_x: f32) {
    projectile.rect.x += projectile.vx;
    let view = Rect::new(camera_x, 0.0, VIEW_WIDTH, VIEW_HEIGHT);
    if !projectile.rect.overlaps(&view) {
        projectile.alive = false;
    }
}

/// Keep the player inside the middle band of the viewport.
pub fn follow_camera(camera_x: f32, target: &Body, world_width: f32) -> f32 {
    let screen_x = target.x - camera_x;
    let mut camera = camera_x;
    if screen_x > VIEW_WIDTH - CAMERA_THRESHOLD {
        camera = target.x - (VIEW_WIDTH - CAMERA_THRESHOLD);
    } else if screen_x < CAMERA_THRESHOLD {
        camera = target.x - CAMERA_THRESHOLD;
    }
    camera.clamp(0.0, (world_width - VIEW_WIDTH).max(0.0))
}
