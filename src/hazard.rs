/// Environmental hazards and transient effects.
///
/// Scheduled hazards are plain countdowns on the run state; once one expires
/// its live counterpart (a wind gust sweeping the screen, a meteor shower)
/// is pushed into `RunState::hazards` and stepped once per tick.  Death
/// effects, overlays and cosmetic particles live here too.
use rand::Rng;

use crate::constants::{
    CLOUD_COUNT, COLLECTIBLE_LIFT, COLLECTIBLE_SIZE, ELEVATED_LIMIT_Y, LIGHTNING_TICKS,
    METEOR_COUNT, METEOR_SIZE, PARTICLES_PER_BURST, PARTICLE_LIFE, SPLASH_TICKS, STAR_COUNT,
    VIEW_HEIGHT, VIEW_WIDTH, WHITEOUT_AFTER, WIND_SPEED, WIND_START_X, WIND_WIDTH,
};
use crate::entities::{
    Background, Cloud, Collectible, Effect, EffectKind, Hazard, HazardKind, Meteor, Overlay,
    OverlayKind, Particle, Platform, Rect, ScheduledHazard, Star, Tint, WindGust,
};

// ── Scheduling ────────────────────────────────────────────────────────────────

/// Count every scheduled hazard down by one tick.  Returns the kinds that
/// fired; repeating ones re-arm, one-shots are dropped.
pub fn tick_schedule(schedule: &mut Vec<ScheduledHazard>) -> Vec<HazardKind> {
    let mut fired = Vec::new();
    schedule.retain_mut(|entry| {
        entry.ticks_left = entry.ticks_left.saturating_sub(1);
        if entry.ticks_left > 0 {
            return true;
        }
        fired.push(entry.kind);
        match entry.repeat_every {
            Some(every) => {
                entry.ticks_left = every;
                true
            }
            None => false,
        }
    });
    fired
}

/// The live hazards a fired schedule entry turns into.
pub fn spawn_hazard(kind: HazardKind, camera_x: f32, rng: &mut impl Rng) -> Vec<Hazard> {
    match kind {
        HazardKind::WindGust => vec![Hazard::Wind(WindGust {
            rect: Rect::new(camera_x + WIND_START_X, 0.0, WIND_WIDTH, VIEW_HEIGHT),
            vx: WIND_SPEED,
            active: true,
        })],
        HazardKind::MeteorShower => (0..METEOR_COUNT)
            .map(|_| {
                Hazard::Meteor(Meteor {
                    rect: Rect::new(
                        camera_x + rng.gen_range(0.0..VIEW_WIDTH),
                        -METEOR_SIZE - rng.gen_range(0.0..300.0),
                        METEOR_SIZE,
                        METEOR_SIZE,
                    ),
                    vx: rng.gen_range(-2.0..2.0),
                    vy: rng.gen_range(4.0..7.0),
                    rotation: 0.0,
                    active: true,
                })
            })
            .collect(),
    }
}

// ── Motion ────────────────────────────────────────────────────────────────────

/// Move every live hazard.  A gust that brushes an active collectible blows
/// it onto a random elevated platform.  Spent hazards are removed.
pub fn step_hazards(
    hazards: &mut Vec<Hazard>,
    collectibles: &mut [Collectible],
    platforms: &[Platform],
    world_width: f32,
    rng: &mut impl Rng,
) {
    for hazard in hazards.iter_mut() {
        match hazard {
            Hazard::Wind(gust) => {
                gust.rect.x += gust.vx;
                if gust.rect.x > world_width {
                    gust.active = false;
                    continue;
                }
                for coin in collectibles.iter_mut().filter(|c| c.active) {
                    if gust.rect.overlaps(&coin.rect) {
                        relocate(coin, platforms, rng);
                    }
                }
            }
            Hazard::Meteor(meteor) => {
                meteor.rect.x += meteor.vx;
                meteor.rect.y += meteor.vy;
                meteor.rotation += 0.1;
                if meteor.rect.y > VIEW_HEIGHT {
                    meteor.active = false;
                }
            }
        }
    }
    hazards.retain(|h| match h {
        Hazard::Wind(g) => g.active,
        Hazard::Meteor(m) => m.active,
    });
}

fn relocate(coin: &mut Collectible, platforms: &[Platform], rng: &mut impl Rng) {
    let elevated: Vec<&Platform> = platforms
        .iter()
        .filter(|p| !p.ground && p.rect.y < ELEVATED_LIMIT_Y)
        .collect();
    if elevated.is_empty() {
        return;
    }
    let plat = elevated[rng.gen_range(0..elevated.len())].rect;
    let span = (plat.w - COLLECTIBLE_SIZE).max(1.0);
    coin.rect.x = plat.x + rng.gen_range(0.0..span);
    coin.rect.y = plat.y - COLLECTIBLE_LIFT;
}

/// Whether any meteor is touching `target`.
pub fn meteor_strikes(hazards: &[Hazard], target: &Rect) -> bool {
    hazards.iter().any(|h| match h {
        Hazard::Meteor(m) => m.active && m.rect.overlaps(target),
        Hazard::Wind(_) => false,
    })
}

// ── Death effects & overlays ──────────────────────────────────────────────────

pub fn lightning_at(x: f32, y: f32) -> Effect {
    Effect { kind: EffectKind::Lightning, x, y, ticks_left: LIGHTNING_TICKS }
}

pub fn splash_at(x: f32, y: f32) -> Effect {
    Effect { kind: EffectKind::Splash, x, y, ticks_left: SPLASH_TICKS }
}

/// The white flash that opens a lightning strike.
pub fn whiteout() -> Overlay {
    let ticks = LIGHTNING_TICKS - WHITEOUT_AFTER;
    Overlay { kind: OverlayKind::Whiteout, ticks_left: ticks, duration: ticks }
}

pub fn boss_flash(ticks: u32) -> Overlay {
    Overlay { kind: OverlayKind::BossFlash, ticks_left: ticks, duration: ticks }
}

pub fn step_effects(effects: &mut Vec<Effect>) {
    for effect in effects.iter_mut() {
        effect.ticks_left = effect.ticks_left.saturating_sub(1);
    }
    effects.retain(|e| e.ticks_left > 0);
}

pub fn step_overlay(overlay: &mut Option<Overlay>) {
    if let Some(o) = overlay {
        o.ticks_left = o.ticks_left.saturating_sub(1);
        if o.ticks_left == 0 {
            *overlay = None;
        }
    }
}

// ── Particles & parallax ──────────────────────────────────────────────────────

pub fn burst(particles: &mut Vec<Particle>, x: f32, y: f32, tint: Tint, rng: &mut impl Rng) {
    for _ in 0..PARTICLES_PER_BURST {
        particles.push(Particle {
            x,
            y,
            vx: rng.gen_range(-3.0..3.0),
            vy: rng.gen_range(-4.0..1.0),
            life: PARTICLE_LIFE,
            tint,
        });
    }
}

pub fn step_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.x += p.vx;
        p.y += p.vy;
        p.vy += 0.2;
        p.life = p.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}

/// Stars and clouds in screen space; the renderer applies parallax.
pub fn make_background(rng: &mut impl Rng) -> Background {
    Background {
        stars: (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.gen_range(0.0..VIEW_WIDTH),
                y: rng.gen_range(0.0..VIEW_HEIGHT / 2.0),
            })
            .collect(),
        clouds: (0..CLOUD_COUNT)
            .map(|_| Cloud {
                x: rng.gen_range(0.0..VIEW_WIDTH),
                y: rng.gen_range(30.0..200.0),
                speed: rng.gen_range(0.2..0.6),
            })
            .collect(),
    }
}

pub fn step_background(background: &mut Background) {
    for cloud in &mut background.clouds {
        cloud.x += cloud.speed;
        if cloud.x > VIEW_WIDTH {
            cloud.x -= VIEW_WIDTH + 100.0;
        }
    }
}
