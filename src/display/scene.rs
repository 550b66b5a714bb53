/// World layers: everything that scrolls with the camera.
use crossterm::style::Color;

use super::frame::Frame;
use crate::boss::laser_rect;
use crate::constants::{SPARK_THRESHOLD, VIEW_HEIGHT, VIEW_WIDTH};
use crate::entities::{
    BossKind, BossPhase, EffectKind, Facing, Form, GameState, Hazard, Overlay, OverlayKind,
    ProjectileKind, Rect, Tint,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STAR: Color = Color::DarkGrey;
const C_CLOUD: Color = Color::Grey;
const C_GROUND: Color = Color::DarkGreen;
const C_PLATFORM: Color = Color::Green;
const C_COIN: Color = Color::Yellow;
const C_ENEMY: Color = Color::Red;
const C_BOSS: Color = Color::Magenta;
const C_BOSS_CHARGING: Color = Color::White;
const C_PLAYER: Color = Color::White;
const C_PLAYER_BLINK: Color = Color::DarkGrey;
const C_EGG: Color = Color::Rgb { r: 255, g: 250, b: 205 };
const C_SHOT: Color = Color::Cyan;
const C_ARROW: Color = Color::DarkYellow;
const C_LASER: Color = Color::Red;
const C_WIND: Color = Color::Cyan;
const C_METEOR: Color = Color::DarkRed;
const C_LIGHTNING: Color = Color::Yellow;
const C_SPLASH: Color = Color::Rgb { r: 255, g: 215, b: 0 };
const C_FLASH_A: Color = Color::Red;
const C_FLASH_B: Color = Color::DarkYellow;

// ── World → cell mapping ──────────────────────────────────────────────────────

/// Maps world units inside the viewport onto the play rows of a frame
/// (row 0 is the HUD, the last row holds the touch buttons).
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub camera_x: f32,
    pub cols: f32,
    pub rows: f32,
    pub top: i32,
}

impl Viewport {
    pub fn new(camera_x: f32, width: u16, height: u16) -> Self {
        Self {
            camera_x,
            cols: width as f32,
            rows: height.saturating_sub(2).max(1) as f32,
            top: 1,
        }
    }

    pub fn col(&self, x: f32) -> i32 {
        ((x - self.camera_x) / VIEW_WIDTH * self.cols).floor() as i32
    }

    pub fn row(&self, y: f32) -> i32 {
        self.top + (y / VIEW_HEIGHT * self.rows).floor() as i32
    }

    fn last_row(&self) -> i32 {
        self.top + self.rows as i32 - 1
    }

    /// Cell span covered by `rect`; always at least one cell.
    fn span(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let (c0, r0) = (self.col(rect.x), self.row(rect.y));
        let c1 = self.col(rect.right() - 0.01).max(c0);
        let r1 = self.row(rect.bottom() - 0.01).max(r0);
        (c0, r0, c1, r1.min(self.last_row()))
    }
}

fn fill_rect(frame: &mut Frame, view: &Viewport, rect: &Rect, ch: char, fg: Color) {
    let (c0, r0, c1, r1) = view.span(rect);
    for row in r0..=r1 {
        for col in c0..=c1 {
            frame.put(col, row, ch, fg);
        }
    }
}

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Dust => Color::Grey,
        Tint::Gold => Color::Yellow,
        Tint::Blood => Color::Red,
        Tint::Spark => Color::Cyan,
        Tint::Shell => C_EGG,
        Tint::Fire => Color::DarkYellow,
    }
}

// ── Layers, back to front ─────────────────────────────────────────────────────

pub fn draw_world(frame: &mut Frame, state: &GameState, view: &Viewport) {
    draw_background(frame, state, view);
    draw_platforms(frame, state, view);
    draw_collectibles(frame, state, view);
    draw_enemies(frame, state, view);
    draw_boss(frame, state, view);
    draw_player(frame, state, view);
    draw_projectiles(frame, state, view);
    draw_hazards(frame, state, view);
    draw_particles(frame, state, view);
}

fn parallax_col(x: f32, camera_x: f32, factor: f32, view: &Viewport) -> i32 {
    let wrapped = (x - camera_x * factor).rem_euclid(VIEW_WIDTH);
    (wrapped / VIEW_WIDTH * view.cols) as i32
}

fn draw_background(frame: &mut Frame, state: &GameState, view: &Viewport) {
    let bg = &state.world.background;
    for star in &bg.stars {
        let col = parallax_col(star.x, view.camera_x, 0.1, view);
        frame.put(col, view.row(star.y), '.', C_STAR);
    }
    for cloud in &bg.clouds {
        let col = parallax_col(cloud.x, view.camera_x, 0.3, view);
        frame.text(col, view.row(cloud.y), "≈≈≈", C_CLOUD);
    }
}

fn draw_platforms(frame: &mut Frame, state: &GameState, view: &Viewport) {
    for plat in &state.world.platforms {
        if plat.ground {
            fill_rect(frame, view, &plat.rect, '▓', C_GROUND);
        } else {
            fill_rect(frame, view, &plat.rect, '▀', C_PLATFORM);
        }
    }
}

fn draw_collectibles(frame: &mut Frame, state: &GameState, view: &Viewport) {
    for coin in state.world.collectibles.iter().filter(|c| c.active) {
        // Traps are drawn exactly like real coins.
        let bob = coin.float_phase.sin() * 3.0;
        frame.put(view.col(coin.rect.center_x()), view.row(coin.rect.center_y() + bob), '●', C_COIN);
    }
}

fn draw_enemies(frame: &mut Frame, state: &GameState, view: &Viewport) {
    for enemy in state.world.enemies.iter().filter(|e| e.alive) {
        let r = enemy.body.rect();
        let face = if enemy.body.vx < 0.0 { "<ö" } else { "ö>" };
        let row = view.row(r.y - enemy.bounce_phase.sin().abs() * 4.0);
        frame.text(view.col(r.x), row, face, C_ENEMY);
        if view.row(r.bottom() - 0.01) > row {
            frame.text(view.col(r.x), view.row(r.bottom() - 0.01), "ʌʌ", C_ENEMY);
        }
    }
}

fn draw_boss(frame: &mut Frame, state: &GameState, view: &Viewport) {
    let Some(boss) = &state.world.boss else {
        return;
    };
    let r = boss.body.rect();
    let b = &boss.behavior;
    let fg = if b.phase == BossPhase::ChargingSpecial && b.phase_timer % 10 < 5 {
        C_BOSS_CHARGING
    } else {
        C_BOSS
    };
    let glyph = match b.kind {
        BossKind::Archer => 'A',
        BossKind::Warlock => 'W',
        BossKind::WorldBoss => 'Ω',
    };
    fill_rect(frame, view, &r, glyph, fg);

    // HP bar above the boss.
    let (c0, r0, c1, _) = view.span(&r);
    let width = (c1 - c0 + 1).max(3);
    let filled = (b.hp as i32 * width + b.max_hp.max(1) as i32 - 1) / b.max_hp.max(1) as i32;
    for i in 0..width {
        let ch = if i < filled { '█' } else { '░' };
        frame.put(c0 + i, r0 - 1, ch, Color::Red);
    }

    if let Some(beam) = laser_rect(boss) {
        fill_rect(frame, view, &beam, '═', C_LASER);
    }
}

fn draw_player(frame: &mut Frame, state: &GameState, view: &Viewport) {
    let player = &state.world.player;
    let r = player.body.rect();
    // Blink while invincible.
    let fg = if player.invincible_ticks > 0 && (player.invincible_ticks / 6) % 2 == 0 {
        C_PLAYER_BLINK
    } else if state.run.invulnerable {
        Color::Cyan
    } else {
        C_PLAYER
    };
    let (c0, r0, c1, r1) = view.span(&r);

    match player.form {
        Form::Normal => {
            let head = match player.facing {
                Facing::Right => '☻',
                Facing::Left => '☺',
            };
            frame.put(c0, r0, head, fg);
            for row in (r0 + 1)..=r1 {
                frame.put(c0, row, '▐', fg);
            }
            if player.attack_timer > 0 {
                let col = match player.facing {
                    Facing::Right => c1 + 1,
                    Facing::Left => c0 - 1,
                };
                let blade = match player.facing {
                    Facing::Right => '⟋',
                    Facing::Left => '⟍',
                };
                frame.put(col, r0, blade, Color::White);
            }
        }
        Form::Alternate => {
            let egg = if (player.rotation.rem_euclid(std::f32::consts::PI)) < 1.5 { '0' } else { 'O' };
            for row in r0..=r1 {
                frame.put(c0, row, egg, C_EGG);
            }
            if player.stationary_ticks > SPARK_THRESHOLD {
                frame.put(c0 + 1, r0, '*', C_LIGHTNING);
            }
        }
    }
}

fn draw_projectiles(frame: &mut Frame, state: &GameState, view: &Viewport) {
    for shot in state.world.projectiles.iter().filter(|p| p.alive) {
        let (ch, fg) = match shot.kind {
            ProjectileKind::PlayerShot => ('✦', C_SHOT),
            ProjectileKind::EnemyArrow if shot.vx < 0.0 => ('←', C_ARROW),
            ProjectileKind::EnemyArrow => ('→', C_ARROW),
        };
        frame.put(view.col(shot.rect.center_x()), view.row(shot.rect.center_y()), ch, fg);
    }
}

fn draw_hazards(frame: &mut Frame, state: &GameState, view: &Viewport) {
    for hazard in &state.run.hazards {
        match hazard {
            Hazard::Wind(gust) if gust.active => fill_rect(frame, view, &gust.rect, '≋', C_WIND),
            Hazard::Meteor(m) if m.active => {
                frame.put(view.col(m.rect.center_x()), view.row(m.rect.center_y()), '☄', C_METEOR)
            }
            _ => {}
        }
    }
    for effect in &state.run.effects {
        let col = view.col(effect.x);
        match effect.kind {
            EffectKind::Lightning => {
                let bottom = view.row(effect.y);
                for row in view.top..=bottom {
                    let ch = if row % 2 == 0 { '╱' } else { '╲' };
                    frame.put(col + (row % 2), row, ch, C_LIGHTNING);
                }
            }
            EffectKind::Splash => {
                let row = view.last_row();
                let spread = (30 - effect.ticks_left as i32).max(0) / 5 + 1;
                for dx in -spread..=spread {
                    frame.put(col + dx, row - (spread - dx.abs()) / 2, '~', C_SPLASH);
                }
            }
        }
    }
}

fn draw_particles(frame: &mut Frame, state: &GameState, view: &Viewport) {
    for p in &state.world.particles {
        frame.put(view.col(p.x), view.row(p.y), '·', tint_color(p.tint));
    }
}

// ── Overlays ──────────────────────────────────────────────────────────────────

/// Full-screen overlays sit above everything, HUD included.
pub fn draw_overlay(frame: &mut Frame, overlay: &Overlay) {
    match overlay.kind {
        OverlayKind::Whiteout => frame.fill('█', Color::White),
        OverlayKind::BossFlash => {
            let fg = if (overlay.ticks_left / 6) % 2 == 0 { C_FLASH_A } else { C_FLASH_B };
            frame.tint(fg);
        }
    }
}
