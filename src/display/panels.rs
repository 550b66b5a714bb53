/// HUD, touch buttons and the boxed panels drawn over the world.
use crossterm::style::Color;

use super::frame::Frame;
use crate::entities::{DiceOutcome, GameOverPanel, GameState, ShopPanel};
use crate::input::touch_buttons;
use crate::shop::Upgrade;

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_COINS: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_BUTTON: Color = Color::Grey;
const C_TITLE: Color = Color::Yellow;
const C_BOX: Color = Color::White;
const C_TEXT: Color = Color::White;
const C_DANGER: Color = Color::Red;
const C_GOOD: Color = Color::Green;

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

pub fn draw_hud(frame: &mut Frame, state: &GameState) {
    let run = &state.run;

    frame.text(1, 0, &format!("Score: {:>6}", run.score), C_HUD_SCORE);

    let level = format!("[ LEVEL {} ]", run.level);
    frame.centered(0, &level, C_HUD_LEVEL);

    let coins = format!("Coins: {}", run.required.saturating_sub(run.collected));
    let hearts = "♥".repeat(run.lives as usize);
    let right = format!("{coins}  Lives: {hearts}{}", if state.muted { "  ♪x" } else { "" });
    let col = frame.width as i32 - right.chars().count() as i32 - 1;
    frame.text(col, 0, &coins, C_HUD_COINS);
    frame.text(col + coins.chars().count() as i32, 0, &right[coins.len()..], C_HUD_LIVES);
}

// ── Touch buttons (last row) ──────────────────────────────────────────────────

pub fn draw_touch_buttons(frame: &mut Frame) {
    for button in touch_buttons(frame.width, frame.height) {
        frame.text(button.col as i32, button.row as i32, button.label, C_BUTTON);
    }
    let hint = "P: Help  M: Mute  Q: Quit";
    frame.centered(frame.height as i32 - 1, hint, C_HINT);
}

// ── Boxed panels ──────────────────────────────────────────────────────────────

/// Draw `lines` inside a centred double-line box.
fn draw_box(frame: &mut Frame, lines: &[(String, Color)]) {
    let inner = lines.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0) + 4;
    let top = (frame.height as i32 - lines.len() as i32 - 2) / 2;
    let left = (frame.width as i32 - inner as i32 - 2) / 2;

    frame.text(left, top, &format!("╔{}╗", "═".repeat(inner)), C_BOX);
    for (i, (line, color)) in lines.iter().enumerate() {
        let row = top + 1 + i as i32;
        frame.text(left, row, &format!("║{}║", " ".repeat(inner)), C_BOX);
        let col = left + 1 + (inner as i32 - line.chars().count() as i32) / 2;
        frame.text(col, row, line, *color);
    }
    let bottom = top + 1 + lines.len() as i32;
    frame.text(left, bottom, &format!("╚{}╝", "═".repeat(inner)), C_BOX);
}

fn line(text: impl Into<String>, color: Color) -> (String, Color) {
    (text.into(), color)
}

pub fn draw_menu(frame: &mut Frame, state: &GameState) {
    let mut lines = vec![
        line("N I N J A   R U N", C_TITLE),
        line("", C_TEXT),
        line("ENTER / S - Start     Q - Quit", C_TEXT),
        line("", C_TEXT),
        line("── Top Ninjas ──", C_HUD_LEVEL),
    ];
    if state.leaderboard.is_empty() {
        lines.push(line("No scores yet", C_HINT));
    }
    for (i, entry) in state.leaderboard.entries().iter().enumerate() {
        lines.push(line(
            format!(
                "{:>2}. {:<12} L{:<3} {:>7}  {}",
                i + 1,
                entry.name,
                entry.level,
                entry.score,
                entry.death_cause.as_deref().unwrap_or("-"),
            ),
            C_TEXT,
        ));
    }
    draw_box(frame, &lines);
}

pub fn draw_help(frame: &mut Frame) {
    draw_box(
        frame,
        &[
            line("PAUSED", C_TITLE),
            line("", C_TEXT),
            line("← → / A D   Move", C_TEXT),
            line("↑ / W       Jump (double jump)", C_TEXT),
            line("SPACE       Attack", C_TEXT),
            line("", C_TEXT),
            line("Collect every coin to clear the level.", C_TEXT),
            line("One coin is rotten: it turns you into an egg.", C_DANGER),
            line("Eggs fall through the ground and hate standing still.", C_DANGER),
            line("", C_TEXT),
            line("P - Resume   M - Mute   Q - Quit", C_HINT),
        ],
    );
}

pub fn draw_level_complete(frame: &mut Frame, state: &GameState, next_level: u32) {
    draw_box(
        frame,
        &[
            line(format!("LEVEL {} COMPLETE!", state.run.level), C_GOOD),
            line(format!("Score: {}", state.run.score), C_HUD_SCORE),
            line(format!("Get ready for level {next_level}..."), C_TEXT),
        ],
    );
}

pub fn draw_game_over(frame: &mut Frame, state: &GameState, panel: &GameOverPanel) {
    let cause = state.run.death_cause.map(|c| c.label()).unwrap_or("Unknown");
    let mut lines = vec![
        line("G A M E   O V E R", C_DANGER),
        line(cause, C_DANGER),
        line("", C_TEXT),
        line(format!("Level {}   Score {}", panel.final_level, panel.final_score), C_HUD_SCORE),
        line("", C_TEXT),
    ];
    match &panel.name_entry {
        Some(name) => {
            lines.push(line("NEW HIGH SCORE! Enter your name:", C_GOOD));
            lines.push(line(format!("> {name}_"), C_TEXT));
            lines.push(line("ENTER - Save   ESC - Skip", C_HINT));
        }
        None => lines.push(line("R - Play Again   ENTER - Menu   Q - Quit", C_TEXT)),
    }
    draw_box(frame, &lines);
}

pub fn draw_shop(frame: &mut Frame, state: &GameState, panel: &ShopPanel) {
    let run = &state.run;
    let mut lines = vec![
        line("★ WORLD SHOP ★", C_TITLE),
        line(format!("Points: {}", run.score), C_HUD_SCORE),
        line("", C_TEXT),
    ];
    for (i, upgrade) in Upgrade::ALL.iter().enumerate() {
        let owned = upgrade.owned(&run.upgrades);
        let text = format!(
            "{} - {:<14} {:>5} pts{}",
            i + 1,
            upgrade.label(),
            upgrade.price(),
            if owned { " (BOUGHT)" } else { "" }
        );
        let color = if owned {
            C_HINT
        } else if run.score >= upgrade.price() {
            C_GOOD
        } else {
            C_TEXT
        };
        lines.push(line(text, color));
    }
    lines.push(line("", C_TEXT));
    match &panel.dice {
        None => lines.push(line("R - Roll the dice (3d6: 15+ invulnerable, 5- lose all)", C_TEXT)),
        Some(roll) => {
            let color = match roll.outcome {
                DiceOutcome::Invulnerable => C_GOOD,
                DiceOutcome::Neutral => C_HUD_SCORE,
                DiceOutcome::Bust => C_DANGER,
            };
            lines.push(line(
                format!("Rolls: {} | {} | {} (Total: {})", roll.dice[0], roll.dice[1], roll.dice[2], roll.total),
                color,
            ));
        }
    }
    if let Some(message) = &panel.message {
        lines.push(line(message.clone(), C_TEXT));
    }
    lines.push(line("", C_TEXT));
    lines.push(line("ENTER / C - Continue to next world", C_HINT));
    draw_box(frame, &lines);
}
