use rand::rngs::StdRng;
use rand::SeedableRng;

use arcade_engine::compute::{new_game_state, start_game};
use arcade_engine::display::{compose, present, render};
use arcade_engine::entities::*;
use arcade_engine::hazard::{boss_flash, whiteout};
use arcade_engine::leaderboard::{Leaderboard, LeaderboardEntry};
use arcade_engine::shop::Upgrade;

const W: u16 = 100;
const H: u16 = 30;

fn make_state() -> GameState {
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = new_game_state(Leaderboard::new(), &mut rng);
    start_game(&mut state, &mut rng);
    state
}

// ── compose ───────────────────────────────────────────────────────────────────

#[test]
fn compose_leaves_state_untouched() {
    let state = make_state();
    let before = format!("{state:?}");
    let frame = compose(&state, W, H);
    assert_eq!(format!("{state:?}"), before);
    assert_eq!((frame.width, frame.height), (W, H));
}

#[test]
fn compose_is_deterministic() {
    let state = make_state();
    assert_eq!(compose(&state, W, H), compose(&state, W, H));
}

#[test]
fn hud_shows_score_level_and_lives() {
    let mut state = make_state();
    state.run.score = 1234;
    let hud = compose(&state, W, H).row_text(0);
    assert!(hud.contains("Score:   1234"));
    assert!(hud.contains("[ LEVEL 1 ]"));
    assert!(hud.contains("Lives: ♥♥♥"));
    assert!(hud.contains("Coins: 5"));
}

#[test]
fn mute_mark_appears_when_muted() {
    let mut state = make_state();
    state.muted = true;
    assert!(compose(&state, W, H).row_text(0).contains("♪x"));
}

#[test]
fn touch_buttons_on_last_row() {
    let bottom = compose(&make_state(), W, H).row_text(H - 1);
    assert!(bottom.contains("[ JUMP ]"));
    assert!(bottom.contains("[ ATTACK ]"));
}

#[test]
fn player_is_drawn() {
    let text = compose(&make_state(), W, H).to_text();
    assert!(text.contains('☻'));
}

#[test]
fn egg_uses_its_own_glyph() {
    let mut state = make_state();
    state.world.player.form = Form::Alternate;
    let text = compose(&state, W, H).to_text();
    assert!(!text.contains('☻'));
}

#[test]
fn whiteout_covers_everything() {
    let mut state = make_state();
    state.run.overlay = Some(whiteout());
    let frame = compose(&state, W, H);
    for row in 0..H {
        assert!(frame.row(row).iter().all(|c| c.ch == '█'), "row {row} not white");
    }
}

#[test]
fn boss_flash_tints_the_hud() {
    let mut state = make_state();
    state.run.overlay = Some(boss_flash(60));
    let frame = compose(&state, W, H);
    let hud = frame.row(0);
    assert!(frame.row_text(0).contains("[ LEVEL 1 ]"));
    let first = hud.iter().find(|c| c.ch != ' ').expect("hud text").fg;
    assert!(hud.iter().filter(|c| c.ch != ' ').all(|c| c.fg == first));
}

// ── Panels ────────────────────────────────────────────────────────────────────

#[test]
fn menu_lists_leaderboard() {
    let mut state = make_state();
    state.screen = Screen::Menu;
    assert!(compose(&state, W, H).to_text().contains("No scores yet"));

    state.leaderboard = Leaderboard::from_entries(vec![LeaderboardEntry::new(
        "Kai",
        4,
        2500,
        Some("Slain by Enemy".to_string()),
    )]);
    let text = compose(&state, W, H).to_text();
    assert!(text.contains("N I N J A   R U N"));
    assert!(text.contains("Kai"));
    assert!(text.contains("2500"));
    assert!(text.contains("Slain by Enemy"));
}

#[test]
fn pause_shows_help() {
    let mut state = make_state();
    state.screen = Screen::Paused;
    assert!(compose(&state, W, H).to_text().contains("PAUSED"));
}

#[test]
fn game_over_names_the_cause() {
    let mut state = make_state();
    state.run.death_cause = Some(DeathCause::CrushedByMeteor);
    state.screen = Screen::GameOver(GameOverPanel { name_entry: None, final_score: 80, final_level: 2 });
    let text = compose(&state, W, H).to_text();
    assert!(text.contains("G A M E   O V E R"));
    assert!(text.contains("Crushed by Meteor"));
    assert!(text.contains("Level 2   Score 80"));
    assert!(text.contains("R - Play Again"));
}

#[test]
fn game_over_prompts_for_name() {
    let mut state = make_state();
    state.screen = Screen::GameOver(GameOverPanel {
        name_entry: Some("Ka".to_string()),
        final_score: 80,
        final_level: 2,
    });
    let text = compose(&state, W, H).to_text();
    assert!(text.contains("NEW HIGH SCORE! Enter your name:"));
    assert!(text.contains("> Ka_"));
}

#[test]
fn shop_lists_prices_and_dice() {
    let mut state = make_state();
    state.run.score = 1500;
    state.run.upgrades.attack_bought = true;
    state.screen = Screen::Shop(ShopPanel {
        dice: Some(DiceRoll { dice: [6, 5, 4], total: 15, outcome: DiceOutcome::Invulnerable }),
        message: Some("hello".to_string()),
    });
    let text = compose(&state, W, H).to_text();
    assert!(text.contains("WORLD SHOP"));
    assert!(text.contains("Points: 1500"));
    assert!(text.contains(Upgrade::Speed.label()));
    assert!(text.contains("(BOUGHT)"));
    assert!(text.contains("Rolls: 6 | 5 | 4 (Total: 15)"));
    assert!(text.contains("hello"));
}

#[test]
fn level_complete_banner() {
    let mut state = make_state();
    state.screen = Screen::Transitioning { ticks_left: 10, next_level: 2 };
    assert!(compose(&state, W, H).to_text().contains("LEVEL 1 COMPLETE!"));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let state = make_state();
    let frame = compose(&state, 5, 2);
    assert_eq!(frame.width, 5);
}

// ── present ───────────────────────────────────────────────────────────────────

#[test]
fn present_writes_frame_text() {
    let state = make_state();
    let frame = compose(&state, W, H);
    let mut out: Vec<u8> = Vec::new();
    present(&mut out, &frame).expect("present");
    let written = String::from_utf8_lossy(&out);
    assert!(written.contains("LEVEL 1"));

    let mut again: Vec<u8> = Vec::new();
    render(&mut again, &state, W, H).expect("render");
    assert_eq!(out, again);
}
