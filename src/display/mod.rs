/// Rendering layer: all terminal I/O lives here.
///
/// `compose` is a pure function from an immutable `GameState` to a `Frame`;
/// `present` translates a frame into terminal commands.  No game logic is
/// performed.
pub mod frame;
pub mod panels;
pub mod scene;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::entities::{GameState, Screen};
pub use frame::{Cell, Frame};
use scene::Viewport;

// ── Public entry points ───────────────────────────────────────────────────────

/// Build one complete frame for a `width` × `height` terminal.
///
/// Draw order: world layers back to front, then HUD and touch buttons, then
/// the active overlay, then any panel for the current screen.  The HUD sits
/// under the overlay, so a boss flash tints it and a whiteout hides it.
pub fn compose(state: &GameState, width: u16, height: u16) -> Frame {
    let mut frame = Frame::new(width, height);
    let view = Viewport::new(state.world.camera_x, width, height);

    scene::draw_world(&mut frame, state, &view);
    panels::draw_hud(&mut frame, state);
    panels::draw_touch_buttons(&mut frame);

    if let Some(overlay) = &state.run.overlay {
        scene::draw_overlay(&mut frame, overlay);
    }

    match &state.screen {
        Screen::Menu => panels::draw_menu(&mut frame, state),
        Screen::Paused => panels::draw_help(&mut frame),
        Screen::Transitioning { next_level, .. } => {
            panels::draw_level_complete(&mut frame, state, *next_level)
        }
        Screen::GameOver(panel) => panels::draw_game_over(&mut frame, state, panel),
        Screen::Shop(panel) => panels::draw_shop(&mut frame, state, panel),
        Screen::Playing | Screen::Resolving { .. } => {}
    }
    frame
}

/// Write a frame to the terminal, one colour run at a time.
pub fn present<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    for row in 0..frame.height {
        out.queue(cursor::MoveTo(0, row))?;
        let mut run = String::new();
        let mut run_color: Option<Color> = None;
        for cell in frame.row(row) {
            if run_color != Some(cell.fg) {
                flush_run(out, &mut run, run_color)?;
                run_color = Some(cell.fg);
            }
            run.push(cell.ch);
        }
        flush_run(out, &mut run, run_color)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, frame.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn flush_run<W: Write>(out: &mut W, run: &mut String, color: Option<Color>) -> std::io::Result<()> {
    if run.is_empty() {
        return Ok(());
    }
    if let Some(color) = color {
        out.queue(style::SetForegroundColor(color))?;
    }
    out.queue(Print(run.as_str()))?;
    run.clear();
    Ok(())
}

/// Compose and present in one go.
pub fn render<W: Write>(out: &mut W, state: &GameState, width: u16, height: u16) -> std::io::Result<()> {
    let frame = compose(state, width, height);
    present(out, &frame)
}
