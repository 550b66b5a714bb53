use std::fs::{self, OpenOptions};
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use arcade_engine::audio::output::{AudioSink, SilentSink};
use arcade_engine::audio::AudioDispatcher;
use arcade_engine::compute::{apply_command, new_game_state, tick};
use arcade_engine::config::{Args, GameConfig};
use arcade_engine::display;
use arcade_engine::entities::{GameState, Screen};
use arcade_engine::events::GameEvent;
use arcade_engine::input::{action_for_key, command_for_key, touch_action_at, Command, InputMapper};
use arcade_engine::leaderboard::{FileStore, Leaderboard};

/// Most simulation steps run back-to-back after a stall.
const MAX_CATCH_UP: u32 = 5;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs go to a file.
fn init_logging(config: &GameConfig) -> anyhow::Result<()> {
    if let Some(parent) = config.log_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("opening log file {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Audio ─────────────────────────────────────────────────────────────────────

#[cfg(feature = "sound")]
fn open_sink() -> Box<dyn AudioSink> {
    match arcade_engine::audio::output::RodioSink::open() {
        Ok(sink) => Box::new(sink),
        Err(err) => {
            tracing::warn!("{err}; continuing without sound");
            Box::new(SilentSink::default())
        }
    }
}

#[cfg(not(feature = "sound"))]
fn open_sink() -> Box<dyn AudioSink> {
    Box::new(SilentSink::default())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

struct Session {
    state: GameState,
    rng: StdRng,
    audio: AudioDispatcher<Box<dyn AudioSink>>,
    store: FileStore,
}

impl Session {
    /// Feed events to audio and persist anything that needs it.
    fn handle_events(&mut self, events: &[GameEvent]) {
        self.audio.dispatch(events, &mut self.rng);
        for event in events {
            if let GameEvent::ScoreSubmitted(entry) = event {
                if let Err(err) = self.state.leaderboard.save(&mut self.store) {
                    tracing::warn!(name = %entry.name, "leaderboard not saved: {err}");
                }
            }
        }
    }

    /// Returns `true` when the player asked to quit.
    fn command(&mut self, command: Command) -> bool {
        if command == Command::Quit {
            return true;
        }
        let events = apply_command(&mut self.state, &command, &mut self.rng);
        self.handle_events(&events);
        false
    }
}

/// Input model: held keys are tracked by the frame they were last seen on
/// (see `InputMapper`), so movement, jump and attack combine freely.  The
/// simulation runs on a fixed 60 Hz accumulator, independent of the render
/// rate.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> anyhow::Result<()> {
    let mut mapper = InputMapper::new();
    let step = config.tick_duration();
    let frame_time = config.frame_duration();
    let mut frame: u64 = 0;
    let mut accumulator = Duration::ZERO;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let (width, height) = terminal::size()?;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                            return Ok(());
                        }
                        if let Some(action) = action_for_key(code) {
                            mapper.press(action, frame);
                        }
                        if let Some(command) = command_for_key(code, &session.state.screen) {
                            if session.command(command) {
                                return Ok(());
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        if let Some(action) = action_for_key(code) {
                            mapper.repeat(action, frame);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(action) = action_for_key(code) {
                            mapper.release(action);
                        }
                    }
                },
                Event::Mouse(MouseEvent { kind, column, row, .. }) => match kind {
                    MouseEventKind::Down(_) | MouseEventKind::Drag(_) => {
                        match touch_action_at(column, row, width, height) {
                            Some(action) => mapper.touch_down(action, frame),
                            None => mapper.touch_up(),
                        }
                    }
                    MouseEventKind::Up(_) => mapper.touch_up(),
                    _ => {}
                },
                _ => {}
            }
        }

        // ── Fixed-step simulation ─────────────────────────────────────────────
        let now = Instant::now();
        accumulator += now - last;
        last = now;
        let mut steps = 0;
        while accumulator >= step {
            accumulator -= step;
            if steps >= MAX_CATCH_UP {
                accumulator = Duration::ZERO;
                break;
            }
            steps += 1;
            let input = mapper.sample(frame);
            let events = tick(&mut session.state, &input, &mut session.rng);
            session.handle_events(&events);
            let playing = session.state.screen == Screen::Playing;
            session.audio.tick_music(playing, &mut session.rng);
        }

        display::render(out, &session.state, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = GameConfig::from(Args::parse());
    init_logging(&config)?;
    tracing::info!(?config, "arcade_engine starting");

    let store = FileStore::new(&config.data_dir);
    let leaderboard = Leaderboard::load(&store);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut state = new_game_state(leaderboard, &mut rng);
    state.muted = config.muted;
    let mut session = Session {
        state,
        rng,
        audio: AudioDispatcher::new(open_sink(), config.muted),
        store,
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Terminals without the kitty protocol fall back to hold-window expiry.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let result = game_loop(&mut out, &mut session, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!("exiting with error: {err:#}");
    }
    tracing::info!(score = session.state.run.score, "arcade_engine exiting");
    result
}
