/// Input mapping: raw key and touch (mouse) events in, held-action flags out.
///
/// Keys are tracked by the frame they were last seen on.  Terminals that emit
/// key-release events drop a key immediately; classic terminals only send
/// repeated presses, so a key also expires after `HOLD_WINDOW` frames of
/// silence.  On-screen touch buttons stay held until the pointer is released.
use std::collections::{HashMap, HashSet};

use crossterm::event::KeyCode;

use crate::entities::Screen;
use crate::shop::Upgrade;

/// A key counts as held if it was seen within this many frames.
pub const HOLD_WINDOW: u64 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Attack,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::MoveLeft, Action::MoveRight, Action::Jump, Action::Attack];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldActions {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub attack: bool,
}

impl HeldActions {
    fn set(&mut self, action: Action) {
        match action {
            Action::MoveLeft => self.move_left = true,
            Action::MoveRight => self.move_right = true,
            Action::Jump => self.jump = true,
            Action::Attack => self.attack = true,
        }
    }
}

/// What the simulation sees for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub held: HeldActions,
    /// Rising edges since the previous sample.
    pub jump_pressed: bool,
    pub attack_pressed: bool,
}

#[derive(Debug, Default)]
pub struct InputMapper {
    last_seen: HashMap<Action, u64>,
    touch: Option<Action>,
    edges: HashSet<Action>,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    fn key_held(&self, action: Action, frame: u64) -> bool {
        self.last_seen
            .get(&action)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn is_held(&self, action: Action, frame: u64) -> bool {
        self.touch == Some(action) || self.key_held(action, frame)
    }

    /// A key press.  Only counts as a new press if the action was not
    /// already held, so OS key-repeat does not re-trigger jumps.
    pub fn press(&mut self, action: Action, frame: u64) {
        if !self.is_held(action, frame) {
            self.edges.insert(action);
        }
        self.last_seen.insert(action, frame);
    }

    /// An explicit key-repeat event: keep the key alive.
    pub fn repeat(&mut self, action: Action, frame: u64) {
        self.last_seen.insert(action, frame);
    }

    pub fn release(&mut self, action: Action) {
        self.last_seen.remove(&action);
    }

    pub fn touch_down(&mut self, action: Action, frame: u64) {
        if !self.is_held(action, frame) {
            self.edges.insert(action);
        }
        self.touch = Some(action);
    }

    pub fn touch_up(&mut self) {
        self.touch = None;
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
        self.touch = None;
        self.edges.clear();
    }

    /// Snapshot the flags for this tick and consume pending edges.
    pub fn sample(&mut self, frame: u64) -> InputFrame {
        let mut held = HeldActions::default();
        for action in Action::ALL {
            if self.is_held(action, frame) {
                held.set(action);
            }
        }
        let frame_input = InputFrame {
            held,
            jump_pressed: self.edges.contains(&Action::Jump),
            attack_pressed: self.edges.contains(&Action::Attack),
        };
        self.edges.clear();
        frame_input
    }
}

pub fn action_for_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::MoveRight),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::Jump),
        KeyCode::Char(' ') => Some(Action::Attack),
        _ => None,
    }
}

// ── Touch buttons ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchButton {
    pub action: Action,
    pub label: &'static str,
    pub col: u16,
    pub row: u16,
}

impl TouchButton {
    pub fn width(&self) -> u16 {
        self.label.chars().count() as u16
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        row == self.row && col >= self.col && col < self.col + self.width()
    }
}

const TOUCH_LABELS: [(Action, &str); 4] = [
    (Action::MoveLeft, "[  ◀  ]"),
    (Action::MoveRight, "[  ▶  ]"),
    (Action::Jump, "[ JUMP ]"),
    (Action::Attack, "[ ATTACK ]"),
];

/// On-screen buttons along the bottom row: movement on the left, jump and
/// attack on the right.
pub fn touch_buttons(width: u16, height: u16) -> Vec<TouchButton> {
    let row = height.saturating_sub(1);
    let mut buttons = Vec::with_capacity(TOUCH_LABELS.len());

    let mut col = 1;
    for &(action, label) in &TOUCH_LABELS[..2] {
        buttons.push(TouchButton { action, label, col, row });
        col += label.chars().count() as u16 + 1;
    }

    let right_width: u16 = TOUCH_LABELS[2..]
        .iter()
        .map(|(_, label)| label.chars().count() as u16 + 1)
        .sum();
    let mut col = width.saturating_sub(right_width + 1);
    for &(action, label) in &TOUCH_LABELS[2..] {
        buttons.push(TouchButton { action, label, col, row });
        col += label.chars().count() as u16 + 1;
    }
    buttons
}

pub fn touch_action_at(col: u16, row: u16, width: u16, height: u16) -> Option<Action> {
    touch_buttons(width, height)
        .into_iter()
        .find(|b| b.contains(col, row))
        .map(|b| b.action)
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// One-shot requests outside the held-action set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    TogglePause,
    ToggleMute,
    Restart,
    Quit,
    Confirm,
    Cancel,
    Buy(Upgrade),
    RollDice,
    Type(char),
    Backspace,
}

/// Keys mean different things on different screens; while a name is being
/// typed every printable key is text.
pub fn command_for_key(code: KeyCode, screen: &Screen) -> Option<Command> {
    if let Screen::GameOver(panel) = screen {
        if panel.name_entry.is_some() {
            return match code {
                KeyCode::Enter => Some(Command::Confirm),
                KeyCode::Esc => Some(Command::Cancel),
                KeyCode::Backspace => Some(Command::Backspace),
                KeyCode::Char(c) if !c.is_control() => Some(Command::Type(c)),
                _ => None,
            };
        }
    }

    match (code, screen) {
        (KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc, Screen::Menu) => {
            Some(Command::Quit)
        }
        (KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S'), Screen::Menu) => {
            Some(Command::Start)
        }
        (KeyCode::Char('1'), Screen::Shop(_)) => Some(Command::Buy(Upgrade::Health)),
        (KeyCode::Char('2'), Screen::Shop(_)) => Some(Command::Buy(Upgrade::Speed)),
        (KeyCode::Char('3'), Screen::Shop(_)) => Some(Command::Buy(Upgrade::Attack)),
        (KeyCode::Char('r') | KeyCode::Char('R'), Screen::Shop(_)) => Some(Command::RollDice),
        (KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('C'), Screen::Shop(_)) => {
            Some(Command::Confirm)
        }
        (KeyCode::Char('r') | KeyCode::Char('R'), Screen::GameOver(_)) => Some(Command::Restart),
        (KeyCode::Enter, Screen::GameOver(_)) => Some(Command::Confirm),
        (KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char('h') | KeyCode::Char('H'), _) => {
            Some(Command::TogglePause)
        }
        (KeyCode::Char('m') | KeyCode::Char('M'), _) => Some(Command::ToggleMute),
        (KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc, _) => Some(Command::Quit),
        _ => None,
    }
}
