//! Command-line flags and the runtime configuration resolved from them.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::constants::TICKS_PER_SECOND;

pub const DEFAULT_FPS: u32 = 30;
const DATA_DIR_NAME: &str = ".arcade_engine";
const LOG_FILE_NAME: &str = "arcade.log";

#[derive(Parser, Debug, Clone)]
#[command(name = "arcade_engine")]
#[command(about = "Ninja Run: a terminal platformer with bosses, hazards and a shop")]
pub struct Args {
    /// Seed the random generator for reproducible levels
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start with sound muted
    #[arg(long)]
    pub mute: bool,

    /// Render rate in frames per second (the simulation always runs at 60 Hz)
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Directory for the leaderboard and the log file
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Log file path (defaults to arcade.log inside the data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub seed: Option<u64>,
    pub muted: bool,
    pub fps: u32,
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            seed: None,
            muted: false,
            fps: DEFAULT_FPS,
            log_file: data_dir.join(LOG_FILE_NAME),
            data_dir,
        }
    }
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

impl From<Args> for GameConfig {
    fn from(args: Args) -> Self {
        let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
        let log_file = args.log_file.unwrap_or_else(|| data_dir.join(LOG_FILE_NAME));
        Self {
            seed: args.seed,
            muted: args.mute,
            fps: args.fps.clamp(1, TICKS_PER_SECOND),
            data_dir,
            log_file,
        }
    }
}

impl GameConfig {
    /// Fixed simulation step.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / TICKS_PER_SECOND
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}
