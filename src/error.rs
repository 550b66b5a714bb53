//! Error types for the edges of the engine.
//!
//! Gameplay itself never fails; only storage and audio output can.  The
//! terminal host reports its own failures through `anyhow`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// Reading or writing a stored blob failed
    #[error("storage error for key '{key}': {source}")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A stored blob could not be encoded or decoded
    #[error("corrupt data for key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// No audio output device could be opened
    #[error("audio output unavailable: {0}")]
    AudioDevice(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
