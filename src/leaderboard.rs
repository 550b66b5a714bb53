//! Top-ten score table and the key-value store it is persisted in.
//!
//! The whole table is one JSON blob under [`LEADERBOARD_KEY`].  A missing or
//! unreadable blob yields an empty table; it never stops the game.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_NAME, LEADERBOARD_SIZE, NAME_MAX_CHARS};
use crate::error::{GameError, Result};

pub const LEADERBOARD_KEY: &str = "arcade_engine.leaderboard";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub level: u32,
    pub score: u32,
    #[serde(rename = "deathCause", default)]
    pub death_cause: Option<String>,
}

impl LeaderboardEntry {
    pub fn new(name: &str, level: u32, score: u32, death_cause: Option<String>) -> Self {
        Self {
            name: clean_name(name),
            level,
            score,
            death_cause,
        }
    }
}

/// Trim, fall back to the default name, and cap at `NAME_MAX_CHARS` chars.
pub fn clean_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let name = if trimmed.is_empty() { DEFAULT_NAME } else { trimmed };
    name.chars().take(NAME_MAX_CHARS).collect()
}

/// Entries ordered by level, then score, both descending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary entries, restoring order and the size cap.
    pub fn from_entries(entries: Vec<LeaderboardEntry>) -> Self {
        let mut board = Self { entries };
        board.normalize();
        board
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A score earns a name prompt when the table has room or it beats the
    /// last entry.
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < LEADERBOARD_SIZE {
            return true;
        }
        self.entries.last().map_or(true, |last| score > last.score)
    }

    pub fn insert(&mut self, entry: LeaderboardEntry) {
        self.entries.push(entry);
        self.normalize();
    }

    fn normalize(&mut self) {
        // Stable sort keeps earlier entries ahead of later ties.
        self.entries
            .sort_by(|a, b| b.level.cmp(&a.level).then(b.score.cmp(&a.score)));
        self.entries.truncate(LEADERBOARD_SIZE);
    }

    /// Load from `store`, degrading to an empty table on any failure.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match Self::try_load(store) {
            Ok(board) => board,
            Err(err) => {
                tracing::warn!("leaderboard unavailable, starting empty: {err}");
                Self::new()
            }
        }
    }

    pub fn try_load(store: &dyn KeyValueStore) -> Result<Self> {
        let Some(blob) = store.get(LEADERBOARD_KEY)? else {
            return Ok(Self::new());
        };
        let entries: Vec<LeaderboardEntry> =
            serde_json::from_str(&blob).map_err(|source| GameError::Corrupt {
                key: LEADERBOARD_KEY.to_string(),
                source,
            })?;
        Ok(Self::from_entries(entries))
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let blob = serde_json::to_string(&self.entries).map_err(|source| GameError::Corrupt {
            key: LEADERBOARD_KEY.to_string(),
            source,
        })?;
        store.set(LEADERBOARD_KEY, &blob)
    }
}

// ── Storage ───────────────────────────────────────────────────────────────────

/// String blobs addressed by a namespaced key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store; nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(GameError::Storage {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let storage_err = |source| GameError::Storage {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(storage_err)?;
        fs::write(self.path_for(key), value).map_err(storage_err)
    }
}
