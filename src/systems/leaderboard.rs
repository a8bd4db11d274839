//! The local speedrun leaderboard and its persistence.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use bevy_ecs::resource::Resource;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::leaderboard::CAPACITY;
use crate::error::StorageError;

/// The best run times in milliseconds, fastest first.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    times: Vec<u64>,
}

impl Leaderboard {
    /// Builds a board from arbitrary times, keeping only the fastest [`CAPACITY`].
    pub fn from_times(mut times: Vec<u64>) -> Self {
        times.sort_unstable();
        times.truncate(CAPACITY);
        Self { times }
    }

    /// Records a run time.
    ///
    /// Returns the zero-based rank the time earned, or `None` if it was too slow for a full board.
    /// Ties rank after existing equal times.
    pub fn submit(&mut self, millis: u64) -> Option<usize> {
        let rank = self.times.partition_point(|&time| time <= millis);
        if rank >= CAPACITY {
            return None;
        }

        self.times.insert(rank, millis);
        self.times.truncate(CAPACITY);
        Some(rank)
    }

    pub fn times(&self) -> &[u64] {
        &self.times
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Parses the stored form, a JSON array of integers.
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        let times: Vec<u64> = serde_json::from_str(raw)?;
        Ok(Self::from_times(times))
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Key-value persistence for the serialized leaderboard.
pub trait ScoreStore: Send + Sync {
    /// Returns the stored value, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn save(&self, value: &str) -> Result<(), StorageError>;
}

/// Stores the leaderboard in a file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, value: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, value)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same contents.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    value: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(value.into()))),
        }
    }

    /// The last saved value.
    pub fn contents(&self) -> Option<String> {
        self.value.lock().ok().and_then(|value| value.clone())
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let value = self
            .value
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(value.clone())
    }

    fn save(&self, value: &str) -> Result<(), StorageError> {
        let mut stored = self
            .value
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        *stored = Some(value.to_string());
        Ok(())
    }
}

/// The leaderboard together with the store it persists to.
#[derive(Resource)]
pub struct LeaderboardResource {
    pub board: Leaderboard,
    store: Box<dyn ScoreStore>,
}

impl LeaderboardResource {
    /// Loads the board from `store`. Missing or unreadable data starts an empty board.
    pub fn load(store: Box<dyn ScoreStore>) -> Self {
        let board = match store.load() {
            Ok(Some(raw)) => match Leaderboard::from_json(&raw) {
                Ok(board) => {
                    debug!(entries = board.times().len(), "Loaded leaderboard");
                    board
                }
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable leaderboard");
                    Leaderboard::default()
                }
            },
            Ok(None) => {
                debug!("No saved leaderboard, starting empty");
                Leaderboard::default()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load leaderboard, starting empty");
                Leaderboard::default()
            }
        };

        Self { board, store }
    }

    /// Submits a run time and persists the board.
    ///
    /// The rank is returned even if saving fails; the save error is returned alongside it.
    pub fn submit(&mut self, millis: u64) -> (Option<usize>, Result<(), StorageError>) {
        let rank = self.board.submit(millis);
        match rank {
            Some(rank) => info!(millis, rank = rank + 1, "New leaderboard entry"),
            None => debug!(millis, "Run too slow for the leaderboard"),
        }

        let saved = if rank.is_some() { self.persist() } else { Ok(()) };
        (rank, saved)
    }

    fn persist(&self) -> Result<(), StorageError> {
        let raw = self.board.to_json()?;
        self.store.save(&raw)
    }
}
