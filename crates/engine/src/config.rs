//! Engine configuration from the environment

use std::path::PathBuf;

use crate::highscore::{HighScoreStore, JsonFileHighScoreStore, MemoryHighScoreStore};
use crate::types::TICK_MS;

pub const DEFAULT_SEED: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the piece bag
    pub seed: u64,
    /// Frame period used when simulating a display refresh
    pub frame_ms: u32,
    /// Where the best score is kept; in memory only when unset
    pub high_score_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            frame_ms: TICK_MS,
            high_score_path: None,
        }
    }
}

impl EngineConfig {
    /// Read `TETRIS_SEED`, `TETRIS_FRAME_MS` and `TETRIS_HIGH_SCORE_PATH`.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("TETRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let frame_ms = lookup("TETRIS_FRAME_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|ms: &u32| *ms > 0)
            .unwrap_or(defaults.frame_ms);

        let high_score_path = lookup("TETRIS_HIGH_SCORE_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            seed,
            frame_ms,
            high_score_path,
        }
    }

    pub fn high_score_store(&self) -> Box<dyn HighScoreStore> {
        match &self.high_score_path {
            Some(path) => Box::new(JsonFileHighScoreStore::new(path)),
            None => Box::new(MemoryHighScoreStore::default()),
        }
    }
}
