//! Runtime glue around the pure game core: time sources, the frame driver,
//! event sinks, high-score persistence and environment configuration.

pub mod clock;
pub mod config;
pub mod events;
pub mod highscore;
pub mod scheduler;

pub use web_tetris_core as core;
pub use web_tetris_types as types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use events::{EventSink, LogSink, NullSink};
pub use highscore::{HighScoreStore, JsonFileHighScoreStore, MemoryHighScoreStore};
pub use scheduler::GameDriver;
