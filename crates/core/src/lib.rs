//! Core game logic - pure, deterministic, and testable
//!
//! Everything here is plain data and functions over it: no clocks, no I/O,
//! no rendering. The same seed and the same command sequence always produce
//! the same game.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of cells and row clearing
//! - [`pieces`]: tetromino templates, spawn placement and the rotation transform
//! - [`collision`]: bounds/overlap testing, wall kicks and landing rows
//! - [`rng`]: seeded 7-bag queue
//! - [`scoring`]: line scores, combo bonus, levels and drop intervals
//! - [`game_state`]: the state machine driving a game
//! - [`snapshot`]: serializable read-only view for renderers
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every bag of seven draws holds each kind once
//! - **Rotation**: clockwise only, with nine kind-agnostic kick offsets
//! - **Immediate lock**: a piece freezes as soon as a downward step fails
//! - **Ghost Piece**: the landing position of the active piece
//! - **Hold**: one swap per spawned piece
//! - **Scoring**: `[0, 100, 300, 500, 800] * level` plus a growing combo bonus
//!
//! # Example
//!
//! ```
//! use web_tetris_core::GameState;
//! use web_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Hard drop awards two points per row
//! assert!(game.score() > 0);
//! ```
//!
//! # Timing
//!
//! Gravity is driven by [`GameState::tick`](game_state::GameState::tick) with
//! the milliseconds elapsed since the previous frame. The drop interval starts
//! at 1000ms and shrinks by 100ms per level down to 100ms.

pub mod board;
pub mod collision;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use web_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, U8Grid};
pub use collision::{attempt_wall_kick, collides, landing_row, KICK_OFFSETS};
pub use game_state::GameState;
pub use pieces::{Shape, Tetromino};
pub use rng::{next_bag, PieceQueue};
pub use scoring::{
    calculate_drop_score, calculate_level, calculate_score, get_drop_interval_ms, ScoreResult,
};
pub use snapshot::{GameSnapshot, HoldSnapshot, PieceSnapshot};
