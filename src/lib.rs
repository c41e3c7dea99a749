//! Web Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `web_tetris::{core,engine,types}` and
//! hosts the headless script runner used by the `web-tetris` binary.

pub use web_tetris_core as core;
pub use web_tetris_engine as engine;
pub use web_tetris_types as types;

pub mod script;
