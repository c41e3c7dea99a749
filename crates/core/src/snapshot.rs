use serde::{Deserialize, Serialize};

use crate::board::U8Grid;
use crate::pieces::{Shape, Tetromino};
use crate::types::{GamePhase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for PieceSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

/// Held piece: kind plus its spawn template, independent of the rotation it
/// had when it was held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoldSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
}

impl From<PieceKind> for HoldSnapshot {
    fn from(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: Shape::template(kind),
        }
    }
}

/// Read-only view of everything a renderer, HUD or audio layer needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: U8Grid,
    pub active: Option<PieceSnapshot>,
    pub ghost: Option<PieceSnapshot>,
    pub hold: Option<HoldSnapshot>,
    pub next_queue: [PieceKind; PREVIEW_LEN],
    pub hold_used: bool,
    pub phase: GamePhase,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
    pub seed: u64,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub high_score: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost = None;
        self.hold = None;
        self.next_queue = [PieceKind::I; PREVIEW_LEN];
        self.hold_used = false;
        self.phase = GamePhase::NotStarted;
        self.running = false;
        self.paused = false;
        self.game_over = false;
        self.seed = 0;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.combo = 0;
        self.high_score = 0;
        self.drop_interval_ms = 0;
    }

    pub fn playable(&self) -> bool {
        self.running && self.active.is_some()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost: None,
            hold: None,
            next_queue: [PieceKind::I; PREVIEW_LEN],
            hold_used: false,
            phase: GamePhase::NotStarted,
            running: false,
            paused: false,
            game_over: false,
            seed: 0,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            high_score: 0,
            drop_interval_ms: 0,
        };
        s.clear();
        s
    }
}
