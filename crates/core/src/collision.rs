//! Collision module - bounds/overlap testing and wall kicks
//!
//! Cells above the top edge (negative rows) never collide with the board.
//! Whether such a piece may lock is decided by the game state, not here.

use crate::board::Board;
use crate::pieces::Tetromino;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Kick offsets (dx, dy) tried after a rotation, in priority order.
///
/// Kind-agnostic approximation of guideline kicks: stay, one left, one right,
/// up, up-left, up-right, two left, two right, two up.
pub const KICK_OFFSETS: [(i8, i8); 9] = [
    (0, 0),
    (-1, 0),
    (1, 0),
    (0, -1),
    (-1, -1),
    (1, -1),
    (-2, 0),
    (2, 0),
    (0, -2),
];

/// Check whether a piece overlaps a wall, the floor, or a filled cell
pub fn collides(piece: &Tetromino, board: &Board) -> bool {
    piece.blocks().iter().any(|&(x, y)| {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        y >= 0 && board.is_occupied(x, y)
    })
}

/// Try the kick offsets on an already rotated piece.
///
/// Returns the first non-colliding variant, or `None` when every offset collides.
pub fn attempt_wall_kick(rotated: &Tetromino, board: &Board) -> Option<Tetromino> {
    KICK_OFFSETS
        .iter()
        .map(|&(dx, dy)| rotated.shifted(dx, dy))
        .find(|candidate| !collides(candidate, board))
}

/// Lowest row the piece can reach by moving straight down from where it is.
///
/// Stops one row above the first collision; returns the piece's own row if it
/// cannot move at all.
pub fn landing_row(piece: &Tetromino, board: &Board) -> i8 {
    let mut probe = *piece;
    while !collides(&probe.shifted(0, 1), board) {
        probe.y += 1;
    }
    probe.y
}
