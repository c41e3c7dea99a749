//! Pieces module - tetromino templates and the rotation transform
//!
//! Every kind has a square template (2x2 for O, 4x4 for I, 3x3 for the rest)
//! whose non-zero cells carry the kind id. Rotation is a pure transform of the
//! template: transpose, then reverse each row. Pieces are small `Copy` values,
//! so the active piece, the ghost and the hold slot never share storage.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::types::{PieceKind, BOARD_WIDTH};

/// Largest template side length (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a single mino relative to the piece origin, as (dx, dy)
pub type MinoOffset = (i8, i8);

/// A square rotation matrix of size 2, 3 or 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    size: u8,
    /// Row-major matrix; only the top-left `size x size` block is meaningful
    cells: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Canonical spawn template for a piece kind
    pub fn template(kind: PieceKind) -> Self {
        let v = kind.id();
        match kind {
            PieceKind::I => Self::from_rows(&[[0, 0, 0, 0], [v, v, v, v], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::O => Self::from_rows(&[[v, v], [v, v]]),
            PieceKind::T => Self::from_rows(&[[0, v, 0], [v, v, v], [0, 0, 0]]),
            PieceKind::S => Self::from_rows(&[[0, v, v], [v, v, 0], [0, 0, 0]]),
            PieceKind::Z => Self::from_rows(&[[v, v, 0], [0, v, v], [0, 0, 0]]),
            PieceKind::J => Self::from_rows(&[[v, 0, 0], [v, v, v], [0, 0, 0]]),
            PieceKind::L => Self::from_rows(&[[0, 0, v], [v, v, v], [0, 0, 0]]),
        }
    }

    fn from_rows<const N: usize>(rows: &[[u8; N]; N]) -> Self {
        assert!((2..=MAX_SHAPE_SIZE).contains(&N), "unsupported shape size {N}");
        let mut cells = [[0u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            cells[r][..N].copy_from_slice(row);
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    /// Side length of the template
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Value at (row, col); 0 means empty
    pub fn value(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.size() && col < self.size(), "shape access out of range");
        self.cells[row][col]
    }

    /// The matrix as `size` rows of `size` values
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let n = self.size();
        self.cells[..n].iter().map(move |row| &row[..n])
    }

    /// Offsets (dx = column, dy = row) of the occupied cells, row by row
    pub fn cells(&self) -> ArrayVec<MinoOffset, 4> {
        let mut out = ArrayVec::new();
        let n = self.size();
        for r in 0..n {
            for c in 0..n {
                if self.cells[r][c] != 0 {
                    out.push((c as i8, r as i8));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise: transpose, then reverse each row.
    pub fn rotate_cw(&self) -> Self {
        let n = self.size();
        let mut out = *self;
        for r in 0..n {
            for c in 0..n {
                out.cells[c][r] = self.cells[r][c];
            }
        }
        for row in out.cells[..n].iter_mut() {
            row[..n].reverse();
        }
        out
    }

    /// Fixed-size copy of the matrix for export
    pub fn to_grid(&self) -> [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE] {
        self.cells
    }
}

/// A piece placed on the board: kind, current rotation matrix and origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at its spawn position with the canonical template
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = Shape::template(kind);
        Self {
            kind,
            shape,
            x: spawn_column(shape.size()),
            y: 0,
        }
    }

    /// Copy translated by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy with the shape rotated clockwise, same origin
    pub fn rotated_cw(&self) -> Self {
        Self {
            shape: self.shape.rotate_cw(),
            ..*self
        }
    }

    /// Absolute (x, y) of each occupied cell
    pub fn blocks(&self) -> ArrayVec<(i8, i8), 4> {
        self.shape
            .cells()
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }
}

/// Column that centers a template of the given size on the board
pub fn spawn_column(size: usize) -> i8 {
    (BOARD_WIDTH as i8) / 2 - (size as i8) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_sizes() {
        assert_eq!(Shape::template(PieceKind::I).size(), 4);
        assert_eq!(Shape::template(PieceKind::O).size(), 2);
        for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
            assert_eq!(Shape::template(kind).size(), 3);
        }
    }

    #[test]
    fn test_every_template_has_four_cells_tagged_by_kind() {
        for kind in PieceKind::ALL {
            let shape = Shape::template(kind);
            assert_eq!(shape.cells().len(), 4, "{kind:?}");
            for row in shape.rows() {
                assert!(row.iter().all(|v| *v == 0 || *v == kind.id()));
            }
        }
    }

    #[test]
    fn test_spawn_positions() {
        assert_eq!(Tetromino::spawn(PieceKind::I).x, 3);
        assert_eq!(Tetromino::spawn(PieceKind::O).x, 4);
        assert_eq!(Tetromino::spawn(PieceKind::T).x, 4);
        assert!(PieceKind::ALL.iter().all(|k| Tetromino::spawn(*k).y == 0));
    }

    #[test]
    fn test_t_rotates_clockwise() {
        let t = Shape::template(PieceKind::T);
        let r = t.rotate_cw();
        let rows: Vec<Vec<u8>> = r.rows().map(|row| row.to_vec()).collect();
        assert_eq!(rows, vec![vec![0, 3, 0], vec![0, 3, 3], vec![0, 3, 0]]);
    }

    #[test]
    fn test_i_rotates_to_vertical() {
        let r = Shape::template(PieceKind::I).rotate_cw();
        assert_eq!(r.cells().as_slice(), &[(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        for kind in PieceKind::ALL {
            let start = Shape::template(kind);
            let mut shape = start;
            for _ in 0..4 {
                shape = shape.rotate_cw();
            }
            assert_eq!(shape, start, "{kind:?}");
        }
    }

    #[test]
    fn test_rotation_does_not_touch_origin() {
        let piece = Tetromino::spawn(PieceKind::L).shifted(2, 5);
        let rotated = piece.rotated_cw();
        assert_eq!((rotated.x, rotated.y), (piece.x, piece.y));
        assert_ne!(rotated.shape, piece.shape);
    }

    #[test]
    fn test_blocks_are_absolute() {
        let piece = Tetromino::spawn(PieceKind::O);
        assert_eq!(piece.blocks().as_slice(), &[(4, 0), (5, 0), (4, 1), (5, 1)]);
    }
}
