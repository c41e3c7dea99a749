//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or filled with a piece kind.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! Accessors treat out-of-range coordinates as a bug in the caller and panic.
//! Collision probes that may leave the grid go through [`Board::in_bounds`] first.

use crate::types::{cell_value, Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Board contents exported as grid values (0 = empty, 1-7 = piece id)
pub type U8Grid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// Rows are right-aligned to the bottom of the board; `.` or space is empty,
    /// a piece letter fills with that kind and any other character fills with `I`.
    ///
    /// ```
    /// use web_tetris_core::Board;
    ///
    /// let board = Board::from_rows(&["TTTTTTTTT."]);
    /// assert!(board.is_occupied(0, 19));
    /// assert!(!board.is_occupied(9, 19));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= BOARD_HEIGHT as usize, "too many rows");
        let mut board = Self::new();
        let top = BOARD_HEIGHT as usize - rows.len();
        for (i, row) in rows.iter().enumerate() {
            assert!(row.chars().count() <= BOARD_WIDTH as usize, "row too wide: {row:?}");
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    other => Some(
                        PieceKind::from_str(&other.to_string()).unwrap_or(PieceKind::I),
                    ),
                };
                board.set(x as i8, (top + i) as i8, cell);
            }
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> usize {
        assert!(
            Self::in_bounds(x, y),
            "board access out of range: ({x}, {y})"
        );
        (y as usize) * (BOARD_WIDTH as usize) + (x as usize)
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Check if (x, y) lies on the grid
    #[inline]
    pub fn in_bounds(x: i8, y: i8) -> bool {
        x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8
    }

    /// Get cell at position (x, y)
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the grid.
    pub fn get(&self, x: i8, y: i8) -> Cell {
        self.cells[Self::index(x, y)]
    }

    /// Set cell at position (x, y)
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the grid.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) {
        let idx = Self::index(x, y);
        self.cells[idx] = cell;
    }

    /// Check if an on-grid position is filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.get(x, y).is_some()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        assert!(y < BOARD_HEIGHT as usize, "row out of range: {y}");
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove row `y`, shift all rows above it down by one and insert an
    /// empty row at the top.
    pub fn clear_row(&mut self, y: usize) {
        assert!(y < BOARD_HEIGHT as usize, "row out of range: {y}");
        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        for cell in &mut self.cells[..width] {
            *cell = None;
        }
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Scans bottom to top. After a removal the same index is checked again,
    /// since the row above has shifted into it.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT as usize;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.clear_row(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Export the grid as numeric cell values
    pub fn write_u8_grid(&self, out: &mut U8Grid) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, value) in row.iter_mut().enumerate() {
                *value = cell_value(self.cells[y * width + x]);
            }
        }
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(BOARD_WIDTH as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(kind));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), 0);
        assert_eq!(Board::index(9, 0), 9);
        assert_eq!(Board::index(0, 1), 10);
        assert_eq!(Board::index(9, 19), 199);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range_panics() {
        let board = Board::new();
        board.get(10, 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_negative_row_panics() {
        let mut board = Board::new();
        board.set(0, -1, Some(PieceKind::T));
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new();
        board.set(0, 0, Some(PieceKind::I));
        board.set(5, 10, Some(PieceKind::T));

        assert_eq!(board.get(0, 0), Some(PieceKind::I));
        assert_eq!(board.get(5, 10), Some(PieceKind::T));
        assert_eq!(board.cells[10 * 10 + 5], Some(PieceKind::T));
    }

    #[test]
    fn test_clear_single_row_shifts_above_down() {
        let mut board = Board::new();
        fill_row(&mut board, 19, PieceKind::I);
        board.set(2, 18, Some(PieceKind::S));

        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.get(2, 19), Some(PieceKind::S));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_clear_adjacent_rows_rechecks_same_index() {
        let mut board = Board::new();
        fill_row(&mut board, 19, PieceKind::I);
        fill_row(&mut board, 18, PieceKind::O);
        fill_row(&mut board, 17, PieceKind::T);
        board.set(4, 16, Some(PieceKind::L));

        assert_eq!(board.clear_full_rows(), 3);
        assert_eq!(board.get(4, 19), Some(PieceKind::L));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_clear_split_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 19, PieceKind::I);
        board.set(0, 18, Some(PieceKind::J));
        fill_row(&mut board, 17, PieceKind::Z);

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.get(0, 19), Some(PieceKind::J));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_clear_whole_board() {
        let mut board = Board::new();
        for y in 0..BOARD_HEIGHT as i8 {
            fill_row(&mut board, y, PieceKind::T);
        }
        assert_eq!(board.clear_full_rows(), BOARD_HEIGHT as usize);
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_from_rows_bottom_aligned() {
        let board = Board::from_rows(&["..Z.......", "IIIIIIIII."]);
        assert_eq!(board.get(2, 18), Some(PieceKind::Z));
        assert!(board.is_occupied(8, 19));
        assert!(!board.is_occupied(9, 19));
        assert_eq!(board.to_cells().len(), BOARD_HEIGHT as usize);
    }

    #[test]
    fn test_write_u8_grid() {
        let mut board = Board::new();
        board.set(3, 4, Some(PieceKind::L));
        let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[4][3], 7);
        assert_eq!(grid.iter().flatten().filter(|v| **v != 0).count(), 1);
    }
}
