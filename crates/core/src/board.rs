//! Board module - manages the game grid
//!
//! The board is a W x H grid (8 x 24 on the cross) where each cell is either empty or
//! locked. Uses a flat vector for cache locality; the allocation happens once.
//! Coordinates: (row, col) where row grows downward from 0 and col grows rightward.

use crate::pieces::Shape;
use crate::types::{Placement, BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_SIDE};

/// The game board, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<bool>,
}

impl Board {
    /// Create a new empty board
    ///
    /// # Panics
    ///
    /// Panics if either side is larger than [`MAX_BOARD_SIDE`].
    pub fn new(width: u8, height: u8) -> Self {
        assert!(
            width <= MAX_BOARD_SIDE && height <= MAX_BOARD_SIDE,
            "board {}x{} exceeds {} cells per side",
            width,
            height,
            MAX_BOARD_SIDE
        );
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// Build a board from text rows, `#` for locked and anything else for empty.
    ///
    /// All rows must have the same length, and neither side may exceed
    /// [`MAX_BOARD_SIDE`].
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.first().map_or(0, |r| r.chars().count());
        let height = rows.len();
        let side = MAX_BOARD_SIDE as usize;
        assert!(
            width <= side && height <= side,
            "board {}x{} exceeds {} cells per side",
            width,
            height,
            side
        );
        let mut board = Self::new(width as u8, height as u8);
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.chars().count(), width, "ragged board rows");
            for (col, ch) in line.chars().enumerate() {
                board.set(row as i8, col as i8, ch == '#');
            }
        }
        board
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(&self, row: i8, col: i8) -> Option<usize> {
        if row < 0 || col < 0 || row as u8 >= self.height || col as u8 >= self.width {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at (row, col). Returns None if out of bounds.
    pub fn get(&self, row: i8, col: i8) -> Option<bool> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: i8, col: i8, locked: bool) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = locked;
                true
            }
            None => false,
        }
    }

    /// Whether (row, col) is inside the board and empty.
    pub fn is_free(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(false))
    }

    /// Whether every occupied cell of `shape` anchored at `placement` is in bounds and
    /// not already locked.
    pub fn is_valid(&self, placement: Placement, shape: &Shape) -> bool {
        shape.cells().all(|(dy, dx)| {
            match (placement.row.checked_add(dy), placement.col.checked_add(dx)) {
                (Some(row), Some(col)) => self.is_free(row, col),
                _ => false,
            }
        })
    }

    /// Lock every occupied cell of `shape` at `placement`.
    ///
    /// # Panics
    ///
    /// Panics if the placement is not valid. Callers check [`Board::is_valid`] first;
    /// reaching the panic means the caller's bookkeeping is broken.
    pub fn deposit(&mut self, placement: Placement, shape: &Shape) {
        assert!(
            self.is_valid(placement, shape),
            "deposit at invalid placement {:?}",
            placement
        );
        for (dy, dx) in shape.cells() {
            self.set(placement.row + dy, placement.col + dx, true);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height as usize {
            return false;
        }
        let width = self.width as usize;
        let start = row * width;
        self.cells[start..start + width].iter().all(|&cell| cell)
    }

    /// Remove every full row and insert blank rows at the top so the height is kept.
    ///
    /// Surviving rows keep their relative order. Returns the number of rows removed.
    pub fn clear_completed_rows(&mut self) -> usize {
        let width = self.width as usize;
        let mut cleared = 0;
        let mut write_y = self.height as usize;

        // Scan from bottom to top, compacting non-full rows downward.
        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(false);
        cleared
    }

    /// Lowest row the shape can reach by falling straight down from `placement`.
    pub fn drop_row(&self, placement: Placement, shape: &Shape) -> i8 {
        let mut row = placement.row;
        while let Some(below) = row.checked_add(1) {
            if !self.is_valid(Placement::new(below, placement.col), shape) {
                break;
            }
            row = below;
        }
        row
    }

    /// Number of locked cells.
    pub fn locked_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// One row of the board.
    pub fn row(&self, row: usize) -> &[bool] {
        let width = self.width as usize;
        &self.cells[row * width..(row + 1) * width]
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::default();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(0, 7), Some(7));
        assert_eq!(board.index(1, 0), Some(8));
        assert_eq!(board.index(23, 7), Some(191));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(0, 8), None);
        assert_eq!(board.index(24, 0), None);
    }

    #[test]
    fn test_from_rows() {
        let board = Board::from_rows(&["#..", ".#.", "..#"]);
        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 3);
        assert_eq!(board.get(0, 0), Some(true));
        assert_eq!(board.get(1, 1), Some(true));
        assert_eq!(board.get(0, 1), Some(false));
        assert_eq!(board.locked_count(), 3);
    }

    #[test]
    fn test_drop_row_stops_on_stack() {
        let board = Board::from_rows(&["....", "....", "....", "....", "##.."]);
        let o = Shape::canonical(PieceKind::O);
        assert_eq!(board.drop_row(Placement::new(0, 0), &o), 2);
        assert_eq!(board.drop_row(Placement::new(0, 2), &o), 3);
    }

    #[test]
    fn test_largest_board_accepts_every_index() {
        let board = Board::new(MAX_BOARD_SIDE, MAX_BOARD_SIDE);
        assert_eq!(board.get(i8::MAX - 1, i8::MAX - 1), Some(false));
        assert_eq!(board.get(i8::MAX, 0), None);

        // A vertical I reaching past i8::MAX is out of bounds, not an overflow.
        let vertical = crate::pieces::rotate(&Shape::canonical(PieceKind::I));
        assert!(!board.is_valid(Placement::new(i8::MAX - 1, 0), &vertical));
        assert_eq!(board.drop_row(Placement::new(0, 0), &vertical), i8::MAX - 4);
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn test_oversized_board_is_rejected() {
        Board::new(8, 200);
    }

    #[test]
    fn test_clear_keeps_order_of_survivors() {
        let mut board = Board::from_rows(&["#...", "####", ".#..", "####", "..#."]);
        assert_eq!(board.clear_completed_rows(), 2);
        assert_eq!(
            board,
            Board::from_rows(&["....", "....", "#...", ".#..", "..#."])
        );
    }
}
