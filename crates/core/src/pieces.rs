//! Pieces module - Tetromino shapes and the rotation operator
//!
//! Every shape is stored pre-padded to a square bounding box (2x2, 3x3 or 4x4), so
//! rotating never changes the box size and four rotations give back the original.

use crate::types::PieceKind;

/// Largest bounding box of any tetromino.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square occupancy matrix of a piece, `size` x `size` in the top-left of `cells`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows of `0`/`1` digits, e.g. `["011", "110", "000"]`.
    ///
    /// Panics if the rows are not square or larger than 4x4; shapes are static data.
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        assert!(
            (1..=MAX_SHAPE_SIZE).contains(&size),
            "shape must be 1x1 to 4x4, got {} rows",
            size
        );
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), size, "shape rows must be square");
            for (x, ch) in row.chars().enumerate() {
                cells[y][x] = ch == '1';
            }
        }
        Self {
            size: size as u8,
            cells,
        }
    }

    /// The canonical (unrotated) shape of a piece kind.
    pub fn canonical(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows(&["0000", "1111", "0000", "0000"]),
            PieceKind::O => Self::from_rows(&["11", "11"]),
            PieceKind::S => Self::from_rows(&["011", "110", "000"]),
            PieceKind::Z => Self::from_rows(&["110", "011", "000"]),
            PieceKind::L => Self::from_rows(&["010", "010", "011"]),
            PieceKind::J => Self::from_rows(&["010", "010", "110"]),
            PieceKind::T => Self::from_rows(&["000", "111", "010"]),
        }
    }

    /// Side length of the bounding box.
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether the cell at `(row, col)` of the bounding box is occupied.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size() && col < self.size() && self.cells[row][col]
    }

    /// Offsets `(row, col)` of the occupied cells, top to bottom, left to right.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let size = self.size();
        (0..size).flat_map(move |y| {
            (0..size)
                .filter(move |&x| self.cells[y][x])
                .map(move |x| (y as i8, x as i8))
        })
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells().count()
    }
}

/// Rotate a shape by a quarter turn: reverse the row order, then transpose.
pub fn rotate(shape: &Shape) -> Shape {
    let size = shape.size();
    let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    for (y, row) in cells.iter_mut().enumerate().take(size) {
        for (x, cell) in row.iter_mut().enumerate().take(size) {
            *cell = shape.cells[size - 1 - x][y];
        }
    }
    Shape {
        size: shape.size,
        cells,
    }
}

/// Apply `turns` quarter turns.
pub fn rotate_n(shape: &Shape, turns: u8) -> Shape {
    (0..turns % 4).fold(*shape, |s, _| rotate(&s))
}

/// A tetromino with its rotation baked into the stored shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Quarter turns applied to the canonical shape (0-3).
    pub rotation: u8,
    pub shape: Shape,
}

impl Piece {
    /// Create a piece of the given kind, rotated `rotation` quarter turns.
    pub fn new(kind: PieceKind, rotation: u8) -> Self {
        let rotation = rotation % 4;
        Self {
            kind,
            rotation,
            shape: rotate_n(&Shape::canonical(kind), rotation),
        }
    }

    /// The same piece turned one more quarter.
    pub fn rotated(&self) -> Self {
        Self {
            kind: self.kind,
            rotation: (self.rotation + 1) % 4,
            shape: rotate(&self.shape),
        }
    }
}

/// Column offsets tried, in order, when a rotation does not fit in place.
pub const ROTATION_KICKS: [i8; 3] = [0, 1, -1];

/// Try to rotate a piece at `(row, col)`.
///
/// Returns the rotated piece and the column it ends up in, or None when no offset
/// in [`ROTATION_KICKS`] is valid.
pub fn try_rotate(
    piece: &Piece,
    row: i8,
    col: i8,
    is_valid: impl Fn(&Shape, i8, i8) -> bool,
) -> Option<(Piece, i8)> {
    let rotated = piece.rotated();
    ROTATION_KICKS
        .iter()
        .map(|&dx| col + dx)
        .find(|&new_col| is_valid(&rotated.shape, row, new_col))
        .map(|new_col| (rotated, new_col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_sizes() {
        assert_eq!(Shape::canonical(PieceKind::I).size(), 4);
        assert_eq!(Shape::canonical(PieceKind::O).size(), 2);
        for kind in [PieceKind::S, PieceKind::Z, PieceKind::L, PieceKind::J, PieceKind::T] {
            assert_eq!(Shape::canonical(kind).size(), 3);
        }
    }

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(Shape::canonical(kind).filled_count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotate_t_quarter_turn() {
        // 000      010
        // 111  ->  110
        // 010      010
        let t = Shape::canonical(PieceKind::T);
        assert_eq!(rotate(&t), Shape::from_rows(&["010", "110", "010"]));
    }

    #[test]
    fn test_rotate_i_stays_in_box() {
        let i = rotate(&Shape::canonical(PieceKind::I));
        assert_eq!(i.size(), 4);
        assert_eq!(i, Shape::from_rows(&["0010", "0010", "0010", "0010"]));
    }

    #[test]
    fn test_piece_rotation_counter_wraps() {
        let p = Piece::new(PieceKind::L, 3).rotated();
        assert_eq!(p.rotation, 0);
        assert_eq!(p.shape, Shape::canonical(PieceKind::L));
    }

    #[test]
    fn test_cells_iterates_row_major() {
        let s = Shape::canonical(PieceKind::S);
        let cells: Vec<_> = s.cells().collect();
        assert_eq!(cells, vec![(0, 1), (0, 2), (1, 0), (1, 1)]);
    }
}
