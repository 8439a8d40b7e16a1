//! Board tests - collision, deposit and row clearing

use cross_tetris::core::{Board, Piece, Shape};
use cross_tetris::types::{PieceKind, Placement, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::default();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for row in 0..BOARD_HEIGHT as i8 {
        for col in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(row, col), Some(false), "cell ({}, {})", row, col);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::default();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_HEIGHT as i8, 0), None);
    assert_eq!(board.get(0, BOARD_WIDTH as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::default();
    assert!(board.set(10, 5, true));
    assert_eq!(board.get(10, 5), Some(true));
    assert!(board.set(10, 5, false));
    assert_eq!(board.get(10, 5), Some(false));
    assert!(!board.set(0, 8, true));
}

#[test]
fn test_is_valid_ignores_empty_mask_cells() {
    // The I piece's top row is empty, so anchoring it one row above the board is fine.
    let board = Board::default();
    let i = Shape::canonical(PieceKind::I);
    assert!(board.is_valid(Placement::new(-1, 0), &i));
    assert!(!board.is_valid(Placement::new(-2, 0), &i));
    // Rightmost filled column must stay inside.
    assert!(board.is_valid(Placement::new(0, 4), &i));
    assert!(!board.is_valid(Placement::new(0, 5), &i));
}

#[test]
fn test_is_valid_rejects_overlap() {
    let mut board = Board::default();
    board.set(23, 3, true);
    let o = Shape::canonical(PieceKind::O);
    assert!(!board.is_valid(Placement::new(22, 3), &o));
    assert!(!board.is_valid(Placement::new(22, 2), &o));
    assert!(board.is_valid(Placement::new(22, 4), &o));
    assert!(board.is_valid(Placement::new(21, 3), &o));
}

#[test]
fn test_deposit_marks_cells() {
    let mut board = Board::default();
    let t = Piece::new(PieceKind::T, 0);
    board.deposit(Placement::new(21, 0), &t.shape);
    // 000
    // 111
    // 010
    assert_eq!(board.get(22, 0), Some(true));
    assert_eq!(board.get(22, 1), Some(true));
    assert_eq!(board.get(22, 2), Some(true));
    assert_eq!(board.get(23, 1), Some(true));
    assert_eq!(board.get(21, 1), Some(false));
    assert_eq!(board.locked_count(), 4);
}

#[test]
#[should_panic(expected = "deposit at invalid placement")]
fn test_deposit_invalid_placement_panics() {
    let mut board = Board::default();
    let o = Shape::canonical(PieceKind::O);
    board.deposit(Placement::new(23, 0), &o);
}

#[test]
fn test_clear_single_row_keeps_order() {
    let mut board = Board::from_rows(&[
        "....", //
        "#...", //
        "####", //
        ".#..", //
    ]);
    assert_eq!(board.clear_completed_rows(), 1);
    assert_eq!(
        board,
        Board::from_rows(&[
            "....", //
            "....", //
            "#...", //
            ".#..", //
        ])
    );
}

#[test]
fn test_clear_multiple_non_adjacent_rows() {
    let mut board = Board::from_rows(&[
        "#...", //
        "####", //
        "..#.", //
        "####", //
        "...#", //
    ]);
    assert_eq!(board.clear_completed_rows(), 2);
    assert_eq!(board.height(), 5);
    assert_eq!(
        board,
        Board::from_rows(&[
            "....", //
            "....", //
            "#...", //
            "..#.", //
            "...#", //
        ])
    );
}

#[test]
fn test_clear_four_rows() {
    let mut board = Board::default();
    for row in 20..24 {
        for col in 0..8 {
            board.set(row, col, true);
        }
    }
    board.set(19, 2, true);
    assert_eq!(board.clear_completed_rows(), 4);
    assert_eq!(board.locked_count(), 1);
    assert_eq!(board.get(23, 2), Some(true));
}

#[test]
fn test_clear_nothing() {
    let mut board = Board::from_rows(&["#.#", ".#."]);
    let before = board.clone();
    assert_eq!(board.clear_completed_rows(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_drop_row() {
    let board = Board::from_rows(&[
        "....", //
        "....", //
        "....", //
        "..#.", //
    ]);
    let o = Shape::canonical(PieceKind::O);
    assert_eq!(board.drop_row(Placement::new(0, 0), &o), 2);
    assert_eq!(board.drop_row(Placement::new(0, 1), &o), 1);
}
