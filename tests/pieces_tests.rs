//! Piece catalog tests - shapes, rotation and kicks

use cross_tetris::core::pieces::{rotate_n, ROTATION_KICKS};
use cross_tetris::core::{
    rotate, try_rotate, Board, Engine, EngineConfig, Piece, PieceGenerator, Shape,
};
use cross_tetris::types::{PieceKind, Placement};

#[test]
fn test_canonical_shapes() {
    assert_eq!(
        Shape::canonical(PieceKind::L),
        Shape::from_rows(&["010", "010", "011"])
    );
    assert_eq!(
        Shape::canonical(PieceKind::J),
        Shape::from_rows(&["010", "010", "110"])
    );
    assert_eq!(
        Shape::canonical(PieceKind::S),
        Shape::from_rows(&["011", "110", "000"])
    );
}

#[test]
fn test_four_rotations_are_identity() {
    for kind in PieceKind::ALL {
        let shape = Shape::canonical(kind);
        assert_eq!(rotate_n(&shape, 4), shape, "{:?}", kind);
        for k in 0..4 {
            assert_eq!(rotate_n(&rotate_n(&shape, k), 4 - k), shape);
        }
    }
}

#[test]
fn test_rotate_i_becomes_vertical() {
    let i = Shape::canonical(PieceKind::I);
    assert_eq!(rotate(&i), Shape::from_rows(&["0010", "0010", "0010", "0010"]));
}

#[test]
fn test_o_rotation_is_fixed_point() {
    let o = Shape::canonical(PieceKind::O);
    assert_eq!(rotate(&o), o);
}

#[test]
fn test_piece_rotation_counter_wraps() {
    let mut piece = Piece::new(PieceKind::T, 3);
    assert_eq!(piece.rotation, 3);
    piece = piece.rotated();
    assert_eq!(piece.rotation, 0);
    assert_eq!(piece.shape, Shape::canonical(PieceKind::T));
}

#[test]
fn test_kick_order() {
    assert_eq!(ROTATION_KICKS, [0, 1, -1]);
}

#[test]
fn test_rotation_kicks_right_off_left_wall() {
    // Vertical I one column from the left wall: its filled column is 2, so col = -1.
    let board = Board::default();
    let vertical = Piece::new(PieceKind::I, 1);
    let at = Placement::new(4, -1);
    assert!(board.is_valid(at, &vertical.shape));

    let valid = |s: &Shape, row: i8, col: i8| board.is_valid(Placement::new(row, col), s);
    let (rotated, col) = try_rotate(&vertical, at.row, at.col, valid).expect("kick");
    assert_eq!(rotated.rotation, 2);
    // Flat in place would need columns -1..=2; one step right fits.
    assert_eq!(col, 0);
}

#[test]
fn test_rotation_kicks_left_off_right_wall() {
    // Vertical I spawns at col 3 (filled column 5); two steps right put it on the wall.
    let vertical = Piece::new(PieceKind::I, 1);
    let mut engine =
        Engine::from_parts(EngineConfig::default(), 1, Board::default(), vertical, vertical);
    assert!(engine.try_shift(1));
    assert!(engine.try_shift(1));
    assert_eq!(engine.placement(), Placement::new(0, 5));

    // Flat needs columns 5..=8 in place and 6..=9 one step right; only one step left fits.
    assert!(engine.try_rotate());
    assert_eq!(engine.current().rotation, 2);
    assert_eq!(engine.placement(), Placement::new(0, 4));
}

#[test]
fn test_rotation_prefers_right_kick_over_left() {
    // A T at (0, 3) turns into "010/110/010"; in place it would cover (0, 4).
    let mut board = Board::default();
    board.set(0, 4, true);
    let t = Piece::new(PieceKind::T, 0);
    let mut engine = Engine::from_parts(EngineConfig::default(), 1, board, t, t);
    assert_eq!(engine.placement(), Placement::new(0, 3));

    let turned = t.rotated();
    let fits = |col: i8| engine.board().is_valid(Placement::new(0, col), &turned.shape);
    assert!(!fits(3));
    assert!(fits(4));
    assert!(fits(2));

    assert!(engine.try_rotate());
    assert_eq!(engine.current().rotation, 1);
    assert_eq!(engine.placement(), Placement::new(0, 4));
}

#[test]
fn test_rotation_fails_when_boxed_in() {
    let board = Board::from_rows(&[
        "#...#", //
        "#...#", //
        "#...#", //
        "#...#", //
    ]);
    // Vertical I in the middle column of a 3-wide well, cannot turn flat.
    let vertical = Piece::new(PieceKind::I, 1);
    let valid = |s: &Shape, row: i8, col: i8| board.is_valid(Placement::new(row, col), s);
    assert!(valid(&vertical.shape, 0, 0));
    assert!(try_rotate(&vertical, 0, 0, valid).is_none());
}

#[test]
fn test_generator_covers_all_kinds() {
    let mut generator = PieceGenerator::new(7);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..500 {
        seen.insert(generator.random_piece().kind);
    }
    assert_eq!(seen.len(), 7);
}
