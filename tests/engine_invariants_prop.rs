use std::time::{Duration, Instant};

use proptest::prelude::*;

use cross_tetris::core::pieces::rotate_n;
use cross_tetris::core::{
    points_for_rows, speed_after_clear, Board, Engine, EngineConfig, Shape, StepOutcome,
};
use cross_tetris::types::{HeldKeys, InputEdge, PieceKind, Placement, TickInput};

fn arb_kind() -> impl Strategy<Value = PieceKind> {
    (0usize..7).prop_map(|i| PieceKind::ALL[i])
}

fn arb_board() -> impl Strategy<Value = Board> {
    (3u8..10, 3u8..12)
        .prop_flat_map(|(w, h)| {
            (
                Just((w, h)),
                prop::collection::vec(any::<bool>(), w as usize * h as usize),
            )
        })
        .prop_map(|((w, h), cells)| {
            let mut board = Board::new(w, h);
            for (i, &locked) in cells.iter().enumerate() {
                board.set((i / w as usize) as i8, (i % w as usize) as i8, locked);
            }
            board
        })
}

fn arb_tick() -> impl Strategy<Value = TickInput> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        prop::collection::vec(0u8..4, 0..3),
    )
        .prop_map(|(left, right, down, edges)| {
            let mut input = TickInput::with_held(HeldKeys { left, right, down });
            for e in edges {
                // Mostly rotations; restarts only take effect after game over.
                let edge = if e == 0 {
                    InputEdge::Restart
                } else {
                    InputEdge::Rotate
                };
                input.push_edge(edge);
            }
            input
        })
}

fn shape_fits_naively(board: &Board, at: Placement, shape: &Shape) -> bool {
    shape.cells().all(|(dy, dx)| {
        let (r, c) = (at.row + dy, at.col + dx);
        r >= 0
            && c >= 0
            && (r as u8) < board.height()
            && (c as u8) < board.width()
            && board.get(r, c) == Some(false)
    })
}

proptest! {
    #[test]
    fn rotation_composes_to_identity(kind in arb_kind(), k in 0u8..4) {
        let shape = Shape::canonical(kind);
        prop_assert_eq!(rotate_n(&rotate_n(&shape, k), 4 - k), shape);
    }

    #[test]
    fn is_valid_matches_cellwise_check(
        board in arb_board(),
        kind in arb_kind(),
        turns in 0u8..4,
        row in -4i8..14,
        col in -4i8..12,
    ) {
        let shape = rotate_n(&Shape::canonical(kind), turns);
        let at = Placement::new(row, col);
        prop_assert_eq!(board.is_valid(at, &shape), shape_fits_naively(&board, at, &shape));
    }

    #[test]
    fn clearing_keeps_size_and_surviving_rows(board in arb_board()) {
        let mut cleared = board.clone();
        let n = cleared.clear_completed_rows();
        prop_assert_eq!(cleared.width(), board.width());
        prop_assert_eq!(cleared.height(), board.height());

        let survivors: Vec<&[bool]> = (0..board.height() as usize)
            .map(|r| board.row(r))
            .filter(|row| !row.iter().all(|&c| c))
            .collect();
        prop_assert_eq!(survivors.len() + n, board.height() as usize);

        for r in 0..n {
            prop_assert!(cleared.row(r).iter().all(|&c| !c));
        }
        for (i, row) in survivors.iter().enumerate() {
            prop_assert_eq!(cleared.row(n + i), *row);
        }
    }

    #[test]
    fn generated_play_respects_core_invariants(
        seed in any::<u64>(),
        ticks in prop::collection::vec(arb_tick(), 1..120),
    ) {
        let mut engine = Engine::new(EngineConfig::default(), seed);
        let t0 = Instant::now();
        let mut prev_score = engine.score();
        let mut prev_speed = engine.speed();

        for (i, tick) in ticks.iter().enumerate() {
            let frame = engine.step(tick, t0 + Duration::from_millis(50 * i as u64));
            prop_assert_eq!((frame.width(), frame.height()), (48, 48));
            prop_assert!(frame.pixels().iter().all(|&v| (0.0..=1.0).contains(&v)));

            if engine.is_game_over() {
                continue;
            }
            prop_assert!(engine.board().is_valid(engine.placement(), &engine.current().shape));

            if engine.score() < prev_score {
                // Only a restart lowers the score.
                prop_assert_eq!(engine.score(), 0);
            } else {
                let gained = engine.score() - prev_score;
                prop_assert!([0, 1, 4, 9, 16].contains(&gained));
            }
            prop_assert!(engine.speed() <= prev_speed || engine.speed() == 0.5);
            prev_score = engine.score();
            prev_speed = engine.speed();
        }
    }

    #[test]
    fn lock_scores_by_table(rows in 0usize..5) {
        let expected = [0u32, 1, 4, 9, 16][rows];
        prop_assert_eq!(points_for_rows(rows), expected);
        let speed = speed_after_clear(0.5, 0.94, rows);
        prop_assert!((speed - 0.5 * 0.94f64.powi(rows as i32)).abs() < 1e-12);
    }

    #[test]
    fn drop_to_lock_never_overlaps(seed in any::<u64>(), shifts in -4i8..5) {
        let mut engine = Engine::new(EngineConfig::default(), seed);
        for _ in 0..shifts.unsigned_abs() {
            engine.try_shift(shifts.signum());
        }
        let before = engine.board().locked_count();
        match engine.drop_to_lock() {
            StepOutcome::Locked { rows_cleared: 0, .. } => {
                prop_assert_eq!(engine.board().locked_count(), before + 4);
            }
            outcome => prop_assert!(false, "unexpected outcome {:?}", outcome),
        }
    }
}
