//! Integration tests for infinite-c6
//!
//! These exercise the board through its public API: the codec properties,
//! the grid's sparse storage, and the move record with undo, redo and jump.

use std::collections::HashSet;

use infinite_c6::board::{Board, Bounds, CommitError};
use infinite_c6::grid::Grid;
use infinite_c6::point::Point;
use infinite_c6::stone::Stone;

// =============================================================================
// Helper functions
// =============================================================================

/// Snapshot of every stone on the grid, sorted for comparison.
fn snapshot(board: &Board) -> Vec<(i32, i32, Stone)> {
    let mut stones: Vec<_> = board
        .grid()
        .stones()
        .map(|(p, s)| (p.x, p.y, s))
        .collect();
    stones.sort_by_key(|&(x, y, _)| (x, y));
    stones
}

/// Commits `n` random stones inside a `span x span` square, following the
/// inferred turn order.
fn random_board(rng: &mut fastrand::Rng, n: usize, span: i32) -> Board {
    let mut board = Board::new_infinite();
    while board.total_count() < n {
        let p = Point::new(rng.i32(-span..span), rng.i32(-span..span));
        let (stone, _) = board.infer_turn();
        // Occupied: draw another point.
        if board.commit(p, stone).is_err() {
            continue;
        }
    }
    board
}

// =============================================================================
// Coordinate codec
// =============================================================================

#[test]
fn test_index_roundtrip_random() {
    let mut rng = fastrand::Rng::with_seed(1);
    for _ in 0..10_000 {
        let p = Point::new(rng.i32(..), rng.i32(..));
        assert_eq!(Point::from_index(p.index()), p);
    }
}

#[test]
fn test_index_injective_near_origin() {
    let mut seen = HashSet::new();
    for x in -40..=40 {
        for y in -40..=40 {
            assert!(seen.insert(Point::new(x, y).index()), "collision at {x},{y}");
        }
    }
}

#[test]
fn test_small_coordinates_small_indexes() {
    // A 9x9 square around the origin lies inside the first chunk.
    for x in -4..=4 {
        for y in -4..=4 {
            assert!(Point::new(x, y).index() < 256);
        }
    }
}

// =============================================================================
// Sparse grid
// =============================================================================

#[test]
fn test_far_apart_points_use_separate_chunks() {
    let mut grid = Grid::new();
    assert!(grid.set(Point::new(0, 0), Stone::Black));
    assert!(grid.set(Point::new(1_000_000_000, 0), Stone::White));
    assert!(grid.set(Point::new(i32::MIN, i32::MIN), Stone::Black));
    assert_eq!(grid.chunk_count(), 3);
    assert_eq!(grid.get(Point::new(1_000_000_000, 0)), Some(Stone::White));
    assert_eq!(grid.get(Point::new(999_999_999, 0)), None);
}

// =============================================================================
// Board scenarios
// =============================================================================

#[test]
fn test_concrete_scenario() {
    let a = Point::new(0, 0);
    let b = Point::new(1, 1);
    let mut board = Board::new_infinite();

    assert_eq!(board.commit(a, Stone::Black), Ok(()));
    assert_eq!(board.commit(a, Stone::White), Err(CommitError::Occupied));
    assert_eq!(board.commit(b, Stone::White), Ok(()));

    assert_eq!(board.undo(), Some((b, Stone::White)));
    assert_eq!(board.get(b), None);

    assert_eq!(board.redo(), Some((b, Stone::White)));
    assert_eq!(board.get(b), Some(Stone::White));

    assert!(board.jump(0));
    assert_eq!(board.get(a), None);
    assert_eq!(board.get(b), None);
    assert!(board.is_empty());
    assert_eq!(board.total_count(), 2);
}

#[test]
fn test_history_collapse() {
    let m = [
        (Point::new(0, 0), Stone::Black),
        (Point::new(1, 0), Stone::White),
        (Point::new(2, 0), Stone::White),
        (Point::new(3, 0), Stone::Black),
    ];
    let mut board = Board::new_infinite();
    for &(p, s) in &m[..3] {
        board.commit(p, s).unwrap();
    }
    board.undo();
    assert_eq!(board.index(), 2);

    board.commit(m[3].0, m[3].1).unwrap();
    assert_eq!(board.past_record(), &[m[0], m[1], m[3]]);
    assert_eq!(board.index(), 3);
    assert_eq!(board.total_count(), 3);
    assert_eq!(board.redo(), None);
}

#[test]
fn test_grid_matches_record_prefix() {
    let mut rng = fastrand::Rng::with_seed(3);
    let mut board = random_board(&mut rng, 60, 8);

    for _ in 0..200 {
        match rng.u8(..4) {
            0 => {
                board.undo();
            }
            1 => {
                board.redo();
            }
            2 => {
                board.jump(rng.usize(..=board.total_count()));
            }
            _ => {
                let p = Point::new(rng.i32(-8..8), rng.i32(-8..8));
                let (stone, _) = board.infer_turn();
                // Occupied points are skipped; the record must still match.
                match board.commit(p, stone) {
                    Ok(()) | Err(CommitError::Occupied) => {}
                    Err(err) => panic!("unexpected commit error at {p}: {err}"),
                }
            }
        }

        let replayed = Board::from_moves(Bounds::Infinite, board.past_record().iter().copied())
            .expect("record prefix replays cleanly");
        assert_eq!(snapshot(&board), snapshot(&replayed));
    }
}

#[test]
fn test_jump_matches_undo_redo() {
    let mut rng = fastrand::Rng::with_seed(11);
    let base = random_board(&mut rng, 50, 10);

    for _ in 0..30 {
        let start = rng.usize(..=base.total_count());
        let target = rng.usize(..=base.total_count());

        let mut jumped = base.clone();
        jumped.jump(start);
        let mut stepped = jumped.clone();

        assert!(jumped.jump(target));
        while stepped.index() > target {
            stepped.undo();
        }
        while stepped.index() < target {
            stepped.redo();
        }

        assert_eq!(jumped.index(), stepped.index());
        assert_eq!(snapshot(&jumped), snapshot(&stepped));
    }
}

#[test]
fn test_jump_past_end_is_noop() {
    let mut board = Board::new_infinite();
    board.commit(Point::new(0, 0), Stone::Black).unwrap();
    board.undo();
    assert!(!board.jump(2));
    assert_eq!(board.index(), 0);
    assert_eq!(board.get(Point::new(0, 0)), None);
}

#[test]
fn test_turn_inference_scenario() {
    let mut board = Board::new_infinite();
    assert_eq!(board.infer_turn(), (Stone::Black, true));

    board.commit(Point::new(0, 0), Stone::Black).unwrap();
    assert_eq!(board.infer_turn(), (Stone::White, false));

    let mut board = Board::new_infinite();
    board.commit(Point::new(0, 0), Stone::White).unwrap();
    assert_eq!(board.infer_turn(), (Stone::White, true));
}

#[test]
fn test_turn_order_of_a_full_game() {
    // B, WW, BB, WW, ... follows from always playing the inferred stone.
    let mut board = Board::new_infinite();
    let mut colors = Vec::new();
    for x in 0..9 {
        let (stone, _) = board.infer_turn();
        board.commit(Point::new(x, 0), stone).unwrap();
        colors.push(stone);
    }
    use Stone::{Black as B, White as W};
    assert_eq!(colors, vec![B, W, W, B, B, W, W, B, B]);
}

#[test]
fn test_bounded_board() {
    let mut board = Board::new_square(19);
    assert_eq!(board.commit(Point::new(9, -9), Stone::Black), Ok(()));
    assert_eq!(
        board.commit(Point::new(-10, 0), Stone::White),
        Err(CommitError::OutOfBounds)
    );
    assert_eq!(board.total_count(), 1);
}
