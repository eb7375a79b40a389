//! Tests for board rules and the AI through the public API.

use morpion::{Board, BoardSize, Coord, LineKind, Mark, ai, check_draw, check_win};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn place(board: &mut Board, mark: Mark, cells: &[(usize, usize)]) {
    for &(row, col) in cells {
        board.apply_move(Coord::new(row, col), mark);
    }
}

#[test]
fn test_every_three_by_three_line_wins() {
    let lines: Vec<(Vec<(usize, usize)>, LineKind)> = vec![
        ((0..3).map(|c| (0, c)).collect(), LineKind::Row),
        ((0..3).map(|c| (1, c)).collect(), LineKind::Row),
        ((0..3).map(|c| (2, c)).collect(), LineKind::Row),
        ((0..3).map(|r| (r, 0)).collect(), LineKind::Column),
        ((0..3).map(|r| (r, 1)).collect(), LineKind::Column),
        ((0..3).map(|r| (r, 2)).collect(), LineKind::Column),
        ((0..3).map(|i| (i, i)).collect(), LineKind::Diagonal),
        ((0..3).map(|i| (2 - i, i)).collect(), LineKind::AntiDiagonal),
    ];

    for (cells, kind) in lines {
        let mut board = Board::new(BoardSize::Three);
        place(&mut board, Mark::O, &cells);
        let line = check_win(&board, Mark::O).expect("line completes");
        assert_eq!(line.kind, kind, "cells {cells:?}");
        assert_eq!(line.cells.len(), 3);
        assert!(check_win(&board, Mark::X).is_none());
    }
}

#[test]
fn test_five_by_five_column_of_four_is_not_a_win() {
    let mut board = Board::new(BoardSize::Five);
    place(&mut board, Mark::X, &[(0, 3), (1, 3), (2, 3), (3, 3)]);
    assert!(check_win(&board, Mark::X).is_none());

    place(&mut board, Mark::X, &[(4, 3)]);
    let line = check_win(&board, Mark::X).expect("five in a column");
    assert_eq!(line.kind, LineKind::Column);
}

#[test]
fn test_broken_five_by_five_row_is_not_a_win() {
    let mut board = Board::new(BoardSize::Five);
    place(&mut board, Mark::X, &[(1, 0), (1, 1), (1, 3), (1, 4)]);
    place(&mut board, Mark::O, &[(1, 2)]);
    assert!(check_win(&board, Mark::X).is_none());
}

#[test]
fn test_draw_only_on_full_board() {
    let mut board = Board::new(BoardSize::Three);
    place(&mut board, Mark::X, &[(0, 0), (0, 2), (1, 0), (2, 1)]);
    place(&mut board, Mark::O, &[(0, 1), (1, 1), (1, 2), (2, 0)]);
    assert!(!check_draw(&board));

    place(&mut board, Mark::X, &[(2, 2)]);
    assert!(check_win(&board, Mark::X).is_none());
    assert!(check_draw(&board));
}

#[test]
fn test_ai_blocks_top_row() {
    let mut board = Board::new(BoardSize::Three);
    place(&mut board, Mark::X, &[(0, 0), (0, 1)]);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(ai::choose_move(&board, Mark::O, &mut rng), Some(Coord::new(0, 2)));
}

#[test]
fn test_ai_prefers_own_win_to_block() {
    // X threatens (0, 2); O completes the middle row at (1, 2).
    let mut board = Board::new(BoardSize::Three);
    place(&mut board, Mark::X, &[(0, 0), (0, 1), (2, 2)]);
    place(&mut board, Mark::O, &[(1, 0), (1, 1)]);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(ai::choose_move(&board, Mark::O, &mut rng), Some(Coord::new(1, 2)));
}

#[test]
fn test_ai_random_tier_is_seed_deterministic() {
    let mut board = Board::new(BoardSize::Five);
    place(&mut board, Mark::X, &[(0, 0)]);
    let pick = |seed| ai::choose_move(&board, Mark::O, &mut StdRng::seed_from_u64(seed));
    assert_eq!(pick(42), pick(42));
    assert!(board.is_empty(pick(42).expect("cells remain")));
}
