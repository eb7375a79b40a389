//! Draw detection.

use super::super::{Board, Cell};
use tracing::instrument;

/// Checks if every cell is occupied.
///
/// Only meaningful after a win check came back empty for the mark just played.
#[instrument(skip(board))]
pub fn check_draw(board: &Board) -> bool {
    board.rows().flatten().all(|c| *c != Cell::Empty)
}

#[cfg(test)]
mod tests {
    use super::super::win::check_win;
    use super::*;
    use crate::games::morpion::{BoardSize, Coord, Mark};

    fn fill(board: &mut Board, mark: Mark, cells: &[(usize, usize)]) {
        for &(row, col) in cells {
            board.apply_move(Coord::new(row, col), mark);
        }
    }

    #[test]
    fn test_empty_board_not_draw() {
        assert!(!check_draw(&Board::new(BoardSize::Three)));
    }

    #[test]
    fn test_partial_board_not_draw() {
        let mut board = Board::new(BoardSize::Three);
        fill(&mut board, Mark::X, &[(1, 1)]);
        assert!(!check_draw(&board));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let mut board = Board::new(BoardSize::Three);
        // X O X / X O O / O X X
        fill(&mut board, Mark::X, &[(0, 0), (0, 2), (1, 0), (2, 1), (2, 2)]);
        fill(&mut board, Mark::O, &[(0, 1), (1, 1), (1, 2), (2, 0)]);
        assert!(check_win(&board, Mark::X).is_none());
        assert!(check_win(&board, Mark::O).is_none());
        assert!(check_draw(&board));
    }

    #[test]
    fn test_full_board_with_line_is_not_a_draw_candidate() {
        // X O X / O X O / X O X: both diagonals belong to X.
        let mut board = Board::new(BoardSize::Three);
        fill(&mut board, Mark::X, &[(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)]);
        fill(&mut board, Mark::O, &[(0, 1), (1, 0), (1, 2), (2, 1)]);
        assert!(check_draw(&board));
        assert!(check_win(&board, Mark::X).is_some());
    }
}
