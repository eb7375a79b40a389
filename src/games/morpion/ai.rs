//! Heuristic computer opponent.
//!
//! Tiers, first match wins:
//!
//! 1. complete a line of our own
//! 2. block a line the opponent would complete
//! 3. take the center (3x3 only)
//! 4. take a corner, top-left, top-right, bottom-left, bottom-right (3x3 only)
//! 5. any empty cell, uniformly at random
//!
//! Tiers 1 and 2 scan empty cells in row-major order. This is one ply of
//! lookahead, not minimax.

use super::rules::check_win;
use super::{Board, BoardSize, Coord, Mark};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument};

/// First empty cell (row-major) where `mark` would complete a line.
fn winning_cell(board: &Board, mark: Mark) -> Option<Coord> {
    board.empty_cells().into_iter().find(|&coord| {
        let mut trial = board.clone();
        trial.apply_move(coord, mark);
        check_win(&trial, mark).is_some()
    })
}

/// The deterministic tiers (win, block, center, corner).
///
/// Returns `None` when only the random fallback applies.
#[instrument(skip(board), fields(size = %board.size()))]
pub fn forced_move(board: &Board, ai: Mark) -> Option<Coord> {
    if let Some(coord) = winning_cell(board, ai) {
        debug!(%coord, "AI completes a line");
        return Some(coord);
    }

    if let Some(coord) = winning_cell(board, ai.opponent()) {
        debug!(%coord, "AI blocks opponent");
        return Some(coord);
    }

    if board.size() != BoardSize::Three {
        return None;
    }

    let center = Coord::new(1, 1);
    if board.is_empty(center) {
        debug!("AI takes center");
        return Some(center);
    }

    let corner = [
        Coord::new(0, 0),
        Coord::new(0, 2),
        Coord::new(2, 0),
        Coord::new(2, 2),
    ]
    .into_iter()
    .find(|&c| board.is_empty(c));
    if let Some(coord) = corner {
        debug!(%coord, "AI takes corner");
    }
    corner
}

/// Picks the AI's next cell. `None` only when the board is full.
#[instrument(skip(board, rng), fields(size = %board.size()))]
pub fn choose_move<R: Rng + ?Sized>(board: &Board, ai: Mark, rng: &mut R) -> Option<Coord> {
    if let Some(coord) = forced_move(board, ai) {
        return Some(coord);
    }

    let choice = board.empty_cells().choose(rng).copied();
    debug!(choice = ?choice, "AI picks at random");
    choice
}
