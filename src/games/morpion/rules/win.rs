//! Win detection.
//!
//! Lines are scanned in a fixed order that callers may rely on:
//!
//! 1. rows, top to bottom, each left to right
//! 2. columns, left to right, each top to bottom
//! 3. descending diagonals (top-left to bottom-right)
//! 4. ascending diagonals (bottom-left to top-right)
//!
//! The first qualifying run is reported.

use super::super::{Board, Coord, Mark};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use tracing::instrument;

/// Orientation of a winning line.
///
/// Variant order is the scan order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, strum::Display,
)]
pub enum LineKind {
    /// Horizontal.
    Row,
    /// Vertical.
    Column,
    /// Descending diagonal.
    Diagonal,
    /// Ascending diagonal.
    AntiDiagonal,
}

impl LineKind {
    /// Row and column step along the line.
    fn step(self) -> (isize, isize) {
        match self {
            LineKind::Row => (0, 1),
            LineKind::Column => (1, 0),
            LineKind::Diagonal => (1, 1),
            LineKind::AntiDiagonal => (-1, 1),
        }
    }

    /// Starting cells of every candidate run, in scan order.
    fn starts(self, n: usize, len: usize) -> Vec<Coord> {
        let span = n + 1 - len;
        match self {
            LineKind::Row => (0..n)
                .flat_map(|row| (0..span).map(move |col| Coord::new(row, col)))
                .collect(),
            LineKind::Column => (0..n)
                .flat_map(|col| (0..span).map(move |row| Coord::new(row, col)))
                .collect(),
            LineKind::Diagonal => (0..span)
                .flat_map(|row| (0..span).map(move |col| Coord::new(row, col)))
                .collect(),
            LineKind::AntiDiagonal => (len - 1..n)
                .flat_map(|row| (0..span).map(move |col| Coord::new(row, col)))
                .collect(),
        }
    }
}

/// A completed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLine {
    /// Mark that completed the line.
    pub mark: Mark,
    /// Cells of the line, in walking order.
    pub cells: Vec<Coord>,
    /// Orientation.
    pub kind: LineKind,
}

/// Looks for a run of `win_length` cells holding `mark`.
///
/// Returns the first run found in scan order, or `None`.
#[instrument(skip(board), fields(size = %board.size()))]
pub fn check_win(board: &Board, mark: Mark) -> Option<WinLine> {
    let n = board.dimension();
    let len = board.size().win_length();

    for kind in LineKind::iter() {
        let (dr, dc) = kind.step();
        for start in kind.starts(n, len) {
            let cells: Vec<Coord> = (0..len as isize)
                .map(|i| {
                    Coord::new(
                        (start.row as isize + dr * i) as usize,
                        (start.col as isize + dc * i) as usize,
                    )
                })
                .collect();

            if cells.iter().all(|&c| board.has(c, mark)) {
                return Some(WinLine { mark, cells, kind });
            }
        }
    }

    None
}
