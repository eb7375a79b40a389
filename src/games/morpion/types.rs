//! Core domain types for morpion.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Mark placed on the board.
///
/// The challenger always plays `X` and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Mark {
    /// Mark of the challenger (goes first).
    X,
    /// Mark of the opponent.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here yet.
    Empty,
    /// Cell taken by a mark. Never reverts to `Empty`.
    Occupied(Mark),
}

/// Zero-based board coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    derive_new::new,
)]
#[display("({row}, {col})")]
pub struct Coord {
    /// Row, counted from the top.
    pub row: usize,
    /// Column, counted from the left.
    pub col: usize,
}

/// Supported board sizes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(try_from = "usize", into = "usize")]
pub enum BoardSize {
    /// Classic 3x3, three in a row wins.
    #[default]
    #[display("3x3")]
    Three,
    /// 5x5, five in a row wins.
    #[display("5x5")]
    Five,
}

impl BoardSize {
    /// Side length of the grid.
    pub fn dimension(self) -> usize {
        match self {
            BoardSize::Three => 3,
            BoardSize::Five => 5,
        }
    }

    /// Length of the run needed to win.
    pub fn win_length(self) -> usize {
        match self {
            BoardSize::Three => 3,
            BoardSize::Five => 5,
        }
    }
}

/// Requested board size is not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("unsupported board size {_0} (expected 3 or 5)")]
pub struct BoardSizeError(#[error(not(source))] pub usize);

impl TryFrom<usize> for BoardSize {
    type Error = BoardSizeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(BoardSize::Three),
            5 => Ok(BoardSize::Five),
            other => Err(BoardSizeError(other)),
        }
    }
}

impl From<BoardSize> for usize {
    fn from(size: BoardSize) -> Self {
        size.dimension()
    }
}

/// Square morpion board stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: BoardSize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(size: BoardSize) -> Self {
        let n = size.dimension();
        Self {
            size,
            cells: vec![Cell::Empty; n * n],
        }
    }

    /// Returns the board size.
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Side length of the grid.
    pub fn dimension(&self) -> usize {
        self.size.dimension()
    }

    /// Whether the coordinate lies on the board.
    pub fn contains(&self, coord: Coord) -> bool {
        let n = self.dimension();
        coord.row < n && coord.col < n
    }

    /// Gets the cell at `coord`, or `None` when out of bounds.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if self.contains(coord) {
            Some(self.cells[self.index(coord)])
        } else {
            None
        }
    }

    /// Checks if a cell is on the board and empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Cell::Empty))
    }

    /// Whether `coord` holds `mark`.
    pub fn has(&self, coord: Coord, mark: Mark) -> bool {
        self.get(coord) == Some(Cell::Occupied(mark))
    }

    /// Places `mark` at `coord`.
    ///
    /// Performs no validation: the caller has already checked bounds and
    /// emptiness. Out-of-bounds coordinates panic.
    pub fn apply_move(&mut self, coord: Coord, mark: Mark) {
        let idx = self.index(coord);
        debug_assert_eq!(self.cells[idx], Cell::Empty, "cell {coord} already occupied");
        self.cells[idx] = Cell::Occupied(mark);
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.coords().filter(|&c| self.is_empty(c)).collect()
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let n = self.dimension();
        (0..n).flat_map(move |row| (0..n).map(move |col| Coord::new(row, col)))
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.dimension())
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row * self.dimension() + coord.col
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(BoardSize::Five);
        assert_eq!(board.empty_cells().len(), 25);
        assert_eq!(board.occupied(), 0);
    }

    #[test]
    fn test_out_of_bounds_is_not_empty() {
        let board = Board::new(BoardSize::Three);
        assert!(!board.is_empty(Coord::new(3, 0)));
        assert_eq!(board.get(Coord::new(0, 3)), None);
    }

    #[test]
    fn test_apply_move_sets_cell() {
        let mut board = Board::new(BoardSize::Three);
        board.apply_move(Coord::new(1, 2), Mark::O);
        assert!(board.has(Coord::new(1, 2), Mark::O));
        assert!(!board.is_empty(Coord::new(1, 2)));
        assert_eq!(board.empty_cells().len(), 8);
    }

    #[test]
    fn test_board_size_conversion() {
        assert_eq!(BoardSize::try_from(5), Ok(BoardSize::Five));
        assert_eq!(BoardSize::try_from(4), Err(BoardSizeError(4)));
        assert_eq!(usize::from(BoardSize::Three), 3);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let mut board = Board::new(BoardSize::Three);
        board.apply_move(Coord::new(0, 0), Mark::X);
        let empty = board.empty_cells();
        assert_eq!(empty[0], Coord::new(0, 1));
        assert_eq!(empty[2], Coord::new(1, 0));
    }
}
