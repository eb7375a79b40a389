//! Morpion (tic-tac-toe) on 3x3 and 5x5 boards.

mod action;
pub mod ai;
pub mod rules;
mod types;

pub use action::{ChannelId, Move, Participant, PlayerId};
pub use rules::{LineKind, WinLine, check_draw, check_win};
pub use types::{Board, BoardSize, BoardSizeError, Cell, Coord, Mark};
