//! Game rules for morpion.
//!
//! Pure functions over a [`Board`](super::Board). Rules are kept apart from
//! board storage so the turn controller and the AI share one definition of
//! what a win is.

pub mod draw;
pub mod win;

pub use draw::check_draw;
pub use win::{LineKind, WinLine, check_win};
