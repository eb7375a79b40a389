//! Morpion - tic-tac-toe engine with a game registry and a heuristic AI.
//!
//! # Architecture
//!
//! - **Games**: board, rules and AI for 3x3 and 5x5 morpion
//! - **Session**: one game and its turn controller
//! - **Registry**: running games, one per channel and participant pair
//! - **Service**: async driver with AI thinking delay and timeout sweeping
//! - **Render**: plain-text boards for a presentation layer
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use morpion::{Account, BoardSize, ChannelId, Coord, GameRegistry, GameRequest, Opponent, Participant, PlayerId};
//!
//! let mut registry = GameRegistry::default();
//! let request = GameRequest::new(
//!     ChannelId(1),
//!     Account::user(PlayerId(10)),
//!     Opponent::Account(Account::user(PlayerId(20))),
//!     BoardSize::Three,
//! );
//! let game = registry.start_game(request, Instant::now()).unwrap();
//! let result = registry.submit_move(game, Coord::new(1, 1), Participant::Human(PlayerId(10)), Instant::now());
//! assert!(!result.is_ignored());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod debounce;
mod games;
mod registry;
pub mod render;
mod service;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, EngineConfig};

// Crate-level exports - Debouncing
pub use debounce::Debouncer;

// Crate-level exports - Game types
pub use games::morpion::{
    Board, BoardSize, BoardSizeError, Cell, ChannelId, Coord, LineKind, Mark, Move, Participant,
    PlayerId, WinLine, ai, check_draw, check_win,
};

// Crate-level exports - Registry
pub use registry::{Account, GameId, GameKey, GameRegistry, GameRequest, Opponent, Rejection};

// Crate-level exports - Async driver
pub use service::{GameEvent, GameService};

// Crate-level exports - Sessions
pub use session::{GameSession, GameStatus, Outcome, RenderInstruction};
