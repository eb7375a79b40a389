//! Participants and moves.
//!
//! Moves are domain events: a participant's intent to mark a cell. They are
//! validated by the turn controller before the board sees them.

use super::Coord;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Identifier of a real user (a Discord snowflake).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
pub struct PlayerId(pub u64);

/// Identifier of the channel a game is played in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
pub struct ChannelId(pub u64);

/// One side of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Participant {
    /// A real user.
    #[display("<@{_0}>")]
    Human(PlayerId),
    /// The built-in computer opponent.
    #[display("AI")]
    Ai,
}

impl Participant {
    /// Whether this is the computer opponent.
    pub fn is_ai(self) -> bool {
        matches!(self, Participant::Ai)
    }
}

impl From<PlayerId> for Participant {
    fn from(id: PlayerId) -> Self {
        Participant::Human(id)
    }
}

/// A move: `participant` marks `coord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{participant} -> {coord}")]
pub struct Move {
    /// Who is playing.
    pub participant: Participant,
    /// Target cell.
    pub coord: Coord,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(participant: Participant, coord: Coord) -> Self {
        Self { participant, coord }
    }
}
