//! A single morpion game and its turn controller.

use crate::games::morpion::{
    Board, BoardSize, Coord, Mark, Move, Participant, WinLine, check_draw, check_win,
};
use crate::registry::{GameId, GameKey};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// `winner` completed `line`.
    Won {
        /// Participant who completed the line.
        winner: Participant,
        /// The completed line.
        line: WinLine,
    },
    /// Board filled with no line.
    Draw,
    /// Nobody moved within the turn timeout.
    TimedOut,
}

impl Outcome {
    /// Winning cells, empty unless the game was won.
    pub fn winning_cells(&self) -> &[Coord] {
        match self {
            Outcome::Won { line, .. } => &line.cells,
            Outcome::Draw | Outcome::TimedOut => &[],
        }
    }
}

/// Turn state of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Waiting on the given participant.
    AwaitingMove(Participant),
    /// Terminal; no more moves are accepted.
    Finished(Outcome),
}

/// What the presentation layer should do after an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderInstruction {
    /// Nothing changed; show nothing.
    Ignored,
    /// Redraw the board; `active` is up next.
    Continue {
        /// Board after the move.
        board: Board,
        /// Participant to move next.
        active: Participant,
    },
    /// Draw the final board and announce `outcome`.
    Terminal {
        /// Final board.
        board: Board,
        /// How the game ended.
        outcome: Outcome,
    },
}

impl RenderInstruction {
    /// Whether the instruction ends the game.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RenderInstruction::Terminal { .. })
    }

    /// Whether the instruction is a no-op.
    pub fn is_ignored(&self) -> bool {
        matches!(self, RenderInstruction::Ignored)
    }

    /// Whether the computer opponent is up next.
    pub fn awaits_ai(&self) -> bool {
        matches!(
            self,
            RenderInstruction::Continue {
                active: Participant::Ai,
                ..
            }
        )
    }
}

/// One game between two participants.
///
/// Participant A plays [`Mark::X`] and moves first; participant B plays
/// [`Mark::O`].
#[derive(Debug, Clone, Getters)]
pub struct GameSession {
    /// Registry handle.
    id: GameId,
    /// Channel and participant pair.
    key: GameKey,
    /// Current board.
    board: Board,
    /// Turn state.
    status: GameStatus,
    /// Accepted moves, oldest first.
    history: Vec<Move>,
    /// Creation or last accepted move.
    last_activity: Instant,
}

impl GameSession {
    /// Creates a game awaiting participant A's first move.
    #[instrument(skip(now), fields(game_id = %id))]
    pub fn new(id: GameId, key: GameKey, size: BoardSize, now: Instant) -> Self {
        info!(channel = %key.channel, a = %key.participant_a, b = %key.participant_b, "Creating new game");
        let first = key.participant_a;
        Self {
            id,
            key,
            board: Board::new(size),
            status: GameStatus::AwaitingMove(first),
            history: Vec::new(),
            last_activity: now,
        }
    }

    /// Participant A (X).
    pub fn participant_a(&self) -> Participant {
        self.key.participant_a
    }

    /// Participant B (O).
    pub fn participant_b(&self) -> Participant {
        self.key.participant_b
    }

    /// Mark assigned to `participant`, if they play in this game.
    pub fn mark_of(&self, participant: Participant) -> Option<Mark> {
        if participant == self.key.participant_a {
            Some(Mark::X)
        } else if participant == self.key.participant_b {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Participant to move, or `None` once finished.
    pub fn active(&self) -> Option<Participant> {
        match self.status {
            GameStatus::AwaitingMove(p) => Some(p),
            GameStatus::Finished(_) => None,
        }
    }

    /// Whether the game has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, GameStatus::Finished(_))
    }

    /// The opponent of `participant` within this game.
    fn other(&self, participant: Participant) -> Participant {
        if participant == self.key.participant_a {
            self.key.participant_b
        } else {
            self.key.participant_a
        }
    }

    /// Applies a move from the active participant.
    ///
    /// Moves out of turn, onto an occupied or off-board cell, or after the
    /// game ended are dropped and yield [`RenderInstruction::Ignored`].
    #[instrument(skip(self, now), fields(game_id = %self.id))]
    pub fn submit(&mut self, mv: Move, now: Instant) -> RenderInstruction {
        let Some(active) = self.active() else {
            debug!("Game already finished");
            return RenderInstruction::Ignored;
        };
        if mv.participant != active {
            debug!(expected = %active, "Move out of turn");
            return RenderInstruction::Ignored;
        }
        if !self.board.is_empty(mv.coord) {
            debug!("Cell occupied or off the board");
            return RenderInstruction::Ignored;
        }
        let Some(mark) = self.mark_of(active) else {
            return RenderInstruction::Ignored;
        };

        self.board.apply_move(mv.coord, mark);
        self.history.push(mv);
        self.last_activity = now;

        if let Some(line) = check_win(&self.board, mark) {
            info!(winner = %active, kind = %line.kind, "Game won");
            return self.finish(Outcome::Won {
                winner: active,
                line,
            });
        }

        if check_draw(&self.board) {
            info!("Game drawn");
            return self.finish(Outcome::Draw);
        }

        let next = self.other(active);
        self.status = GameStatus::AwaitingMove(next);
        debug!(next = %next, moves = self.history.len(), "Turn passes");
        RenderInstruction::Continue {
            board: self.board.clone(),
            active: next,
        }
    }

    /// Ends the game if nothing happened for `timeout`.
    #[instrument(skip(self, now), fields(game_id = %self.id))]
    pub fn expire(&mut self, now: Instant, timeout: Duration) -> RenderInstruction {
        if self.is_terminal() {
            return RenderInstruction::Ignored;
        }
        let idle = now.saturating_duration_since(self.last_activity);
        if idle < timeout {
            return RenderInstruction::Ignored;
        }
        info!(idle_secs = idle.as_secs(), "Game timed out");
        self.finish(Outcome::TimedOut)
    }

    fn finish(&mut self, outcome: Outcome) -> RenderInstruction {
        self.status = GameStatus::Finished(outcome.clone());
        RenderInstruction::Terminal {
            board: self.board.clone(),
            outcome,
        }
    }
}
