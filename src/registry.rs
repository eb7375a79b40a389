//! Registry of running games.
//!
//! The registry is an owned value: whoever drives games holds one and passes
//! it where needed. It enforces one running game per channel and participant
//! pair, and forgets games as soon as they finish.

use crate::config::EngineConfig;
use crate::debounce::Debouncer;
use crate::games::morpion::{
    BoardSize, ChannelId, Coord, Move, Participant, PlayerId, ai,
};
use crate::session::{GameSession, RenderInstruction};
use derive_more::{Display, Error};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Opaque handle to a game. Never reused within one registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[display("game#{_0}")]
pub struct GameId(pub u64);

/// Channel plus ordered participant pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct GameKey {
    /// Channel the game is played in.
    pub channel: ChannelId,
    /// Challenger (X).
    pub participant_a: Participant,
    /// Opponent (O).
    pub participant_b: Participant,
}

/// A real user as seen by the command layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    /// User id.
    pub id: PlayerId,
    /// Whether the account is a bot.
    pub bot: bool,
}

impl Account {
    /// A regular user account.
    pub fn user(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            bot: false,
        }
    }

    /// A bot account.
    pub fn bot(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            bot: true,
        }
    }
}

/// Who the challenger wants to play against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opponent {
    /// Another account.
    Account(Account),
    /// The computer opponent.
    Ai,
}

/// Request to start a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct GameRequest {
    /// Channel to play in.
    pub channel: ChannelId,
    /// Account issuing the challenge; plays first.
    pub challenger: Account,
    /// Requested opponent.
    pub opponent: Opponent,
    /// Board size.
    pub size: BoardSize,
}

/// Why a game could not be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, Serialize, Deserialize)]
pub enum Rejection {
    /// A game with the same channel and participants is still running.
    #[display("a game between these players is already running in this channel")]
    DuplicateGame,
    /// Challenger and opponent are the same account.
    #[display("you cannot challenge yourself")]
    SelfChallenge,
    /// A bot account was involved.
    #[display("bot accounts cannot play")]
    BotChallengeDisallowed,
}

/// Debounce key: one participant clicking one cell of one game.
type ClickKey = (GameId, Participant, Coord);

/// All running games.
#[derive(Debug)]
pub struct GameRegistry {
    games: HashMap<GameId, GameSession>,
    keys: HashMap<GameKey, GameId>,
    next_id: u64,
    turn_timeout: Duration,
    clicks: Debouncer<ClickKey>,
}

impl GameRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new(turn_timeout: Duration, debounce_window: Duration) -> Self {
        info!("Creating game registry");
        Self {
            games: HashMap::new(),
            keys: HashMap::new(),
            next_id: 1,
            turn_timeout,
            clicks: Debouncer::new(debounce_window),
        }
    }

    /// Creates an empty registry with timings from `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.turn_timeout(), config.debounce_window())
    }

    /// Starts a game.
    ///
    /// Checks, in order: bot accounts, self-challenge, an already running game
    /// under the same key.
    #[instrument(skip(self, now))]
    pub fn start_game(&mut self, request: GameRequest, now: Instant) -> Result<GameId, Rejection> {
        let challenger = request.challenger;
        let opponent = match request.opponent {
            Opponent::Account(account) => {
                if challenger.bot || account.bot {
                    warn!("Bot account in challenge");
                    return Err(Rejection::BotChallengeDisallowed);
                }
                if account.id == challenger.id {
                    warn!(player = %challenger.id, "Player challenged themselves");
                    return Err(Rejection::SelfChallenge);
                }
                Participant::Human(account.id)
            }
            Opponent::Ai => {
                if challenger.bot {
                    warn!("Bot account in challenge");
                    return Err(Rejection::BotChallengeDisallowed);
                }
                Participant::Ai
            }
        };

        let key = GameKey::new(request.channel, Participant::Human(challenger.id), opponent);
        if self.keys.contains_key(&key) {
            warn!(channel = %key.channel, "Game already running for these players");
            return Err(Rejection::DuplicateGame);
        }

        let id = GameId(self.next_id);
        self.next_id += 1;
        self.games
            .insert(id, GameSession::new(id, key, request.size, now));
        self.keys.insert(key, id);

        info!(game_id = %id, active = self.games.len(), "Game registered");
        Ok(id)
    }

    /// Feeds a move into game `id`.
    ///
    /// Unknown or finished games, invalid moves and repeated clicks within the
    /// debounce window all yield [`RenderInstruction::Ignored`].
    #[instrument(skip(self, now))]
    pub fn submit_move(
        &mut self,
        id: GameId,
        coord: Coord,
        participant: Participant,
        now: Instant,
    ) -> RenderInstruction {
        let click = (id, participant, coord);
        if self.clicks.is_recent(&click, now) {
            debug!("Repeated click dropped");
            return RenderInstruction::Ignored;
        }

        let Some(session) = self.games.get_mut(&id) else {
            debug!("No such running game");
            return RenderInstruction::Ignored;
        };

        let result = session.submit(Move::new(participant, coord), now);
        if !result.is_ignored() {
            self.clicks.record(click, now);
        }
        if result.is_terminal() {
            self.remove(id);
        }
        result
    }

    /// Plays the computer opponent's turn in game `id`.
    ///
    /// Ignored unless the AI is the active participant.
    #[instrument(skip(self, rng, now))]
    pub fn play_ai_turn<R: Rng + ?Sized>(
        &mut self,
        id: GameId,
        rng: &mut R,
        now: Instant,
    ) -> RenderInstruction {
        let Some(session) = self.games.get(&id) else {
            debug!("No such running game");
            return RenderInstruction::Ignored;
        };
        if session.active() != Some(Participant::Ai) {
            debug!("Not the AI's turn");
            return RenderInstruction::Ignored;
        }
        let Some(mark) = session.mark_of(Participant::Ai) else {
            return RenderInstruction::Ignored;
        };
        let Some(coord) = ai::choose_move(session.board(), mark, rng) else {
            return RenderInstruction::Ignored;
        };

        info!(%coord, "AI plays");
        self.submit_move(id, coord, Participant::Ai, now)
    }

    /// Times out game `id` if it has been idle for the turn timeout.
    #[instrument(skip(self, now))]
    pub fn check_timeout(&mut self, id: GameId, now: Instant) -> RenderInstruction {
        let Some(session) = self.games.get_mut(&id) else {
            return RenderInstruction::Ignored;
        };
        let result = session.expire(now, self.turn_timeout);
        if result.is_terminal() {
            self.remove(id);
        }
        result
    }

    /// Checks every running game for timeout; also sweeps stale debounce entries.
    #[instrument(skip(self, now))]
    pub fn sweep_timeouts(&mut self, now: Instant) -> Vec<(GameId, RenderInstruction)> {
        self.clicks.sweep(now);

        let mut ids: Vec<GameId> = self.games.keys().copied().collect();
        ids.sort();
        let expired: Vec<_> = ids
            .into_iter()
            .map(|id| (id, self.check_timeout(id, now)))
            .filter(|(_, result)| result.is_terminal())
            .collect();

        if !expired.is_empty() {
            info!(count = expired.len(), "Timed out idle games");
        }
        expired
    }

    /// Looks up a running game.
    pub fn get(&self, id: GameId) -> Option<&GameSession> {
        self.games.get(&id)
    }

    /// Finds the running game for `key`.
    pub fn find(&self, key: &GameKey) -> Option<GameId> {
        self.keys.get(key).copied()
    }

    /// Running games in `channel`, oldest first.
    pub fn games_in_channel(&self, channel: ChannelId) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self
            .keys
            .iter()
            .filter(|(key, _)| key.channel == channel)
            .map(|(_, id)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// Number of running games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether no game is running.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Turn timeout applied to every game.
    pub fn turn_timeout(&self) -> Duration {
        self.turn_timeout
    }

    fn remove(&mut self, id: GameId) {
        if let Some(session) = self.games.remove(&id) {
            self.keys.remove(session.key());
            info!(game_id = %id, active = self.games.len(), "Game removed");
        }
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
