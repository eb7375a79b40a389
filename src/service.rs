//! Async driver around the [`GameRegistry`].
//!
//! The registry itself has no clock and never sleeps. This service supplies
//! both: it stamps events with the current instant, plays the AI after a
//! short pause, and periodically times out idle games. Results produced in
//! the background are published as [`GameEvent`]s.

use crate::config::EngineConfig;
use crate::games::morpion::{Coord, Participant};
use crate::registry::{GameId, GameRegistry, GameRequest, Rejection};
use crate::session::{GameSession, RenderInstruction};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// A render instruction produced without a caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEvent {
    /// Game the instruction belongs to.
    pub game: GameId,
    /// What to render.
    pub instruction: RenderInstruction,
}

struct Shared {
    registry: GameRegistry,
    rng: StdRng,
}

/// Cloneable handle to the shared registry.
#[derive(Clone)]
pub struct GameService {
    shared: Arc<Mutex<Shared>>,
    config: EngineConfig,
    events: mpsc::UnboundedSender<GameEvent>,
}

impl std::fmt::Debug for GameService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

impl GameService {
    /// Creates a service and the receiver for its background events.
    #[instrument(skip(config))]
    pub fn new(config: EngineConfig) -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates a service with a given random source for the AI.
    pub fn with_rng(
        config: EngineConfig,
        rng: StdRng,
    ) -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let shared = Shared {
            registry: GameRegistry::from_config(&config),
            rng,
        };
        info!(
            turn_timeout_secs = config.turn_timeout().as_secs(),
            ai_delay_ms = config.ai_delay().as_millis() as u64,
            "Game service ready"
        );
        let service = Self {
            shared: Arc::new(Mutex::new(shared)),
            config,
            events,
        };
        (service, rx)
    }

    /// Effective configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Starts a game.
    #[instrument(skip(self))]
    pub async fn start_game(&self, request: GameRequest) -> Result<GameId, Rejection> {
        let mut shared = self.shared.lock().await;
        shared.registry.start_game(request, now())
    }

    /// Submits a move and returns what to render.
    ///
    /// When the AI is up next, its move is scheduled after the configured
    /// delay and arrives later as a [`GameEvent`].
    #[instrument(skip(self))]
    pub async fn submit_move(
        &self,
        game: GameId,
        coord: Coord,
        participant: Participant,
    ) -> RenderInstruction {
        let result = {
            let mut shared = self.shared.lock().await;
            shared.registry.submit_move(game, coord, participant, now())
        };
        if result.awaits_ai() {
            self.schedule_ai(game);
        }
        result
    }

    /// Times out `game` if it has been idle too long.
    #[instrument(skip(self))]
    pub async fn check_timeout(&self, game: GameId) -> RenderInstruction {
        let mut shared = self.shared.lock().await;
        shared.registry.check_timeout(game, now())
    }

    /// Snapshot of a running game.
    pub async fn snapshot(&self, game: GameId) -> Option<GameSession> {
        let shared = self.shared.lock().await;
        shared.registry.get(game).cloned()
    }

    /// Number of running games.
    pub async fn active_games(&self) -> usize {
        self.shared.lock().await.registry.len()
    }

    fn schedule_ai(&self, game: GameId) {
        let service = self.clone();
        let delay = self.config.ai_delay();
        debug!(%game, delay_ms = delay.as_millis() as u64, "Scheduling AI move");
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            service.play_ai(game).await;
        });
    }

    async fn play_ai(&self, game: GameId) {
        let result = {
            let mut shared = self.shared.lock().await;
            let Shared { registry, rng } = &mut *shared;
            registry.play_ai_turn(game, rng, now())
        };
        if result.is_ignored() {
            debug!(%game, "AI turn no longer pending");
            return;
        }
        self.publish(game, result);
    }

    fn publish(&self, game: GameId, instruction: RenderInstruction) {
        if self
            .events
            .send(GameEvent { game, instruction })
            .is_err()
        {
            warn!(%game, "No listener for game events");
        }
    }

    /// Runs the timeout sweeper every `period` until the returned task is aborted.
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                service.sweep().await;
            }
        })
    }

    /// Times out every idle game and publishes the results.
    pub async fn sweep(&self) -> usize {
        let expired = {
            let mut shared = self.shared.lock().await;
            shared.registry.sweep_timeouts(now())
        };
        let count = expired.len();
        for (game, instruction) in expired {
            self.publish(game, instruction);
        }
        count
    }
}
