//! Tests for the async game service.

use std::time::Duration;

use morpion::{
    Account, BoardSize, Cell, ChannelId, Coord, EngineConfig, GameRequest, GameService, Mark,
    Opponent, Outcome, Participant, PlayerId, RenderInstruction,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc::error::TryRecvError;

const ALICE: PlayerId = PlayerId(1);

fn config() -> EngineConfig {
    EngineConfig::default()
        .with_ai_delay(Duration::from_millis(1200))
        .with_turn_timeout(Duration::from_secs(60))
}

fn vs_ai() -> GameRequest {
    GameRequest::new(ChannelId(5), Account::user(ALICE), Opponent::Ai, BoardSize::Three)
}

#[tokio::test(start_paused = true)]
async fn test_ai_replies_after_delay() {
    let (service, mut events) = GameService::with_rng(config(), StdRng::seed_from_u64(11));
    let game = service.start_game(vs_ai()).await.expect("starts");

    let result = service
        .submit_move(game, Coord::new(0, 0), Participant::Human(ALICE))
        .await;
    assert!(result.awaits_ai());

    tokio::time::advance(Duration::from_millis(1100)).await;
    tokio::task::yield_now().await;
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));

    let event = events.recv().await.expect("AI event");
    assert_eq!(event.game, game);
    match event.instruction {
        RenderInstruction::Continue { board, active } => {
            assert_eq!(active, Participant::Human(ALICE));
            assert_eq!(board.get(Coord::new(1, 1)), Some(Cell::Occupied(Mark::O)));
        }
        other => panic!("expected the game to continue, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_human_click_during_ai_pause_ignored() {
    let (service, mut events) = GameService::with_rng(config(), StdRng::seed_from_u64(11));
    let game = service.start_game(vs_ai()).await.expect("starts");

    service
        .submit_move(game, Coord::new(0, 0), Participant::Human(ALICE))
        .await;
    let early = service
        .submit_move(game, Coord::new(2, 2), Participant::Human(ALICE))
        .await;
    assert_eq!(early, RenderInstruction::Ignored);

    events.recv().await.expect("AI event");
    let snapshot = service.snapshot(game).await.expect("running");
    assert_eq!(snapshot.board().occupied(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_times_out_idle_game() {
    let (service, mut events) = GameService::with_rng(config(), StdRng::seed_from_u64(1));
    let sweeper = service.spawn_sweeper(Duration::from_secs(10));

    let request = GameRequest::new(
        ChannelId(5),
        Account::user(ALICE),
        Opponent::Account(Account::user(PlayerId(2))),
        BoardSize::Five,
    );
    let game = service.start_game(request).await.expect("starts");

    let event = events.recv().await.expect("timeout event");
    assert_eq!(event.game, game);
    assert!(matches!(
        event.instruction,
        RenderInstruction::Terminal {
            outcome: Outcome::TimedOut,
            ..
        }
    ));
    assert_eq!(service.active_games().await, 0);
    assert_eq!(
        service
            .submit_move(game, Coord::new(0, 0), Participant::Human(ALICE))
            .await,
        RenderInstruction::Ignored
    );

    sweeper.abort();
}

#[tokio::test(start_paused = true)]
async fn test_timed_out_game_skips_pending_ai_move() {
    let config = EngineConfig::default()
        .with_ai_delay(Duration::from_secs(5))
        .with_turn_timeout(Duration::from_secs(2));
    let (service, mut events) = GameService::with_rng(config, StdRng::seed_from_u64(2));
    let game = service.start_game(vs_ai()).await.expect("starts");

    service
        .submit_move(game, Coord::new(0, 0), Participant::Human(ALICE))
        .await;
    tokio::time::advance(Duration::from_secs(3)).await;
    assert!(service.check_timeout(game).await.is_terminal());

    tokio::time::advance(Duration::from_secs(3)).await;
    tokio::task::yield_now().await;
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}
