//! Morpion - terminal front end
//!
//! Plays hot-seat or against the computer on stdin/stdout.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use morpion::{
    Account, BoardSize, ChannelId, Coord, EngineConfig, GameId, GameRequest, GameService,
    Opponent, PlayerId, RenderInstruction, render,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

const CHANNEL: ChannelId = ChannelId(0);
const PLAYER_ONE: PlayerId = PlayerId(1);
const PLAYER_TWO: PlayerId = PlayerId(2);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Play { size, ai } => run_play(config, size, ai).await,
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Parses a `row col` line.
fn parse_coord(line: &str) -> Option<Coord> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse::<usize>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(row)), Some(Ok(col)), None) => Some(Coord::new(row, col)),
        _ => None,
    }
}

/// Prints a render instruction; returns true when the game is over.
fn show(instruction: &RenderInstruction) -> bool {
    if let Some(text) = render::render(instruction) {
        println!("{text}");
    }
    instruction.is_terminal()
}

/// Run an interactive game
#[instrument(skip(config))]
async fn run_play(config: EngineConfig, size: Option<usize>, ai: bool) -> Result<()> {
    let size = match size {
        Some(n) => BoardSize::try_from(n)?,
        None => *config.default_board_size(),
    };
    let opponent = if ai {
        Opponent::Ai
    } else {
        Opponent::Account(Account::user(PLAYER_TWO))
    };

    let (service, mut events) = GameService::new(config.clone());
    let sweeper = service.spawn_sweeper(config.sweep_interval());

    let request = GameRequest::new(CHANNEL, Account::user(PLAYER_ONE), opponent, size);
    let game: GameId = service
        .start_game(request)
        .await
        .context("failed to start game")?;
    info!(%game, %size, ai, "Game started");

    let snapshot = service
        .snapshot(game)
        .await
        .context("game vanished right after starting")?;
    let mut active = snapshot.active();
    show(&RenderInstruction::Continue {
        board: snapshot.board().clone(),
        active: snapshot.participant_a(),
    });
    println!("Enter moves as `row col`.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                let Some(coord) = parse_coord(&line) else {
                    println!("Could not read `{}`; expected `row col`.", line.trim());
                    continue;
                };
                let Some(player) = active.filter(|p| !p.is_ai()) else {
                    debug!("Waiting on the AI");
                    continue;
                };
                let result = service.submit_move(game, coord, player).await;
                if result.is_ignored() {
                    println!("That move is not allowed.");
                    continue;
                }
                if let RenderInstruction::Continue { active: next, .. } = &result {
                    active = Some(*next);
                }
                if show(&result) {
                    break;
                }
            }
            Some(event) = events.recv() => {
                if event.game != game {
                    continue;
                }
                if let RenderInstruction::Continue { active: next, .. } = &event.instruction {
                    active = Some(*next);
                }
                if show(&event.instruction) {
                    break;
                }
            }
        }
    }

    sweeper.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("1 2"), Some(Coord::new(1, 2)));
        assert_eq!(parse_coord(" 0,2 "), Some(Coord::new(0, 2)));
        assert_eq!(parse_coord("1"), None);
        assert_eq!(parse_coord("1 2 3"), None);
        assert_eq!(parse_coord("a b"), None);
    }
}
