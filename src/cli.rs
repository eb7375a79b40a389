//! Command-line interface for morpion.

use clap::{Parser, Subcommand};

/// Morpion - tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "morpion")]
#[command(about = "Tic-tac-toe with a heuristic AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to an engine config file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Board size (3 or 5); defaults to the configured size
        #[arg(short, long)]
        size: Option<usize>,

        /// Play against the computer instead of a second local player
        #[arg(long)]
        ai: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}
