//! TIC TAC TWO CLI - Command-line interface
//!
//! Commands:
//! - play: Interactive game, human vs human or human vs AI
//! - match: AI vs AI self-play with aggregate statistics

mod match_cmd;
mod play_cmd;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tictactwo_core::GameConfig;

#[derive(Parser)]
#[command(name = "tictactwo")]
#[command(about = "TIC TAC TWO: tic-tac-toe on a sliding window")]
struct Cli {
    /// Seed for the AI's random choices
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Game configuration JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game on the terminal
    Play(play_cmd::PlayArgs),
    /// Let two AIs play each other
    Match(match_cmd::MatchArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, config, cli.seed),
        Commands::Match(args) => match_cmd::run(args, config, cli.seed),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load game config: {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}
