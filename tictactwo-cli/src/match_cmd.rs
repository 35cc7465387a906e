//! Match command - AI vs AI self-play
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;

use tictactwo_core::{Action, GameConfig, GameState, HeuristicAgent, Player};

/// Mixed into the base seed for O's agent so the two sides differ
const O_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Actions per game before it is scored a draw
    #[arg(long, default_value = "200")]
    pub max_moves: u32,

    /// Run games in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// How a game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win(Player),
    /// Move cap reached
    Draw,
    /// An agent had nothing to play
    Stalled,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub game_number: usize,
    pub seed: u64,
    pub outcome: Outcome,
    pub moves: u32,
    pub final_board: String,
    #[serde(skip)]
    #[allow(dead_code)] // Kept for replaying a game
    pub actions: Vec<Action>,
}

/// Aggregated match results
#[derive(Clone, Debug)]
pub struct MatchResults {
    pub games: Vec<GameRecord>,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub stalls: usize,
    pub avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Play the match (multiple games)
/// 2. Report results
pub fn run(args: MatchArgs, config: GameConfig, seed: Option<u64>) -> Result<()> {
    config.validate()?;
    let base_seed = seed.unwrap_or_else(rand::random);

    tracing::info!(
        games = args.games,
        base_seed,
        board = config.board_size,
        window = config.window_size,
        "starting self-play match"
    );

    let results = play_match(&config, &args, base_seed);
    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match. Game `i` uses seed `base_seed + i`.
pub fn play_match(config: &GameConfig, args: &MatchArgs, base_seed: u64) -> MatchResults {
    let play = |i: usize| {
        let seed = base_seed.wrapping_add(i as u64);
        let record = play_single_game(config, i + 1, seed, args.max_moves);
        tracing::info!(
            "Game {}: {:?} ({} moves)",
            record.game_number,
            record.outcome,
            record.moves
        );
        record
    };

    let games: Vec<GameRecord> = if args.parallel {
        (0..args.games).into_par_iter().map(play).collect()
    } else {
        (0..args.games).map(play).collect()
    };

    compute_match_statistics(games)
}

fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one agent-vs-agent game through the public GameState operations
pub fn play_single_game(config: &GameConfig, game_number: usize, seed: u64, max_moves: u32) -> GameRecord {
    let mut state = GameState::new(config.clone());
    let mut x = HeuristicAgent::with_seed(Player::X, seed);
    let mut o = HeuristicAgent::with_seed(Player::O, seed ^ O_SEED_SALT);
    let mut actions = Vec::new();

    let outcome = loop {
        if let Some(winner) = state.winner() {
            break Outcome::Win(winner);
        }
        if state.moves() >= max_moves {
            break Outcome::Draw;
        }

        let agent = match state.current_player() {
            Player::X => &mut x,
            Player::O => &mut o,
        };
        let Some(action) = agent.decide_for(&state) else {
            tracing::debug!(game_number, player = %state.current_player(), "agent passed");
            break Outcome::Stalled;
        };
        if let Err(err) = state.apply(action) {
            tracing::warn!(game_number, %action, %err, "agent proposed an illegal action");
            break Outcome::Stalled;
        }
        actions.push(action);
    };

    GameRecord {
        game_number,
        seed,
        outcome,
        moves: state.moves(),
        final_board: state.board().to_string(),
        actions,
    }
}

/// Compute aggregate statistics from game records
pub fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let count = |outcome: Outcome| games.iter().filter(|g| g.outcome == outcome).count();
    let x_wins = count(Outcome::Win(Player::X));
    let o_wins = count(Outcome::Win(Player::O));
    let draws = count(Outcome::Draw);
    let stalls = count(Outcome::Stalled);

    let total_moves: u32 = games.iter().map(|g| g.moves).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        x_wins,
        o_wins,
        draws,
        stalls,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn rate(n: usize, total: usize) -> f32 {
    if total > 0 {
        n as f32 / total as f32
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        total_games: usize,
        x_wins: usize,
        o_wins: usize,
        draws: usize,
        stalls: usize,
        avg_moves: f32,
        x_win_rate: f32,
        games: &'a [GameRecord],
    }

    let total = results.games.len();
    let output = JsonOutput {
        total_games: total,
        x_wins: results.x_wins,
        o_wins: results.o_wins,
        draws: results.draws,
        stalls: results.stalls,
        avg_moves: results.avg_moves,
        x_win_rate: rate(results.x_wins, total),
        games: &results.games,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(err) => tracing::error!(%err, "failed to serialize results"),
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!("X wins:      {} ({:.1}%)", results.x_wins, rate(results.x_wins, total) * 100.0);
    println!("O wins:      {} ({:.1}%)", results.o_wins, rate(results.o_wins, total) * 100.0);
    println!("Draws:       {} ({:.1}%)", results.draws, rate(results.draws, total) * 100.0);
    println!("Stalled:     {} ({:.1}%)", results.stalls, rate(results.stalls, total) * 100.0);
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {} (seed {}): {:?} in {} moves",
            game.game_number, game.seed, game.outcome, game.moves
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
