//! TIC TAC TWO Core - Rules engine and heuristic opponent
//!
//! This crate provides the core game logic:
//! - Board geometry and the sliding active window
//! - Game state with placement, relocation and window shifts
//! - Window-relative win detection
//! - A single-ply tactical AI

pub mod board;
pub mod config;
pub mod game;
pub mod ai;

// Re-exports for convenient access
pub use board::{Board, Coord, Direction, Window, LINE_DIRECTIONS};
pub use config::{ConfigError, GameConfig};
pub use game::{detect_winner, completes_line, Action, GameState, MoveError, PlacementCounts, Player, Snapshot};
pub use ai::HeuristicAgent;
