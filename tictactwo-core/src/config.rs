//! Game configuration: board size, window size and placement limits

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid combination of configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("window size must be at least 1")]
    EmptyWindow,

    #[error("window size {window} does not fit on a {board}x{board} board")]
    WindowTooLarge { window: usize, board: usize },

    #[error("max pieces must be at least 1")]
    NoPieces,

    #[error("movement unlock {unlock} exceeds max pieces {max}")]
    UnlockTooHigh { unlock: u8, max: u8 },

    #[error("invalid position: {0}")]
    InvalidPosition(String),
}

/// Fixed parameters of a game, chosen at construction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length N of the board
    pub board_size: usize,
    /// Side length K of the active window (also the winning line length)
    pub window_size: usize,
    /// Pieces each player may place
    pub max_pieces: u8,
    /// Placements both players need before drivers offer moves and shifts
    pub movement_unlock: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 5,
            window_size: 3,
            max_pieces: 4,
            movement_unlock: 2,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        if self.window_size > self.board_size {
            return Err(ConfigError::WindowTooLarge {
                window: self.window_size,
                board: self.board_size,
            });
        }
        if self.max_pieces == 0 {
            return Err(ConfigError::NoPieces);
        }
        if self.movement_unlock > self.max_pieces {
            return Err(ConfigError::UnlockTooHigh {
                unlock: self.movement_unlock,
                max: self.max_pieces,
            });
        }
        Ok(())
    }

    /// Length of a winning line
    pub fn line_length(&self) -> usize {
        self.window_size
    }

    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
