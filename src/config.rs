//! Match configuration
//!
//! Loads match setup (game mode, AI choices, arena size, winning score)
//! from a match_settings.json in the config directory, falling back to
//! defaults when the file is missing or malformed.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::ai::AiKind;
use crate::constants::*;

/// Team composition and which slimes are human driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    AiOnly1v1,
    SinglePlayer1v1,
    SinglePlayer1v2,
    TwoPlayer1v1,
    AiOnly2v2,
    SinglePlayer2v2,
    TwoPlayer2v2,
    TwoPlayerCoop2v2,
    TwoPlayerCoop2v10,
}

impl GameMode {
    /// Player counts per team, indexed by team
    pub fn team_sizes(&self) -> [usize; 2] {
        match self {
            GameMode::AiOnly1v1 | GameMode::SinglePlayer1v1 | GameMode::TwoPlayer1v1 => [1, 1],
            GameMode::SinglePlayer1v2 => [1, 2],
            GameMode::AiOnly2v2
            | GameMode::SinglePlayer2v2
            | GameMode::TwoPlayer2v2
            | GameMode::TwoPlayerCoop2v2 => [2, 2],
            GameMode::TwoPlayerCoop2v10 => [2, 10],
        }
    }

    /// Which slimes get a keyboard: (team, member, input slot)
    pub fn human_slots(&self) -> Vec<(usize, usize, usize)> {
        match self {
            GameMode::AiOnly1v1 | GameMode::AiOnly2v2 => vec![],
            GameMode::SinglePlayer1v1
            | GameMode::SinglePlayer1v2
            | GameMode::SinglePlayer2v2 => vec![(0, 0, 0)],
            GameMode::TwoPlayer1v1 | GameMode::TwoPlayer2v2 => vec![(0, 0, 0), (1, 0, 1)],
            GameMode::TwoPlayerCoop2v2 | GameMode::TwoPlayerCoop2v10 => {
                vec![(0, 0, 0), (0, 1, 1)]
            }
        }
    }
}

/// Match setup loaded before the app starts
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    pub mode: GameMode,
    /// AI choice per team, used for every non-human slime on that team
    pub team_ai: [AiKind; 2],
    /// Arena size in tiles, including the one-tile wall border
    pub arena_width: u32,
    pub arena_height: u32,
    /// Goals needed to win the match
    pub max_score: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::SinglePlayer1v1,
            team_ai: [AiKind::Default, AiKind::Aaron],
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            max_score: DEFAULT_MAX_SCORE,
        }
    }
}

impl MatchConfig {
    /// Load config from file, or return defaults if it doesn't exist
    pub fn load_or_default(path: &str) -> Self {
        if !Path::new(path).exists() {
            info!("No {} found, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    info!("Loaded match config from {}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &str) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        info!("Saved match config to {}", path);
        Ok(())
    }
}
