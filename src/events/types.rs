//! Event type definitions for the logging system

use serde::{Deserialize, Serialize};

use crate::player::AbilityKind;

/// Where a controller input originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerSource {
    Human,
    Ai,
}

/// All game events that can be logged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEvent {
    /// Match started (or restarted after a finished game)
    MatchStart {
        winning_score: u32,
        team_tags: [String; 2],
    },
    /// Goal scored
    Goal {
        scoring_team: usize,
        scores: [u32; 2],
    },
    /// Players and ball repositioned for a new round
    RoundReset { scores: [u32; 2] },
    /// A team reached the winning score
    MatchFinished {
        winning_team: usize,
        games_won: [u32; 2],
    },
    /// A player toggled their ability
    AbilityToggled {
        team: usize,
        ability: AbilityKind,
        activated: bool,
    },
    /// Controller input snapshot (sampled, for analysis)
    ControllerInput {
        team: usize,
        source: ControllerSource,
        move_x: f32,
        jump: bool,
    },
}

impl GameEvent {
    /// Get the event type code for compact log lines
    pub fn type_code(&self) -> &'static str {
        match self {
            GameEvent::MatchStart { .. } => "MS",
            GameEvent::Goal { .. } => "G",
            GameEvent::RoundReset { .. } => "RR",
            GameEvent::MatchFinished { .. } => "MF",
            GameEvent::AbilityToggled { .. } => "AB",
            GameEvent::ControllerInput { .. } => "CI",
        }
    }
}
