//! Slimefootball - a 2D slime football game built with Bevy
//!
//! This crate provides all game components, resources, and systems organized into modules.

// Core modules
pub mod config;
pub mod constants;
pub mod events;
pub mod helpers;
pub mod simulation;

// Game logic modules
pub mod ai;
pub mod ball;
pub mod controller;
pub mod input;
pub mod player;
pub mod scoring;
pub mod ui;
pub mod world;

// Re-export commonly used types for convenience
pub use ai::{AiKind, AiState, ChaserController, TacticalController};
pub use ball::Ball;
pub use config::{GameMode, MatchConfig};
pub use controller::{
    BallView, ControlIntent, ControlView, ControllerSet, CustomController, RoundBindings,
};
pub use events::{ControllerSource, EventBus, GameEvent};
pub use input::{KeyboardController, PlayerInput};
pub use player::{
    Ability, AbilityKind, JumpPhase, JumpState, Player, SensorContacts, SpawnSlot, Team, Velocity,
    WallContacts,
};
pub use scoring::{GameState, GoalOutcome, MatchState};
pub use world::{Arena, Goal};
