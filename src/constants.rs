//! Tunable constants for slimefootball
//!
//! All gameplay values are defined here for easy tweaking.
//! Distances are in world units (one arena tile = one unit).

use bevy::prelude::*;

// =============================================================================
// PLAYER MOVEMENT
// =============================================================================

pub const PLAYER_MAX_SPEED: f32 = 5.0;
pub const PLAYER_SIZE: Vec2 = Vec2::new(0.9, 0.9);
pub const GRAVITY: f32 = 9.81;

// =============================================================================
// JUMPING
// =============================================================================

pub const JUMP_LAUNCH_SPEED: f32 = 6.0; // Vertical velocity set on jump start
pub const JUMP_FORCE_DURATION_S: f32 = 0.3; // Thrust window while holding jump
pub const JUMP_THRUST_ACCEL: f32 = 20.0; // Upward acceleration while thrusting
pub const FALL_FORCE_FACTOR: f32 = 0.5; // Extra downward accel while falling, as a fraction of thrust

// =============================================================================
// ABILITIES
// =============================================================================

pub const ABILITY_COOLDOWN_S: f32 = 2.0; // Minimum time between ability toggles
pub const TURBO_MULTIPLIER: f32 = 2.0; // Horizontal speed multiplier while turbo is active

// =============================================================================
// BALL PHYSICS
// =============================================================================

pub const BALL_SIZE: Vec2 = Vec2::new(0.5, 0.5);
pub const BALL_GRAVITY: f32 = 9.81;
pub const BALL_BOUNCE: f32 = 0.8; // Coefficient of restitution against walls
pub const BALL_PLAYER_BOUNCE: f32 = 0.9; // Restitution against players
pub const BALL_PLAYER_VELOCITY_SHARE: f32 = 0.6; // Fraction of player velocity imparted on contact
pub const BALL_MAX_SPEED: f32 = 15.0;
pub const BALL_SPAWN_JITTER: f32 = 0.25; // Horizontal randomization at round start

// =============================================================================
// MATCH FLOW
// =============================================================================

pub const RESTART_DURATION_S: f32 = 2.0; // Resetting -> Playing delay
pub const FINISHED_DURATION_S: f32 = 5.0; // Finished -> Playing delay
pub const DEFAULT_MAX_SCORE: u32 = 3;

// =============================================================================
// ARENA
// =============================================================================

pub const DEFAULT_ARENA_WIDTH: u32 = 20; // In grid cells, including wall tiles
pub const DEFAULT_ARENA_HEIGHT: u32 = 12;
pub const GOAL_SIZE: Vec2 = Vec2::new(1.0, 2.0);
pub const CONTACT_EPSILON: f32 = 0.02; // Sensor tolerance for wall/floor contact

// =============================================================================
// AI TUNING
// =============================================================================

// Chasers. The Default variant uses the canonical 1-unit jump half-range,
// the Rich variant a slightly wider one.
pub const CHASER_REVERSE_RANGE: f32 = 1.0;
pub const CHASER_JUMP_HALF_RANGE: f32 = 1.0;
pub const RICH_JUMP_HALF_RANGE: f32 = 1.25;
pub const CHASER_JUMP_Y_RANGE: f32 = 2.0;

// Tactical (attack/defend) AI.
pub const TACTICAL_BALL_SPEED_DEFEND: f32 = 10.0; // Ball |vx| above this forces defending
pub const TACTICAL_ATTACK_REVERSE_RANGE: f32 = 0.8;
pub const TACTICAL_SMOOTH_RATE: f32 = 4.0; // Attack intent change per second
pub const TACTICAL_GOAL_OFFSET: f32 = 3.0; // Defensive post distance in front of own goal
pub const TACTICAL_POST_DEADBAND: f32 = 0.5;
pub const TACTICAL_BEHIND_MARGIN: f32 = 1.0; // Ball-behind-us detection margin
pub const TACTICAL_DEFEND_JUMP_RANGE: f32 = 3.0;
pub const TACTICAL_DEFEND_JUMP_MIN: f32 = 0.5;
pub const TACTICAL_DEFEND_JUMP_MAX: f32 = 4.0;

// =============================================================================
// COLORS
// =============================================================================

pub const BACKGROUND_COLOR: Color = Color::srgb(0.08, 0.09, 0.12);
pub const WALL_COLOR: Color = Color::srgb(0.25, 0.23, 0.2);
pub const TEAM_COLORS: [Color; 2] = [Color::srgb(0.3, 0.6, 0.95), Color::srgb(0.95, 0.4, 0.3)];
pub const BALL_COLOR: Color = Color::srgb(0.95, 0.9, 0.8);
pub const GOAL_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.25);
pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.9, 0.8);
pub const TEXT_ACCENT: Color = Color::srgb(0.9, 0.75, 0.4);

// =============================================================================
// CONFIG FILE
// =============================================================================

pub const MATCH_CONFIG_FILE: &str = "config/match_settings.json";
