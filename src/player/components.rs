//! Player-related components

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Marker for player entities
#[derive(Component)]
pub struct Player;

/// 2D velocity vector - shared by player and ball
#[derive(Component, Default)]
pub struct Velocity(pub Vec2);

/// Which team a player defends for. Team 0 defends the left goal and faces
/// right; team 1 defends the right goal and faces left.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Team(pub usize);

/// Roster position used when repositioning players between rounds
#[derive(Component, Clone, Copy)]
pub struct SpawnSlot {
    pub team: usize,
    pub member: usize,
}

/// Phases of the jump cycle
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum JumpPhase {
    #[default]
    CanJump,
    Jumping,
    Falling,
}

/// Jump state machine: CanJump -> Jumping (timed thrust) -> Falling,
/// reset to CanJump by ground contact.
#[derive(Component, Default)]
pub struct JumpState {
    pub phase: JumpPhase,
    /// Game-clock time at which the current jump started
    pub started_at: f32,
}

/// Directional wall-contact flags. A blocked direction forces the
/// corresponding horizontal velocity component to zero.
#[derive(Component)]
pub struct WallContacts {
    pub can_move_left: bool,
    pub can_move_right: bool,
}

impl Default for WallContacts {
    fn default() -> Self {
        Self {
            can_move_left: true,
            can_move_right: true,
        }
    }
}

/// Raw sensor overlap state from the previous contact pass, used to derive
/// enter/stay/exit edges.
#[derive(Component, Default, Clone, Copy)]
pub struct SensorContacts {
    pub left: bool,
    pub right: bool,
    pub bottom: bool,
}

/// Per-player ability kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AbilityKind {
    #[default]
    Normal,
    BallReverse,
    TurboRunning,
}

impl AbilityKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            AbilityKind::Normal => "normal",
            AbilityKind::BallReverse => "ball reverse",
            AbilityKind::TurboRunning => "turbo running",
        }
    }

    /// Sample a random ability, the way players are dealt one at spawn
    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..3) {
            0 => AbilityKind::Normal,
            1 => AbilityKind::BallReverse,
            _ => AbilityKind::TurboRunning,
        }
    }
}

/// Ability activation state and the horizontal speed multiplier it feeds
/// into the kinematic controller.
#[derive(Component)]
pub struct Ability {
    pub kind: AbilityKind,
    pub activated: bool,
    pub speed_multiplier: f32,
    /// Game-clock time of the last toggle, for cooldown checks
    pub last_toggled_at: f32,
}

impl Ability {
    pub fn new(kind: AbilityKind) -> Self {
        Self {
            kind,
            activated: false,
            speed_multiplier: 1.0,
            last_toggled_at: -ABILITY_COOLDOWN_S,
        }
    }

    /// Try to toggle the ability on or off. Returns true if the toggle took
    /// effect (activation respects the cooldown; deactivation always works).
    pub fn set_using(&mut self, activated: bool, now: f32) -> bool {
        if activated == self.activated {
            return false;
        }
        if activated && now - self.last_toggled_at < ABILITY_COOLDOWN_S {
            return false;
        }

        self.activated = activated;
        self.last_toggled_at = now;

        if self.kind == AbilityKind::TurboRunning {
            self.speed_multiplier = if activated { TURBO_MULTIPLIER } else { 1.0 };
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turbo_doubles_speed_multiplier_while_active() {
        let mut ability = Ability::new(AbilityKind::TurboRunning);
        assert!(ability.set_using(true, 0.0));
        assert_eq!(ability.speed_multiplier, TURBO_MULTIPLIER);
        assert!(ability.set_using(false, 0.5));
        assert_eq!(ability.speed_multiplier, 1.0);
    }

    #[test]
    fn ability_activation_respects_cooldown() {
        let mut ability = Ability::new(AbilityKind::TurboRunning);
        assert!(ability.set_using(true, 0.0));
        assert!(ability.set_using(false, 0.5));
        // Too soon to re-activate
        assert!(!ability.set_using(true, 1.0));
        assert!(ability.set_using(true, 0.5 + ABILITY_COOLDOWN_S));
    }

    #[test]
    fn normal_ability_never_changes_multiplier() {
        let mut ability = Ability::new(AbilityKind::Normal);
        ability.set_using(true, 0.0);
        assert_eq!(ability.speed_multiplier, 1.0);
    }
}
