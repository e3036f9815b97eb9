//! Input module - keyboard axis capture and the human controller adapter

use bevy::prelude::*;

use crate::controller::{ControlIntent, ControlView, CustomController, RoundBindings};
use crate::events::ControllerSource;
use crate::player::JumpPhase;

/// Number of human input slots (two keyboard key groups)
pub const NUM_INPUT_SLOTS: usize = 2;

/// One captured axis pair plus the ability key
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisPair {
    pub horizontal: f32,
    pub vertical: f32,
    pub ability: bool,
}

/// Captured input state for all human slots
#[derive(Resource, Default)]
pub struct PlayerInput {
    pub axes: [AxisPair; NUM_INPUT_SLOTS],
}

/// Runs in Update to capture keyboard state.
/// Slot 0: WASD + left shift. Slot 1: arrows + right shift.
pub fn capture_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<PlayerInput>) {
    let slot0 = &mut input.axes[0];
    slot0.horizontal = axis(
        keyboard.pressed(KeyCode::KeyA),
        keyboard.pressed(KeyCode::KeyD),
    );
    slot0.vertical = if keyboard.pressed(KeyCode::KeyW) { 1.0 } else { 0.0 };
    slot0.ability = keyboard.pressed(KeyCode::ShiftLeft);

    let slot1 = &mut input.axes[1];
    slot1.horizontal = axis(
        keyboard.pressed(KeyCode::ArrowLeft),
        keyboard.pressed(KeyCode::ArrowRight),
    );
    slot1.vertical = if keyboard.pressed(KeyCode::ArrowUp) { 1.0 } else { 0.0 };
    slot1.ability = keyboard.pressed(KeyCode::ShiftRight);
}

fn axis(negative: bool, positive: bool) -> f32 {
    let mut value = 0.0;
    if negative {
        value -= 1.0;
    }
    if positive {
        value += 1.0;
    }
    value
}

/// Human keyboard adapter. Forwards the captured axis pair through the
/// controller seam, with the jump edge-trigger rule: after a jump starts,
/// thrust is only forwarded while the jump phase is still Jumping, and a
/// new jump cannot start until the key has been released.
pub struct KeyboardController {
    input_slot: usize,
    has_released_jump_since_last_jump: bool,
}

impl KeyboardController {
    pub fn new(input_slot: usize) -> Self {
        assert!(input_slot < NUM_INPUT_SLOTS, "input slot out of range");
        Self {
            input_slot,
            has_released_jump_since_last_jump: true,
        }
    }
}

impl CustomController for KeyboardController {
    fn display_tag(&self) -> &str {
        "Keyboard"
    }

    fn source(&self) -> ControllerSource {
        ControllerSource::Human
    }

    fn set_team_index(&mut self, team: usize) {
        assert!(team < 2, "team index out of range");
    }

    fn round_started(&mut self, _bindings: &RoundBindings) {}

    fn round_finished(&mut self) {}

    fn decide(&mut self, view: &ControlView, _dt: f32) -> ControlIntent {
        let axes = view.axes[self.input_slot];
        let pressing_jump = axes.vertical > 0.0;

        let jump_axis = if !pressing_jump {
            self.has_released_jump_since_last_jump = true;
            0.0
        } else if self.has_released_jump_since_last_jump {
            // First press of a fresh jump cycle
            self.has_released_jump_since_last_jump = false;
            axes.vertical
        } else if view.jump_phase == JumpPhase::Jumping {
            // Keep thrusting only while the started jump is live
            axes.vertical
        } else {
            0.0
        };

        ControlIntent {
            move_x: axes.horizontal,
            jump_axis,
            ability: axes.ability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::*;

    fn view(vertical: f32, jump_phase: JumpPhase) -> ControlView {
        let mut axes: [AxisPair; NUM_INPUT_SLOTS] = Default::default();
        axes[0].vertical = vertical;
        axes[0].horizontal = 0.5;
        ControlView {
            player_position: Vec2::ZERO,
            player_velocity: Vec2::ZERO,
            jump_phase,
            ball: None,
            opponents: Vec::new(),
            axes,
        }
    }

    #[test]
    fn held_jump_does_not_rearm_after_landing() {
        let mut keyboard = KeyboardController::new(0);

        // Fresh press starts a jump
        let intent = keyboard.decide(&view(1.0, JumpPhase::CanJump), 0.016);
        assert_eq!(intent.jump_axis, 1.0);

        // Still holding while jumping: thrust continues
        let intent = keyboard.decide(&view(1.0, JumpPhase::Jumping), 0.016);
        assert_eq!(intent.jump_axis, 1.0);

        // Still holding after landing: no new jump until released
        let intent = keyboard.decide(&view(1.0, JumpPhase::CanJump), 0.016);
        assert_eq!(intent.jump_axis, 0.0);

        // Release re-arms, next press jumps again
        keyboard.decide(&view(0.0, JumpPhase::CanJump), 0.016);
        let intent = keyboard.decide(&view(1.0, JumpPhase::CanJump), 0.016);
        assert_eq!(intent.jump_axis, 1.0);
    }

    #[test]
    fn horizontal_axis_passes_through() {
        let mut keyboard = KeyboardController::new(0);
        let intent = keyboard.decide(&view(0.0, JumpPhase::CanJump), 0.016);
        assert_eq!(intent.move_x, 0.5);
    }

    #[test]
    #[should_panic(expected = "input slot out of range")]
    fn out_of_range_slot_is_a_contract_violation() {
        KeyboardController::new(NUM_INPUT_SLOTS);
    }
}
