//! Chaser AI - runs at the ball and jumps when it is overhead
//!
//! Covers two variants that differ only in tag and jump window width.
//! The reverse rule keeps the chaser from dribbling the ball in place:
//! when the ball sits just in front of the facing direction, back off
//! for a step so the next touch is a proper hit.

use bevy::prelude::*;

use crate::constants::*;
use crate::controller::{ControlIntent, ControlView, CustomController, RoundBindings};

pub struct ChaserController {
    tag: &'static str,
    jump_half_range: f32,
    facing_right: bool,
    bound: bool,
}

impl ChaserController {
    pub fn default_variant() -> Self {
        Self {
            tag: "Default AI",
            jump_half_range: CHASER_JUMP_HALF_RANGE,
            facing_right: true,
            bound: false,
        }
    }

    pub fn rich_variant() -> Self {
        Self {
            tag: "Richs AI",
            jump_half_range: RICH_JUMP_HALF_RANGE,
            facing_right: true,
            bound: false,
        }
    }

    /// Horizontal command toward the ball, with the anti-dribble reverse
    fn chase(&self, player: Vec2, ball: Vec2) -> f32 {
        let distance = (player.x - ball.x).abs();
        if ball.x < player.x {
            // Ball on the left. In front only for a left-facing player.
            if !self.facing_right && distance < CHASER_REVERSE_RANGE {
                1.0
            } else {
                -1.0
            }
        } else if ball.x > player.x {
            if self.facing_right && distance < CHASER_REVERSE_RANGE {
                -1.0
            } else {
                1.0
            }
        } else {
            0.0
        }
    }

    fn ball_in_jump_window(&self, player: Vec2, ball: Vec2) -> bool {
        ball.x > player.x - self.jump_half_range
            && ball.x < player.x + self.jump_half_range
            && ball.y > player.y
            && ball.y < player.y + CHASER_JUMP_Y_RANGE
    }
}

impl CustomController for ChaserController {
    fn display_tag(&self) -> &str {
        self.tag
    }

    fn set_team_index(&mut self, team: usize) {
        assert!(team < 2, "team index out of range");
        self.facing_right = team == 0;
    }

    fn round_started(&mut self, _bindings: &RoundBindings) {
        self.bound = true;
    }

    fn round_finished(&mut self) {
        self.bound = false;
    }

    fn decide(&mut self, view: &ControlView, _dt: f32) -> ControlIntent {
        let mut intent = ControlIntent::default();
        if !self.bound {
            return intent;
        }
        let Some(ball) = view.ball else {
            return intent;
        };

        intent.move_x = self.chase(view.player_position, ball.position);
        if self.ball_in_jump_window(view.player_position, ball.position) {
            intent.jump();
        }
        intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::test_support::{bindings, view_with_ball};

    fn bound_chaser() -> ChaserController {
        let mut chaser = ChaserController::default_variant();
        chaser.set_team_index(0);
        chaser.round_started(&bindings([Vec2::new(-9.0, -4.0), Vec2::new(9.0, -4.0)]));
        chaser
    }

    #[test]
    fn unbound_controller_issues_nothing() {
        let mut chaser = ChaserController::default_variant();
        let view = view_with_ball(Vec2::ZERO, Vec2::new(3.0, 0.0), Vec2::ZERO);
        let intent = chaser.decide(&view, 0.016);
        assert_eq!(intent.move_x, 0.0);
        assert_eq!(intent.jump_axis, 0.0);
    }

    #[test]
    fn no_ball_means_no_movement() {
        let mut chaser = bound_chaser();
        let mut view = view_with_ball(Vec2::ZERO, Vec2::ZERO, Vec2::ZERO);
        view.ball = None;
        let intent = chaser.decide(&view, 0.016);
        assert_eq!(intent.move_x, 0.0);
    }

    #[test]
    fn chases_distant_ball() {
        let mut chaser = bound_chaser();
        let view = view_with_ball(Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.5), Vec2::ZERO);
        assert_eq!(chaser.decide(&view, 0.016).move_x, 1.0);

        let view = view_with_ball(Vec2::new(0.0, 0.0), Vec2::new(-5.0, 0.5), Vec2::ZERO);
        assert_eq!(chaser.decide(&view, 0.016).move_x, -1.0);
    }

    #[test]
    fn reverses_when_ball_hugs_the_facing_side() {
        // Team 0 faces right: a ball just ahead triggers the back-off
        let mut chaser = bound_chaser();
        let view = view_with_ball(Vec2::ZERO, Vec2::new(0.5, 0.5), Vec2::ZERO);
        assert_eq!(chaser.decide(&view, 0.016).move_x, -1.0);

        // Same ball behind a right-facing player is chased normally
        let view = view_with_ball(Vec2::ZERO, Vec2::new(-0.5, 0.5), Vec2::ZERO);
        assert_eq!(chaser.decide(&view, 0.016).move_x, -1.0);
    }

    #[test]
    fn jumps_when_ball_is_overhead() {
        let mut chaser = bound_chaser();
        let view = view_with_ball(Vec2::new(0.0, 0.0), Vec2::new(0.5, 1.0), Vec2::ZERO);
        let intent = chaser.decide(&view, 0.016);
        assert_eq!(intent.jump_axis, 1.0);
    }

    #[test]
    fn does_not_jump_outside_the_window() {
        let mut chaser = bound_chaser();

        // Too far sideways
        let view = view_with_ball(Vec2::ZERO, Vec2::new(1.5, 1.0), Vec2::ZERO);
        assert_eq!(chaser.decide(&view, 0.016).jump_axis, 0.0);

        // Below the player
        let view = view_with_ball(Vec2::ZERO, Vec2::new(0.2, -0.5), Vec2::ZERO);
        assert_eq!(chaser.decide(&view, 0.016).jump_axis, 0.0);

        // Too high
        let view = view_with_ball(Vec2::ZERO, Vec2::new(0.2, 2.5), Vec2::ZERO);
        assert_eq!(chaser.decide(&view, 0.016).jump_axis, 0.0);
    }

    #[test]
    fn rich_variant_has_the_wider_window() {
        let mut rich = ChaserController::rich_variant();
        rich.set_team_index(0);
        rich.round_started(&bindings([Vec2::new(-9.0, -4.0), Vec2::new(9.0, -4.0)]));

        // Inside Rich's window but outside the default one
        let view = view_with_ball(Vec2::ZERO, Vec2::new(1.1, 1.0), Vec2::ZERO);
        assert_eq!(rich.decide(&view, 0.016).jump_axis, 1.0);

        let mut plain = bound_chaser();
        assert_eq!(plain.decide(&view, 0.016).jump_axis, 0.0);
    }
}
