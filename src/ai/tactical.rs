//! Tactical AI - switches between an attacking chase and goal-mouth defence
//!
//! State is re-evaluated every step from where the ball and the opposing
//! team sit relative to the two goals, unless a fixed state was pinned.
//! Attacking reuses the chaser movement shape but smooths the horizontal
//! command so the slime does not twitch at the reverse boundary.

use bevy::prelude::*;

use crate::constants::*;
use crate::controller::{BallView, ControlIntent, ControlView, CustomController, RoundBindings};
use crate::helpers::move_toward;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiState {
    Attacking,
    Defending,
}

pub struct TacticalController {
    team: usize,
    facing_right: bool,
    state: AiState,
    state_fixed: bool,
    /// Goal centers indexed by defending team, cached while a round is live
    goals: Option<[Vec2; 2]>,
    current_move: f32,
}

impl TacticalController {
    pub fn new() -> Self {
        Self {
            team: 0,
            facing_right: true,
            state: AiState::Defending,
            state_fixed: false,
            goals: None,
            current_move: 0.0,
        }
    }

    /// Pin the state machine, mainly for exercising one behavior in tests
    pub fn set_fixed_state(&mut self, state: AiState) {
        self.state_fixed = true;
        self.state = state;
    }

    pub fn state(&self) -> AiState {
        self.state
    }

    fn my_goal(&self) -> Vec2 {
        self.goals.map(|goals| goals[self.team]).unwrap_or(Vec2::ZERO)
    }

    fn enemy_goal(&self) -> Vec2 {
        self.goals
            .map(|goals| goals[1 - self.team])
            .unwrap_or(Vec2::ZERO)
    }

    /// Pick attack or defend from the field situation
    fn choose_state(ball: BallView, my_goal: Vec2, enemy_goal: Vec2, opponents: &[Vec2]) -> AiState {
        let average_enemy = if opponents.is_empty() {
            Vec2::ZERO
        } else {
            opponents.iter().copied().sum::<Vec2>() / opponents.len() as f32
        };

        let ball_closer_to_my_goal =
            my_goal.distance(ball.position) < enemy_goal.distance(ball.position);
        let enemy_closer_to_my_goal =
            average_enemy.distance(my_goal) < average_enemy.distance(enemy_goal);

        match (ball_closer_to_my_goal, enemy_closer_to_my_goal) {
            (true, true) => AiState::Defending,
            (true, false) => {
                // The enemies are out of position; push unless the ball is
                // already flying too fast to beat to the net
                if ball.velocity.x.abs() > TACTICAL_BALL_SPEED_DEFEND {
                    AiState::Defending
                } else {
                    AiState::Attacking
                }
            }
            (false, true) => AiState::Attacking,
            (false, false) => AiState::Defending,
        }
    }

    fn attack(&mut self, view: &ControlView, ball: BallView, dt: f32) -> ControlIntent {
        let player = view.player_position;
        let distance = (player.x - ball.position.x).abs();

        let target = if ball.position.x < player.x {
            if !self.facing_right && distance < TACTICAL_ATTACK_REVERSE_RANGE {
                1.0
            } else {
                -1.0
            }
        } else if ball.position.x > player.x {
            if self.facing_right && distance < TACTICAL_ATTACK_REVERSE_RANGE {
                -1.0
            } else {
                1.0
            }
        } else {
            self.current_move
        };

        self.current_move = move_toward(self.current_move, target, TACTICAL_SMOOTH_RATE * dt);

        let mut intent = ControlIntent {
            move_x: self.current_move,
            ..Default::default()
        };

        if (ball.position.x - player.x).abs() < CHASER_JUMP_HALF_RANGE
            && ball.position.y > player.y
            && ball.position.y < player.y + CHASER_JUMP_Y_RANGE
        {
            intent.jump();
        }
        intent
    }

    fn defend(&self, view: &ControlView, ball: BallView) -> ControlIntent {
        let player = view.player_position;
        let goal_offset = if self.facing_right {
            TACTICAL_GOAL_OFFSET
        } else {
            -TACTICAL_GOAL_OFFSET
        };
        let post_x = self.my_goal().x + goal_offset;
        let distance_to_post = (player.x - post_x).abs();

        let mut intent = ControlIntent::default();

        // A ball behind the post line is an emergency: chase it
        if !self.facing_right && ball.position.x > player.x - TACTICAL_BEHIND_MARGIN {
            intent.move_x = 1.0;
        } else if self.facing_right && ball.position.x < player.x + TACTICAL_BEHIND_MARGIN {
            intent.move_x = -1.0;
        } else if distance_to_post > TACTICAL_POST_DEADBAND {
            intent.move_x = if player.x > post_x { -1.0 } else { 1.0 };
        }

        let distance_to_ball = (player.x - ball.position.x).abs();
        if distance_to_ball < TACTICAL_DEFEND_JUMP_RANGE
            && ball.position.y > player.y + TACTICAL_DEFEND_JUMP_MIN
            && ball.position.y < player.y + TACTICAL_DEFEND_JUMP_MAX
        {
            intent.jump();
        }
        intent
    }
}

impl Default for TacticalController {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomController for TacticalController {
    fn display_tag(&self) -> &str {
        "Aarons AI"
    }

    fn set_team_index(&mut self, team: usize) {
        assert!(team < 2, "team index out of range");
        self.team = team;
        self.facing_right = team == 0;
    }

    fn round_started(&mut self, bindings: &RoundBindings) {
        self.goals = Some(bindings.goals);
    }

    fn round_finished(&mut self) {
        self.goals = None;
    }

    fn decide(&mut self, view: &ControlView, dt: f32) -> ControlIntent {
        if self.goals.is_none() {
            return ControlIntent::default();
        }
        let Some(ball) = view.ball else {
            return ControlIntent::default();
        };

        if !self.state_fixed {
            self.state = Self::choose_state(ball, self.my_goal(), self.enemy_goal(), &view.opponents);
        }

        match self.state {
            AiState::Attacking => self.attack(view, ball, dt),
            AiState::Defending => self.defend(view, ball),
        }
    }
}
