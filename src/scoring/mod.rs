//! Scoring module - goal detection and the match state machine
//!
//! `MatchState` is a pure state machine driven by an explicit clock so the
//! whole match flow can be unit tested without stepping an app. The two
//! systems around it feed it the ECS clock and carry out the side effects
//! of its transitions (respawns, controller notifications, bus events).

use bevy::prelude::*;
use rand::Rng;

use crate::ball::Ball;
use crate::constants::*;
use crate::controller::{BallView, ControlIntent, ControllerSet, RoundBindings};
use crate::events::{EventBus, GameEvent};
use crate::helpers::point_in_aabb;
use crate::player::{JumpState, Player, SpawnSlot, Velocity};
use crate::world::{Arena, Goal};

/// Match flow states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Round live, goals count
    Playing,
    /// Short pause after a goal before the next round
    Resetting,
    /// Someone reached the winning score; long pause, then a fresh match
    Finished,
}

/// Result of a counted goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalOutcome {
    pub scorer: usize,
    /// True when this goal ended the match
    pub finished: bool,
}

/// The match state machine. All transitions take the current time as an
/// explicit argument; systems pass the ECS clock through.
#[derive(Resource)]
pub struct MatchState {
    state: GameState,
    state_entered_at: f32,
    scores: [u32; 2],
    games_won: [u32; 2],
    max_score: u32,
}

impl MatchState {
    /// A new match starts in Resetting so the first round gets the same
    /// pre-round pause as every later one.
    pub fn new(max_score: u32) -> Self {
        Self {
            state: GameState::Resetting,
            state_entered_at: 0.0,
            scores: [0, 0],
            games_won: [0, 0],
            max_score,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn games_won(&self) -> [u32; 2] {
        self.games_won
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    /// Count a goal against `defending_team`. Goals outside Playing are
    /// ignored: the ball keeps moving during the reset pause and may drift
    /// through a goal mouth again.
    pub fn handle_goal(&mut self, defending_team: usize, now: f32) -> Option<GoalOutcome> {
        assert!(defending_team < 2, "team index out of range");
        if self.state != GameState::Playing {
            return None;
        }

        let scorer = 1 - defending_team;
        self.scores[scorer] += 1;

        let finished = self.scores[scorer] >= self.max_score;
        if finished {
            self.games_won[scorer] += 1;
            self.enter(GameState::Finished, now);
        } else {
            self.enter(GameState::Resetting, now);
        }

        Some(GoalOutcome { scorer, finished })
    }

    /// Advance the timed transitions. Returns true when a new round should
    /// be set up (positions reset, controllers rebound).
    pub fn advance(&mut self, now: f32) -> bool {
        let elapsed = now - self.state_entered_at;
        match self.state {
            GameState::Playing => false,
            GameState::Resetting => {
                if elapsed >= RESTART_DURATION_S {
                    self.enter(GameState::Playing, now);
                    true
                } else {
                    false
                }
            }
            GameState::Finished => {
                if elapsed >= FINISHED_DURATION_S {
                    self.scores = [0, 0];
                    self.enter(GameState::Playing, now);
                    true
                } else {
                    false
                }
            }
        }
    }

    fn enter(&mut self, state: GameState, now: f32) {
        self.state = state;
        self.state_entered_at = now;
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SCORE)
    }
}

/// Check whether the ball sits inside a goal mouth and drive the match
/// state machine. Runs in FixedUpdate after ball movement.
pub fn check_goals(
    time: Res<Time>,
    mut match_state: ResMut<MatchState>,
    mut event_bus: ResMut<EventBus>,
    ball_query: Query<&Transform, With<Ball>>,
    goal_query: Query<(&Transform, &Goal), Without<Ball>>,
    mut controller_query: Query<&mut ControllerSet, With<Player>>,
) {
    let now = time.elapsed_secs();

    for ball_transform in &ball_query {
        let ball_pos = ball_transform.translation.truncate();

        for (goal_transform, goal) in &goal_query {
            let goal_pos = goal_transform.translation.truncate();
            if !point_in_aabb(ball_pos, goal_pos, GOAL_SIZE) {
                continue;
            }

            let Some(outcome) = match_state.handle_goal(goal.defending_team, now) else {
                continue;
            };

            info!(
                "goal for team {} ({} - {})",
                outcome.scorer,
                match_state.scores()[0],
                match_state.scores()[1]
            );

            for mut controllers in &mut controller_query {
                controllers.notify_round_finished();
            }

            event_bus.emit(GameEvent::Goal {
                scoring_team: outcome.scorer,
                scores: match_state.scores(),
            });
            if outcome.finished {
                info!("team {} wins the match", outcome.scorer);
                event_bus.emit(GameEvent::MatchFinished {
                    winning_team: outcome.scorer,
                    games_won: match_state.games_won(),
                });
            }
        }
    }
}

/// Run the timed transitions and set up the next round when one starts:
/// players back on their spawn slots, ball at center with a small jitter,
/// velocities zeroed, controllers rebound.
pub fn advance_match(
    time: Res<Time>,
    arena: Res<Arena>,
    mut match_state: ResMut<MatchState>,
    mut event_bus: ResMut<EventBus>,
    mut ball_query: Query<(&mut Transform, &mut Velocity), With<Ball>>,
    mut player_query: Query<
        (
            &mut Transform,
            &mut Velocity,
            &mut JumpState,
            &mut ControlIntent,
            &mut ControllerSet,
            &SpawnSlot,
        ),
        (With<Player>, Without<Ball>),
    >,
) {
    let now = time.elapsed_secs();
    if !match_state.advance(now) {
        return;
    }

    let mut rng = rand::thread_rng();

    let mut ball_view = BallView {
        position: arena.ball_spawn(),
        velocity: Vec2::ZERO,
    };
    for (mut transform, mut velocity) in &mut ball_query {
        let jitter = rng.gen_range(-BALL_SPAWN_JITTER..BALL_SPAWN_JITTER);
        let spawn = arena.ball_spawn() + Vec2::new(jitter, 0.0);
        transform.translation.x = spawn.x;
        transform.translation.y = spawn.y;
        velocity.0 = Vec2::ZERO;
        ball_view.position = spawn;
    }

    let bindings = RoundBindings {
        ball: ball_view,
        goals: [arena.goal_center(0), arena.goal_center(1)],
        scores: match_state.scores(),
        winning_score: match_state.max_score(),
    };

    for (mut transform, mut velocity, mut jump, mut intent, mut controllers, slot) in
        &mut player_query
    {
        let spawn = arena.player_spawn(slot.team, slot.member);
        transform.translation.x = spawn.x;
        transform.translation.y = spawn.y;
        velocity.0 = Vec2::ZERO;
        *jump = JumpState::default();
        *intent = ControlIntent::default();
        controllers.notify_round_started(&bindings);
    }

    info!(
        "round start ({} - {})",
        match_state.scores()[0],
        match_state.scores()[1]
    );
    event_bus.emit(GameEvent::RoundReset {
        scores: match_state.scores(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_credits_the_non_defending_team() {
        let mut state = MatchState::new(3);
        assert!(state.advance(RESTART_DURATION_S));

        let outcome = state.handle_goal(0, 3.0).unwrap();
        assert_eq!(outcome.scorer, 1);
        assert!(!outcome.finished);
        assert_eq!(state.scores(), [0, 1]);
        assert_eq!(state.state(), GameState::Resetting);
    }

    #[test]
    fn goals_outside_playing_are_ignored() {
        let mut state = MatchState::new(3);
        // Still in the initial Resetting pause
        assert_eq!(state.handle_goal(0, 0.5), None);
        assert_eq!(state.scores(), [0, 0]);
    }

    #[test]
    fn resetting_times_out_into_playing() {
        let mut state = MatchState::new(3);
        assert!(!state.advance(RESTART_DURATION_S - 0.1));
        assert_eq!(state.state(), GameState::Resetting);
        assert!(state.advance(RESTART_DURATION_S));
        assert_eq!(state.state(), GameState::Playing);
    }

    #[test]
    fn full_match_flow_to_three_goals() {
        let mut state = MatchState::new(3);
        let mut now = 0.0;

        for goal in 1..=3u32 {
            now += RESTART_DURATION_S;
            assert!(state.advance(now));
            assert_eq!(state.state(), GameState::Playing);

            now += 1.0;
            let outcome = state.handle_goal(0, now).unwrap();
            assert_eq!(outcome.scorer, 1);
            assert_eq!(state.scores(), [0, goal]);

            if goal < 3 {
                assert!(!outcome.finished);
                assert_eq!(state.state(), GameState::Resetting);
            } else {
                assert!(outcome.finished);
                assert_eq!(state.state(), GameState::Finished);
            }
        }

        assert_eq!(state.games_won(), [0, 1]);

        // No fourth goal can land while finished
        assert_eq!(state.handle_goal(0, now + 0.1), None);
        assert_eq!(state.scores(), [0, 3]);

        // The finished pause runs long, then scores reset for a new match
        assert!(!state.advance(now + FINISHED_DURATION_S - 0.1));
        assert!(state.advance(now + FINISHED_DURATION_S));
        assert_eq!(state.state(), GameState::Playing);
        assert_eq!(state.scores(), [0, 0]);
        assert_eq!(state.games_won(), [0, 1]);
    }

    #[test]
    #[should_panic(expected = "team index out of range")]
    fn out_of_range_team_is_a_contract_violation() {
        let mut state = MatchState::new(3);
        state.advance(RESTART_DURATION_S);
        state.handle_goal(2, 3.0);
    }
}
