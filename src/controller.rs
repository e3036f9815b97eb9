//! Custom controller seam
//!
//! Every competitor - human adapter or AI - implements `CustomController`
//! and issues the same movement commands. Controllers are owned by their
//! player as boxed trait objects in a `ControllerSet`; the drive system
//! builds a read-only `ControlView` per player each frame and folds the
//! controllers' decisions into a `ControlIntent`, which the kinematic
//! controller consumes in FixedUpdate.

use bevy::prelude::*;

use crate::ball::Ball;
use crate::events::{ControllerSource, EventBus, GameEvent};
use crate::input::{AxisPair, PlayerInput};
use crate::player::{JumpPhase, JumpState, Player, Team, Velocity};
use crate::scoring::{GameState, MatchState};

/// Ball position and velocity as seen by a controller
#[derive(Debug, Clone, Copy)]
pub struct BallView {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// References handed to controllers when a round starts. Controllers must
/// treat cached bindings as invalid after `round_finished` until the next
/// round-start notification.
#[derive(Debug, Clone)]
pub struct RoundBindings {
    pub ball: BallView,
    /// Goal center positions indexed by the team defending them
    pub goals: [Vec2; 2],
    pub scores: [u32; 2],
    pub winning_score: u32,
}

/// Per-frame snapshot a controller decides from
#[derive(Debug, Clone)]
pub struct ControlView {
    pub player_position: Vec2,
    pub player_velocity: Vec2,
    pub jump_phase: JumpPhase,
    /// None while no round is active
    pub ball: Option<BallView>,
    /// Opposing-team player positions
    pub opponents: Vec<Vec2>,
    /// Captured human input axes, indexed by input slot
    pub axes: [AxisPair; crate::input::NUM_INPUT_SLOTS],
}

/// Movement commands for one simulation step. `jump_axis` follows the
/// MoveVertical convention: positive means pressing jump.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ControlIntent {
    pub move_x: f32,
    pub jump_axis: f32,
    pub ability: bool,
}

impl ControlIntent {
    /// One-shot jump pulse, the form AI variants use
    pub fn jump(&mut self) {
        self.jump_axis = 1.0;
    }
}

/// The contract every competitor implements
pub trait CustomController: Send + Sync {
    /// Short name shown on the player's tag
    fn display_tag(&self) -> &str;

    /// Origin recorded on sampled input events
    fn source(&self) -> ControllerSource {
        ControllerSource::Ai
    }

    /// Bind the side this controller plays for. Panics on an out-of-range
    /// team index: that is a wiring bug, not a runtime condition.
    fn set_team_index(&mut self, team: usize);

    /// A round is live; cache what you need from the bindings
    fn round_started(&mut self, bindings: &RoundBindings);

    /// The round ended; drop cached bindings
    fn round_finished(&mut self);

    /// Produce this step's movement commands
    fn decide(&mut self, view: &ControlView, dt: f32) -> ControlIntent;
}

/// The controllers attached to one player. Usually one; decisions of later
/// controllers overwrite earlier ones.
#[derive(Component, Default)]
pub struct ControllerSet(pub Vec<Box<dyn CustomController>>);

impl ControllerSet {
    pub fn single(controller: Box<dyn CustomController>) -> Self {
        Self(vec![controller])
    }

    /// Tag of the first controller, for name tags and logs
    pub fn display_tag(&self) -> &str {
        self.0.first().map(|c| c.display_tag()).unwrap_or("-")
    }

    pub fn notify_round_started(&mut self, bindings: &RoundBindings) {
        for controller in &mut self.0 {
            controller.round_started(bindings);
        }
    }

    pub fn notify_round_finished(&mut self) {
        for controller in &mut self.0 {
            controller.round_finished();
        }
    }
}

/// Run every player's controllers once and store the resulting intent.
/// Runs in Update, after input capture.
pub fn drive_controllers(
    time: Res<Time>,
    match_state: Res<MatchState>,
    input: Res<PlayerInput>,
    mut event_bus: ResMut<EventBus>,
    ball_query: Query<(&Transform, &Velocity), With<Ball>>,
    snapshot_query: Query<(Entity, &Transform, &Velocity, &JumpState, &Team), With<Player>>,
    mut control_query: Query<(Entity, &mut ControllerSet, &mut ControlIntent), With<Player>>,
) {
    let dt = time.delta_secs();

    let ball = if match_state.state() == GameState::Playing {
        ball_query.iter().next().map(|(transform, velocity)| BallView {
            position: transform.translation.truncate(),
            velocity: velocity.0,
        })
    } else {
        None
    };

    struct Snapshot {
        position: Vec2,
        velocity: Vec2,
        jump_phase: JumpPhase,
        team: usize,
    }

    let snapshots: Vec<(Entity, Snapshot)> = snapshot_query
        .iter()
        .map(|(entity, transform, velocity, jump, team)| {
            (
                entity,
                Snapshot {
                    position: transform.translation.truncate(),
                    velocity: velocity.0,
                    jump_phase: jump.phase,
                    team: team.0,
                },
            )
        })
        .collect();

    for (entity, mut controllers, mut intent) in &mut control_query {
        let Some((_, own)) = snapshots.iter().find(|(e, _)| *e == entity) else {
            continue;
        };

        let opponents = snapshots
            .iter()
            .filter(|(e, s)| *e != entity && s.team != own.team)
            .map(|(_, s)| s.position)
            .collect();

        let view = ControlView {
            player_position: own.position,
            player_velocity: own.velocity,
            jump_phase: own.jump_phase,
            ball,
            opponents,
            axes: input.axes,
        };

        let mut combined = ControlIntent::default();
        for controller in &mut controllers.0 {
            combined = controller.decide(&view, dt);
        }

        // Sample an input event whenever the coarse command changes
        if compact(&combined) != compact(&intent) {
            let source = controllers
                .0
                .first()
                .map(|c| c.source())
                .unwrap_or(ControllerSource::Ai);
            event_bus.emit(GameEvent::ControllerInput {
                team: own.team,
                source,
                move_x: combined.move_x,
                jump: combined.jump_axis > 0.0,
            });
        }

        *intent = combined;
    }
}

/// Coarse form of an intent, used to deduplicate sampled input events
fn compact(intent: &ControlIntent) -> (i8, bool) {
    let dir = if intent.move_x > 0.01 {
        1
    } else if intent.move_x < -0.01 {
        -1
    } else {
        0
    };
    (dir, intent.jump_axis > 0.0)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Build a minimal view for controller unit tests
    pub fn view_with_ball(player: Vec2, ball: Vec2, ball_velocity: Vec2) -> ControlView {
        ControlView {
            player_position: player,
            player_velocity: Vec2::ZERO,
            jump_phase: JumpPhase::CanJump,
            ball: Some(BallView {
                position: ball,
                velocity: ball_velocity,
            }),
            opponents: Vec::new(),
            axes: Default::default(),
        }
    }

    pub fn bindings(goals: [Vec2; 2]) -> RoundBindings {
        RoundBindings {
            ball: BallView {
                position: Vec2::ZERO,
                velocity: Vec2::ZERO,
            },
            goals,
            scores: [0, 0],
            winning_score: crate::constants::DEFAULT_MAX_SCORE,
        }
    }
}
