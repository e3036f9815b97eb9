//! Player kinematic controller
//!
//! Translates normalized movement intents into velocity changes and drives
//! the three-state jump machine. The pure `move_horizontal`/`move_vertical`
//! functions hold the whole contract; `apply_control` wires them into the
//! fixed-step schedule.

use bevy::prelude::*;

use crate::constants::*;
use crate::controller::ControlIntent;
use crate::player::components::*;

/// Apply a horizontal movement intent. The input is clamped to [-1, 1] and
/// scaled by max speed and the ability multiplier; a blocked direction
/// forces the horizontal component to zero. Vertical velocity is untouched.
pub fn move_horizontal(
    velocity: &mut Velocity,
    contacts: &WallContacts,
    speed_multiplier: f32,
    value: f32,
) {
    let clamped = value.clamp(-1.0, 1.0);
    let mut vx = clamped * PLAYER_MAX_SPEED * speed_multiplier;

    if !contacts.can_move_left && vx < 0.0 {
        vx = 0.0;
    }
    if !contacts.can_move_right && vx > 0.0 {
        vx = 0.0;
    }

    velocity.0.x = vx;
}

/// Apply a vertical movement intent for one fixed step.
///
/// Jump rules:
///   1. from CanJump, pressing starts a jump at the launch speed
///   2. thrust is applied while jump is held, for at most
///      JUMP_FORCE_DURATION_S after the jump started
///   3. releasing early or exceeding the window drops to Falling
///   4. while Falling, extra downward force (half the thrust) applies
///   5. only ground contact returns the machine to CanJump
pub fn move_vertical(jump: &mut JumpState, velocity: &mut Velocity, value: f32, now: f32, dt: f32) {
    let pressing = value.clamp(-1.0, 1.0) > 0.0;

    match jump.phase {
        JumpPhase::CanJump => {
            if pressing {
                jump.phase = JumpPhase::Jumping;
                jump.started_at = now;
                velocity.0.y = JUMP_LAUNCH_SPEED;
            }
        }
        JumpPhase::Jumping => {
            if !pressing || now - jump.started_at >= JUMP_FORCE_DURATION_S {
                jump.phase = JumpPhase::Falling;
            } else {
                velocity.0.y += JUMP_THRUST_ACCEL * dt;
            }
        }
        JumpPhase::Falling => {
            // Extra downward force on top of gravity: floaty rise, fast fall.
            velocity.0.y -= FALL_FORCE_FACTOR * JUMP_THRUST_ACCEL * dt;
        }
    }
}

/// Runs in FixedUpdate to apply each player's current intent to physics.
/// All players read from their ControlIntent component, whether it was
/// written by a human adapter or an AI.
pub fn apply_control(
    time: Res<Time>,
    mut players: Query<
        (
            &mut Velocity,
            &mut JumpState,
            &WallContacts,
            &Ability,
            &ControlIntent,
        ),
        With<Player>,
    >,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    for (mut velocity, mut jump, contacts, ability, intent) in &mut players {
        move_horizontal(&mut velocity, contacts, ability.speed_multiplier, intent.move_x);
        move_vertical(&mut jump, &mut velocity, intent.jump_axis, now, dt);
    }
}

/// Apply gravity to players
pub fn apply_gravity(time: Res<Time>, mut query: Query<&mut Velocity, With<Player>>) {
    let dt = time.delta_secs();
    for mut velocity in &mut query {
        velocity.0.y -= GRAVITY * dt;
    }
}

/// Toggle abilities from the current intent and carry the ball-reverse
/// effect out to the ball.
pub fn apply_abilities(
    time: Res<Time>,
    mut players: Query<(&Team, &mut Ability, &ControlIntent), With<Player>>,
    mut balls: Query<&mut Velocity, With<crate::ball::Ball>>,
    mut bus: ResMut<crate::events::EventBus>,
) {
    let now = time.elapsed_secs();

    for (team, mut ability, intent) in &mut players {
        if !ability.set_using(intent.ability, now) {
            continue;
        }

        bus.emit(crate::events::GameEvent::AbilityToggled {
            team: team.0,
            ability: ability.kind,
            activated: ability.activated,
        });

        // Turbo is handled inside the kinematic controller; ball reverse is
        // the one ability that reaches outside the player.
        if ability.kind == AbilityKind::BallReverse && ability.activated {
            for mut ball_velocity in &mut balls {
                ball_velocity.0.x = -ball_velocity.0.x;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_contacts() -> WallContacts {
        WallContacts::default()
    }

    #[test]
    fn horizontal_speed_is_clamped_and_scaled() {
        let mut velocity = Velocity(Vec2::new(0.0, 3.0));
        move_horizontal(&mut velocity, &free_contacts(), 1.0, 2.5);
        assert_eq!(velocity.0.x, PLAYER_MAX_SPEED);
        // Vertical component untouched
        assert_eq!(velocity.0.y, 3.0);

        move_horizontal(&mut velocity, &free_contacts(), 1.0, -0.5);
        assert_eq!(velocity.0.x, -0.5 * PLAYER_MAX_SPEED);
    }

    #[test]
    fn ability_multiplier_scales_horizontal_speed() {
        let mut velocity = Velocity::default();
        move_horizontal(&mut velocity, &free_contacts(), TURBO_MULTIPLIER, 1.0);
        assert_eq!(velocity.0.x, PLAYER_MAX_SPEED * TURBO_MULTIPLIER);
    }

    #[test]
    fn blocked_direction_zeroes_velocity() {
        let blocked_left = WallContacts {
            can_move_left: false,
            can_move_right: true,
        };
        let mut velocity = Velocity::default();
        move_horizontal(&mut velocity, &blocked_left, 1.0, -1.0);
        assert_eq!(velocity.0.x, 0.0);

        // The open direction still works
        move_horizontal(&mut velocity, &blocked_left, 1.0, 1.0);
        assert_eq!(velocity.0.x, PLAYER_MAX_SPEED);
    }

    #[test]
    fn jump_starts_from_can_jump_at_launch_speed() {
        let mut jump = JumpState::default();
        let mut velocity = Velocity::default();

        move_vertical(&mut jump, &mut velocity, 1.0, 10.0, 0.016);
        assert_eq!(jump.phase, JumpPhase::Jumping);
        assert_eq!(jump.started_at, 10.0);
        assert_eq!(velocity.0.y, JUMP_LAUNCH_SPEED);
    }

    #[test]
    fn thrust_stops_after_force_duration() {
        let mut jump = JumpState::default();
        let mut velocity = Velocity::default();
        let dt = 0.016;

        let mut now = 0.0;
        move_vertical(&mut jump, &mut velocity, 1.0, now, dt);

        // Hold jump well past the window; thrust only applies inside it
        let mut thrust_time = 0.0;
        for _ in 0..100 {
            now += dt;
            let before = jump.phase;
            move_vertical(&mut jump, &mut velocity, 1.0, now, dt);
            if before == JumpPhase::Jumping && jump.phase == JumpPhase::Jumping {
                thrust_time += dt;
            }
        }

        assert_eq!(jump.phase, JumpPhase::Falling);
        assert!(thrust_time <= JUMP_FORCE_DURATION_S + dt);
    }

    #[test]
    fn early_release_drops_to_falling() {
        let mut jump = JumpState::default();
        let mut velocity = Velocity::default();

        move_vertical(&mut jump, &mut velocity, 1.0, 0.0, 0.016);
        move_vertical(&mut jump, &mut velocity, 0.0, 0.016, 0.016);
        assert_eq!(jump.phase, JumpPhase::Falling);
    }

    #[test]
    fn falling_is_stable_without_ground_contact() {
        let mut jump = JumpState {
            phase: JumpPhase::Falling,
            started_at: 0.0,
        };
        let mut velocity = Velocity::default();

        // Repeated neutral input never leaves Falling; only contact does
        for i in 0..50 {
            move_vertical(&mut jump, &mut velocity, 0.0, i as f32 * 0.016, 0.016);
            assert_eq!(jump.phase, JumpPhase::Falling);
        }
        // And the fall force keeps pulling down
        assert!(velocity.0.y < 0.0);
    }

    #[test]
    fn falling_applies_half_thrust_downward() {
        let mut jump = JumpState {
            phase: JumpPhase::Falling,
            started_at: 0.0,
        };
        let mut velocity = Velocity::default();
        let dt = 0.1;

        move_vertical(&mut jump, &mut velocity, 1.0, 1.0, dt);
        assert!((velocity.0.y - (-FALL_FORCE_FACTOR * JUMP_THRUST_ACCEL * dt)).abs() < 1e-6);
    }
}
