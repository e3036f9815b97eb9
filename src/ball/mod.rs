//! Ball module - the ball entity and its physics systems

use bevy::prelude::*;

use crate::constants::*;
use crate::player::{Player, Velocity};
use crate::world::Arena;

/// Marker for the match ball
#[derive(Component)]
pub struct Ball;

/// Apply velocity to all entities with Velocity component
pub fn apply_velocity(mut query: Query<(&mut Transform, &Velocity)>, time: Res<Time>) {
    let dt = time.delta_secs();

    for (mut transform, velocity) in &mut query {
        transform.translation.x += velocity.0.x * dt;
        transform.translation.y += velocity.0.y * dt;
    }
}

/// Apply gravity to the ball
pub fn ball_gravity(mut query: Query<&mut Velocity, With<Ball>>, time: Res<Time>) {
    let dt = time.delta_secs();

    for mut velocity in &mut query {
        velocity.0.y -= BALL_GRAVITY * dt;
    }
}

/// Bounce the ball off the arena bounds and clamp its speed
pub fn ball_bounce(
    arena: Res<Arena>,
    mut query: Query<(&mut Transform, &mut Velocity), With<Ball>>,
) {
    let half = BALL_SIZE / 2.0;

    for (mut transform, mut velocity) in &mut query {
        let mut pos = transform.translation.truncate();

        if pos.x - half.x < arena.min_x() {
            pos.x = arena.min_x() + half.x;
            velocity.0.x = velocity.0.x.abs() * BALL_BOUNCE;
        }
        if pos.x + half.x > arena.max_x() {
            pos.x = arena.max_x() - half.x;
            velocity.0.x = -velocity.0.x.abs() * BALL_BOUNCE;
        }
        if pos.y - half.y < arena.floor_y() {
            pos.y = arena.floor_y() + half.y;
            velocity.0.y = velocity.0.y.abs() * BALL_BOUNCE;
        }
        if pos.y + half.y > arena.max_y() {
            pos.y = arena.max_y() - half.y;
            velocity.0.y = -velocity.0.y.abs() * BALL_BOUNCE;
        }

        if velocity.0.length() > BALL_MAX_SPEED {
            velocity.0 = velocity.0.normalize() * BALL_MAX_SPEED;
        }

        transform.translation.x = pos.x;
        transform.translation.y = pos.y;
    }
}

/// Resolve ball-player overlaps: push the ball out along the shallow axis,
/// reflect that velocity component and blend in a share of the player's
/// own velocity so a running slime imparts momentum.
pub fn ball_player_bounce(
    mut ball_query: Query<(&mut Transform, &mut Velocity), With<Ball>>,
    player_query: Query<(&Transform, &Velocity), (With<Player>, Without<Ball>)>,
) {
    let ball_half = BALL_SIZE / 2.0;
    let player_half = PLAYER_SIZE / 2.0;

    for (mut ball_transform, mut ball_velocity) in &mut ball_query {
        for (player_transform, player_velocity) in &player_query {
            let ball_pos = ball_transform.translation.truncate();
            let player_pos = player_transform.translation.truncate();

            let diff = ball_pos - player_pos;
            let overlap_x = ball_half.x + player_half.x - diff.x.abs();
            let overlap_y = ball_half.y + player_half.y - diff.y.abs();

            if overlap_x <= 0.0 || overlap_y <= 0.0 {
                continue;
            }

            if overlap_x < overlap_y {
                let sign = diff.x.signum();
                ball_transform.translation.x += sign * overlap_x;
                ball_velocity.0.x = sign * ball_velocity.0.x.abs() * BALL_PLAYER_BOUNCE
                    + player_velocity.0.x * BALL_PLAYER_VELOCITY_SHARE;
            } else {
                let sign = diff.y.signum();
                ball_transform.translation.y += sign * overlap_y;
                ball_velocity.0.y = sign * ball_velocity.0.y.abs() * BALL_PLAYER_BOUNCE
                    + player_velocity.0.y * BALL_PLAYER_VELOCITY_SHARE;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::*;

    fn app_with_arena() -> App {
        let mut app = App::new();
        app.insert_resource(Arena::new(
            DEFAULT_ARENA_WIDTH,
            DEFAULT_ARENA_HEIGHT,
        ));
        app
    }

    #[test]
    fn floor_bounce_reflects_and_damps() {
        let mut app = app_with_arena();
        let arena = Arena::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT);
        let ball = app
            .world_mut()
            .spawn((
                Ball,
                Transform::from_xyz(0.0, arena.floor_y() - 0.5, 0.0),
                Velocity(Vec2::new(0.0, -5.0)),
            ))
            .id();

        app.add_systems(Update, ball_bounce);
        app.update();

        let velocity = app.world().get::<Velocity>(ball).unwrap();
        assert!((velocity.0.y - 5.0 * BALL_BOUNCE).abs() < 1e-4);

        let transform = app.world().get::<Transform>(ball).unwrap();
        assert!(transform.translation.y >= arena.floor_y() + BALL_SIZE.y / 2.0 - 1e-4);
    }

    #[test]
    fn ball_speed_is_clamped() {
        let mut app = app_with_arena();
        let ball = app
            .world_mut()
            .spawn((
                Ball,
                Transform::from_xyz(0.0, 0.0, 0.0),
                Velocity(Vec2::new(40.0, 0.0)),
            ))
            .id();

        app.add_systems(Update, ball_bounce);
        app.update();

        let velocity = app.world().get::<Velocity>(ball).unwrap();
        assert!(velocity.0.length() <= BALL_MAX_SPEED + 1e-4);
    }

    #[test]
    fn player_hit_reflects_and_adds_player_velocity() {
        let mut app = app_with_arena();
        // Ball overlapping the player's right side, player running right
        let ball = app
            .world_mut()
            .spawn((
                Ball,
                Transform::from_xyz(0.6, 0.0, 0.0),
                Velocity(Vec2::new(-3.0, 0.0)),
            ))
            .id();
        app.world_mut().spawn((
            Player,
            Transform::from_xyz(0.0, 0.0, 0.0),
            Velocity(Vec2::new(4.0, 0.0)),
        ));

        app.add_systems(Update, ball_player_bounce);
        app.update();

        let velocity = app.world().get::<Velocity>(ball).unwrap();
        let expected = 3.0 * BALL_PLAYER_BOUNCE + 4.0 * BALL_PLAYER_VELOCITY_SHARE;
        assert!((velocity.0.x - expected).abs() < 1e-4);

        // Pushed clear of the overlap
        let transform = app.world().get::<Transform>(ball).unwrap();
        assert!(transform.translation.x >= (PLAYER_SIZE.x + BALL_SIZE.x) / 2.0 - 1e-4);
    }

    #[test]
    fn separated_ball_is_untouched() {
        let mut app = app_with_arena();
        let ball = app
            .world_mut()
            .spawn((
                Ball,
                Transform::from_xyz(3.0, 0.0, 0.0),
                Velocity(Vec2::new(-3.0, 0.0)),
            ))
            .id();
        app.world_mut().spawn((
            Player,
            Transform::from_xyz(0.0, 0.0, 0.0),
            Velocity(Vec2::ZERO),
        ));

        app.add_systems(Update, ball_player_bounce);
        app.update();

        let velocity = app.world().get::<Velocity>(ball).unwrap();
        assert_eq!(velocity.0.x, -3.0);
    }
}
