//! Player contact sensors
//!
//! Each player carries three directional sensors (left, right, bottom).
//! Every fixed step the player AABB is resolved against the arena walls,
//! then sensor enter/stay/exit edges update the wall-contact flags and
//! reset the jump machine.

use bevy::prelude::*;

use crate::constants::*;
use crate::player::components::*;
use crate::world::Arena;

/// Sensor overlap state for one pass, derived from the resolved position
fn sense_walls(position: Vec2, arena: &Arena) -> SensorContacts {
    let half = PLAYER_SIZE / 2.0;
    SensorContacts {
        left: position.x - half.x <= arena.min_x() + CONTACT_EPSILON,
        right: position.x + half.x >= arena.max_x() - CONTACT_EPSILON,
        bottom: position.y - half.y <= arena.floor_y() + CONTACT_EPSILON,
    }
}

/// Apply sensor edges to the movement flags and the jump machine.
///
/// Left/right: enter or stay blocks the direction, exit restores it.
/// Bottom: enter resets the jump machine unconditionally; stay resets it
/// only from Falling, so a glancing floor contact at launch cannot
/// interrupt an in-progress jump.
pub fn apply_sensor_transitions(
    previous: SensorContacts,
    current: SensorContacts,
    walls: &mut WallContacts,
    jump: &mut JumpState,
) {
    walls.can_move_left = !current.left;
    walls.can_move_right = !current.right;

    if current.bottom {
        let entered = !previous.bottom;
        if entered || jump.phase == JumpPhase::Falling {
            jump.phase = JumpPhase::CanJump;
        }
    }
}

/// Resolve player collisions against the arena bounds and run the sensor
/// pass. Runs in FixedUpdate after velocity integration.
pub fn check_collisions(
    arena: Res<Arena>,
    mut players: Query<
        (
            &mut Transform,
            &mut Velocity,
            &mut SensorContacts,
            &mut WallContacts,
            &mut JumpState,
        ),
        With<Player>,
    >,
) {
    let half = PLAYER_SIZE / 2.0;

    for (mut transform, mut velocity, mut sensors, mut walls, mut jump) in &mut players {
        let mut pos = transform.translation.truncate();

        // Clamp into the playfield, killing velocity into the surface
        if pos.x - half.x < arena.min_x() {
            pos.x = arena.min_x() + half.x;
            velocity.0.x = velocity.0.x.max(0.0);
        }
        if pos.x + half.x > arena.max_x() {
            pos.x = arena.max_x() - half.x;
            velocity.0.x = velocity.0.x.min(0.0);
        }
        if pos.y - half.y < arena.floor_y() {
            pos.y = arena.floor_y() + half.y;
            velocity.0.y = velocity.0.y.max(0.0);
        }
        if pos.y + half.y > arena.max_y() {
            pos.y = arena.max_y() - half.y;
            velocity.0.y = velocity.0.y.min(0.0);
        }

        transform.translation.x = pos.x;
        transform.translation.y = pos.y;

        let current = sense_walls(pos, &arena);
        let previous = *sensors;
        apply_sensor_transitions(previous, current, &mut walls, &mut jump);
        *sensors = current;
    }
}
