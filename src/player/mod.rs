//! Player module - components, kinematic controller, contact sensors

mod components;
mod contacts;
mod kinematics;

pub use components::*;
pub use contacts::{apply_sensor_transitions, check_collisions};
pub use kinematics::{apply_abilities, apply_control, apply_gravity, move_horizontal, move_vertical};
