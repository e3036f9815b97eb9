//! Slimefootball - a 2D slime football game built with Bevy
//!
//! Main entry point: app setup and system registration.

use bevy::{camera::ScalingMode, prelude::*};

use slimefootball::constants::*;
use slimefootball::{
    Arena, EventBus, MatchConfig, MatchState, PlayerInput, ball, controller, events, input, player,
    scoring, ui, world,
};

fn main() {
    // Load match config (uses defaults if file doesn't exist)
    let config = MatchConfig::load_or_default(MATCH_CONFIG_FILE);

    // Save on first run so the file exists for editing
    if let Err(e) = config.save(MATCH_CONFIG_FILE) {
        warn!("Failed to save initial match config: {}", e);
    }

    let arena = Arena::new(config.arena_width, config.arena_height);
    let match_state = MatchState::new(config.max_score);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Slimefootball".into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(arena)
        .insert_resource(match_state)
        .insert_resource(config)
        .init_resource::<PlayerInput>()
        .insert_resource(EventBus::new())
        .add_systems(Startup, (setup_camera_and_hud, world::setup))
        .add_systems(
            Update,
            (
                input::capture_input,
                controller::drive_controllers,
                events::update_event_bus_time,
                events::log_events,
                ui::update_score_text,
                ui::update_banner,
            )
                .chain(),
        )
        .add_systems(
            FixedUpdate,
            (
                player::apply_control,
                player::apply_gravity,
                player::apply_abilities,
                ball::ball_gravity,
                ball::apply_velocity,
                player::check_collisions,
                ball::ball_bounce,
                ball::ball_player_bounce,
                scoring::check_goals,
                scoring::advance_match,
            )
                .chain(),
        )
        .run();
}

/// Spawn the camera, scaled so the whole arena is always in view, and the
/// HUD text entities.
fn setup_camera_and_hud(mut commands: Commands, arena: Res<Arena>) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: arena.height_tiles(),
            },
            ..OrthographicProjection::default_2d()
        }),
    ));

    ui::spawn_hud(&mut commands, arena.height_tiles());
}
