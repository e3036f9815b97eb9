//! Headless app builder
//!
//! Builds a Bevy app with MinimalPlugins and the full game system set but
//! no rendering, used by the simulation runner and integration tests.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::time::Duration;

use crate::ball::{apply_velocity, ball_bounce, ball_gravity, ball_player_bounce};
use crate::config::MatchConfig;
use crate::controller::drive_controllers;
use crate::events::{EventBus, log_events, update_event_bus_time};
use crate::input::{PlayerInput, capture_input};
use crate::player::{apply_abilities, apply_control, apply_gravity, check_collisions};
use crate::scoring::{MatchState, advance_match, check_goals};
use crate::world::{self, Arena};

/// Builder for headless game apps
pub struct HeadlessAppBuilder {
    config: MatchConfig,
    fps: f32,
    log_events: bool,
}

impl HeadlessAppBuilder {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            fps: 60.0,
            log_events: false,
        }
    }

    /// Set the frame pacing target (default: 60)
    pub fn with_fps(mut self, fps: f32) -> Self {
        self.fps = fps;
        self
    }

    /// Log bus events to the console as the simulation runs
    pub fn with_event_log(mut self) -> Self {
        self.log_events = true;
        self
    }

    /// Build the app: MinimalPlugins plus TransformPlugin, all game
    /// resources and systems, no windowing or rendering.
    pub fn build(self) -> App {
        let mut app = App::new();

        app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
            Duration::from_secs_f32(1.0 / self.fps),
        )));
        app.add_plugins(bevy::transform::TransformPlugin);

        app.insert_resource(Arena::new(
            self.config.arena_width,
            self.config.arena_height,
        ));
        app.insert_resource(MatchState::new(self.config.max_score));
        app.init_resource::<PlayerInput>();
        // No input plugin in headless mode; keep an empty keyboard state
        // so the shared Update chain runs unchanged
        app.init_resource::<ButtonInput<KeyCode>>();
        app.insert_resource(if self.log_events {
            EventBus::new()
        } else {
            EventBus::disabled()
        });
        app.insert_resource(self.config);

        app.add_systems(Startup, world::setup);
        app.add_systems(
            Update,
            (
                capture_input,
                drive_controllers,
                update_event_bus_time,
                log_events,
            )
                .chain(),
        );
        app.add_systems(
            FixedUpdate,
            (
                apply_control,
                apply_gravity,
                apply_abilities,
                ball_gravity,
                apply_velocity,
                check_collisions,
                ball_bounce,
                ball_player_bounce,
                check_goals,
                advance_match,
            )
                .chain(),
        );

        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::Ball;
    use crate::config::GameMode;
    use crate::player::Player;

    #[test]
    fn builder_creates_app_with_game_resources() {
        let app = HeadlessAppBuilder::new(MatchConfig::default()).build();
        assert!(app.world().contains_resource::<Arena>());
        assert!(app.world().contains_resource::<MatchState>());
        assert!(app.world().contains_resource::<PlayerInput>());
        assert!(app.world().contains_resource::<EventBus>());
    }

    #[test]
    fn startup_spawns_the_configured_teams() {
        let config = MatchConfig {
            mode: GameMode::AiOnly2v2,
            ..Default::default()
        };
        let mut app = HeadlessAppBuilder::new(config).build();
        app.update();

        let players = app
            .world_mut()
            .query::<&Player>()
            .iter(app.world())
            .count();
        assert_eq!(players, 4);

        let balls = app.world_mut().query::<&Ball>().iter(app.world()).count();
        assert_eq!(balls, 1);
    }
}
