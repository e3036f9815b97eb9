//! World module - arena geometry, walls, goals, and match setup
//!
//! The arena is a tile grid centered on the origin with a one-tile wall
//! border; one tile is one world unit. `Arena` holds the derived interior
//! bounds every physics system clamps against.

use bevy::prelude::*;

use crate::ai;
use crate::ball::Ball;
use crate::config::MatchConfig;
use crate::constants::*;
use crate::controller::{ControlIntent, ControllerSet, CustomController};
use crate::events::{EventBus, GameEvent};
use crate::input::KeyboardController;
use crate::player::{
    Ability, AbilityKind, JumpState, Player, SensorContacts, SpawnSlot, Team, Velocity,
    WallContacts,
};

/// Goal mouth, owned by the team that defends it
#[derive(Component)]
pub struct Goal {
    pub defending_team: usize,
}

/// Marker for the floating name tag above each slime
#[derive(Component)]
pub struct NameTag;

/// Arena bounds derived from the tile grid
#[derive(Resource, Clone, Copy)]
pub struct Arena {
    width: f32,
    height: f32,
}

impl Arena {
    pub fn new(width_tiles: u32, height_tiles: u32) -> Self {
        Self {
            width: width_tiles as f32,
            height: height_tiles as f32,
        }
    }

    pub fn width_tiles(&self) -> f32 {
        self.width
    }

    pub fn height_tiles(&self) -> f32 {
        self.height
    }

    /// Interior bounds, inside the one-tile wall border
    pub fn min_x(&self) -> f32 {
        -self.width / 2.0 + 1.0
    }

    pub fn max_x(&self) -> f32 {
        self.width / 2.0 - 1.0
    }

    pub fn floor_y(&self) -> f32 {
        -self.height / 2.0 + 1.0
    }

    pub fn max_y(&self) -> f32 {
        self.height / 2.0 - 1.0
    }

    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Center of the goal mouth defended by `team`. Team 0 defends the
    /// left goal.
    pub fn goal_center(&self, team: usize) -> Vec2 {
        let x = if team == 0 {
            self.min_x() + GOAL_SIZE.x / 2.0
        } else {
            self.max_x() - GOAL_SIZE.x / 2.0
        };
        Vec2::new(x, self.floor_y() + GOAL_SIZE.y / 2.0)
    }

    /// Floor spawn position for one slime. Teams line up from their own
    /// goal toward the center.
    pub fn player_spawn(&self, team: usize, member: usize) -> Vec2 {
        let offset = 1.5 + member as f32 * 1.2;
        let x = if team == 0 {
            self.min_x() + offset
        } else {
            self.max_x() - offset
        };
        Vec2::new(x, self.floor_y() + PLAYER_SIZE.y / 2.0)
    }
}

/// Spawn the wall border as one sprite per perimeter tile
pub fn spawn_walls(commands: &mut Commands, arena: &Arena) {
    let width = arena.width_tiles() as i32;
    let height = arena.height_tiles() as i32;

    for i in 0..width {
        for j in 0..height {
            let edge = i == 0 || i == width - 1 || j == 0 || j == height - 1;
            if !edge {
                continue;
            }
            let x = -arena.width_tiles() / 2.0 + 0.5 + i as f32;
            let y = -arena.height_tiles() / 2.0 + 0.5 + j as f32;
            commands.spawn((
                Sprite::from_color(WALL_COLOR, Vec2::ONE),
                Transform::from_xyz(x, y, 0.0),
            ));
        }
    }
}

/// Spawn both goal mouths
pub fn spawn_goals(commands: &mut Commands, arena: &Arena) {
    for team in 0..2 {
        let center = arena.goal_center(team);
        commands.spawn((
            Sprite::from_color(GOAL_COLOR, GOAL_SIZE),
            Transform::from_xyz(center.x, center.y, -0.1),
            Goal {
                defending_team: team,
            },
        ));
    }
}

/// Spawn the ball at its center spawn
pub fn spawn_ball(commands: &mut Commands, arena: &Arena) {
    let spawn = arena.ball_spawn();
    commands.spawn((
        Sprite::from_color(BALL_COLOR, BALL_SIZE),
        Transform::from_xyz(spawn.x, spawn.y, 0.1),
        Ball,
        Velocity(Vec2::ZERO),
    ));
}

/// Spawn one slime with its controller and a name tag child
pub fn spawn_player(
    commands: &mut Commands,
    arena: &Arena,
    team: usize,
    member: usize,
    mut controller: Box<dyn CustomController>,
    ability: AbilityKind,
) {
    controller.set_team_index(team);
    let tag = format!("{} [{}]", controller.display_tag(), ability.display_name());
    let spawn = arena.player_spawn(team, member);

    commands
        .spawn((
            Sprite::from_color(TEAM_COLORS[team], PLAYER_SIZE),
            Transform::from_xyz(spawn.x, spawn.y, 0.2),
            Player,
            Team(team),
            SpawnSlot { team, member },
            Velocity(Vec2::ZERO),
            JumpState::default(),
            WallContacts::default(),
            SensorContacts::default(),
            Ability::new(ability),
            ControlIntent::default(),
            ControllerSet::single(controller),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text2d::new(tag),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(TEXT_PRIMARY),
                TextLayout::new_with_justify(bevy::text::Justify::Center),
                Transform::from_xyz(0.0, PLAYER_SIZE.y, 0.0).with_scale(Vec3::splat(0.01)),
                NameTag,
            ));
        });
}

/// Startup system: build the whole playfield from the match config
pub fn setup(
    mut commands: Commands,
    config: Res<MatchConfig>,
    arena: Res<Arena>,
    mut event_bus: ResMut<EventBus>,
) {
    let mut rng = rand::thread_rng();

    spawn_walls(&mut commands, &arena);
    spawn_goals(&mut commands, &arena);
    spawn_ball(&mut commands, &arena);

    let team_sizes = config.mode.team_sizes();
    let human_slots = config.mode.human_slots();
    let mut team_tags = [String::from("-"), String::from("-")];

    for team in 0..2 {
        for member in 0..team_sizes[team] {
            let human = human_slots
                .iter()
                .find(|(t, m, _)| *t == team && *m == member);

            let controller: Box<dyn CustomController> = match human {
                Some((_, _, input_slot)) => Box::new(KeyboardController::new(*input_slot)),
                None => ai::make_controller(config.team_ai[team], &mut rng),
            };
            if member == 0 {
                team_tags[team] = controller.display_tag().to_string();
            }

            let ability = AbilityKind::random(&mut rng);
            spawn_player(&mut commands, &arena, team, member, controller, ability);
        }
    }

    info!(
        "arena {}x{} tiles, mode {:?}, first to {}",
        config.arena_width, config.arena_height, config.mode, config.max_score
    );
    event_bus.emit(GameEvent::MatchStart {
        winning_score: config.max_score,
        team_tags,
    });
}
