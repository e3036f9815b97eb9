//! UI module - score display and the round banner

use bevy::prelude::*;

use crate::constants::*;
use crate::scoring::{GameState, MatchState};

/// Score line component
#[derive(Component)]
pub struct ScoreText;

/// Big center banner shown between rounds
#[derive(Component)]
pub struct BannerText;

/// Spawn the HUD text entities. Positions are in world units since the
/// camera is fixed to the arena.
pub fn spawn_hud(commands: &mut Commands, arena_height: f32) {
    commands.spawn((
        Text2d::new("0 - 0"),
        TextFont {
            font_size: 48.0,
            ..default()
        },
        TextColor(TEXT_PRIMARY),
        TextLayout::new_with_justify(bevy::text::Justify::Center),
        Transform::from_xyz(0.0, arena_height / 2.0 - 0.5, 1.0).with_scale(Vec3::splat(0.02)),
        ScoreText,
    ));

    commands.spawn((
        Text2d::new(""),
        TextFont {
            font_size: 64.0,
            ..default()
        },
        TextColor(TEXT_ACCENT),
        TextLayout::new_with_justify(bevy::text::Justify::Center),
        Transform::from_xyz(0.0, 1.5, 1.0).with_scale(Vec3::splat(0.02)),
        BannerText,
        Visibility::Hidden,
    ));
}

/// Keep the score line current
pub fn update_score_text(
    match_state: Res<MatchState>,
    mut text_query: Query<&mut Text2d, With<ScoreText>>,
) {
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };

    let scores = match_state.scores();
    let games = match_state.games_won();
    text.0 = format!("{} - {}   (games {} : {})", scores[0], scores[1], games[0], games[1]);
}

/// Show the banner during pauses, hide it while playing
pub fn update_banner(
    match_state: Res<MatchState>,
    mut banner_query: Query<(&mut Text2d, &mut Visibility), With<BannerText>>,
) {
    let Ok((mut text, mut visibility)) = banner_query.single_mut() else {
        return;
    };

    match match_state.state() {
        GameState::Playing => {
            *visibility = Visibility::Hidden;
        }
        GameState::Resetting => {
            // The opening pause of a match is not a goal
            let scores = match_state.scores();
            text.0 = if scores == [0, 0] {
                "GET READY".to_string()
            } else {
                "GOAL!".to_string()
            };
            *visibility = Visibility::Visible;
        }
        GameState::Finished => {
            let scores = match_state.scores();
            let winner = if scores[0] >= match_state.max_score() { 0 } else { 1 };
            text.0 = format!("TEAM {} WINS", winner + 1);
            *visibility = Visibility::Visible;
        }
    }
}
