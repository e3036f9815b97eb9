//! Headless simulation runner

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::AiKind;
use crate::config::{GameMode, MatchConfig};
use crate::scoring::MatchState;

use super::HeadlessAppBuilder;

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub match_config: MatchConfig,
    /// Stop after this many finished matches
    pub games: u32,
    /// Hard wall-clock limit in seconds, in case nobody ever scores
    pub duration_limit: f32,
    pub log_events: bool,
    pub quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            match_config: MatchConfig {
                mode: GameMode::AiOnly1v1,
                ..Default::default()
            },
            games: 1,
            duration_limit: 600.0,
            log_events: false,
            quiet: false,
        }
    }
}

impl SimConfig {
    /// Parse command line arguments into a config
    pub fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--games" => {
                    if i + 1 < args.len() {
                        if let Ok(games) = args[i + 1].parse() {
                            config.games = games;
                        }
                        i += 1;
                    }
                }
                "--duration" => {
                    if i + 1 < args.len() {
                        if let Ok(limit) = args[i + 1].parse() {
                            config.duration_limit = limit;
                        }
                        i += 1;
                    }
                }
                "--max-score" => {
                    if i + 1 < args.len() {
                        if let Ok(score) = args[i + 1].parse() {
                            config.match_config.max_score = score;
                        }
                        i += 1;
                    }
                }
                "--left" => {
                    if i + 1 < args.len() {
                        if let Some(kind) = parse_ai_kind(&args[i + 1]) {
                            config.match_config.team_ai[0] = kind;
                        }
                        i += 1;
                    }
                }
                "--right" => {
                    if i + 1 < args.len() {
                        if let Some(kind) = parse_ai_kind(&args[i + 1]) {
                            config.match_config.team_ai[1] = kind;
                        }
                        i += 1;
                    }
                }
                "--mode" => {
                    if i + 1 < args.len() {
                        if let Some(mode) = parse_mode(&args[i + 1]) {
                            config.match_config.mode = mode;
                        }
                        i += 1;
                    }
                }
                "--log-events" => {
                    config.log_events = true;
                }
                "--quiet" => {
                    config.quiet = true;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                unknown => {
                    eprintln!("Unknown argument: {}", unknown);
                    print_usage();
                    std::process::exit(1);
                }
            }
            i += 1;
        }

        config
    }
}

fn parse_ai_kind(name: &str) -> Option<AiKind> {
    match name.to_lowercase().as_str() {
        "default" => Some(AiKind::Default),
        "aaron" => Some(AiKind::Aaron),
        "rich" => Some(AiKind::Rich),
        "random" => Some(AiKind::Random),
        _ => {
            eprintln!("Unknown AI kind: {}", name);
            None
        }
    }
}

fn parse_mode(name: &str) -> Option<GameMode> {
    match name {
        "1v1" => Some(GameMode::AiOnly1v1),
        "2v2" => Some(GameMode::AiOnly2v2),
        _ => {
            eprintln!("Unknown simulation mode: {} (expected 1v1 or 2v2)", name);
            None
        }
    }
}

fn print_usage() {
    println!("Headless AI vs AI simulation");
    println!();
    println!("Usage: simulate [options]");
    println!("  --games N        matches to play (default 1)");
    println!("  --duration N     wall clock limit in seconds (default 600)");
    println!("  --max-score N    goals needed to win a match");
    println!("  --mode M         1v1 or 2v2");
    println!("  --left AI        team 0 AI: default, aaron, rich, random");
    println!("  --right AI       team 1 AI");
    println!("  --log-events     print bus events while running");
    println!("  --quiet          only print the final report");
}

/// Outcome of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub games_won: [u32; 2],
    /// Score of the match in progress when the run stopped
    pub scores: [u32; 2],
    pub elapsed: f32,
    pub hit_duration_limit: bool,
}

/// Resource controlling when the run loop stops
#[derive(Resource)]
struct SimControl {
    games: u32,
    duration_limit: f32,
    should_exit: bool,
    hit_duration_limit: bool,
}

fn check_end_conditions(time: Res<Time>, match_state: Res<MatchState>, mut control: ResMut<SimControl>) {
    let games_played: u32 = match_state.games_won().iter().sum();
    if games_played >= control.games {
        control.should_exit = true;
    }
    if time.elapsed_secs() >= control.duration_limit {
        control.should_exit = true;
        control.hit_duration_limit = true;
    }
}

/// Run matches until the requested number of games finish or the duration
/// limit trips, and report the tally.
pub fn run_match(config: &SimConfig) -> MatchReport {
    let mut builder = HeadlessAppBuilder::new(config.match_config.clone());
    if config.log_events {
        builder = builder.with_event_log();
    }
    let mut app = builder.build();

    app.insert_resource(SimControl {
        games: config.games,
        duration_limit: config.duration_limit,
        should_exit: false,
        hit_duration_limit: false,
    });
    app.add_systems(Update, check_end_conditions);

    loop {
        app.update();

        let control = app.world().resource::<SimControl>();
        if control.should_exit {
            break;
        }
    }

    let match_state = app.world().resource::<MatchState>();
    let control = app.world().resource::<SimControl>();
    let time = app.world().resource::<Time>();

    MatchReport {
        games_won: match_state.games_won(),
        scores: match_state.scores(),
        elapsed: time.elapsed_secs(),
        hit_duration_limit: control.hit_duration_limit,
    }
}

/// Entry point for the simulate binary
pub fn run_simulation(config: SimConfig) {
    if !config.quiet {
        println!(
            "Simulating {} game(s), {:?} vs {:?}, first to {}",
            config.games,
            config.match_config.team_ai[0],
            config.match_config.team_ai[1],
            config.match_config.max_score
        );
    }

    let report = run_match(&config);

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize report: {}", e),
    }
}
