//! Headless simulation - run AI vs AI matches without rendering

mod app_builder;
mod runner;

pub use app_builder::HeadlessAppBuilder;
pub use runner::{MatchReport, SimConfig, run_match, run_simulation};
