//! AI simulation tool - headless slime football for AI testing
//!
//! Run AI vs AI matches without rendering and print a JSON report.
//!
//! Usage:
//!   cargo run --bin simulate -- --help
//!   cargo run --bin simulate -- --left rich --right aaron --games 5
//!   cargo run --bin simulate -- --mode 2v2 --max-score 5 --log-events

use slimefootball::simulation::{SimConfig, run_simulation};

fn main() {
    let config = SimConfig::from_args();
    run_simulation(config);
}
