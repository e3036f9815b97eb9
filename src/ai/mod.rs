//! AI module - the selectable heuristics that drive non-human competitors
//!
//! Each variant implements the same `CustomController` seam a human
//! adapter does. The `Random` meta-choice is resolved once, at bind time.

mod chaser;
mod tactical;

pub use chaser::ChaserController;
pub use tactical::{AiState, TacticalController};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::controller::CustomController;

/// The selectable AI implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiKind {
    Default,
    Aaron,
    Rich,
    /// Resolved to one of the concrete variants at bind time
    Random,
}

impl AiKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            AiKind::Default => "Default AI",
            AiKind::Aaron => "Aarons AI",
            AiKind::Rich => "Richs AI",
            AiKind::Random => "Random",
        }
    }

    /// Collapse `Random` into a uniformly sampled concrete variant
    pub fn resolve(self, rng: &mut impl Rng) -> AiKind {
        match self {
            AiKind::Random => match rng.gen_range(0..3) {
                0 => AiKind::Default,
                1 => AiKind::Aaron,
                _ => AiKind::Rich,
            },
            concrete => concrete,
        }
    }
}

/// Build a controller for the given AI choice
pub fn make_controller(kind: AiKind, rng: &mut impl Rng) -> Box<dyn CustomController> {
    match kind.resolve(rng) {
        AiKind::Default => Box::new(ChaserController::default_variant()),
        AiKind::Rich => Box::new(ChaserController::rich_variant()),
        AiKind::Aaron => Box::new(TacticalController::new()),
        AiKind::Random => unreachable!("resolve() never returns Random"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_always_resolves_to_a_concrete_variant() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let resolved = AiKind::Random.resolve(&mut rng);
            assert_ne!(resolved, AiKind::Random);
        }
    }

    #[test]
    fn concrete_kinds_resolve_to_themselves() {
        let mut rng = rand::thread_rng();
        assert_eq!(AiKind::Aaron.resolve(&mut rng), AiKind::Aaron);
        assert_eq!(AiKind::Default.resolve(&mut rng), AiKind::Default);
        assert_eq!(AiKind::Rich.resolve(&mut rng), AiKind::Rich);
    }
}
