use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::snapshot::HandSnapshot;
use crate::engine::{Agent, AgentAction};

/// Бросает кость на каждом ходу: фолд, колл или минимальный рейз.
/// Бесплатный чек никогда не фолдит, рейз прижимается к стеку.
///
/// Без вызова `seed` играет от фиксированного нулевого зерна, так что
/// поведение детерминировано всегда.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::seed_from_u64(0),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn decide(&mut self, snapshot: &HandSnapshot) -> AgentAction {
        let roll: u32 = self.rng.gen_range(0..100);
        if roll < 15 && !snapshot.cost_to_match.is_zero() {
            return AgentAction::Fold;
        }
        if roll < 75 {
            return AgentAction::Match;
        }
        AgentAction::Increase(snapshot.min_cost_to_increase.min(snapshot.your_status.stack))
    }
}
