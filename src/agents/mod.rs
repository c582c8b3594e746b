//! Встроенные агенты-стратегии.
//!
//! Все они играют только через `HandSnapshot` — приватных данных
//! движка у агента нет, как нет их и у живого игрока за столом.

pub mod allin;
pub mod caller;
pub mod heuristic;
pub mod random;

pub use allin::AllInAgent;
pub use caller::CallingAgent;
pub use heuristic::HeuristicAgent;
pub use random::RandomAgent;

use crate::engine::Agent;

/// Собрать агента по имени стратегии (для CLI).
pub fn by_name(name: &str) -> Option<Box<dyn Agent>> {
    match name {
        "all-in" | "allin" => Some(Box::new(AllInAgent)),
        "caller" | "call" => Some(Box::new(CallingAgent)),
        "random" => Some(Box::new(RandomAgent::new())),
        "heuristic" => Some(Box::new(HeuristicAgent::new())),
        _ => None,
    }
}

/// Имена стратегий, которые понимает `by_name`.
pub const STRATEGY_NAMES: [&str; 4] = ["all-in", "caller", "random", "heuristic"];
