//! Турнирный слой поверх движка раздачи: эскалаторы блайндов и прогон
//! игры до последнего живого стека.

pub mod escalator;
pub mod runtime;

pub use escalator::{BlindEscalator, HoldemEscalator, SurvivalEscalator};
pub use runtime::{Entrant, GameConfig, GameResultRow, PokerGame};
