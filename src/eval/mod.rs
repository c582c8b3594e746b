//! Оценка силы покерных рук Техасского Холдема.
//!
//! `Evaluator` — оракул по умолчанию для движка раздачи; `best_five`
//! доступна и напрямую, когда нужен ранг без всей машинерии раздачи.

pub mod evaluator;
pub mod hand_rank;

pub use evaluator::{best_five, Evaluator};
pub use hand_rank::HandCategory;
