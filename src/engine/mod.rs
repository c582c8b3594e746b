//! Движок раздачи: торговля, переход улиц, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `HandEngine`
//! Основные операции:
//!   - `new` + `post_blinds` – подготовить раздачу
//!   - `apply` – применить действие игрока
//!   - `run` – прогнать раздачу целиком, опрашивая агентов
//!
//! Движок живёт одну раздачу и владеет всем её состоянием: колодой,
//! банками, стеками. Наружу возвращается `HandOutcome`.

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pots;
pub mod snapshot;
pub mod validation;

pub use actions::{ActionKind, AgentAction, LoggedAction};
pub use betting::{AppliedAction, BettingRound};
pub use errors::EngineError;
pub use game_loop::{HandEngine, HandOutcome, HandProgress};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use pots::{build_pots, distribute_pots, Pot, PotAward, PotEntry, PotManager, PotWinner};
pub use snapshot::{HandSnapshot, HeroView, PlayerView};

use crate::domain::{Card, HandRank};

/// RNG интерфейс для engine. Реализации – в infra (обёртки над `rand`).
/// Никакого глобального генератора: источник передаётся явно,
/// чтобы раздача воспроизводилась из сида.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}

/// Оракул силы руки: по 5–7 картам возвращает ключ полного порядка.
/// Больше — сильнее; равные ключи только у действительно равных рук.
/// Реализация – в eval.
pub trait RankOracle {
    fn rank(&self, cards: &[Card]) -> HandRank;
}

/// Агент — стратегия одного игрока. Вызывается синхронно на каждом
/// его ходе; структурно негодный ответ движок превращает в фолд,
/// так что сломанная стратегия не валит симуляцию.
pub trait Agent {
    /// Название стратегии (для итоговых таблиц).
    fn name(&self) -> &str;

    /// Детерминированный пересев собственной случайности агента.
    fn seed(&mut self, _seed: u64) {}

    /// Решение на текущем ходе по неизменяемому срезу раздачи.
    fn decide(&mut self, snapshot: &snapshot::HandSnapshot) -> AgentAction;

    /// Хук после завершения раздачи.
    fn hand_finished(&mut self, _outcome: &HandOutcome) {}
}
