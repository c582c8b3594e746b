//! Доменная модель покера: карты, колода, фишки, игроки, ставки, итоги раздачи.

pub mod blinds;
pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod player;

/// Стабильный идентификатор игрока на весь турнир.
pub type PlayerId = u64;
/// Номер раздачи внутри одной игры (0, 1, 2, ...).
pub type HandId = u64;
/// Идентификатор игры (одного турнира) в пакетном прогоне.
pub type GameId = u64;
/// Индекс места за столом (0..players-1, по часовой стрелке).
pub type SeatIndex = usize;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use blinds::*;
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
