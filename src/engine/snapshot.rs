use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::HandStatus;
use crate::domain::{HandId, PlayerId, SeatIndex};
use crate::engine::actions::LoggedAction;
use crate::engine::pots::Pot;

/// Публичное состояние одного игрока, как его видят остальные.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerView {
    pub player_id: PlayerId,
    pub name: String,
    pub seat: SeatIndex,
    /// Позиция относительно баттона: 0 — баттон, 1 — малый блайнд, ...
    pub position: usize,
    pub stack: Chips,
    pub status: HandStatus,
    /// Ставка текущего раунда.
    pub current_bet: Chips,
    /// Вложено в банк за раздачу.
    pub total_bet: Chips,
}

/// Собственное состояние героя плюс подсказки по легальным ходам.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeroView {
    pub player_id: PlayerId,
    pub seat: SeatIndex,
    pub position: usize,
    pub stack: Chips,
    pub status: HandStatus,
    pub current_bet: Chips,
    pub total_bet: Chips,
    /// Хватает ли стека поставить сверх текущей ставки
    /// (олл-ин «не дотянув» легален и при false).
    pub can_raise: bool,
}

/// Неизменяемый срез раздачи, который агент получает на каждый ход.
///
/// Карманные карты здесь только свои; карты соперников агенту не видны.
/// Поты пересчитаны по текущим вкладам, так что суммы и претенденты
/// согласованы в любой точке торговли.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSnapshot {
    pub hand_id: HandId,
    pub current_stage: Street,
    pub hole_cards: Vec<Card>,
    pub community_cards: Vec<Card>,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub ante: Chips,
    /// Целевая общая ставка улицы.
    pub bet_to_match: Chips,
    /// Сколько герою не хватает до неё.
    pub cost_to_match: Chips,
    /// Минимальная общая сумма легального рейза этим действием.
    pub min_cost_to_increase: Chips,
    pub pots: Vec<Pot>,
    pub players: Vec<PlayerView>,
    pub your_status: HeroView,
    /// Журнал действий раздачи, включая анте и блайнды.
    pub hand_log: Vec<LoggedAction>,
}
