use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::player::HandStatus;
use crate::domain::PlayerId;

/// Улица торговли.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::PreFlop, Street::Flop, Street::Turn, Street::River];

    /// Сколько общих карт открывается в начале улицы.
    pub fn cards_to_deal(self) -> usize {
        match self {
            Street::PreFlop => 0,
            Street::Flop => 3,
            Street::Turn => 1,
            Street::River => 1,
        }
    }

    pub fn next(self) -> Option<Street> {
        match self {
            Street::PreFlop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::PreFlop => "pre-flop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        write!(f, "{s}")
    }
}

/// Состояние конечного автомата раздачи.
///
/// Ante → PreFlop → Flop → Turn → River → Showdown → Settled,
/// плюс ранний выход в Settled из любой улицы, когда в раздаче
/// остался один несфолдивший игрок.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandStage {
    Ante,
    Street(Street),
    Showdown,
    Settled,
}

impl fmt::Display for HandStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandStage::Ante => write!(f, "ante"),
            HandStage::Street(street) => write!(f, "{street}"),
            HandStage::Showdown => write!(f, "showdown"),
            HandStage::Settled => write!(f, "settled"),
        }
    }
}

/// Ранг руки: ключ полного порядка, который возвращает оценщик.
/// Больше — сильнее. Равные ключи только у действительно равных рук.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandRank(pub u32);

/// Результат конкретного игрока в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandResult {
    pub player_id: PlayerId,
    /// Вскрытые карманные карты. `None`, если игрок до шоудауна не дошёл
    /// (или раздача закончилась фолдами — тогда не вскрывается никто).
    pub revealed_cards: Option<Vec<Card>>,
    /// Итоговый ранг руки (только у участников шоудауна).
    pub rank: Option<HandRank>,
    /// Сколько фишек игрок забрал из банков.
    pub winnings: Chips,
    /// Стек после раздачи.
    pub stack_after: Chips,
    /// Изменение стека за раздачу. Сумма по всем игрокам равна нулю.
    pub delta: i64,
    /// Статус на момент завершения раздачи (для решений о вылете).
    pub status: HandStatus,
    /// Забрал ли игрок хотя бы один банк (включая сплит).
    pub is_winner: bool,
}
