use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandRank, HandStage, Street};
use crate::domain::{HandId, PlayerId, SeatIndex};
use crate::engine::actions::{ActionKind, LoggedAction};

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted {
        hand_id: HandId,
        button: SeatIndex,
        players: usize,
    },

    /// Игрок получил карманные карты.
    HoleCardsDealt { seat: SeatIndex, cards: Vec<Card> },

    /// Открыты общие карты на борде.
    BoardDealt { street: Street, cards: Vec<Card> },

    /// Действие игрока, включая принудительные взносы.
    /// Именно из этих событий собирается журнал действий раздачи.
    PlayerActed {
        player_id: PlayerId,
        seat: SeatIndex,
        kind: ActionKind,
        paid: Chips,
        stage: HandStage,
        new_stack: Chips,
        pot_after: Chips,
    },

    /// Переход конечного автомата раздачи на новую стадию.
    StageChanged { stage: HandStage },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        seat: SeatIndex,
        player_id: PlayerId,
        hole_cards: Vec<Card>,
        rank: HandRank,
    },

    /// Выплата из пота одному победителю.
    PotAwarded {
        seat: SeatIndex,
        player_id: PlayerId,
        amount: Chips,
    },

    /// Раздача завершена.
    HandFinished { hand_id: HandId },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи: упорядоченный журнал всего, что произошло.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    /// Журнал действий: кто, что, за сколько и на какой стадии.
    /// Достаточен для восстановления раздачи при аудите.
    pub fn action_log(&self) -> Vec<LoggedAction> {
        self.events
            .iter()
            .filter_map(|event| match &event.kind {
                HandEventKind::PlayerActed {
                    player_id,
                    seat,
                    kind,
                    paid,
                    stage,
                    ..
                } => Some(LoggedAction {
                    player_id: *player_id,
                    seat: *seat,
                    kind: *kind,
                    paid: *paid,
                    stage: *stage,
                }),
                _ => None,
            })
            .collect()
    }
}
