use crate::domain::{PlayerId, SeatIndex};

use thiserror::Error;

/// Ошибки движка раздачи.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Недостаточно игроков для раздачи")]
    NotEnoughPlayers,

    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("Раздача уже завершена")]
    HandAlreadySettled,

    #[error("Сейчас не ход игрока с id={0}")]
    NotPlayersTurn(PlayerId),

    #[error("Недопустимое действие в текущем состоянии раздачи")]
    IllegalAction,

    #[error("Недостаточно фишек для этой ставки")]
    NotEnoughChips,

    #[error("Размер рейза слишком мал")]
    RaiseTooSmall,

    #[error("Колода исчерпана")]
    DeckExhausted,

    #[error("Нарушен инвариант банка: {0}")]
    InvariantViolation(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl EngineError {
    /// Нарушения правил торговли. Внутри игрового цикла движок
    /// лечит их принудительным фолдом; наружу раздача не падает.
    pub fn is_betting_violation(&self) -> bool {
        matches!(
            self,
            EngineError::NotPlayersTurn(_)
                | EngineError::IllegalAction
                | EngineError::NotEnoughChips
                | EngineError::RaiseTooSmall
        )
    }
}
