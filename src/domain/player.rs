use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Статус игрока в рамках одной раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandStatus {
    /// Игрок активен: может ставить и отвечать на ставки.
    Active,
    /// Игрок сфолдил и больше не претендует на банк.
    Folded,
    /// Игрок в олл-ине: участвует в банке, но ходов больше не делает.
    AllIn,
}

/// Состояние игрока в пределах одной раздачи.
///
/// Движок владеет этим состоянием от постановки блайндов до расчёта;
/// наружу (в турнирный цикл) возвращаются только итоговые стеки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandPlayer {
    /// Стабильный идентификатор на весь турнир.
    pub player_id: PlayerId,
    pub name: String,
    /// Текущий стек (фишки, ещё не вложенные в банк).
    pub stack: Chips,
    /// Ставка в текущем раунде торговли.
    pub current_bet: Chips,
    /// Всего вложено в банк за раздачу. По этим суммам строятся поты.
    pub total_bet: Chips,
    pub status: HandStatus,
    /// Карманные карты (2 для холдема, пусто до раздачи).
    pub hole_cards: Vec<Card>,
}

impl HandPlayer {
    pub fn new(player_id: PlayerId, name: impl Into<String>, stack: Chips) -> Self {
        Self {
            player_id,
            name: name.into(),
            stack,
            current_bet: Chips::ZERO,
            total_bet: Chips::ZERO,
            status: HandStatus::Active,
            hole_cards: Vec::new(),
        }
    }

    /// Не сфолдил — значит претендует на банк (активен или в олл-ине).
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, HandStatus::Active | HandStatus::AllIn)
    }

    /// Может ли делать ходы в торговле.
    pub fn is_active(&self) -> bool {
        self.status == HandStatus::Active
    }

    /// Списывает со стека не больше, чем есть; возвращает фактически
    /// уплаченную сумму. Стек, дошедший до нуля, означает олл-ин.
    pub fn pay(&mut self, amount: Chips) -> Chips {
        let paid = self.take_from_stack(amount);
        self.current_bet += paid;
        paid
    }

    /// Анте идёт в банк, но не считается ставкой текущего раунда.
    pub fn post_ante(&mut self, amount: Chips) -> Chips {
        self.take_from_stack(amount)
    }

    fn take_from_stack(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.total_bet += paid;
        if self.stack.is_zero() {
            self.status = HandStatus::AllIn;
        }
        paid
    }
}
