use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Тип анте.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AnteType {
    /// Без анте.
    None,
    /// Классическое анте с каждого игрока.
    Classic,
    /// Big Blind Ante – анте платит только биг-блайнд.
    BigBlind,
}

/// Ставки одной раздачи: блайнды и анте.
/// Движку всё равно, откуда они взялись; эскалатор в tournament
/// выбирает уровень по числу сыгранных раздач или вылетов.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stakes {
    /// Малый блайнд.
    pub small_blind: Chips,
    /// Большой блайнд.
    pub big_blind: Chips,
    /// Размер анте в фишках (0, если нет).
    pub ante: Chips,
    /// Тип анте: None / Classic / BigBlind.
    pub ante_type: AnteType,
}

impl Stakes {
    pub const fn new(small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            small_blind,
            big_blind,
            ante: Chips::ZERO,
            ante_type: AnteType::None,
        }
    }

    pub const fn with_ante(
        small_blind: Chips,
        big_blind: Chips,
        ante: Chips,
        ante_type: AnteType,
    ) -> Self {
        Self {
            small_blind,
            big_blind,
            ante,
            ante_type,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.small_blind.0 == 0 {
            return Err("Stakes: small_blind = 0".into());
        }
        if self.big_blind.0 == 0 {
            return Err("Stakes: big_blind = 0".into());
        }
        if self.big_blind.0 < self.small_blind.0 {
            return Err(format!(
                "Stakes: big_blind ({}) < small_blind ({})",
                self.big_blind.0, self.small_blind.0
            ));
        }
        match self.ante_type {
            AnteType::None if !self.ante.is_zero() => {
                Err("Stakes: ante_type = None, но ante > 0".into())
            }
            AnteType::Classic | AnteType::BigBlind if self.ante.is_zero() => {
                Err("Stakes: анте объявлено, но ante = 0".into())
            }
            _ => Ok(()),
        }
    }
}
