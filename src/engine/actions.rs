use serde::{Deserialize, Serialize};

use crate::domain::{Chips, HandStage, PlayerId, SeatIndex};

/// Действие агента: закрытое множество ровно из трёх вариантов.
/// Всё, что агент вернул не из этого множества (или с суммой вне
/// допустимой), движок трактует как фолд.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentAction {
    Fold,
    /// Уравнять текущую ставку. При отсутствии ставки — чек.
    /// Короткий колл на весь стек легален всегда.
    Match,
    /// Поставить сверх текущей ставки. Сумма — ОБЩЕЕ количество фишек,
    /// вносимых этим действием, а не добавка к коллу.
    Increase(Chips),
}

/// Вид записи в журнале действий. Принудительные взносы (анте, блайнды)
/// журналируются наравне с добровольными действиями.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Ante,
    SmallBlind,
    BigBlind,
    Fold,
    Match,
    Increase,
}

/// Строка журнала: кто, что, за сколько и на какой стадии.
/// Журнала достаточно, чтобы восстановить раздачу для аудита.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggedAction {
    pub player_id: PlayerId,
    pub seat: SeatIndex,
    pub kind: ActionKind,
    /// Фактически уплачено этим действием (может быть меньше номинала
    /// при коротком стеке).
    pub paid: Chips,
    pub stage: HandStage,
}
