use crate::domain::player::{HandPlayer, HandStatus};
use crate::engine::actions::AgentAction;
use crate::engine::betting::BettingRound;
use crate::engine::errors::EngineError;

/// Проверка, может ли игрок выполнить это действие при текущем
/// состоянии торговли. Чистая функция: ничего не двигает.
pub fn validate_action(
    player: &HandPlayer,
    action: AgentAction,
    betting: &BettingRound,
) -> Result<(), EngineError> {
    if player.status != HandStatus::Active {
        return Err(EngineError::IllegalAction);
    }

    match action {
        // Фолд легален всегда, даже когда уравнивать нечего.
        AgentAction::Fold => Ok(()),

        // Чек при нулевом доколле, иначе колл; короткий колл на весь
        // стек легален всегда и никогда не отклоняется как «слишком мал».
        AgentAction::Match => Ok(()),

        AgentAction::Increase(amount) => {
            if amount.is_zero() {
                return Err(EngineError::IllegalAction);
            }
            if amount > player.stack {
                return Err(EngineError::NotEnoughChips);
            }
            // Олл-ин на весь стек принимается независимо от минимума.
            if amount == player.stack {
                return Ok(());
            }
            if amount < betting.min_cost_to_increase(player) {
                return Err(EngineError::RaiseTooSmall);
            }
            Ok(())
        }
    }
}
