use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::{HandPlayer, HandStatus};
use crate::domain::SeatIndex;
use crate::engine::actions::{ActionKind, AgentAction};
use crate::engine::errors::EngineError;
use crate::engine::validation;

/// Раунд торговли на одной улице.
///
/// Правило закрытия: раунд завершён, когда очередь `to_act` пуста —
/// каждый активный игрок уравнял текущую ставку и сходил после
/// последнего рейза. Принятый рейз перестраивает очередь заново.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingRound {
    /// Улица, к которой относится этот раунд.
    pub street: Street,
    /// Текущая целевая ставка улицы, до которой должны дотянуться игроки.
    pub bet_to_match: Chips,
    /// Минимальная повышающая часть следующего рейза.
    pub min_raise: Chips,
    /// Seat последнего агрессора (бет/рейз), если был.
    pub last_aggressor: Option<SeatIndex>,
    /// Очередь ходящих: кто ещё должен ответить с момента последнего рейза.
    pub to_act: Vec<SeatIndex>,
    /// Полный порядок мест улицы, начиная с первого ходящего.
    /// По нему перестраивается очередь после рейза.
    pub ring: Vec<SeatIndex>,
}

/// Что фактически произошло после применения действия.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedAction {
    pub kind: ActionKind,
    /// Сколько фишек ушло в банк этим действием.
    pub paid: Chips,
    /// Открыл ли ход торговлю заново (принятый рейз).
    pub reopened: bool,
}

impl BettingRound {
    /// Новый раунд. `ring` — все места улицы по часовой стрелке, начиная
    /// с первого ходящего; в очередь попадают только активные игроки.
    pub fn new(
        street: Street,
        bet_to_match: Chips,
        min_raise: Chips,
        ring: Vec<SeatIndex>,
        players: &[HandPlayer],
    ) -> Self {
        let to_act = ring
            .iter()
            .copied()
            .filter(|&s| players[s].is_active())
            .collect();
        Self {
            street,
            bet_to_match,
            min_raise,
            last_aggressor: None,
            to_act,
            ring,
        }
    }

    /// Чей сейчас ход.
    pub fn current_actor(&self) -> Option<SeatIndex> {
        self.to_act.first().copied()
    }

    /// Раунд завершён — очередь пуста.
    pub fn is_complete(&self) -> bool {
        self.to_act.is_empty()
    }

    /// Сколько игроку не хватает до текущей ставки.
    pub fn cost_to_match(&self, player: &HandPlayer) -> Chips {
        self.bet_to_match.saturating_sub(player.current_bet)
    }

    /// Минимальная общая сумма легального рейза этим действием
    /// (доколл плюс минимальная повышающая часть). Олл-ин на весь
    /// стек легален и ниже этого порога.
    pub fn min_cost_to_increase(&self, player: &HandPlayer) -> Chips {
        self.cost_to_match(player) + self.min_raise
    }

    /// Убрать seat из очереди (после его хода).
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
    }

    /// Применить действие игрока `seat`. Проверяет очерёдность и
    /// легальность, двигает фишки и перестраивает очередь.
    pub fn apply(
        &mut self,
        players: &mut [HandPlayer],
        seat: SeatIndex,
        action: AgentAction,
    ) -> Result<AppliedAction, EngineError> {
        let player = players.get(seat).ok_or(EngineError::InvalidSeat(seat))?;
        match self.current_actor() {
            Some(actor) if actor == seat => {}
            _ => return Err(EngineError::NotPlayersTurn(player.player_id)),
        }
        validation::validate_action(player, action, self)?;

        match action {
            AgentAction::Fold => {
                players[seat].status = HandStatus::Folded;
                self.mark_acted(seat);
                Ok(AppliedAction {
                    kind: ActionKind::Fold,
                    paid: Chips::ZERO,
                    reopened: false,
                })
            }
            AgentAction::Match => {
                // Короткий колл уводит игрока в олл-ин внутри pay().
                let owed = self.cost_to_match(&players[seat]);
                let paid = players[seat].pay(owed);
                self.mark_acted(seat);
                Ok(AppliedAction {
                    kind: ActionKind::Match,
                    paid,
                    reopened: false,
                })
            }
            AgentAction::Increase(amount) => {
                let paid = players[seat].pay(amount);
                let new_bet = players[seat].current_bet;
                if new_bet > self.bet_to_match {
                    let increment = new_bet - self.bet_to_match;
                    self.to_act = self.rebuild_queue(players, seat);
                    self.bet_to_match = new_bet;
                    self.min_raise = self.min_raise.max(increment);
                    self.last_aggressor = Some(seat);
                    Ok(AppliedAction {
                        kind: ActionKind::Increase,
                        paid,
                        reopened: true,
                    })
                } else {
                    // Короткий олл-ин, не догнавший ставку: недоколл,
                    // торговля заново не открывается.
                    self.mark_acted(seat);
                    Ok(AppliedAction {
                        kind: ActionKind::Increase,
                        paid,
                        reopened: false,
                    })
                }
            }
        }
    }

    /// Очередь после рейза: все ещё активные игроки, по рингу
    /// начиная со следующего за рейзером; сам рейзер уже сходил.
    fn rebuild_queue(&self, players: &[HandPlayer], raiser: SeatIndex) -> Vec<SeatIndex> {
        let pos = self
            .ring
            .iter()
            .position(|&s| s == raiser)
            .unwrap_or(self.ring.len().saturating_sub(1));
        self.ring[pos + 1..]
            .iter()
            .chain(self.ring[..pos].iter())
            .copied()
            .filter(|&s| players[s].is_active() && s != raiser)
            .collect()
    }
}
