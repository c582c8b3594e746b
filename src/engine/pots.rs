use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::HandRank;
use crate::domain::player::HandPlayer;
use crate::domain::{PlayerId, SeatIndex};
use crate::engine::errors::EngineError;

/// Банк или его слой. При неравных олл-инах банк дробится на главный
/// пот и сайд-поты; слои идут от младших к старшим.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub amount: Chips,
    /// Кто претендует на этот пот: несфолдившие игроки, чей вклад
    /// дотянулся до уровня слоя. Сфолдивших здесь не бывает.
    pub eligible_players: Vec<PlayerId>,
}

/// Вклад одного игрока — вход чистой раскладки.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PotEntry {
    pub player_id: PlayerId,
    pub contributed: Chips,
    pub folded: bool,
}

/// Выигрыш одного игрока в одном поту.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotWinner {
    pub player_id: PlayerId,
    pub amount: Chips,
}

/// Итог розыгрыша одного пота.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotAward {
    pub amount: Chips,
    pub eligible_players: Vec<PlayerId>,
    pub winners: Vec<PotWinner>,
}

/// Копилка вкладов за раздачу. Движок сообщает сюда каждое движение
/// фишек в банк и каждый фолд; раскладка по потам — `compute_pots`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotManager {
    /// Вклад каждого места (все улицы, включая анте и блайнды).
    pub contributions: Vec<Chips>,
    pub folded: Vec<bool>,
}

impl PotManager {
    pub fn new(seats: usize) -> Self {
        Self {
            contributions: vec![Chips::ZERO; seats],
            folded: vec![false; seats],
        }
    }

    pub fn contribute(&mut self, seat: SeatIndex, amount: Chips) {
        self.contributions[seat] += amount;
    }

    pub fn mark_folded(&mut self, seat: SeatIndex) {
        self.folded[seat] = true;
    }

    /// Суммарный банк на текущий момент.
    pub fn total(&self) -> Chips {
        self.contributions
            .iter()
            .fold(Chips::ZERO, |acc, c| acc + *c)
    }

    pub fn contributed(&self, seat: SeatIndex) -> Chips {
        self.contributions[seat]
    }

    /// Разложить накопленные вклады в поты. `players` нужен только
    /// чтобы сопоставить местам стабильные идентификаторы.
    pub fn compute_pots(&self, players: &[HandPlayer]) -> Result<Vec<Pot>, EngineError> {
        let entries: Vec<PotEntry> = players
            .iter()
            .enumerate()
            .map(|(seat, p)| PotEntry {
                player_id: p.player_id,
                contributed: self.contributions[seat],
                folded: self.folded[seat],
            })
            .collect();
        build_pots(&entries)
    }
}

/// Чистая раскладка вкладов в поты, независимая от торговли и агентов.
///
/// По возрастанию перебираются различные уровни вкладов; каждый слой
/// (L_prev, L_cur] собирает с каждого вклада min(вклад, L_cur) − L_prev,
/// претендуют на слой несфолдившие игроки с вкладом не ниже L_cur.
/// Слои с одинаковым набором претендентов склеиваются. Мёртвые деньги
/// сфолдивших остаются в слоях, выиграть которые они не могут.
pub fn build_pots(entries: &[PotEntry]) -> Result<Vec<Pot>, EngineError> {
    let mut levels: Vec<Chips> = entries
        .iter()
        .map(|e| e.contributed)
        .filter(|c| !c.is_zero())
        .collect();
    levels.sort();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::new();
    let mut prev_level = Chips::ZERO;

    for level in levels {
        let mut amount = Chips::ZERO;
        for entry in entries {
            if entry.contributed > prev_level {
                amount += entry.contributed.min(level) - prev_level;
            }
        }

        let eligible: Vec<PlayerId> = entries
            .iter()
            .filter(|e| !e.folded && e.contributed >= level)
            .map(|e| e.player_id)
            .collect();
        if eligible.is_empty() {
            return Err(EngineError::InvariantViolation(format!(
                "слой банка {amount} без претендентов (уровень {level})"
            )));
        }

        match pots.last_mut() {
            Some(last) if last.eligible_players == eligible => last.amount += amount,
            _ => pots.push(Pot {
                amount,
                eligible_players: eligible,
            }),
        }

        prev_level = level;
    }

    let total_in = entries
        .iter()
        .fold(Chips::ZERO, |acc, e| acc + e.contributed);
    let total_out = pots.iter().fold(Chips::ZERO, |acc, p| acc + p.amount);
    if total_in != total_out {
        return Err(EngineError::InvariantViolation(format!(
            "банк разошёлся с вкладами: в потах {total_out}, внесено {total_in}"
        )));
    }

    Ok(pots)
}

/// Розыгрыш потов по рангам. Чистая функция: стеки не трогает,
/// возвращает кто сколько забрал из какого пота.
///
/// Внутри пота выигрывают претенденты с лучшим рангом; при равенстве
/// пот делится поровну, а «нечётные» фишки раздаются по одной начиная
/// с первого победителя по часовой стрелке от баттона (сам баттон —
/// последним). Пот с единственным претендентом уходит ему без
/// обращения к рангам — так разыгрывается и победа фолдами.
pub fn distribute_pots(
    pots: &[Pot],
    players: &[HandPlayer],
    button: SeatIndex,
    ranks: &[Option<HandRank>],
) -> Result<Vec<PotAward>, EngineError> {
    let n = players.len();
    let seat_of = |player_id: PlayerId| -> Result<SeatIndex, EngineError> {
        players
            .iter()
            .position(|p| p.player_id == player_id)
            .ok_or(EngineError::Internal("претендент пота не найден за столом"))
    };
    // Позиция в порядке раздачи нечётных фишек: баттон+1 первый, баттон последний.
    let clockwise_from_button = |seat: SeatIndex| (seat + n - (button + 1) % n) % n;

    let mut awards = Vec::with_capacity(pots.len());
    for pot in pots {
        if pot.eligible_players.is_empty() {
            return Err(EngineError::InvariantViolation(
                "пот без претендентов при розыгрыше".into(),
            ));
        }

        let mut winner_seats: Vec<SeatIndex> = if pot.eligible_players.len() == 1 {
            vec![seat_of(pot.eligible_players[0])?]
        } else {
            let mut best: Option<HandRank> = None;
            let mut seats: Vec<(SeatIndex, HandRank)> = Vec::new();
            for &player_id in &pot.eligible_players {
                let seat = seat_of(player_id)?;
                let rank = ranks[seat].ok_or_else(|| {
                    EngineError::InvariantViolation(format!(
                        "у претендента {player_id} нет ранга на шоудауне"
                    ))
                })?;
                if best.map_or(true, |b| rank > b) {
                    best = Some(rank);
                }
                seats.push((seat, rank));
            }
            let best = best.ok_or(EngineError::Internal("пустой шоудаун"))?;
            seats
                .into_iter()
                .filter(|(_, r)| *r == best)
                .map(|(s, _)| s)
                .collect()
        };
        winner_seats.sort_by_key(|&s| clockwise_from_button(s));

        let (share, remainder) = pot.amount.split_even(winner_seats.len() as u64);
        let winners = winner_seats
            .iter()
            .enumerate()
            .map(|(i, &seat)| PotWinner {
                player_id: players[seat].player_id,
                amount: if (i as u64) < remainder {
                    share + Chips(1)
                } else {
                    share
                },
            })
            .collect();

        awards.push(PotAward {
            amount: pot.amount,
            eligible_players: pot.eligible_players.clone(),
            winners,
        });
    }

    Ok(awards)
}
