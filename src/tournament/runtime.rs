//! Прогон целой игры: один стол, эскалатор блайндов, выбывания
//! и распределение мест.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::HandPlayer;
use crate::domain::{GameId, PlayerId};
use crate::engine::game_loop::{HandEngine, HandOutcome};
use crate::engine::{Agent, EngineError, RandomSource, RankOracle};
use crate::infra::rng_seed::GameSeed;
use crate::tournament::escalator::BlindEscalator;

/// Параметры игры.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub starting_stack: Chips,
    /// Мастер-seed; `None` — взять случайный.
    pub seed: Option<u64>,
    /// Потолок раздач: защита от столов, которые никак не доиграют.
    pub max_hands: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_stack: Chips::new(3000),
            seed: None,
            max_hands: 10_000,
        }
    }
}

/// Заявка на участие: кто играет и чем думает.
pub struct Entrant {
    pub player_id: PlayerId,
    pub name: String,
    pub agent: Box<dyn Agent>,
}

impl Entrant {
    pub fn new(player_id: PlayerId, name: impl Into<String>, agent: Box<dyn Agent>) -> Self {
        Self {
            player_id,
            name: name.into(),
            agent,
        }
    }
}

/// Участник за столом.
struct Seated {
    player_id: PlayerId,
    name: String,
    agent: Box<dyn Agent>,
    stack: Chips,
    /// Итоговое место; `None`, пока игрок жив.
    finish_place: Option<u32>,
    hands_played: u64,
}

impl Seated {
    fn is_alive(&self) -> bool {
        self.finish_place.is_none()
    }
}

/// Строка итогового отчёта, по одной на участника.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResultRow {
    pub game_id: GameId,
    pub game_seed: u64,
    pub player_id: PlayerId,
    pub name: String,
    pub agent_name: String,
    pub place: u32,
    pub hands_played: u64,
}

/// Одна игра за одним столом: от рассадки до последнего живого стека.
///
/// Вся случайность растёт из мастер-seed: колода раздачи `i` берётся
/// из потока `deck(i)`, рассадка — из потока `order`, зерно агента —
/// из его места в исходном списке. Один и тот же seed с теми же
/// агентами даёт ту же игру до фишки.
pub struct PokerGame {
    pub game_id: GameId,
    pub seed: GameSeed,
    pub hand_count: u64,
    config: GameConfig,
    seats: Vec<Seated>,
    escalator: Box<dyn BlindEscalator>,
    /// Место прошлого баттона; `None` до первой раздачи.
    button_seat: Option<usize>,
}

impl PokerGame {
    pub fn new(
        game_id: GameId,
        entrants: Vec<Entrant>,
        escalator: Box<dyn BlindEscalator>,
        config: GameConfig,
    ) -> Result<Self, EngineError> {
        if entrants.len() < 2 {
            return Err(EngineError::NotEnoughPlayers);
        }
        if config.starting_stack.is_zero() {
            return Err(EngineError::Internal("нулевой стартовый стек"));
        }

        let seed = GameSeed::generate(config.seed);

        // Канонический порядок — по player_id, поверх него рассадка
        // из своего потока случайности.
        let mut entrants = entrants;
        entrants.sort_by_key(|e| e.player_id);
        if entrants.windows(2).any(|w| w[0].player_id == w[1].player_id) {
            return Err(EngineError::Internal("повторяющийся player_id среди участников"));
        }
        seed.order_rng().shuffle(&mut entrants);

        let seats: Vec<Seated> = entrants
            .into_iter()
            .enumerate()
            .map(|(i, e)| {
                let mut agent = e.agent;
                agent.seed(seed.agent_seed(i as u64));
                Seated {
                    player_id: e.player_id,
                    name: e.name,
                    agent,
                    stack: config.starting_stack,
                    finish_place: None,
                    hands_played: 0,
                }
            })
            .collect();

        info!(
            "игра {game_id}: seed {}, участников {}, стартовый стек {}",
            seed.0,
            seats.len(),
            config.starting_stack
        );

        Ok(Self {
            game_id,
            seed,
            hand_count: 0,
            config,
            seats,
            escalator,
            button_seat: None,
        })
    }

    pub fn alive_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_alive()).count()
    }

    pub fn is_finished(&self) -> bool {
        self.alive_count() <= 1
    }

    /// Разыграть одну раздачу между живыми игроками.
    pub fn play_hand(&mut self, oracle: &dyn RankOracle) -> Result<HandOutcome, EngineError> {
        if self.is_finished() {
            return Err(EngineError::NotEnoughPlayers);
        }

        let button = self.advance_button();
        let table: Vec<usize> = (0..self.seats.len())
            .filter(|&i| self.seats[i].is_alive())
            .collect();
        let hand_button = table
            .iter()
            .position(|&i| i == button)
            .ok_or(EngineError::Internal("баттон встал на выбывшего игрока"))?;

        let hand_id = self.hand_count;
        let stakes = self.escalator.stakes_for(self.hand_count, table.len());
        let starting: Vec<Chips> = table.iter().map(|&i| self.seats[i].stack).collect();

        let players: Vec<HandPlayer> = table
            .iter()
            .map(|&i| {
                let s = &self.seats[i];
                HandPlayer::new(s.player_id, s.name.clone(), s.stack)
            })
            .collect();

        let mut deck_rng = self.seed.deck_rng(hand_id);
        let mut engine = HandEngine::new(hand_id, stakes, hand_button, players, &mut deck_rng)?;

        let mut agents: Vec<&mut dyn Agent> = self
            .seats
            .iter_mut()
            .filter(|s| s.is_alive())
            .map(|s| s.agent.as_mut())
            .collect();
        let outcome = engine.run(&mut agents, oracle)?;

        // Возврат стеков за стол и подсчёт сыгранных раздач.
        for (hand_seat, &i) in table.iter().enumerate() {
            self.seats[i].stack = outcome.results[hand_seat].stack_after;
            self.seats[i].hands_played += 1;
        }
        self.hand_count += 1;

        self.assign_bust_places(&table, &starting);

        for &i in &table {
            self.seats[i].agent.hand_finished(&outcome);
        }

        debug!(
            "игра {}: раздача {hand_id} завершена, живых {}",
            self.game_id,
            self.alive_count()
        );
        Ok(outcome)
    }

    /// Играть, пока не останется один живой игрок либо не упрёмся
    /// в потолок раздач; затем закрыть места выживших.
    pub fn run_to_completion(&mut self, oracle: &dyn RankOracle) -> Result<(), EngineError> {
        while !self.is_finished() {
            if self.hand_count >= self.config.max_hands {
                warn!(
                    "игра {}: достигнут потолок в {} раздач, выжившие ранжируются по стекам",
                    self.game_id, self.config.max_hands
                );
                break;
            }
            self.play_hand(oracle)?;
        }

        for (rank, i) in self.rank_alive_by_stack().into_iter().enumerate() {
            self.seats[i].finish_place = Some(rank as u32 + 1);
        }
        Ok(())
    }

    /// Итоговые строки по возрастанию места. Живым игрокам недоигранной
    /// игры места даются по текущим стекам.
    pub fn results(&self) -> Vec<GameResultRow> {
        let mut places: Vec<Option<u32>> = self.seats.iter().map(|s| s.finish_place).collect();
        for (rank, i) in self.rank_alive_by_stack().into_iter().enumerate() {
            places[i] = Some(rank as u32 + 1);
        }

        let mut rows: Vec<GameResultRow> = self
            .seats
            .iter()
            .zip(&places)
            .map(|(s, place)| GameResultRow {
                game_id: self.game_id,
                game_seed: self.seed.0,
                player_id: s.player_id,
                name: s.name.clone(),
                agent_name: s.agent.name().to_string(),
                place: place.unwrap_or(0),
                hands_played: s.hands_played,
            })
            .collect();
        rows.sort_by_key(|r| r.place);
        rows
    }

    // ----- внутренняя механика -----

    /// Сдвинуть баттон на следующего живого игрока (первая раздача —
    /// с нулевого места). Мёртвые места просто перешагиваются.
    fn advance_button(&mut self) -> usize {
        let n = self.seats.len();
        let start = match self.button_seat {
            None => 0,
            Some(prev) => (prev + 1) % n,
        };
        let mut seat = start;
        for _ in 0..n {
            if self.seats[seat].is_alive() {
                break;
            }
            seat = (seat + 1) % n;
        }
        self.button_seat = Some(seat);
        seat
    }

    /// Раздать места вылетевшим в этой раздаче: кто зашёл в раздачу
    /// с большим стеком, тот выбывает выше. При равных стеках выше
    /// встаёт место ближе к началу рассадки.
    fn assign_bust_places(&mut self, table: &[usize], starting: &[Chips]) {
        let mut busted: Vec<(usize, Chips)> = table
            .iter()
            .zip(starting)
            .filter(|(&i, _)| self.seats[i].is_alive() && self.seats[i].stack.is_zero())
            .map(|(&i, &chips)| (i, chips))
            .collect();
        if busted.is_empty() {
            return;
        }
        busted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let survivors = self.alive_count() - busted.len();
        for (k, (i, _)) in busted.into_iter().enumerate() {
            let place = (survivors + 1 + k) as u32;
            self.seats[i].finish_place = Some(place);
            info!(
                "игра {}: {} выбывает на месте {place}",
                self.game_id, self.seats[i].name
            );
        }
    }

    /// Живые места по убыванию стека; равные стеки — по месту рассадки.
    fn rank_alive_by_stack(&self) -> Vec<usize> {
        let mut alive: Vec<usize> = (0..self.seats.len())
            .filter(|&i| self.seats[i].is_alive())
            .collect();
        alive.sort_by(|&a, &b| {
            self.seats[b]
                .stack
                .cmp(&self.seats[a].stack)
                .then(a.cmp(&b))
        });
        alive
    }
}
