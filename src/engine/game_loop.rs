use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::domain::blinds::{AnteType, Stakes};
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandRank, HandStage, PlayerHandResult, Street};
use crate::domain::player::HandPlayer;
use crate::domain::{HandId, SeatIndex};
use crate::engine::actions::{ActionKind, AgentAction, LoggedAction};
use crate::engine::betting::BettingRound;
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions;
use crate::engine::pots::{distribute_pots, PotAward, PotManager};
use crate::engine::snapshot::{HandSnapshot, HeroView, PlayerView};
use crate::engine::{Agent, RandomSource, RankOracle};

/// Итог завершённой раздачи. Создаётся один раз и дальше не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandOutcome {
    pub hand_id: HandId,
    /// До какой стадии дошла раздача: улица раннего выхода при победе
    /// фолдами либо Showdown.
    pub stage_reached: HandStage,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    /// Розыгрыш потов от младшего к старшему.
    pub pots: Vec<PotAward>,
    /// Итоги игроков в порядке мест.
    pub results: Vec<PlayerHandResult>,
    /// Журнал действий — достаточен для восстановления раздачи.
    pub actions: Vec<LoggedAction>,
}

/// Статус раздачи после очередного действия.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandProgress {
    Ongoing,
    Finished(HandOutcome),
}

/// Состояние одной раздачи.
///
/// Конечный автомат: Ante → PreFlop → Flop → Turn → River → Showdown →
/// Settled, плюс ранний выход в Settled из любой улицы, когда остался
/// один несфолдивший игрок. Движок единолично владеет колодой, банком
/// и стеками на время раздачи.
pub struct HandEngine {
    pub hand_id: HandId,
    pub stakes: Stakes,
    pub button: SeatIndex,
    pub players: Vec<HandPlayer>,
    pub deck: Deck,
    pub board: Vec<Card>,
    pub stage: HandStage,
    pub pots: PotManager,
    pub betting: Option<BettingRound>,
    pub history: HandHistory,
    starting_stacks: Vec<Chips>,
}

impl HandEngine {
    /// Подготовка раздачи: проверка входа и перемешивание свежей колоды
    /// сидированным источником случайности.
    pub fn new<R: RandomSource>(
        hand_id: HandId,
        stakes: Stakes,
        button: SeatIndex,
        players: Vec<HandPlayer>,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        if players.len() < 2 {
            return Err(EngineError::NotEnoughPlayers);
        }
        if button >= players.len() {
            return Err(EngineError::InvalidSeat(button));
        }
        stakes
            .validate()
            .map_err(|_| EngineError::Internal("некорректные ставки раздачи"))?;

        let mut deck = Deck::standard_52();
        rng.shuffle(&mut deck.cards);

        let starting_stacks = players.iter().map(|p| p.stack).collect();
        let seats = players.len();
        let mut history = HandHistory::new();
        history.push(HandEventKind::HandStarted {
            hand_id,
            button,
            players: seats,
        });

        Ok(Self {
            hand_id,
            stakes,
            button,
            players,
            deck,
            board: Vec::new(),
            stage: HandStage::Ante,
            pots: PotManager::new(seats),
            betting: None,
            history,
            starting_stacks,
        })
    }

    /// Постинг анте и блайндов, раздача карманных карт, первый раунд
    /// торговли. Хедз-ап: малый блайнд ставит баттон.
    pub fn post_blinds(&mut self) -> Result<(), EngineError> {
        if self.stage != HandStage::Ante {
            return Err(EngineError::Internal("блайнды уже поставлены"));
        }
        let n = self.players.len();
        let (sb_seat, bb_seat) = positions::blind_seats(self.button, n);

        match self.stakes.ante_type {
            AnteType::None => {}
            AnteType::Classic => {
                for seat in positions::seats_from(sb_seat, n) {
                    let paid = self.players[seat].post_ante(self.stakes.ante);
                    self.commit(seat, ActionKind::Ante, paid);
                }
            }
            AnteType::BigBlind => {
                // Большой блайнд платит анте за весь стол, до блайнда.
                let paid = self.players[bb_seat].post_ante(self.stakes.ante);
                self.commit(bb_seat, ActionKind::Ante, paid);
            }
        }

        let sb_paid = self.players[sb_seat].pay(self.stakes.small_blind);
        self.commit(sb_seat, ActionKind::SmallBlind, sb_paid);
        let bb_paid = self.players[bb_seat].pay(self.stakes.big_blind);
        self.commit(bb_seat, ActionKind::BigBlind, bb_paid);

        self.deal_hole_cards()?;

        // Префлоп: уравнивать нужно полный BB, даже если сам BB встал
        // в олл-ин на меньшее; минимальный рейз — размер BB.
        self.stage = HandStage::Street(Street::PreFlop);
        self.history.push(HandEventKind::StageChanged { stage: self.stage });
        let ring = positions::preflop_ring(self.button, n);
        let mut round = BettingRound::new(
            Street::PreFlop,
            self.stakes.big_blind,
            self.stakes.big_blind,
            ring,
            &self.players,
        );
        round.last_aggressor = Some(bb_seat);
        self.betting = Some(round);

        debug!(
            "раздача {}: баттон {}, SB {} ({}), BB {} ({})",
            self.hand_id, self.button, sb_seat, sb_paid, bb_seat, bb_paid
        );
        Ok(())
    }

    /// Чей сейчас ход (если торговля идёт).
    pub fn current_actor(&self) -> Option<SeatIndex> {
        self.betting.as_ref().and_then(|r| r.current_actor())
    }

    /// Срез раздачи для агента на месте `hero`.
    pub fn snapshot_for(&self, hero: SeatIndex) -> Result<HandSnapshot, EngineError> {
        let round = self
            .betting
            .as_ref()
            .ok_or(EngineError::Internal("срез доступен только во время торговли"))?;
        let player = self
            .players
            .get(hero)
            .ok_or(EngineError::InvalidSeat(hero))?;

        let n = self.players.len();
        let position = |seat: SeatIndex| (seat + n - self.button) % n;
        let cost_to_match = round.cost_to_match(player);

        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| PlayerView {
                player_id: p.player_id,
                name: p.name.clone(),
                seat,
                position: position(seat),
                stack: p.stack,
                status: p.status,
                current_bet: p.current_bet,
                total_bet: p.total_bet,
            })
            .collect();

        Ok(HandSnapshot {
            hand_id: self.hand_id,
            current_stage: round.street,
            hole_cards: player.hole_cards.clone(),
            community_cards: self.board.clone(),
            small_blind: self.stakes.small_blind,
            big_blind: self.stakes.big_blind,
            ante: self.stakes.ante,
            bet_to_match: round.bet_to_match,
            cost_to_match,
            min_cost_to_increase: round.min_cost_to_increase(player),
            pots: self.pots.compute_pots(&self.players)?,
            players,
            your_status: HeroView {
                player_id: player.player_id,
                seat: hero,
                position: position(hero),
                stack: player.stack,
                status: player.status,
                current_bet: player.current_bet,
                total_bet: player.total_bet,
                can_raise: player.stack > cost_to_match,
            },
            hand_log: self.history.action_log(),
        })
    }

    /// Применить действие игрока `seat` и продвинуть автомат раздачи.
    pub fn apply(
        &mut self,
        seat: SeatIndex,
        action: AgentAction,
        oracle: &dyn RankOracle,
    ) -> Result<HandProgress, EngineError> {
        match self.stage {
            HandStage::Street(_) => {}
            HandStage::Settled => return Err(EngineError::HandAlreadySettled),
            _ => return Err(EngineError::Internal("торговля сейчас не идёт")),
        }
        let round = self
            .betting
            .as_mut()
            .ok_or(EngineError::Internal("нет активного раунда торговли"))?;

        let applied = round.apply(&mut self.players, seat, action)?;
        self.pots.contribute(seat, applied.paid);
        if applied.kind == ActionKind::Fold {
            self.pots.mark_folded(seat);
        }
        self.log_action(seat, applied.kind, applied.paid);
        debug!(
            "раздача {}: место {} {:?} на {} (банк {})",
            self.hand_id,
            seat,
            applied.kind,
            applied.paid,
            self.pots.total()
        );

        self.advance(oracle)
    }

    /// Прогнать раздачу от блайндов до расчёта, опрашивая агентов.
    ///
    /// `agents` идут в порядке мест. Нарушение правил торговли лечится
    /// принудительным фолдом; фатальные ошибки поднимаются наверх.
    pub fn run(
        &mut self,
        agents: &mut [&mut (dyn Agent + '_)],
        oracle: &dyn RankOracle,
    ) -> Result<HandOutcome, EngineError> {
        if agents.len() != self.players.len() {
            return Err(EngineError::Internal("число агентов не равно числу игроков"));
        }
        self.post_blinds()?;
        // Все могли встать в олл-ин уже на блайндах.
        if let HandProgress::Finished(outcome) = self.advance(oracle)? {
            return Ok(outcome);
        }

        loop {
            let seat = self
                .current_actor()
                .ok_or(EngineError::Internal("торговля застряла без ходящего"))?;
            let snapshot = self.snapshot_for(seat)?;
            let action = agents[seat].decide(&snapshot);

            let progress = match self.apply(seat, action, oracle) {
                Ok(progress) => progress,
                Err(err) if err.is_betting_violation() => {
                    warn!(
                        "раздача {}: негодный ответ агента {} на месте {seat} ({err}), принудительный фолд",
                        self.hand_id,
                        agents[seat].name()
                    );
                    self.apply(seat, AgentAction::Fold, oracle)?
                }
                Err(err) => return Err(err),
            };
            if let HandProgress::Finished(outcome) = progress {
                return Ok(outcome);
            }
        }
    }

    // ----- внутренняя механика -----

    fn draw(&mut self) -> Result<Card, EngineError> {
        self.deck.draw_one().ok_or(EngineError::DeckExhausted)
    }

    /// Вклад в банк с записью в журнал (принудительные взносы).
    fn commit(&mut self, seat: SeatIndex, kind: ActionKind, paid: Chips) {
        self.pots.contribute(seat, paid);
        self.log_action(seat, kind, paid);
    }

    fn log_action(&mut self, seat: SeatIndex, kind: ActionKind, paid: Chips) {
        self.history.push(HandEventKind::PlayerActed {
            player_id: self.players[seat].player_id,
            seat,
            kind,
            paid,
            stage: self.stage,
            new_stack: self.players[seat].stack,
            pot_after: self.pots.total(),
        });
    }

    /// По две карманные карты, по одной за проход, начиная с малого
    /// блайнда; баттон получает последним.
    fn deal_hole_cards(&mut self) -> Result<(), EngineError> {
        let order = positions::deal_order(self.button, self.players.len());
        for _ in 0..2 {
            for &seat in &order {
                let card = self.draw()?;
                self.players[seat].hole_cards.push(card);
                self.history.push(HandEventKind::HoleCardsDealt {
                    seat,
                    cards: vec![card],
                });
            }
        }
        Ok(())
    }

    fn in_hand_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_in_hand()).count()
    }

    fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Двигает автомат, пока есть что двигать: ранний выход при победе
    /// фолдами, переход улиц, лок-ап с добором борда, шоудаун.
    fn advance(&mut self, oracle: &dyn RankOracle) -> Result<HandProgress, EngineError> {
        loop {
            if self.in_hand_count() == 1 {
                let outcome = self.settle(oracle, false)?;
                return Ok(HandProgress::Finished(outcome));
            }

            let round = self
                .betting
                .as_ref()
                .ok_or(EngineError::Internal("автомат без раунда торговли"))?;
            if !round.is_complete() {
                return Ok(HandProgress::Ongoing);
            }
            let street = round.street;

            if self.active_count() < 2 {
                // Лок-ап: ставить больше некому, добираем борд и вскрываемся.
                self.run_out_board(street)?;
                let outcome = self.settle(oracle, true)?;
                return Ok(HandProgress::Finished(outcome));
            }

            match street.next() {
                Some(next) => self.begin_street(next)?,
                None => {
                    let outcome = self.settle(oracle, true)?;
                    return Ok(HandProgress::Finished(outcome));
                }
            }
        }
    }

    /// Новая улица: сброс ставок раунда, карты борда, свежий раунд.
    /// Каждая улица начинается с нулевой ставки и min_raise = BB.
    fn begin_street(&mut self, street: Street) -> Result<(), EngineError> {
        for p in &mut self.players {
            p.current_bet = Chips::ZERO;
        }

        let mut cards = Vec::with_capacity(street.cards_to_deal());
        for _ in 0..street.cards_to_deal() {
            let card = self.draw()?;
            self.board.push(card);
            cards.push(card);
        }
        if !cards.is_empty() {
            self.history.push(HandEventKind::BoardDealt { street, cards });
        }

        self.stage = HandStage::Street(street);
        self.history.push(HandEventKind::StageChanged { stage: self.stage });

        let ring = positions::postflop_ring(self.button, self.players.len());
        self.betting = Some(BettingRound::new(
            street,
            Chips::ZERO,
            self.stakes.big_blind,
            ring,
            &self.players,
        ));
        Ok(())
    }

    /// Добор оставшихся карт борда при лок-апе: торговли больше нет,
    /// но все улицы открываются как обычно.
    fn run_out_board(&mut self, from: Street) -> Result<(), EngineError> {
        let mut street = from;
        while let Some(next) = street.next() {
            let mut cards = Vec::with_capacity(next.cards_to_deal());
            for _ in 0..next.cards_to_deal() {
                let card = self.draw()?;
                self.board.push(card);
                cards.push(card);
            }
            self.history.push(HandEventKind::BoardDealt {
                street: next,
                cards,
            });
            street = next;
        }
        Ok(())
    }

    /// Расчёт раздачи: раскладка потов, шоудаун (если есть кому
    /// вскрываться), выплаты и итоговый отчёт.
    ///
    /// При победе фолдами (`showdown == false`) карты не вскрываются и
    /// оракул не вызывается: каждый пот уходит единственному
    /// претенденту.
    fn settle(
        &mut self,
        oracle: &dyn RankOracle,
        showdown: bool,
    ) -> Result<HandOutcome, EngineError> {
        let n = self.players.len();
        let stage_reached = if showdown {
            self.stage = HandStage::Showdown;
            self.history.push(HandEventKind::StageChanged { stage: self.stage });
            HandStage::Showdown
        } else {
            self.stage
        };

        // Копилка обязана сходиться с тем, что списано со стеков.
        for (seat, p) in self.players.iter().enumerate() {
            if self.pots.contributed(seat) != p.total_bet {
                return Err(EngineError::InvariantViolation(format!(
                    "вклад места {seat} разошёлся со ставками игрока: {} против {}",
                    self.pots.contributed(seat),
                    p.total_bet
                )));
            }
        }

        // Ранги участников шоудауна: ровно один вызов оракула на игрока.
        let mut ranks: Vec<Option<HandRank>> = vec![None; n];
        if showdown {
            for seat in positions::seats_from((self.button + 1) % n, n) {
                let p = &self.players[seat];
                if !p.is_in_hand() {
                    continue;
                }
                let mut cards = p.hole_cards.clone();
                cards.extend_from_slice(&self.board);
                let rank = oracle.rank(&cards);
                ranks[seat] = Some(rank);
                self.history.push(HandEventKind::ShowdownReveal {
                    seat,
                    player_id: p.player_id,
                    hole_cards: p.hole_cards.clone(),
                    rank,
                });
            }
        }

        let pots = self.pots.compute_pots(&self.players)?;
        let total_pot = pots.iter().fold(Chips::ZERO, |acc, p| acc + p.amount);
        let awards = distribute_pots(&pots, &self.players, self.button, &ranks)?;

        let mut winnings: Vec<Chips> = vec![Chips::ZERO; n];
        let mut won_pot: Vec<bool> = vec![false; n];
        for award in &awards {
            for winner in &award.winners {
                let seat = self
                    .players
                    .iter()
                    .position(|p| p.player_id == winner.player_id)
                    .ok_or(EngineError::Internal("победитель пота не найден за столом"))?;
                self.players[seat].stack += winner.amount;
                winnings[seat] += winner.amount;
                won_pot[seat] = true;
                self.history.push(HandEventKind::PotAwarded {
                    seat,
                    player_id: winner.player_id,
                    amount: winner.amount,
                });
            }
        }

        let results: Vec<PlayerHandResult> = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| PlayerHandResult {
                player_id: p.player_id,
                revealed_cards: if showdown && p.is_in_hand() {
                    Some(p.hole_cards.clone())
                } else {
                    None
                },
                rank: ranks[seat],
                winnings: winnings[seat],
                stack_after: p.stack,
                delta: p.stack.0 as i64 - self.starting_stacks[seat].0 as i64,
                status: p.status,
                is_winner: won_pot[seat],
            })
            .collect();

        let balance: i64 = results.iter().map(|r| r.delta).sum();
        if balance != 0 {
            return Err(EngineError::InvariantViolation(format!(
                "фишки не сохранились: суммарная дельта {balance}"
            )));
        }

        self.stage = HandStage::Settled;
        self.betting = None;
        self.history.push(HandEventKind::HandFinished {
            hand_id: self.hand_id,
        });
        debug!(
            "раздача {}: завершена на стадии {stage_reached}, банк {total_pot}",
            self.hand_id
        );

        Ok(HandOutcome {
            hand_id: self.hand_id,
            stage_reached,
            board: self.board.clone(),
            total_pot,
            pots: awards,
            results,
            actions: self.history.action_log(),
        })
    }
}
