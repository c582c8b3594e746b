//! Тесты полного прогона раздачи для poker-sim.
//!
//! Раздачи гоняются через `HandEngine::run` с агентами по сценарию.
//! Проверяем:
//! - шоудаун после чеков по всем улицам, сохранение фишек;
//! - победу фолдами: оракул не вызывается, карты не вскрываются;
//! - ровно один вызов оракула на участника шоудауна;
//! - лок-ап олл-инов с добором борда без торговли;
//! - сайд-пот при недоколле коротким стеком;
//! - принудительный фолд на негодный ответ агента;
//! - сплит пота при равных рангах.

use std::cell::RefCell;
use std::collections::VecDeque;

use poker_sim::domain::{
    blinds::Stakes,
    card::Card,
    chips::Chips,
    hand::{HandRank, HandStage, Street},
    player::HandPlayer,
};
use poker_sim::engine::{
    ActionKind, Agent, AgentAction, EngineError, HandEngine, HandOutcome, HandSnapshot,
    RankOracle,
};
use poker_sim::eval::{best_five, Evaluator};
use poker_sim::infra::DeterministicRng;

const TEST_STACK: u64 = 10_000;

/// Агент по сценарию: выдаёт заготовленные ходы, дальше только коллирует.
struct ScriptedAgent {
    plan: VecDeque<AgentAction>,
}

impl ScriptedAgent {
    fn new(plan: &[AgentAction]) -> Self {
        Self {
            plan: plan.iter().copied().collect(),
        }
    }

    /// Агент без сценария: чек/колл на каждом ходу.
    fn passive() -> Self {
        Self::new(&[])
    }
}

impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        "scripted"
    }

    fn decide(&mut self, _snapshot: &HandSnapshot) -> AgentAction {
        self.plan.pop_front().unwrap_or(AgentAction::Match)
    }
}

/// Оракул, который падает при первом же обращении: для проверки,
/// что победа фолдами обходится без оценки рук.
struct PanicOracle;

impl RankOracle for PanicOracle {
    fn rank(&self, _cards: &[Card]) -> HandRank {
        panic!("оракул не должен вызываться при победе фолдами");
    }
}

/// Оракул-счётчик поверх честного оценщика.
struct CountingOracle {
    calls: RefCell<usize>,
}

impl CountingOracle {
    fn new() -> Self {
        Self {
            calls: RefCell::new(0),
        }
    }
}

impl RankOracle for CountingOracle {
    fn rank(&self, cards: &[Card]) -> HandRank {
        *self.calls.borrow_mut() += 1;
        best_five(cards)
    }
}

/// Оракул, которому все руки равны: гарантированный сплит.
struct FlatOracle;

impl RankOracle for FlatOracle {
    fn rank(&self, _cards: &[Card]) -> HandRank {
        HandRank(1)
    }
}

/// Утилита: раздача на игроков с заданными стеками, блайнды 50/100.
fn make_engine(stacks: &[u64], seed: u64) -> HandEngine {
    let players: Vec<HandPlayer> = stacks
        .iter()
        .enumerate()
        .map(|(i, &s)| HandPlayer::new(i as u64 + 1, format!("p{}", i + 1), Chips::new(s)))
        .collect();
    let mut rng = DeterministicRng::from_seed(seed);
    HandEngine::new(0, Stakes::new(Chips(50), Chips(100)), 0, players, &mut rng)
        .expect("раздача должна создаться")
}

/// Утилита: прогнать раздачу с данными агентами.
fn run_hand(engine: &mut HandEngine, agents: &mut [ScriptedAgent], oracle: &dyn RankOracle) -> HandOutcome {
    let mut refs: Vec<&mut dyn Agent> = agents.iter_mut().map(|a| a as &mut dyn Agent).collect();
    engine.run(&mut refs, oracle).expect("раздача должна доиграться")
}

//
// ====================== ШОУДАУН И СОХРАНЕНИЕ ФИШЕК ======================
//

/// Все чекают до вскрытия: полный борд, банк равен трём большим
/// блайндам, суммарная дельта нулевая, участники вскрыты с рангами.
#[test]
fn check_down_hand_reaches_showdown_and_conserves_chips() {
    let mut engine = make_engine(&[TEST_STACK; 3], 11);
    let mut agents = [
        ScriptedAgent::passive(),
        ScriptedAgent::passive(),
        ScriptedAgent::passive(),
    ];

    let outcome = run_hand(&mut engine, &mut agents, &Evaluator);

    assert_eq!(outcome.stage_reached, HandStage::Showdown);
    assert_eq!(outcome.board.len(), 5);
    assert_eq!(outcome.total_pot, Chips(300));

    let delta_sum: i64 = outcome.results.iter().map(|r| r.delta).sum();
    assert_eq!(delta_sum, 0, "Фишки должны сохраниться");

    let winnings: u64 = outcome.results.iter().map(|r| r.winnings.0).sum();
    assert_eq!(winnings, 300, "Весь банк должен быть роздан");

    for r in &outcome.results {
        assert!(r.revealed_cards.is_some(), "На шоудауне вскрываются все дошедшие");
        assert!(r.rank.is_some());
    }
    assert!(outcome.results.iter().any(|r| r.is_winner));
}

/// Журнал раздачи начинается с принудительных взносов и покрывает
/// каждую улицу, на которой были ходы.
#[test]
fn outcome_log_covers_blinds_and_all_streets() {
    let mut engine = make_engine(&[TEST_STACK; 3], 11);
    let mut agents = [
        ScriptedAgent::passive(),
        ScriptedAgent::passive(),
        ScriptedAgent::passive(),
    ];

    let outcome = run_hand(&mut engine, &mut agents, &Evaluator);

    assert_eq!(outcome.actions[0].kind, ActionKind::SmallBlind);
    assert_eq!(outcome.actions[1].kind, ActionKind::BigBlind);
    for street in [Street::PreFlop, Street::Flop, Street::Turn, Street::River] {
        assert!(
            outcome
                .actions
                .iter()
                .any(|a| a.stage == HandStage::Street(street)),
            "В журнале нет ходов улицы {street}"
        );
    }
}

//
// ====================== ПОБЕДА ФОЛДАМИ ======================
//

/// Хедз-ап, баттон фолдит первым же ходом: большой блайнд забирает
/// блайнды, оракул не вызывается вовсе, никто не вскрывается.
#[test]
fn fold_win_skips_oracle_and_reveals_nothing() {
    let mut engine = make_engine(&[TEST_STACK, TEST_STACK], 13);
    let mut agents = [
        ScriptedAgent::new(&[AgentAction::Fold]),
        ScriptedAgent::passive(),
    ];

    let outcome = run_hand(&mut engine, &mut agents, &PanicOracle);

    assert_eq!(outcome.stage_reached, HandStage::Street(Street::PreFlop));
    assert_eq!(outcome.total_pot, Chips(150));
    for r in &outcome.results {
        assert!(r.revealed_cards.is_none());
        assert!(r.rank.is_none());
    }
    assert_eq!(outcome.results[1].winnings, Chips(150));
    assert_eq!(outcome.results[1].delta, 50);
    assert_eq!(outcome.results[0].delta, -50, "Баттон теряет малый блайнд");
}

/// Оракул вызывается ровно один раз на каждого участника шоудауна;
/// сфолдившие не оцениваются.
#[test]
fn oracle_called_once_per_showdown_participant() {
    let mut engine = make_engine(&[TEST_STACK; 3], 17);
    // Первый ходящий фолдит, двое доигрывают до вскрытия чеками.
    let mut agents = [
        ScriptedAgent::new(&[AgentAction::Fold]),
        ScriptedAgent::passive(),
        ScriptedAgent::passive(),
    ];
    let oracle = CountingOracle::new();

    let outcome = run_hand(&mut engine, &mut agents, &oracle);

    assert_eq!(outcome.stage_reached, HandStage::Showdown);
    assert_eq!(*oracle.calls.borrow(), 2, "Оценок должно быть по числу вскрывшихся");
    let revealed = outcome
        .results
        .iter()
        .filter(|r| r.revealed_cards.is_some())
        .count();
    assert_eq!(revealed, 2);
}

//
// ====================== ОЛЛ-ИНЫ И САЙД-ПОТЫ ======================
//

/// Все в олл-ине уже на префлопе: торговли дальше нет, борд добирается
/// до пяти карт, единый пот разыгрывается на вскрытии.
#[test]
fn preflop_all_in_lockup_runs_out_the_board() {
    let mut engine = make_engine(&[1000, 1000, 1000], 19);
    let mut agents = [
        ScriptedAgent::new(&[AgentAction::Increase(Chips(1000))]),
        ScriptedAgent::passive(),
        ScriptedAgent::passive(),
    ];

    let outcome = run_hand(&mut engine, &mut agents, &Evaluator);

    assert_eq!(outcome.stage_reached, HandStage::Showdown);
    assert_eq!(outcome.board.len(), 5, "Борд добирается без торговли");
    assert_eq!(outcome.total_pot, Chips(3000));
    assert_eq!(outcome.pots.len(), 1, "Равные вклады — один пот");

    let delta_sum: i64 = outcome.results.iter().map(|r| r.delta).sum();
    assert_eq!(delta_sum, 0);
}

/// Короткий стек коллирует олл-ином меньше ставки: образуется главный
/// пот на троих и сайд-пот на двоих.
#[test]
fn short_stack_under_call_builds_a_side_pot() {
    // Место 1 — малый блайнд с коротким стеком 300.
    let mut engine = make_engine(&[1000, 300, 1000], 23);
    let mut agents = [
        ScriptedAgent::new(&[AgentAction::Increase(Chips(600))]),
        ScriptedAgent::passive(),
        ScriptedAgent::passive(),
    ];

    let outcome = run_hand(&mut engine, &mut agents, &Evaluator);

    assert_eq!(outcome.stage_reached, HandStage::Showdown);
    assert_eq!(outcome.total_pot, Chips(600 + 300 + 600));
    assert_eq!(outcome.pots.len(), 2, "Главный пот и один сайд-пот");
    assert_eq!(outcome.pots[0].amount, Chips(900));
    assert_eq!(outcome.pots[0].eligible_players.len(), 3);
    assert_eq!(outcome.pots[1].amount, Chips(600));
    assert_eq!(outcome.pots[1].eligible_players, vec![1, 3], "Короткий стек не претендует");

    let delta_sum: i64 = outcome.results.iter().map(|r| r.delta).sum();
    assert_eq!(delta_sum, 0);
}

//
// ====================== НЕГОДНЫЕ ОТВЕТЫ АГЕНТА ======================
//

/// Рейз меньше минимума (и не олл-ин) — нарушение правил торговли:
/// движок лечит его принудительным фолдом, раздача не падает.
#[test]
fn illegal_raise_becomes_a_forced_fold() {
    let mut engine = make_engine(&[TEST_STACK, TEST_STACK], 29);
    let mut agents = [
        ScriptedAgent::new(&[AgentAction::Increase(Chips(1))]),
        ScriptedAgent::passive(),
    ];

    let outcome = run_hand(&mut engine, &mut agents, &PanicOracle);

    assert_eq!(outcome.stage_reached, HandStage::Street(Street::PreFlop));
    assert!(
        outcome
            .actions
            .iter()
            .any(|a| a.seat == 0 && a.kind == ActionKind::Fold),
        "В журнале должен остаться принудительный фолд баттона"
    );
    assert_eq!(outcome.results[1].winnings, Chips(150));
}

/// После расчёта раздача закрыта: любые действия отклоняются.
#[test]
fn settled_hand_rejects_further_actions() {
    let mut engine = make_engine(&[TEST_STACK, TEST_STACK], 31);
    let mut agents = [
        ScriptedAgent::new(&[AgentAction::Fold]),
        ScriptedAgent::passive(),
    ];
    run_hand(&mut engine, &mut agents, &PanicOracle);

    let err = engine
        .apply(0, AgentAction::Fold, &Evaluator)
        .expect_err("раздача уже рассчитана");
    assert!(matches!(err, EngineError::HandAlreadySettled));
}

//
// ====================== СПЛИТ ПОТА ======================
//

/// Оракул считает все руки равными: хедз-ап банк делится пополам,
/// оба числятся победителями, дельты нулевые.
#[test]
fn equal_ranks_split_the_pot() {
    let mut engine = make_engine(&[TEST_STACK, TEST_STACK], 37);
    let mut agents = [ScriptedAgent::passive(), ScriptedAgent::passive()];

    let outcome = run_hand(&mut engine, &mut agents, &FlatOracle);

    assert_eq!(outcome.stage_reached, HandStage::Showdown);
    assert_eq!(outcome.total_pot, Chips(200));
    assert_eq!(outcome.pots.len(), 1);
    assert_eq!(outcome.pots[0].winners.len(), 2);
    for r in &outcome.results {
        assert!(r.is_winner, "При сплите победители оба");
        assert_eq!(r.winnings, Chips(100));
        assert_eq!(r.delta, 0);
        assert_eq!(r.stack_after, Chips(TEST_STACK));
    }
}

//
// ====================== КЛАССИЧЕСКИЙ РОЗЫГРЫШ ======================
//

/// Один рейз и один колл: UTG ставит 60 на блайндах 10/20, остальные
/// пасуют, большой блайнд доплачивает 40. Банк 130 разыгрывают двое.
#[test]
fn single_raise_and_call_builds_expected_pot() {
    let players: Vec<HandPlayer> = (0..4)
        .map(|i| HandPlayer::new(i as u64 + 1, format!("p{}", i + 1), Chips::new(TEST_STACK)))
        .collect();
    let mut rng = DeterministicRng::from_seed(8);
    let mut engine = HandEngine::new(0, Stakes::new(Chips(10), Chips(20)), 0, players, &mut rng)
        .expect("раздача должна создаться");

    let mut agents = [
        ScriptedAgent::new(&[AgentAction::Fold]),
        ScriptedAgent::new(&[AgentAction::Fold]),
        ScriptedAgent::passive(),
        ScriptedAgent::new(&[AgentAction::Increase(Chips(60))]),
    ];
    let outcome = run_hand(&mut engine, &mut agents, &Evaluator);

    assert_eq!(outcome.total_pot, Chips(130), "Блайнды 10+20, рейз 60, доплата 40");
    assert_eq!(outcome.pots.len(), 1, "Слои с одинаковыми претендентами склеены");
    assert_eq!(outcome.pots[0].amount, Chips(130));
    assert_eq!(outcome.pots[0].eligible_players, vec![3, 4]);

    let revealed = outcome
        .results
        .iter()
        .filter(|r| r.revealed_cards.is_some())
        .count();
    assert_eq!(revealed, 2, "Вскрываются только дошедшие до шоудауна");

    let paid_out: u64 = outcome.results.iter().map(|r| r.winnings.0).sum();
    assert_eq!(paid_out, 130, "Банк уходит без остатка");
    assert_eq!(outcome.results.iter().map(|r| r.delta).sum::<i64>(), 0);
    for seat in [0usize, 1] {
        assert!(!outcome.results[seat].is_winner, "Сфолдившие не выигрывают");
        assert_eq!(outcome.results[seat].winnings, Chips::ZERO);
    }
}
