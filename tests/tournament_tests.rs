//! Тесты турнирного цикла для poker-sim.
//!
//! Проверяем:
//! - расписания блайндов (HoldemEscalator, SurvivalEscalator);
//! - воспроизводимость: один seed — одна игра до фишки;
//! - доигрывание до последнего живого стека и раздачу мест;
//! - потолок раздач с ранжированием выживших по стекам;
//! - отказы конструктора игры.

use poker_sim::agents;
use poker_sim::domain::{
    blinds::AnteType,
    chips::Chips,
};
use poker_sim::engine::EngineError;
use poker_sim::eval::Evaluator;
use poker_sim::tournament::{
    BlindEscalator, Entrant, GameConfig, HoldemEscalator, PokerGame, SurvivalEscalator,
};

/// Утилита: участники по именам стратегий, id = номер + 1.
fn entrants(specs: &[&str]) -> Vec<Entrant> {
    specs
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let agent = agents::by_name(s).expect("стратегия должна существовать");
            Entrant::new(i as u64 + 1, format!("{s}-{}", i + 1), agent)
        })
        .collect()
}

fn config(stack: u64, seed: u64) -> GameConfig {
    GameConfig {
        starting_stack: Chips::new(stack),
        seed: Some(seed),
        max_hands: 10_000,
    }
}

//
// ====================== ЭСКАЛАТОРЫ ======================
//

/// Уровень растёт каждые `hands_per_level` раздач; с четвёртого уровня
/// включается анте с большого блайнда; после последнего уровня — плато.
#[test]
fn holdem_escalator_steps_by_hands_played() {
    let esc = HoldemEscalator::new(10);

    let first = esc.stakes_for(0, 9);
    assert_eq!((first.small_blind, first.big_blind), (Chips(10), Chips(20)));
    assert_eq!(first.ante_type, AnteType::None);

    assert_eq!(esc.stakes_for(9, 9).big_blind, Chips(20), "Девятая раздача — ещё уровень 0");
    assert_eq!(esc.stakes_for(10, 9).big_blind, Chips(30), "Десятая — уровень 1");
    assert_eq!(esc.stakes_for(29, 9).big_blind, Chips(40));

    let with_ante = esc.stakes_for(30, 9);
    assert_eq!(with_ante.big_blind, Chips(50));
    assert_eq!(with_ante.ante, Chips(50), "С уровня 3 появляется анте");
    assert_eq!(with_ante.ante_type, AnteType::BigBlind);

    let cap = esc.stakes_for(1_000_000, 2);
    assert_eq!(cap.big_blind, Chips(10_000), "Выше последнего уровня не растём");
    assert_eq!(cap.ante, Chips(10_000));
}

/// Нулевой шаг уровней прижимается к единице.
#[test]
fn holdem_escalator_clamps_zero_step() {
    let esc = HoldemEscalator::new(0);
    assert_eq!(esc.stakes_for(1, 9).big_blind, Chips(30), "Шаг 0 считается как 1");
}

/// Уровень survival-эскалатора зависит не от времени, а от числа
/// вылетевших: на каждых двух выбывших — следующий уровень.
#[test]
fn survival_escalator_steps_by_eliminations() {
    let esc = SurvivalEscalator::new(6);

    assert_eq!(esc.stakes_for(500, 6).big_blind, Chips(100), "Никто не вылетел");
    assert_eq!(esc.stakes_for(0, 5).big_blind, Chips(100), "Один вылетевший — мало");
    assert_eq!(esc.stakes_for(0, 4).big_blind, Chips(200), "Два вылетевших — уровень 1");
    assert_eq!(esc.stakes_for(0, 4).ante, Chips(200));
    assert_eq!(esc.stakes_for(0, 3).big_blind, Chips(200));
    assert_eq!(esc.stakes_for(0, 2).big_blind, Chips(400), "Четыре вылетевших — уровень 2");

    // Живых больше, чем стартовало (не должно случаться, но и не падает).
    assert_eq!(esc.stakes_for(0, 9).big_blind, Chips(100));

    // Далеко за последним уровнем — плато.
    let esc = SurvivalEscalator::new(30);
    assert_eq!(esc.stakes_for(0, 1).big_blind, Chips(2000));
}

//
// ====================== ВОСПРОИЗВОДИМОСТЬ ======================
//

/// Один и тот же seed с теми же стратегиями даёт идентичные итоги:
/// места, числа раздач, всё до строки.
#[test]
fn same_seed_reproduces_identical_game() {
    let specs = ["heuristic", "caller", "random", "all-in"];

    let mut first = PokerGame::new(
        1,
        entrants(&specs),
        Box::new(HoldemEscalator::default()),
        config(2000, 42),
    )
    .expect("игра должна создаться");
    first.run_to_completion(&Evaluator).expect("игра должна доиграться");

    let mut second = PokerGame::new(
        1,
        entrants(&specs),
        Box::new(HoldemEscalator::default()),
        config(2000, 42),
    )
    .expect("игра должна создаться");
    second.run_to_completion(&Evaluator).expect("игра должна доиграться");

    assert_eq!(first.hand_count, second.hand_count);
    assert_eq!(first.results(), second.results(), "Повтор должен совпасть до строки");
}

/// Разные seed'ы дают разные игры.
#[test]
fn different_seeds_diverge() {
    let specs = ["heuristic", "caller", "random", "all-in"];
    let summarize = |seed: u64| {
        let mut game = PokerGame::new(
            1,
            entrants(&specs),
            Box::new(HoldemEscalator::default()),
            config(2000, seed),
        )
        .expect("игра должна создаться");
        game.run_to_completion(&Evaluator).expect("игра должна доиграться");
        (
            game.hand_count,
            game.results()
                .into_iter()
                .map(|r| (r.player_id, r.place, r.hands_played))
                .collect::<Vec<_>>(),
        )
    };

    assert_ne!(summarize(1), summarize(2), "Другой seed — другая игра");
}

//
// ====================== ДОИГРЫВАНИЕ И МЕСТА ======================
//

/// Стол олл-инщиков доигрывается быстро; каждый получает уникальное
/// место, победитель — первое.
#[test]
fn all_in_table_plays_to_single_survivor() {
    let mut game = PokerGame::new(
        7,
        entrants(&["all-in", "all-in", "all-in"]),
        Box::new(HoldemEscalator::default()),
        config(1000, 5),
    )
    .expect("игра должна создаться");
    game.run_to_completion(&Evaluator).expect("игра должна доиграться");

    assert!(game.is_finished(), "Живым должен остаться максимум один");

    let rows = game.results();
    assert_eq!(rows.len(), 3);
    let places: Vec<u32> = rows.iter().map(|r| r.place).collect();
    assert_eq!(places, vec![1, 2, 3], "Итоги отсортированы по местам");

    for row in &rows {
        assert_eq!(row.game_id, 7);
        assert_eq!(row.game_seed, game.seed.0);
        assert_eq!(row.agent_name, "all-in");
        assert!(row.hands_played >= 1);
    }
}

/// Потолок раздач: игра обрывается, выжившие ранжируются по стекам,
/// места остаются уникальными.
#[test]
fn capped_game_ranks_survivors_by_stack() {
    let mut game = PokerGame::new(
        2,
        entrants(&["caller", "caller", "caller", "caller"]),
        Box::new(HoldemEscalator::default()),
        GameConfig {
            starting_stack: Chips::new(3000),
            seed: Some(9),
            max_hands: 1,
        },
    )
    .expect("игра должна создаться");
    game.run_to_completion(&Evaluator).expect("игра должна доиграться");

    assert_eq!(game.hand_count, 1, "Сыграна ровно одна раздача");

    let rows = game.results();
    let mut places: Vec<u32> = rows.iter().map(|r| r.place).collect();
    places.sort_unstable();
    assert_eq!(places, vec![1, 2, 3, 4], "Места уникальны даже без вылетов");
    for row in &rows {
        assert_eq!(row.hands_played, 1);
    }
}

/// Одна раздача: фишки стола сохраняются, счётчик раздач растёт.
#[test]
fn play_hand_conserves_table_chips() {
    let mut game = PokerGame::new(
        3,
        entrants(&["caller", "caller", "caller", "caller"]),
        Box::new(HoldemEscalator::default()),
        config(3000, 11),
    )
    .expect("игра должна создаться");

    let outcome = game.play_hand(&Evaluator).expect("раздача должна доиграться");

    let total_after: u64 = outcome.results.iter().map(|r| r.stack_after.0).sum();
    assert_eq!(total_after, 4 * 3000, "Фишки не появляются и не исчезают");
    assert_eq!(game.hand_count, 1);
    assert!(!game.is_finished());
}

//
// ====================== ОТКАЗЫ КОНСТРУКТОРА ======================
//

/// Игра на одного не собирается.
#[test]
fn single_entrant_is_rejected() {
    let err = PokerGame::new(
        0,
        entrants(&["caller"]),
        Box::new(HoldemEscalator::default()),
        config(3000, 1),
    )
    .err()
    .expect("одного участника мало");

    assert!(matches!(err, EngineError::NotEnoughPlayers));
}

/// Повторяющиеся player_id отклоняются.
#[test]
fn duplicate_player_ids_are_rejected() {
    let dup = vec![
        Entrant::new(1, "a", agents::by_name("caller").expect("есть такая стратегия")),
        Entrant::new(1, "b", agents::by_name("caller").expect("есть такая стратегия")),
    ];
    let err = PokerGame::new(0, dup, Box::new(HoldemEscalator::default()), config(3000, 1))
        .err()
        .expect("дубль id должен отклоняться");

    assert!(matches!(err, EngineError::Internal(_)));
}

/// Нулевой стартовый стек отклоняется.
#[test]
fn zero_starting_stack_is_rejected() {
    let err = PokerGame::new(
        0,
        entrants(&["caller", "caller"]),
        Box::new(HoldemEscalator::default()),
        config(0, 1),
    )
    .err()
    .expect("нулевой стек недопустим");

    assert!(matches!(err, EngineError::Internal(_)));
}
