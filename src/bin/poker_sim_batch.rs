//! Серия игр для сбора статистики по стратегиям.
//!
//! На stdout уходит по одной JSON-строке на участника каждой игры
//! (game_id, seed, место, число раздач); прогресс и ошибки — на stderr.
//! Seed каждой игры выводится из seed серии, так что вся серия
//! воспроизводима одним числом:
//!
//!   poker_sim_batch --games 1000 --seed 7 > results.jsonl

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use poker_sim::agents;
use poker_sim::domain::chips::Chips;
use poker_sim::domain::PlayerId;
use poker_sim::eval::Evaluator;
use poker_sim::infra::GameSeed;
use poker_sim::tournament::{
    BlindEscalator, Entrant, GameConfig, HoldemEscalator, PokerGame, SurvivalEscalator,
};

#[derive(Parser, Debug)]
#[command(name = "poker_sim_batch", about = "Серия игр с JSON-отчётом на stdout")]
struct Args {
    /// Число игр в серии
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Seed серии; без него каждая игра получает случайный seed
    #[arg(long)]
    seed: Option<u64>,

    /// Состав стола: имена стратегий через запятую
    #[arg(long, default_value = "heuristic,caller,random,all-in")]
    agents: String,

    /// Стартовый стек каждого игрока
    #[arg(long, default_value_t = 3000)]
    stack: u64,

    /// Эскалатор блайндов: holdem | survival
    #[arg(long, default_value = "holdem")]
    escalator: String,

    /// Раздач на уровень блайндов (только для holdem)
    #[arg(long, default_value_t = 10)]
    hands_per_level: u64,

    /// Потолок раздач на игру
    #[arg(long, default_value_t = 10_000)]
    max_hands: u64,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let strategies: Vec<String> = args
        .agents
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if strategies.len() < 2 {
        eprintln!("нужно минимум две стратегии через запятую");
        return ExitCode::from(2);
    }
    for s in &strategies {
        if agents::by_name(s).is_none() {
            eprintln!(
                "неизвестная стратегия: {s} (доступны: {})",
                agents::STRATEGY_NAMES.join(", ")
            );
            return ExitCode::from(2);
        }
    }

    let batch_seed = args.seed.map(|s| GameSeed::generate(Some(s)));
    let oracle = Evaluator;

    for game_id in 0..args.games {
        let mut entrants: Vec<Entrant> = Vec::with_capacity(strategies.len());
        for (i, s) in strategies.iter().enumerate() {
            let Some(agent) = agents::by_name(s) else {
                eprintln!("неизвестная стратегия: {s}");
                return ExitCode::from(2);
            };
            entrants.push(Entrant::new(i as PlayerId, format!("{}-{}", s, i + 1), agent));
        }

        let escalator: Box<dyn BlindEscalator> = match args.escalator.as_str() {
            "holdem" => Box::new(HoldemEscalator::new(args.hands_per_level)),
            "survival" => Box::new(SurvivalEscalator::new(entrants.len())),
            other => {
                eprintln!("неизвестный эскалатор: {other} (ожидается holdem или survival)");
                return ExitCode::from(2);
            }
        };

        let config = GameConfig {
            starting_stack: Chips::new(args.stack),
            seed: batch_seed.map(|s| s.batch_game_seed(game_id)),
            max_hands: args.max_hands,
        };

        let mut game = match PokerGame::new(game_id, entrants, escalator, config) {
            Ok(g) => g,
            Err(e) => {
                error!("игра {game_id}: не собралась: {e}");
                return ExitCode::from(1);
            }
        };
        if let Err(e) = game.run_to_completion(&oracle) {
            error!("игра {game_id} (seed {}): сломалась: {e}", game.seed.0);
            return ExitCode::from(1);
        }

        for row in game.results() {
            match serde_json::to_string(&row) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    error!("игра {game_id}: строка отчёта не сериализовалась: {e}");
                    return ExitCode::from(1);
                }
            }
        }

        if (game_id + 1) % 100 == 0 {
            info!("сыграно игр: {}", game_id + 1);
        }
    }

    ExitCode::SUCCESS
}
