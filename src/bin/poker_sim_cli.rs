//! Одна игра от рассадки до последнего живого стека, с построчным
//! отчётом по каждой раздаче.
//!
//! Примеры:
//!   poker_sim_cli --seed 42
//!   poker_sim_cli --agents heuristic,all-in,caller,random --stack 2000
//!   poker_sim_cli --escalator survival
//!
//! Подробные логи движка: RUST_LOG=debug poker_sim_cli ...

use std::collections::HashMap;
use std::process::ExitCode;

use clap::Parser;

use poker_sim::agents;
use poker_sim::domain::chips::Chips;
use poker_sim::domain::PlayerId;
use poker_sim::eval::Evaluator;
use poker_sim::tournament::{
    BlindEscalator, Entrant, GameConfig, HoldemEscalator, PokerGame, SurvivalEscalator,
};

#[derive(Parser, Debug)]
#[command(name = "poker_sim_cli", about = "Одна игра безлимитного холдема за одним столом")]
struct Args {
    /// Мастер-seed игры; без него берётся случайный
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

    let entrants = match build_entrants(&args.agents) {
        Ok(e) => e,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    };
    let names: HashMap<PlayerId, String> = entrants
        .iter()
        .map(|e| (e.player_id, e.name.clone()))
        .collect();

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
        seed: args.seed,
        max_hands: args.max_hands,
    };

    let mut game = match PokerGame::new(0, entrants, escalator, config) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("не удалось собрать игру: {e}");
            return ExitCode::from(2);
        }
    };
    println!("seed игры: {}", game.seed.0);

    let oracle = Evaluator;
    while !game.is_finished() && game.hand_count < args.max_hands {
        let outcome = match game.play_hand(&oracle) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("раздача сломалась: {e}");
                return ExitCode::from(1);
            }
        };

        let board: Vec<String> = outcome.board.iter().map(|c| c.to_string()).collect();
        let winners: Vec<String> = outcome
            .results
            .iter()
            .filter(|r| r.is_winner)
            .map(|r| {
                let name = names
                    .get(&r.player_id)
                    .map(String::as_str)
                    .unwrap_or("(?)");
                format!("{name} +{}", r.winnings)
            })
            .collect();
        println!(
            "раздача {:>4}: {} | борд [{}] | банк {} | {}",
            outcome.hand_id,
            outcome.stage_reached,
            board.join(" "),
            outcome.total_pot,
            winners.join(", ")
        );
    }

    println!();
    println!("=========== ИТОГИ ИГРЫ ===========");
    println!("раздач сыграно: {}", game.hand_count);
    for row in game.results() {
        println!(
            "{:>2}. {:<16} [{}] — раздач: {}",
            row.place, row.name, row.agent_name, row.hands_played
        );
    }
    println!("==================================");
    ExitCode::SUCCESS
}

/// Разобрать список стратегий вида "heuristic,caller,random".
fn build_entrants(spec: &str) -> Result<Vec<Entrant>, String> {
    let mut entrants = Vec::new();
    for (i, raw) in spec.split(',').enumerate() {
        let strategy = raw.trim();
        if strategy.is_empty() {
            continue;
        }
        let agent = agents::by_name(strategy).ok_or_else(|| {
            format!(
                "неизвестная стратегия: {strategy} (доступны: {})",
                agents::STRATEGY_NAMES.join(", ")
            )
        })?;
        let name = format!("{}-{}", strategy, i + 1);
        entrants.push(Entrant::new(i as PlayerId, name, agent));
    }
    if entrants.len() < 2 {
        return Err("нужно минимум две стратегии через запятую".into());
    }
    Ok(entrants)
}
