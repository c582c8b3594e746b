//! Эскалация блайндов по ходу игры.
//!
//! Движок раздачи про уровни ничего не знает: он получает готовые
//! `Stakes`. Какими они будут — решает эскалатор перед каждой раздачей.

use crate::domain::blinds::{AnteType, Stakes};
use crate::domain::chips::Chips;

/// Расписание ставок.
pub trait BlindEscalator {
    /// Ставки раздачи номер `hands_played` (нумерация с нуля)
    /// при `alive` живых игроках.
    fn stakes_for(&self, hands_played: u64, alive: usize) -> Stakes;
}

/// Уровень: малый блайнд, большой блайнд, анте с большого блайнда.
type Level = (u64, u64, u64);

fn stakes_from_level((sb, bb, ante): Level) -> Stakes {
    if ante == 0 {
        Stakes::new(Chips::new(sb), Chips::new(bb))
    } else {
        Stakes::with_ante(
            Chips::new(sb),
            Chips::new(bb),
            Chips::new(ante),
            AnteType::BigBlind,
        )
    }
}

/// Турбо-структура NLHE: уровень растёт с числом сыгранных раздач.
/// Рассчитана на стартовые стеки 2000–3000 (100–150 BB).
#[derive(Clone, Debug)]
pub struct HoldemEscalator {
    pub hands_per_level: u64,
}

/// С четвёртого уровня включается анте с большого блайнда.
const HOLDEM_LEVELS: [Level; 16] = [
    (10, 20, 0),
    (15, 30, 0),
    (20, 40, 0),
    (25, 50, 50),
    (50, 100, 100),
    (75, 150, 150),
    (100, 200, 200),
    (150, 300, 300),
    (200, 400, 400),
    (300, 600, 600),
    (400, 800, 800),
    (500, 1000, 1000),
    (1000, 2000, 2000),
    (1500, 3000, 3000),
    (3000, 6000, 6000),
    (5000, 10000, 10000),
];

impl HoldemEscalator {
    pub fn new(hands_per_level: u64) -> Self {
        Self {
            hands_per_level: hands_per_level.max(1),
        }
    }
}

impl Default for HoldemEscalator {
    fn default() -> Self {
        Self::new(10)
    }
}

impl BlindEscalator for HoldemEscalator {
    fn stakes_for(&self, hands_played: u64, _alive: usize) -> Stakes {
        let level = (hands_played / self.hands_per_level) as usize;
        stakes_from_level(HOLDEM_LEVELS[level.min(HOLDEM_LEVELS.len() - 1)])
    }
}

/// Блайнды растут не со временем, а с выбываниями: чем меньше живых,
/// тем дороже сидеть за столом. Уровень поднимается на каждых двух
/// вылетевших.
#[derive(Clone, Debug)]
pub struct SurvivalEscalator {
    pub starting_players: usize,
}

const SURVIVAL_LEVELS: [Level; 5] = [
    (50, 100, 0),
    (100, 200, 200),
    (200, 400, 400),
    (500, 1000, 1000),
    (1000, 2000, 2000),
];

impl SurvivalEscalator {
    pub fn new(starting_players: usize) -> Self {
        Self { starting_players }
    }
}

impl BlindEscalator for SurvivalEscalator {
    fn stakes_for(&self, _hands_played: u64, alive: usize) -> Stakes {
        let eliminated = self.starting_players.saturating_sub(alive);
        let level = eliminated / 2;
        stakes_from_level(SURVIVAL_LEVELS[level.min(SURVIVAL_LEVELS.len() - 1)])
    }
}
