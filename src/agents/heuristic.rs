use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::engine::snapshot::HandSnapshot;
use crate::engine::{Agent, AgentAction};

/// Турнирный агент на простых правилах: сила кармана, глубина стека,
/// позиция и шансы банка.
///
/// До 15 BB играет пуш-фолд, на средних стеках открывается по позиции,
/// на глубоких добавляет 3-беты и ставки по силе на постфлопе.
/// Никакого обучения: каждое решение читается из кода.
#[derive(Clone, Debug)]
pub struct HeuristicAgent {
    rng: StdRng,
}

impl HeuristicAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::seed_from_u64(0),
        }
    }

    fn decide_preflop(&mut self, snapshot: &HandSnapshot) -> AgentAction {
        let hero = &snapshot.your_status;
        let strength = preflop_strength(&snapshot.hole_cards);
        let effective_bb = hero.stack.0 as f64 / snapshot.big_blind.0.max(1) as f64;

        if effective_bb < 15.0 {
            return self.short_stack(snapshot, strength, effective_bb);
        }
        if effective_bb < 30.0 {
            self.mid_stack(snapshot, strength)
        } else {
            self.deep_stack(snapshot, strength)
        }
    }

    /// Короткий стек: диапазон пуша расширяется по мере утончения.
    fn short_stack(
        &mut self,
        snapshot: &HandSnapshot,
        strength: f64,
        effective_bb: f64,
    ) -> AgentAction {
        let hero = &snapshot.your_status;
        let shove_threshold = 0.55 - (15.0 - effective_bb) * 0.015;

        if strength >= shove_threshold && hero.can_raise {
            return AgentAction::Increase(hero.stack);
        }
        if snapshot.cost_to_match.is_zero() {
            return AgentAction::Match;
        }
        if strength >= shove_threshold - 0.05 {
            return AgentAction::Match;
        }
        AgentAction::Fold
    }

    fn mid_stack(&mut self, snapshot: &HandSnapshot, strength: f64) -> AgentAction {
        let hero = &snapshot.your_status;
        let open_threshold = 0.45 - hero.position as f64 * 0.015;

        if snapshot.cost_to_match.is_zero() {
            if strength >= open_threshold && hero.can_raise {
                let target = Chips::new(snapshot.big_blind.0 * 22 / 10);
                return AgentAction::Increase(clamp_increase(target, snapshot));
            }
            return AgentAction::Match;
        }
        // Против рейза: либо пуш с премиумом, либо колл, либо пас.
        if strength >= 0.65 && hero.can_raise {
            return AgentAction::Increase(hero.stack);
        }
        if strength >= open_threshold {
            return AgentAction::Match;
        }
        AgentAction::Fold
    }

    fn deep_stack(&mut self, snapshot: &HandSnapshot, strength: f64) -> AgentAction {
        let hero = &snapshot.your_status;
        let open_threshold = 0.40 - hero.position as f64 * 0.02;

        if snapshot.cost_to_match.is_zero() {
            if strength >= open_threshold && hero.can_raise {
                let target = Chips::new(snapshot.big_blind.0 * 5 / 2);
                return AgentAction::Increase(clamp_increase(target, snapshot));
            }
            return AgentAction::Match;
        }
        if strength >= 0.70 && hero.can_raise {
            let target = Chips::new(snapshot.cost_to_match.0 * 3).min(hero.stack);
            return AgentAction::Increase(clamp_increase(target, snapshot));
        }
        if strength >= open_threshold + 0.05 {
            return AgentAction::Match;
        }
        AgentAction::Fold
    }

    fn decide_postflop(&mut self, snapshot: &HandSnapshot) -> AgentAction {
        let hero = &snapshot.your_status;
        let strength = postflop_strength(&snapshot.hole_cards, &snapshot.community_cards);
        let pot: u64 = snapshot.pots.iter().map(|p| p.amount.0).sum();
        let cost = snapshot.cost_to_match;
        let pot_odds = if cost.is_zero() {
            0.0
        } else {
            cost.0 as f64 / (pot + cost.0) as f64
        };

        // Сильная готовая рука: ставим три четверти банка.
        if strength > 0.80 && hero.can_raise {
            let target = Chips::new(pot * 3 / 4).min(hero.stack);
            return AgentAction::Increase(clamp_increase(target, snapshot));
        }

        // Средняя рука: изредка тонкая ставка, иначе играем от шансов.
        if strength > 0.55 {
            if cost.is_zero() {
                if hero.can_raise && self.rng.gen_bool(0.4) {
                    let target = Chips::new(pot / 2);
                    return AgentAction::Increase(clamp_increase(target, snapshot));
                }
                return AgentAction::Match;
            }
            if strength > pot_odds {
                return AgentAction::Match;
            }
            return AgentAction::Fold;
        }

        // Дро: бесплатно смотрим, платим только по шансам.
        if strength > 0.35 {
            if cost.is_zero() {
                return AgentAction::Match;
            }
            if strength > pot_odds {
                return AgentAction::Match;
            }
        }
        AgentAction::Fold
    }
}

impl Default for HeuristicAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for HeuristicAgent {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn decide(&mut self, snapshot: &HandSnapshot) -> AgentAction {
        if snapshot.current_stage == Street::PreFlop {
            self.decide_preflop(snapshot)
        } else {
            self.decide_postflop(snapshot)
        }
    }
}

/// Желаемый размер ставки, поднятый до минимально легального и
/// прижатый к стеку (олл-ин короче минимума легален).
fn clamp_increase(target: Chips, snapshot: &HandSnapshot) -> Chips {
    target
        .max(snapshot.min_cost_to_increase)
        .min(snapshot.your_status.stack)
}

/// Нормированная сила кармана [0, 1]: пары, старшинство, одномастность
/// и связность.
fn preflop_strength(hole: &[Card]) -> f64 {
    let (a, b) = match hole {
        [a, b] => (a, b),
        _ => return 0.0,
    };
    let r1 = (a.rank.value() - 2) as f64;
    let r2 = (b.rank.value() - 2) as f64;
    let high = r1.max(r2);
    let low = r1.min(r2);

    if a.rank == b.rank {
        return 0.6 + high / 12.0 * 0.4;
    }
    let mut strength = high / 12.0 * 0.6 + low / 12.0 * 0.2;
    if a.suit == b.suit {
        strength += 0.05;
    }
    if (r1 - r2).abs() == 1.0 {
        strength += 0.05;
    }
    strength.min(1.0)
}

/// Грубая сила на постфлопе: сеты и старше, две пары, пара,
/// флеш-дро, оверкарта.
fn postflop_strength(hole: &[Card], board: &[Card]) -> f64 {
    let mut counts = [0u8; 13];
    let mut suits = [0u8; 4];
    for card in hole.iter().chain(board) {
        counts[(card.rank.value() - 2) as usize] += 1;
        suits[card.suit as usize] += 1;
    }

    if counts.iter().any(|&c| c >= 3) {
        return 0.9;
    }
    let pairs = counts.iter().filter(|&&c| c == 2).count();
    if pairs >= 2 {
        return 0.8;
    }
    if pairs == 1 {
        return 0.6;
    }
    if suits.iter().any(|&c| c >= 4) {
        return 0.5;
    }

    let hole_max = hole.iter().map(|c| c.rank).max();
    let board_max = board.iter().map(|c| c.rank).max();
    if let (Some(h), Some(b)) = (hole_max, board_max) {
        if h > b {
            return 0.45;
        }
    }
    0.2
}
