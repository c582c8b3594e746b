//! Оценщик силы рук: честный перебор пятикарточных комбинаций.
//!
//! Скорость здесь не узкое место (C(7,5) = 21 пятёрка на вскрытие),
//! поэтому никаких предрасчитанных таблиц — только битовая маска
//! рангов для поиска стрита.

use crate::domain::card::{Card, Rank};
use crate::domain::hand::HandRank;
use crate::engine::RankOracle;

use super::hand_rank::HandCategory;

/// Оракул по умолчанию. Без состояния: одна и та же рука всегда
/// получает один и тот же ранг.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator;

impl RankOracle for Evaluator {
    fn rank(&self, cards: &[Card]) -> HandRank {
        best_five(cards)
    }
}

/// Лучшая пятикарточная рука из 5–7 карт (карман плюс борд).
pub fn best_five(cards: &[Card]) -> HandRank {
    let n = cards.len();
    debug_assert!((5..=7).contains(&n), "оценщик ждёт от 5 до 7 карт");

    let mut best: Option<HandRank> = None;
    for mask in 0u32..(1 << n) {
        if mask.count_ones() != 5 {
            continue;
        }
        let mut five = [cards[0]; 5];
        let mut k = 0;
        for (i, card) in cards.iter().enumerate() {
            if mask & (1 << i) != 0 {
                five[k] = *card;
                k += 1;
            }
        }
        let score = score_five(&five);
        if best.map_or(true, |b| score > b) {
            best = Some(score);
        }
    }
    best.expect("оценщику нужно хотя бы пять карт")
}

/// Ранг ровно пяти карт.
fn score_five(five: &[Card; 5]) -> HandRank {
    let mut counts = [0u8; 13];
    let mut mask: u16 = 0;
    for card in five {
        let idx = (card.rank.value() - 2) as usize;
        counts[idx] += 1;
        mask |= 1 << idx;
    }

    let is_flush = five.iter().all(|c| c.suit == five[0].suit);
    let straight = straight_high(mask);

    if let Some(high) = straight {
        if is_flush {
            return HandRank::encode(HandCategory::StraightFlush, straight_ranks(high));
        }
    }

    // Группы рангов: сначала крупные, при равном размере — старшие.
    let mut groups: Vec<(u8, Rank)> = counts
        .iter()
        .enumerate()
        .filter(|(_, &c)| c > 0)
        .map(|(idx, &c)| (c, Rank::from_value(idx as u8 + 2)))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));

    let category = match (groups[0].0, groups.get(1).map(|g| g.0)) {
        (4, _) => HandCategory::FourOfAKind,
        (3, Some(2)) => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        _ if straight.is_some() => {
            let high = straight.unwrap_or(Rank::Five);
            return HandRank::encode(HandCategory::Straight, straight_ranks(high));
        }
        (3, _) => HandCategory::ThreeOfAKind,
        (2, Some(2)) => HandCategory::TwoPair,
        (2, _) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    // Ранги группами по убыванию: для каре это [Q Q Q Q K], для двух
    // пар [H H L L K] и так далее. Внутри категории такие массивы
    // сравниваются поэлементно ровно как нужно.
    let mut ranks = [Rank::Two; 5];
    let mut k = 0;
    for (count, rank) in groups {
        for _ in 0..count {
            ranks[k] = rank;
            k += 1;
        }
    }
    HandRank::encode(category, ranks)
}

/// Старшая карта стрита в маске рангов, если стрит есть.
/// Колесо A2345 считается стритом до пятёрки.
fn straight_high(mask: u16) -> Option<Rank> {
    for high in (6..=14u8).rev() {
        let window = 0b11111u16 << (high - 6);
        if mask & window == window {
            return Some(Rank::from_value(high));
        }
    }
    const WHEEL: u16 = (1 << 12) | 0b1111;
    if mask & WHEEL == WHEEL {
        return Some(Rank::Five);
    }
    None
}

/// Пять рангов стрита от старшего к младшему; в колесе туз уходит
/// в конец как единица.
fn straight_ranks(high: Rank) -> [Rank; 5] {
    if high == Rank::Five {
        return [Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace];
    }
    let top = high.value() as u8;
    [
        high,
        Rank::from_value(top - 1),
        Rank::from_value(top - 2),
        Rank::from_value(top - 3),
        Rank::from_value(top - 4),
    ]
}
