use core::fmt;

use crate::domain::card::Rank;
use crate::domain::hand::HandRank;

/// Категория покерной руки, от слабейшей к сильнейшей.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandRank {
    /// Упаковка категории и пяти рангов (от определяющего к кикерам)
    /// в один u32:
    ///
    ///   [категория:4][r0:4][r1:4][r2:4][r3:4][r4:4]
    ///
    /// Ранги 2..=14 помещаются в ниббл, поэтому числовое сравнение
    /// HandRank совпадает с покерным порядком рук.
    pub fn encode(category: HandCategory, ranks: [Rank; 5]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, r) in ranks.iter().enumerate() {
            value |= r.value() << (16 - 4 * i);
        }
        HandRank(value)
    }

    pub fn category(self) -> HandCategory {
        match (self.0 >> 20) & 0x0F {
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }

    /// Пять рангов в том порядке, в котором они были упакованы.
    pub fn ranks(self) -> [Rank; 5] {
        let nibble = |shift: u32| Rank::from_value(((self.0 >> shift) & 0x0F) as u8);
        [nibble(16), nibble(12), nibble(8), nibble(4), nibble(0)]
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandCategory::HighCard => "high card",
            HandCategory::OnePair => "one pair",
            HandCategory::TwoPair => "two pair",
            HandCategory::ThreeOfAKind => "three of a kind",
            HandCategory::Straight => "straight",
            HandCategory::Flush => "flush",
            HandCategory::FullHouse => "full house",
            HandCategory::FourOfAKind => "four of a kind",
            HandCategory::StraightFlush => "straight flush",
        };
        write!(f, "{name}")
    }
}
