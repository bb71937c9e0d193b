// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand values and categories.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, hash};
use thiserror::Error;

use showdown_cards::{Card, Rank, for_each_ksubset, nck};

/// Weight of the hand category in the composite strength.
const CATEGORY_WEIGHT: u64 = 10_000_000_000;

/// Weight of each kicker position in the composite strength, 13^(4-i).
const KICKER_WEIGHTS: [u64; 5] = [28_561, 2_197, 169, 13, 1];

/// Hand evaluation errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// Only 5, 6, or 7 cards can be evaluated.
    #[error("Cannot evaluate {0} cards, expected 5 to 7 cards")]
    CardCount(usize),
    /// The same card appears more than once.
    #[error("Duplicate card {0}")]
    DuplicateCard(Card),
}

/// The hand category, from high card (1) to straight flush (9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard = 1,
    /// One pair.
    OnePair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
}

impl HandRank {
    /// Returns all categories from the lowest.
    pub fn ranks() -> impl DoubleEndedIterator<Item = HandRank> {
        use HandRank::*;
        [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
        ]
        .into_iter()
    }

    /// The category number, 1 for high card up to 9 for straight flush.
    pub fn category(&self) -> u8 {
        *self as u8
    }

    /// The category display name.
    pub fn name(&self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value of the best five cards hand.
///
/// Values are compared by their composite strength:
///
/// ```text
///   strength = category * 10^10 + sum(kicker[i] * 13^(4 - i))
/// ```
///
/// where kickers are the face values (2..=14) of the ranks ordered by count
/// and then by rank, and straights have a single kicker with their high card
/// (a five for the wheel).
#[derive(Clone, Copy)]
pub struct HandValue {
    rank: HandRank,
    kickers: [Rank; 5],
    num_kickers: u8,
    strength: u64,
    best: [Card; 5],
}

impl HandValue {
    /// Evaluates the best five cards hand out of 5, 6, or 7 cards.
    pub fn eval(cards: &[Card]) -> Result<Self, EvalError> {
        if !(5..=7).contains(&cards.len()) {
            return Err(EvalError::CardCount(cards.len()));
        }

        let mut mask = 0u64;
        for card in cards {
            if mask & card.mask() != 0 {
                return Err(EvalError::DuplicateCard(*card));
            }

            mask |= card.mask();
        }

        Ok(Self::best_of(cards))
    }

    /// Evaluates the best hand out of 5 to 7 distinct cards without checking.
    pub(crate) fn best_of(cards: &[Card]) -> Self {
        debug_assert!((5..=7).contains(&cards.len()));

        let mut best = Self::eval5([cards[0], cards[1], cards[2], cards[3], cards[4]]);
        if cards.len() == 5 {
            return best;
        }

        for_each_ksubset(cards.len(), 5, 1, nck(cards.len(), 5) - 1, |p| {
            let value = Self::eval5([cards[p[0]], cards[p[1]], cards[p[2]], cards[p[3]], cards[p[4]]]);
            if value.strength > best.strength {
                best = value;
            }
        });

        best
    }

    /// Evaluates exactly five cards.
    fn eval5(mut cards: [Card; 5]) -> Self {
        let mut counts = [0u8; 13];
        for card in &cards {
            counts[card.rank() as usize] += 1;
        }

        // Order by rank count and then by rank, this is also the kickers order.
        cards.sort_unstable_by(|a, b| {
            let (ra, rb) = (a.rank(), b.rank());
            counts[rb as usize]
                .cmp(&counts[ra as usize])
                .then(rb.cmp(&ra))
                .then(b.cmp(a))
        });

        let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
        let straight = straight_high(&cards);

        let mut groups = [0u8; 5];
        let mut kickers = [Rank::Deuce; 5];
        let mut num_kickers = 0;
        for card in &cards {
            let rank = card.rank();
            if num_kickers == 0 || kickers[num_kickers - 1] != rank {
                kickers[num_kickers] = rank;
                groups[num_kickers] = counts[rank as usize];
                num_kickers += 1;
            }
        }

        let rank = match (groups[0], groups[1]) {
            _ if is_flush && straight.is_some() => HandRank::StraightFlush,
            (4, _) => HandRank::FourOfAKind,
            (3, 2) => HandRank::FullHouse,
            _ if is_flush => HandRank::Flush,
            _ if straight.is_some() => HandRank::Straight,
            (3, _) => HandRank::ThreeOfAKind,
            (2, 2) => HandRank::TwoPair,
            (2, _) => HandRank::OnePair,
            _ => HandRank::HighCard,
        };

        if let Some(high) = straight {
            kickers[0] = high;
            num_kickers = 1;

            // Show the wheel ace as the lowest card.
            if high == Rank::Five {
                cards.rotate_left(1);
            }
        }

        let strength = kickers[..num_kickers]
            .iter()
            .zip(KICKER_WEIGHTS)
            .fold(rank.category() as u64 * CATEGORY_WEIGHT, |s, (k, w)| {
                s + k.value() as u64 * w
            });

        Self {
            rank,
            kickers,
            num_kickers: num_kickers as u8,
            strength,
            best: cards,
        }
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The ranks used to break ties within the same category.
    pub fn kickers(&self) -> &[Rank] {
        &self.kickers[..self.num_kickers as usize]
    }

    /// The composite strength, a greater strength is a better hand.
    pub fn strength(&self) -> u64 {
        self.strength
    }

    /// The five cards that make this hand.
    pub fn best_hand(&self) -> [Card; 5] {
        self.best
    }
}

/// Returns the straight high card for five cards sorted by rank descending.
fn straight_high(cards: &[Card; 5]) -> Option<Rank> {
    let ranks = cards.map(|c| c.rank() as u8);
    let distinct = ranks.windows(2).all(|w| w[0] != w[1]);
    if !distinct {
        return None;
    }

    if ranks[0] - ranks[4] == 4 {
        Some(cards[0].rank())
    } else if ranks == [12, 3, 2, 1, 0] {
        Some(Rank::Five)
    } else {
        None
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.strength == other.strength
    }
}

impl Eq for HandValue {}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.strength.cmp(&other.strength)
    }
}

impl hash::Hash for HandValue {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.strength.hash(state);
    }
}

impl fmt::Debug for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandValue")
            .field("rank", &self.rank)
            .field("kickers", &self.kickers())
            .field("strength", &self.strength)
            .field("best", &self.best)
            .finish()
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank)?;
        for card in &self.best {
            write!(f, " {card}")?;
        }

        Ok(())
    }
}
