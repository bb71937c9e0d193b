// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator goes through all five cards subsets of a 5, 6, or 7 cards
//! hand, classifies each subset in one of the nine [HandRank] categories and
//! keeps the subset with the highest composite strength, so that two hands
//! can be compared by their [HandValue] alone.
//!
//! ```
//! # use showdown_eval::*;
//! let hero = parse_hand("AhAs").unwrap();
//! let board = parse_board("AdAc2h3s4d").unwrap();
//! let cards = [hero, board].concat();
//!
//! let value = HandValue::eval(&cards).unwrap();
//! assert_eq!(value.rank(), HandRank::FourOfAKind);
//! assert_eq!(get_hand_name(&value), "Four of a Kind");
//! ```
use std::cmp::Ordering;

use showdown_cards::Card;

mod value;
pub use value::{EvalError, HandRank, HandValue};

/// Returns the display name of the hand category.
pub fn get_hand_name(value: &HandValue) -> &'static str {
    value.rank().name()
}

/// Compares two hole cards hands sharing the same board, returns
/// [Ordering::Greater] if the first hand wins.
pub fn compare_hands(hero: &[Card], villain: &[Card], board: &[Card]) -> Result<Ordering, EvalError> {
    let hero = HandValue::eval(&[hero, board].concat())?;
    let villain = HandValue::eval(&[villain, board].concat())?;
    Ok(hero.cmp(&villain))
}
