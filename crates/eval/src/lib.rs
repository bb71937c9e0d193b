// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker hand evaluator and equity simulator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands and a Monte Carlo
//! simulator that estimates a hero hand equity against a villain hand
//! (see examples for measuring performance on your hardware).
//!
//! To use the evaluator create a hand and use [HandValue] to evaluate the hand
//! and get its rank:
//!
//! ```
//! # use showdown_eval::*;
//! let v1 = HandValue::eval(&parse_hand("2s3h5d7c9s").unwrap()).unwrap();
//! let v2 = HandValue::eval(&parse_hand("AsAhKdQcJs").unwrap()).unwrap();
//! assert!(v2 > v1);
//! assert_eq!(v2.rank(), HandRank::OnePair);
//! ```
//!
//! and [calculate_equity] to simulate runouts:
//!
//! ```
//! # use showdown_eval::*;
//! let hero = parse_hand("AhKh").unwrap();
//! let villain = parse_hand("QsQc").unwrap();
//! let board = parse_board("2h 7h Tc").unwrap();
//!
//! let res = calculate_equity(&hero, &villain, &board, 5_000).unwrap();
//! assert_eq!(res.iterations, 5_000);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod equity;
pub use equity::{
    EquityConfig, EquityError, EquityResult, calculate_equity, calculate_equity_with, exact_equity,
};

pub mod eval;
pub use eval::{EvalError, HandRank, HandValue, compare_hands, get_hand_name};

pub mod lookup;
pub use lookup::quick_equity_lookup;

pub mod pool;

pub mod request;
pub use request::EquityRequest;

// Reexport cards types.
pub use showdown_cards::{
    Card, Deck, ParseError, Rank, Suit, card_to_string, create_deck, parse_board, parse_card,
    parse_hand, remove_cards,
};
