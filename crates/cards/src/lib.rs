// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker cards types.
//!
//! This crate define types to create and parse cards:
//!
//! ```
//! # use showdown_cards::{Card, Rank, Suit, parse_card, parse_hand};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! assert_eq!(parse_card("Ah"), Ok(ah));
//! assert_eq!(ah.to_string(), "Ah");
//!
//! let hand = parse_hand("AhKh").unwrap();
//! assert_eq!(hand.len(), 2);
//! ```
//!
//! and a [Deck] type for shuffling, removing, and iterating cards in the deck.
//!
//! For example to iterate through all 2 cards hands left after removing the
//! hero cards:
//!
//! ```
//! # use showdown_cards::{Deck, parse_hand};
//! let hero = parse_hand("AhAs").unwrap();
//! let mut counter = 0;
//! Deck::without(&hero).for_each(2, |hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 1_225);
//! ```
//!
//! The **`parallel`** feature enables parallel iteration and sampling with
//! a given number of tasks, the closure `task_id` can be used to store per
//! task data to reduce contention:
//!
//! ```
//! # #[cfg(feature = "parallel")]
//! # fn par_sample() {
//! # use std::{ops::ControlFlow, sync::atomic};
//! # use showdown_cards::{Deck, Sampling};
//! let counter = atomic::AtomicU64::new(0);
//! let sampling = Sampling { tasks: 4, samples: 40, seed: Some(1) };
//! Deck::default().par_sample(&sampling, 5, |task_id, hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter.fetch_add(1, atomic::Ordering::Relaxed);
//!     ControlFlow::Continue(())
//! });
//! assert_eq!(counter.load(atomic::Ordering::Relaxed), 40);
//! # }
//! # #[cfg(feature = "parallel")]
//! # par_sample();
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, Rank, Suit, create_deck, for_each_ksubset, nck, nth_ksubset, remove_cards};

#[cfg(feature = "parallel")]
pub use deck::Sampling;

mod parse;
pub use parse::{ParseError, card_to_string, parse_board, parse_card, parse_hand};
