// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards notation parsing.
//!
//! A card is written as a rank symbol (`2`-`9`, `T`, `J`, `Q`, `K`, `A`)
//! followed by a suit symbol (`s`, `h`, `d`, `c`), both case insensitive,
//! and hands and boards are written as consecutive cards, `"AhKh"`.
use std::str::FromStr;
use thiserror::Error;

use crate::{Card, Rank, Suit};

/// Cards notation parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A card must have exactly two symbols.
    #[error("Invalid card length for '{0}', expected 2 characters")]
    CardLength(String),
    /// The rank symbol is not valid.
    #[error("Invalid rank '{0}'")]
    InvalidRank(char),
    /// The suit symbol is not valid.
    #[error("Invalid suit '{0}'")]
    InvalidSuit(char),
    /// A hand needs at least two cards and an even number of symbols.
    #[error("Invalid hand length {0}, expected an even number >= 4")]
    HandLength(usize),
    /// A board needs an even number of symbols.
    #[error("Invalid board length {0}, expected an even number")]
    BoardLength(usize),
    /// A card index must be in `0..52`.
    #[error("Invalid card index {0}, expected 0..52")]
    CardIndex(u8),
}

impl FromStr for Card {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => parse_symbols(r, s),
            _ => Err(ParseError::CardLength(s.to_string())),
        }
    }
}

fn parse_symbols(rank: char, suit: char) -> Result<Card, ParseError> {
    let rank = Rank::from_symbol(rank).ok_or(ParseError::InvalidRank(rank))?;
    let suit = Suit::from_symbol(suit).ok_or(ParseError::InvalidSuit(suit))?;
    Ok(Card::new(rank, suit))
}

fn parse_chunks(symbols: &[char]) -> Result<Vec<Card>, ParseError> {
    symbols
        .chunks_exact(2)
        .map(|pair| parse_symbols(pair[0], pair[1]))
        .collect()
}

/// Parses a card like `"Ah"` or `"td"`.
///
/// ```
/// # use showdown_cards::*;
/// assert_eq!(parse_card("Ah"), Ok(Card::new(Rank::Ace, Suit::Hearts)));
/// assert!(parse_card("1h").is_err());
/// ```
pub fn parse_card(text: &str) -> Result<Card, ParseError> {
    text.parse()
}

/// Formats a card with an uppercase rank and a lowercase suit.
pub fn card_to_string(card: Card) -> String {
    card.to_string()
}

/// Parses a hand of at least two cards, like `"AhKh"`.
pub fn parse_hand(text: &str) -> Result<Vec<Card>, ParseError> {
    let symbols = text.chars().collect::<Vec<_>>();
    if symbols.len() < 4 || symbols.len() % 2 != 0 {
        return Err(ParseError::HandLength(symbols.len()));
    }

    parse_chunks(&symbols)
}

/// Parses a board, whitespace is ignored and an empty board has no cards.
///
/// ```
/// # use showdown_cards::*;
/// assert_eq!(parse_board("Ah Kd 2c").map(|b| b.len()), Ok(3));
/// assert_eq!(parse_board(""), Ok(vec![]));
/// ```
pub fn parse_board(text: &str) -> Result<Vec<Card>, ParseError> {
    let symbols = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<Vec<_>>();
    if symbols.len() % 2 != 0 {
        return Err(ParseError::BoardLength(symbols.len()));
    }

    parse_chunks(&symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_deck;

    #[test]
    fn card_round_trip() {
        for card in create_deck() {
            let text = card_to_string(card);
            assert_eq!(text.len(), 2);
            assert_eq!(parse_card(&text), Ok(card));
            assert_eq!(parse_card(&text.to_lowercase()), Ok(card));
            assert_eq!(parse_card(&text.to_uppercase()), Ok(card));
        }
    }

    #[test]
    fn card_errors() {
        assert_eq!(parse_card("1h"), Err(ParseError::InvalidRank('1')));
        assert_eq!(parse_card("Xs"), Err(ParseError::InvalidRank('X')));
        assert_eq!(parse_card("Ax"), Err(ParseError::InvalidSuit('x')));
        assert_eq!(parse_card("A"), Err(ParseError::CardLength("A".into())));
        assert_eq!(parse_card("Ahh"), Err(ParseError::CardLength("Ahh".into())));
        assert_eq!(parse_card(""), Err(ParseError::CardLength("".into())));
        assert!(parse_card("10h").is_err());
        assert!(parse_card("A♥").is_err());

        // Every invalid two symbols string is rejected.
        for r in ('0'..='z').filter(|c| Rank::from_symbol(*c).is_none()) {
            assert!(parse_card(&format!("{r}h")).is_err());
        }

        for s in ('0'..='z').filter(|c| Suit::from_symbol(*c).is_none()) {
            assert!(parse_card(&format!("A{s}")).is_err());
        }
    }

    #[test]
    fn hands() {
        let hand = parse_hand("AhKh").unwrap();
        assert_eq!(
            hand,
            vec![
                Card::new(Rank::Ace, Suit::Hearts),
                Card::new(Rank::King, Suit::Hearts)
            ]
        );

        assert_eq!(parse_hand("QsQcJd").map(|h| h.len()), Ok(3));
        assert_eq!(parse_hand("Ah"), Err(ParseError::HandLength(2)));
        assert_eq!(parse_hand(""), Err(ParseError::HandLength(0)));
        assert_eq!(parse_hand("AhKhQ"), Err(ParseError::HandLength(5)));
        assert_eq!(parse_hand("AhKx"), Err(ParseError::InvalidSuit('x')));
        assert!(parse_hand("Ah Kh").is_err());
    }

    #[test]
    fn boards() {
        assert_eq!(parse_board(""), Ok(vec![]));
        assert_eq!(parse_board("   "), Ok(vec![]));

        let board = parse_board(" Ad Kc\t2h ").unwrap();
        assert_eq!(
            board,
            vec![
                Card::new(Rank::Ace, Suit::Diamonds),
                Card::new(Rank::King, Suit::Clubs),
                Card::new(Rank::Deuce, Suit::Hearts),
            ]
        );

        assert_eq!(parse_board("AdKc2h3s4d").map(|b| b.len()), Ok(5));
        assert_eq!(parse_board("Ad K"), Err(ParseError::BoardLength(3)));
        assert_eq!(parse_board("AdZc"), Err(ParseError::InvalidRank('Z')));
    }
}
