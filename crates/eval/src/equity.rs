// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hero versus villain equity.
//!
//! [calculate_equity] estimates how often the hero hand wins, ties, or loses
//! against the villain hand by completing the board with random runouts from
//! the cards left in the deck, [exact_equity] goes through all the runouts.
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    num::NonZeroUsize,
    ops::ControlFlow,
    sync::atomic::{self, AtomicU64},
    thread,
    time::{Duration, Instant},
};
use thiserror::Error;

use showdown_cards::{Card, Deck, ParseError, Rank, Sampling, Suit};

use crate::eval::HandValue;

/// The default number of simulated runouts.
pub const DEFAULT_ITERATIONS: u64 = 10_000;

/// Trials between deadline checks.
const DEADLINE_CHECK: u64 = 128;

/// Number of cards on a complete board.
const BOARD_SIZE: usize = 5;

/// Equity calculation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EquityError {
    /// At least one iteration is needed.
    #[error("Iterations must be at least 1")]
    NoIterations,
    /// A player must have one or two hole cards.
    #[error("Invalid {player} hand with {count} cards, expected 1 or 2 cards")]
    HoleCards {
        /// The player with the invalid hand.
        player: &'static str,
        /// The number of cards given.
        count: usize,
    },
    /// The board has more than five cards.
    #[error("Invalid board with {0} cards, expected at most 5 cards")]
    BoardSize(usize),
    /// The same card is dealt to more than one place.
    #[error("Card {0} is dealt more than once")]
    DuplicateCard(Card),
    /// Invalid cards notation.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// The simulation configuration.
#[derive(Debug, Clone)]
pub struct EquityConfig {
    /// Number of runouts to simulate.
    pub iterations: u64,
    /// Number of parallel tasks.
    pub tasks: usize,
    /// Seed for reproducible runs, runs with the same seed and tasks return
    /// the same result.
    pub seed: Option<u64>,
    /// Stops the simulation once this time has elapsed.
    pub deadline: Option<Duration>,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            tasks: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            seed: None,
            deadline: None,
        }
    }
}

/// The hero equity against the villain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityResult {
    /// The hero equity percentage, ties count as half a win.
    pub equity: f64,
    /// Number of runouts won by the hero.
    pub wins: u64,
    /// Number of split runouts.
    pub ties: u64,
    /// Number of runouts lost by the hero.
    pub losses: u64,
    /// Number of runouts evaluated.
    pub iterations: u64,
}

impl EquityResult {
    /// Creates a result from the runouts counts.
    pub fn from_counts(wins: u64, ties: u64, losses: u64) -> Self {
        let iterations = wins + ties + losses;
        let equity = if iterations == 0 {
            0.0
        } else {
            (wins as f64 + ties as f64 / 2.0) / iterations as f64 * 100.0
        };

        Self {
            equity,
            wins,
            ties,
            losses,
            iterations,
        }
    }

    /// The result from the villain point of view.
    pub fn swapped(&self) -> Self {
        Self::from_counts(self.losses, self.ties, self.wins)
    }
}

/// Per task counters.
#[derive(Default)]
struct Counter {
    wins: AtomicU64,
    ties: AtomicU64,
    losses: AtomicU64,
}

impl Counter {
    /// Records a showdown, returns the number of showdowns recorded so far.
    fn record(&self, outcome: Ordering) -> u64 {
        let counter = match outcome {
            Ordering::Greater => &self.wins,
            Ordering::Equal => &self.ties,
            Ordering::Less => &self.losses,
        };

        counter.fetch_add(1, atomic::Ordering::Relaxed);
        self.total()
    }

    fn total(&self) -> u64 {
        self.wins.load(atomic::Ordering::Relaxed)
            + self.ties.load(atomic::Ordering::Relaxed)
            + self.losses.load(atomic::Ordering::Relaxed)
    }

    /// Adds up the tasks counters.
    fn reduce(counters: &[Counter]) -> EquityResult {
        let (mut wins, mut ties, mut losses) = (0, 0, 0);
        for counter in counters {
            wins += counter.wins.load(atomic::Ordering::Relaxed);
            ties += counter.ties.load(atomic::Ordering::Relaxed);
            losses += counter.losses.load(atomic::Ordering::Relaxed);
        }

        EquityResult::from_counts(wins, ties, losses)
    }
}

/// The known cards of a heads up hand.
struct Showdown<'a> {
    hero: &'a [Card],
    villain: &'a [Card],
    board: &'a [Card],
}

impl<'a> Showdown<'a> {
    /// Checks the hands and returns the deck with the remaining cards.
    fn new(
        hero: &'a [Card],
        villain: &'a [Card],
        board: &'a [Card],
    ) -> Result<(Self, Deck), EquityError> {
        for (player, cards) in [("hero", hero), ("villain", villain)] {
            if cards.is_empty() || cards.len() > 2 {
                return Err(EquityError::HoleCards {
                    player,
                    count: cards.len(),
                });
            }
        }

        if board.len() > BOARD_SIZE {
            return Err(EquityError::BoardSize(board.len()));
        }

        let mut mask = 0u64;
        for card in hero.iter().chain(villain).chain(board) {
            if mask & card.mask() != 0 {
                return Err(EquityError::DuplicateCard(*card));
            }

            mask |= card.mask();
        }

        let known = [hero, villain, board].concat();
        let showdown = Self {
            hero,
            villain,
            board,
        };

        Ok((showdown, Deck::without(&known)))
    }

    /// Number of cards to complete the board.
    fn cards_needed(&self) -> usize {
        BOARD_SIZE - self.board.len()
    }

    /// Compares the hero and villain hands for a runout.
    fn compare(&self, runout: &[Card]) -> Ordering {
        let mut board = [Card::new(Rank::Ace, Suit::Spades); BOARD_SIZE];
        board[..self.board.len()].copy_from_slice(self.board);
        board[self.board.len()..].copy_from_slice(runout);

        hand_value(self.hero, &board).cmp(&hand_value(self.villain, &board))
    }

    fn log(&self, kind: &str, result: &EquityResult, elapsed: Duration) {
        debug!(
            "{kind} equity {} vs {} board [{}]: {:.2}% ({}/{}/{}) {} runouts in {:.3}s",
            cards_string(self.hero),
            cards_string(self.villain),
            cards_string(self.board),
            result.equity,
            result.wins,
            result.ties,
            result.losses,
            result.iterations,
            elapsed.as_secs_f64(),
        );
    }
}

fn hand_value(hole: &[Card], board: &[Card; BOARD_SIZE]) -> HandValue {
    let mut cards = [board[0]; 7];
    let n = hole.len() + BOARD_SIZE;
    cards[..hole.len()].copy_from_slice(hole);
    cards[hole.len()..n].copy_from_slice(board);
    HandValue::best_of(&cards[..n])
}

fn cards_string(cards: &[Card]) -> String {
    cards.iter().map(|c| c.to_string()).collect()
}

/// Estimates the hero equity against the villain with `iterations` random
/// runouts and the default configuration.
///
/// ```
/// # use showdown_eval::*;
/// let hero = parse_hand("AhAs").unwrap();
/// let villain = parse_hand("KdKc").unwrap();
/// let board = parse_board("").unwrap();
///
/// let res = calculate_equity(&hero, &villain, &board, 2_000).unwrap();
/// assert_eq!(res.wins + res.ties + res.losses, 2_000);
/// assert!(res.equity > 70.0);
/// ```
pub fn calculate_equity(
    hero: &[Card],
    villain: &[Card],
    board: &[Card],
    iterations: u64,
) -> Result<EquityResult, EquityError> {
    let config = EquityConfig {
        iterations,
        ..EquityConfig::default()
    };

    calculate_equity_with(hero, villain, board, &config)
}

/// Estimates the hero equity against the villain using the given config.
///
/// Iterations are split across `config.tasks` parallel tasks each with its
/// own random generator, the per task counts are added up at the end.
pub fn calculate_equity_with(
    hero: &[Card],
    villain: &[Card],
    board: &[Card],
    config: &EquityConfig,
) -> Result<EquityResult, EquityError> {
    if config.iterations == 0 {
        return Err(EquityError::NoIterations);
    }

    let (showdown, deck) = Showdown::new(hero, villain, board)?;

    let sampling = Sampling {
        tasks: config.tasks,
        samples: config.iterations,
        seed: config.seed,
    };

    // Create per task counters to avoid contention.
    let counters = (0..config.tasks.max(1))
        .map(|_| Counter::default())
        .collect::<Vec<_>>();

    let now = Instant::now();
    deck.par_sample(&sampling, showdown.cards_needed(), |task_id, runout| {
        let total = counters[task_id].record(showdown.compare(runout));

        match config.deadline {
            Some(deadline) if total % DEADLINE_CHECK == 0 && now.elapsed() >= deadline => {
                ControlFlow::Break(())
            }
            _ => ControlFlow::Continue(()),
        }
    });

    let result = Counter::reduce(&counters);
    showdown.log("Sampled", &result, now.elapsed());

    Ok(result)
}

/// Computes the exact hero equity against the villain by evaluating every
/// possible runout using `tasks` parallel tasks.
///
/// This goes through 1.7M runouts for an empty board, a flop needs only 990.
pub fn exact_equity(
    hero: &[Card],
    villain: &[Card],
    board: &[Card],
    tasks: usize,
) -> Result<EquityResult, EquityError> {
    let (showdown, deck) = Showdown::new(hero, villain, board)?;

    let tasks = tasks.max(1);
    let counters = (0..tasks).map(|_| Counter::default()).collect::<Vec<_>>();

    let now = Instant::now();
    deck.par_for_each(tasks, showdown.cards_needed(), |task_id, runout| {
        counters[task_id].record(showdown.compare(runout));
    });

    let result = Counter::reduce(&counters);
    showdown.log("Exact", &result, now.elapsed());

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use showdown_cards::{parse_board, parse_hand};

    fn config(iterations: u64, seed: u64) -> EquityConfig {
        EquityConfig {
            iterations,
            tasks: 4,
            seed: Some(seed),
            deadline: None,
        }
    }

    fn sim(hero: &str, villain: &str, board: &str, config: &EquityConfig) -> EquityResult {
        let hero = parse_hand(hero).unwrap();
        let villain = parse_hand(villain).unwrap();
        let board = parse_board(board).unwrap();
        calculate_equity_with(&hero, &villain, &board, config).unwrap()
    }

    fn exact(hero: &str, villain: &str, board: &str) -> EquityResult {
        let hero = parse_hand(hero).unwrap();
        let villain = parse_hand(villain).unwrap();
        let board = parse_board(board).unwrap();
        exact_equity(&hero, &villain, &board, 3).unwrap()
    }

    fn check_invariants(res: &EquityResult) {
        assert_eq!(res.wins + res.ties + res.losses, res.iterations);
        assert!(res.iterations >= 1);
        assert!((0.0..=100.0).contains(&res.equity), "{res:?}");
    }

    #[test]
    fn conservation_and_bounds() {
        for board in ["", "2h7hTc", "2h7hTcJd", "2h7hTcJd3s"] {
            for iterations in [1, 7, 1_000] {
                let res = sim("AhKh", "QsQc", board, &config(iterations, 1));
                check_invariants(&res);
                assert_eq!(res.iterations, iterations);
            }
        }
    }

    #[test]
    fn aces_against_deuces() {
        let res = sim("AhAs", "2h2s", "", &config(20_000, 11));
        check_invariants(&res);
        assert!(res.equity > 79.5 && res.equity < 85.5, "{res:?}");
    }

    #[test]
    fn ace_king_suited_against_queens() {
        for seed in [1, 2, 3] {
            let res = sim("AhKh", "QsQc", "", &config(20_000, seed));
            check_invariants(&res);
            assert!(res.equity > 44.0 && res.equity < 49.0, "{res:?}");
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let a = sim("AhKh", "QsQc", "", &config(5_000, 99));
        let b = sim("AhKh", "QsQc", "", &config(5_000, 99));
        assert_eq!(a, b);
    }

    #[test]
    fn swapping_players() {
        let config = config(10_000, 5);
        let hero = sim("AhKh", "QsQc", "2h7hTc", &config);
        let villain = sim("QsQc", "AhKh", "2h7hTc", &config);

        // Same seed gives the same runouts from the villain side.
        assert_eq!(hero.ties, villain.ties);
        assert_eq!(hero.wins, villain.losses);
        assert_eq!(hero.losses, villain.wins);
        assert!((hero.equity + villain.equity - 100.0).abs() < 1e-9);
        assert_eq!(hero.swapped(), villain);
    }

    #[test]
    fn complete_board() {
        // Hero straight on the river.
        let res = sim("AhKh", "QsQc", "QhJdTc2s3d", &config(500, 1));
        assert_eq!(res.wins, 500);
        assert_eq!(res.equity, 100.0);

        // Board plays.
        let res = sim("2h3h", "2s3s", "AsKdQhJcTs", &config(500, 1));
        assert_eq!(res.ties, 500);
        assert_eq!(res.equity, 50.0);
    }

    #[test]
    fn single_hole_card() {
        let hero = [parse_board("Ah").unwrap()[0]];
        let villain = parse_hand("KsKd").unwrap();
        let res = calculate_equity_with(&hero, &villain, &[], &config(2_000, 3)).unwrap();
        check_invariants(&res);
        assert!(res.equity < 50.0);
    }

    #[test]
    fn deadline_stops_tasks() {
        let config = EquityConfig {
            iterations: 1_000_000,
            tasks: 2,
            seed: Some(1),
            deadline: Some(Duration::ZERO),
        };

        let res = sim("AhKh", "QsQc", "", &config);
        check_invariants(&res);
        assert_eq!(res.iterations, 2 * DEADLINE_CHECK);
    }

    #[test]
    fn exact_enumeration() {
        let res = exact("AhKh", "QsQc", "2h7hTc");
        check_invariants(&res);
        assert_eq!(res.iterations, 990);

        // Sampling converges to the exact result.
        let sampled = sim("AhKh", "QsQc", "2h7hTc", &config(20_000, 8));
        assert!((sampled.equity - res.equity).abs() < 2.0, "{sampled:?} {res:?}");

        let res = exact("AhKh", "QsQc", "2h7hTcJd");
        assert_eq!(res.iterations, 44);

        let res = exact("AhKh", "QsQc", "2h7hTcJd3h");
        assert_eq!(res.iterations, 1);
        assert_eq!(res.wins, 1);
    }

    #[test]
    fn invalid_inputs() {
        let hero = parse_hand("AhKh").unwrap();
        let villain = parse_hand("QsQc").unwrap();
        let board = parse_board("2h7hTc").unwrap();

        assert_eq!(
            calculate_equity(&hero, &villain, &board, 0),
            Err(EquityError::NoIterations)
        );

        let overlap = parse_hand("AhQd").unwrap();
        assert_eq!(
            calculate_equity(&hero, &overlap, &board, 10),
            Err(EquityError::DuplicateCard(hero[0]))
        );

        let on_board = parse_board("Kh7hTc").unwrap();
        assert_eq!(
            exact_equity(&hero, &villain, &on_board, 1),
            Err(EquityError::DuplicateCard(hero[1]))
        );

        let three = parse_hand("QsQcQd").unwrap();
        assert_eq!(
            calculate_equity(&hero, &three, &board, 10),
            Err(EquityError::HoleCards {
                player: "villain",
                count: 3
            })
        );

        assert_eq!(
            calculate_equity(&[], &villain, &board, 10),
            Err(EquityError::HoleCards {
                player: "hero",
                count: 0
            })
        );

        let six = parse_board("2d3d4d5d6d7d").unwrap();
        assert_eq!(
            calculate_equity(&hero, &villain, &six, 10),
            Err(EquityError::BoardSize(6))
        );
    }

    #[test]
    fn result_from_counts() {
        let res = EquityResult::from_counts(3, 2, 5);
        assert_eq!(res.iterations, 10);
        assert_eq!(res.equity, 40.0);

        let json = serde_json::to_string(&res).unwrap();
        assert_eq!(
            json,
            r#"{"equity":40.0,"wins":3,"ties":2,"losses":5,"iterations":10}"#
        );
    }
}
