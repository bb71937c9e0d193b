// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel hand iteration and sampling.
use rand::prelude::*;
use std::{ops::ControlFlow, thread};

use super::{Card, Deck, Rank, Suit, for_each_ksubset, nck};

/// How [Deck::par_sample] splits samples across tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampling {
    /// Number of parallel tasks.
    pub tasks: usize,
    /// Total number of samples across all tasks.
    pub samples: u64,
    /// Base seed, task `i` uses `seed + i`, or an OS seeded generator if `None`.
    pub seed: Option<u64>,
}

impl Sampling {
    /// Returns the number of samples for each task.
    ///
    /// The remainder is spread over the first tasks, tasks with no samples
    /// are dropped.
    pub fn per_task(&self) -> Vec<u64> {
        let tasks = (self.tasks.max(1) as u64).min(self.samples.max(1));
        let base = self.samples / tasks;
        let extra = self.samples % tasks;

        (0..tasks)
            .map(|t| base + u64::from(t < extra))
            .filter(|&n| n > 0)
            .collect()
    }

    fn rng(&self, task_id: usize) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(task_id as u64)),
            None => SmallRng::from_os_rng(),
        }
    }
}

impl Deck {
    /// Parallel for each, calls the `f` closure for each k-cards hand.
    ///
    /// The clousure takes an usize that is the task identifier (0..num_task)
    /// and a slice of cards of length k.
    ///
    /// Panics if k > 7 or `num_tasks` is zero.
    pub fn par_for_each<F>(&self, num_tasks: usize, k: usize, f: F)
    where
        F: Fn(usize, &[Card]) + Send + Sync,
    {
        assert!(k <= 7, "k={k} must be 0 <= k <= 7");
        assert!(num_tasks > 0);

        let n = self.cards.len();
        if k > n {
            return;
        }

        let num_hands = nck(n, k).max(1);
        let hands_per_task = num_hands.div_ceil(num_tasks);

        thread::scope(|s| {
            for task_id in 0..num_tasks {
                let start = task_id * hands_per_task;
                if start >= num_hands {
                    break;
                }

                let count = hands_per_task.min(num_hands - start);
                let f = &f;
                s.spawn(move || {
                    let mut h = [Card::new(Rank::Ace, Suit::Diamonds); 7];
                    for_each_ksubset(n, k, start, count, |p| {
                        for (idx, &pos) in p.iter().enumerate() {
                            h[idx] = self.cards[pos];
                        }

                        f(task_id, &h[..k]);
                    });
                });
            }
        });
    }

    /// Calls the given closure from parallel tasks with random samples of
    /// k distinct cards, see [Sampling] for how samples are split.
    ///
    /// A task stops early when the closure returns [ControlFlow::Break].
    ///
    /// Panics if k > 7.
    pub fn par_sample<F>(&self, sampling: &Sampling, k: usize, f: F)
    where
        F: Fn(usize, &[Card]) -> ControlFlow<()> + Send + Sync,
    {
        assert!(k <= 7, "k={k} must be 0 <= k <= 7");

        if k > self.cards.len() {
            return;
        }

        thread::scope(|s| {
            for (task_id, samples) in sampling.per_task().into_iter().enumerate() {
                let f = &f;
                s.spawn(move || {
                    let mut h = [Card::new(Rank::Ace, Suit::Diamonds); 7];
                    let mut rng = sampling.rng(task_id);

                    for _ in 0..samples {
                        for (pos, c) in self.cards.choose_multiple(&mut rng, k).enumerate() {
                            h[pos] = *c;
                        }

                        if f(task_id, &h[..k]).is_break() {
                            break;
                        }
                    }
                });
            }
        });
    }
}
