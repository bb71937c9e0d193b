// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example eval_all5
// ...
// Total hands      2598960
//
// High Card:       1302540
// Pair:            1098240
// Two Pair:        123552
// Three of a Kind: 54912
// Straight:        10200
// Flush:           5108
// Full House:      3744
// Four of a Kind:  624
// Straight Flush:  40
// ```
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use showdown_eval::*;

fn main() {
    // Evaluate all 2.6M hands with 4 parallel tasks.
    const NUM_TASKS: usize = 4;
    const NUM_RANKS: usize = 10;

    // Create per task counters to avoid contention and boost performance.
    let task_counters = (0..NUM_TASKS)
        .map(|_| {
            (0..NUM_RANKS)
                .map(|_| AtomicU64::new(0))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let now = Instant::now();

    Deck::default().par_for_each(NUM_TASKS, 5, |task_id, hand| {
        let Ok(value) = HandValue::eval(hand) else {
            return;
        };

        let counters = &task_counters[task_id];
        counters[value.rank().category() as usize].fetch_add(1, Ordering::Relaxed);
    });

    let elapsed = now.elapsed().as_secs_f64();

    // Aggregate counters.
    let agg = (0..NUM_RANKS)
        .map(|r| {
            task_counters
                .iter()
                .map(|counts| counts[r].load(Ordering::Relaxed))
                .sum()
        })
        .collect::<Vec<u64>>();

    let total = agg.iter().sum::<u64>();
    println!("Total hands      {total}");
    println!("Elapsed:         {elapsed:.3}s");
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for rank in HandRank::ranks() {
        let label = format!("{}:", rank.name());
        println!("{label:<17}{}", agg[rank.category() as usize]);
    }
}
