// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Prints the equity of all starting hands against a villain hand:
//
// ```bash
// $ cargo r --release --example chart -- --villain QsQc
// ```
use clap::Parser;
use std::time::Instant;

use showdown_eval::*;

fn separator() {
    print!("|");
    for _ in 0..13 {
        print!("-----|");
    }
    println!();
}

#[derive(Debug, Parser)]
struct Cli {
    /// The villain hand.
    #[clap(long, short, default_value = "QsQc")]
    villain: String,
    /// Number of runouts for each starting hand.
    #[clap(long, short = 'n', default_value_t = 20_000)]
    iterations: u64,
}

fn main() -> Result<(), EquityError> {
    let cli = Cli::parse();
    let villain = parse_hand(&cli.villain)?;
    let config = EquityConfig {
        iterations: cli.iterations,
        ..EquityConfig::default()
    };

    // Picks the first two cards of the given ranks that are not in the villain hand.
    let pick = |r1: Rank, r2: Rank, suited: bool| {
        let mut cards = Vec::with_capacity(2);
        for s1 in Suit::suits() {
            for s2 in Suit::suits() {
                let (c1, c2) = (Card::new(r1, s1), Card::new(r2, s2));
                let valid = c1 != c2
                    && (s1 == s2) == suited
                    && !villain.contains(&c1)
                    && !villain.contains(&c2);
                if valid && cards.is_empty() {
                    cards.extend([c1, c2]);
                }
            }
        }

        cards
    };

    separator();

    let now = Instant::now();

    for r1 in Rank::ranks().rev() {
        let mut labels = Vec::with_capacity(13);
        let mut probs = Vec::with_capacity(13);

        for r2 in Rank::ranks().rev() {
            // Suited above the diagonal, offsuit and pairs below.
            let suited = r1 > r2;
            let (high, low) = if r1 >= r2 { (r1, r2) } else { (r2, r1) };

            let label = match (high == low, suited) {
                (true, _) => format!("{high}{low} "),
                (false, true) => format!("{high}{low}s"),
                (false, false) => format!("{high}{low}o"),
            };

            let hero = pick(high, low, suited);
            let equity = if hero.len() == 2 {
                calculate_equity_with(&hero, &villain, &[], &config)?.equity
            } else {
                f64::NAN
            };

            labels.push(label);
            probs.push(equity);
        }

        print!("|");
        for label in labels {
            print!(" {label} |");
        }
        println!();

        print!("|");
        for prob in &probs {
            if prob.is_nan() {
                print!("  -  |");
            } else {
                print!(" {:2.0}% |", prob.round().min(99.0));
            }
        }
        println!();

        separator();
    }

    println!("Elapsed: {:.3}s", now.elapsed().as_secs_f64());

    Ok(())
}
