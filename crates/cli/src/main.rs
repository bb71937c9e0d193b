// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Result, bail};
use clap::Parser;
use log::{error, info};
use serde::Serialize;
use std::time::Duration;

use showdown_eval::{
    Card, EquityConfig, EquityResult, HandValue, calculate_equity_with, equity::DEFAULT_ITERATIONS,
    exact_equity, get_hand_name, lookup, parse_board, parse_hand, pool::WorkPool,
    quick_equity_lookup,
};

#[derive(Debug, Parser)]
struct Cli {
    /// The hero hand, for example AhKh.
    #[clap(long)]
    hero: String,
    /// The villain hand, repeat for more villains.
    #[clap(long, required = true)]
    villain: Vec<String>,
    /// The known board cards, for example "2h 7h Tc".
    #[clap(long, short, default_value = "")]
    board: String,
    /// Number of runouts to simulate.
    #[clap(long = "iterations", short = 'n', default_value_t = DEFAULT_ITERATIONS)]
    iterations: u64,
    /// Number of parallel tasks for each simulation.
    #[clap(long, value_parser = clap::value_parser!(u16).range(1..=256))]
    tasks: Option<u16>,
    /// Seed for reproducible simulations.
    #[clap(long)]
    seed: Option<u64>,
    /// Stop each simulation after this many milliseconds.
    #[clap(long)]
    deadline_ms: Option<u64>,
    /// Evaluate all the runouts instead of sampling.
    #[clap(long)]
    exact: bool,
    /// Print the results as JSON.
    #[clap(long)]
    json: bool,
    /// Look up preflop matchups like AA vs KK instead of simulating.
    #[clap(long)]
    lookup: bool,
}

/// The result for one villain.
#[derive(Debug, Serialize)]
struct Report {
    hero: String,
    villain: String,
    board: String,
    #[serde(flatten)]
    result: EquityResult,
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let res = if cli.lookup {
        lookup_matchups(&cli)
    } else {
        simulate(&cli)
    };

    if let Err(e) = res {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn lookup_matchups(cli: &Cli) -> Result<()> {
    for villain in &cli.villain {
        match quick_equity_lookup(&cli.hero, villain) {
            Some(equity) => println!("{} vs {villain}: {equity:.0}%", cli.hero),
            None => {
                let listed = lookup::matchups()
                    .filter(|(hero, _, _)| *hero == cli.hero.trim())
                    .map(|(_, villain, _)| villain)
                    .collect::<Vec<_>>();

                if listed.is_empty() {
                    bail!("No matchups for {}", cli.hero);
                }

                bail!(
                    "No matchup for {} vs {villain}, listed villains: {}",
                    cli.hero,
                    listed.join(", ")
                );
            }
        }
    }

    Ok(())
}

/// Returns the number of pool workers and the tasks for each simulation so
/// that at most `tasks` threads run at once.
fn split_tasks(tasks: usize, villains: usize) -> (usize, usize) {
    let workers = villains.clamp(1, tasks.max(1));
    (workers, (tasks / workers).max(1))
}

fn simulate(cli: &Cli) -> Result<()> {
    let hero = parse_hand(&cli.hero)?;
    let board = parse_board(&cli.board)?;
    let villains = cli
        .villain
        .iter()
        .map(|v| parse_hand(v))
        .collect::<Result<Vec<_>, _>>()?;

    let mut config = EquityConfig {
        iterations: cli.iterations,
        seed: cli.seed,
        deadline: cli.deadline_ms.map(Duration::from_millis),
        ..EquityConfig::default()
    };

    if let Some(tasks) = cli.tasks {
        config.tasks = tasks as usize;
    }

    if hero.len() + board.len() >= 5 {
        let mut cards = hero.clone();
        cards.extend_from_slice(&board);
        let value = HandValue::eval(&cards)?;
        info!("Hero has {}: {value}", get_hand_name(&value));
    }

    // Share the tasks between the villains that run at the same time.
    let (workers, tasks) = split_tasks(config.tasks, villains.len());
    config.tasks = tasks;

    let pool = WorkPool::new(workers);
    let mut results = Vec::new();
    pool.run(
        villains,
        |villain: Vec<Card>| {
            if cli.exact {
                exact_equity(&hero, &villain, &board, config.tasks)
            } else {
                calculate_equity_with(&hero, &villain, &board, &config)
            }
        },
        |progress| info!("Completed {}/{}", progress.completed, progress.total),
        |res| results = res,
    );

    let reports = cli
        .villain
        .iter()
        .zip(results)
        .map(|(villain, result)| {
            Ok(Report {
                hero: cli.hero.clone(),
                villain: villain.clone(),
                board: cli.board.clone(),
                result: result?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        let r = &report.result;
        let board = if report.board.is_empty() {
            String::new()
        } else {
            format!(" on {}", report.board)
        };

        println!(
            "{} vs {}{board}: {:.2}% (wins {}, ties {}, losses {}, {} runouts)",
            report.hero, report.villain, r.equity, r.wins, r.ties, r.losses, r.iterations
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_are_shared_between_villains() {
        assert_eq!(split_tasks(8, 1), (1, 8));
        assert_eq!(split_tasks(8, 3), (3, 2));
        assert_eq!(split_tasks(8, 20), (8, 1));
        assert_eq!(split_tasks(1, 4), (1, 1));
        assert_eq!(split_tasks(0, 0), (1, 1));

        for tasks in 1..=16 {
            for villains in 1..=32 {
                let (workers, per_worker) = split_tasks(tasks, villains);
                assert!(workers <= villains);
                assert!(workers * per_worker <= tasks);
            }
        }
    }
}
