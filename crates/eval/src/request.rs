// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Equity requests in cards notation.
use serde::{Deserialize, Serialize};

use showdown_cards::{parse_board, parse_hand};

use crate::equity::{
    DEFAULT_ITERATIONS, EquityConfig, EquityError, EquityResult, calculate_equity_with,
};

/// An equity request as sent by clients, for example:
///
/// ```json
/// {"hero": "AhKh", "villain": "QsQc", "board": "2h 7h Tc", "iterations": 20000}
/// ```
///
/// `board` and `iterations` are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityRequest {
    /// The hero cards.
    pub hero: String,
    /// The villain cards.
    pub villain: String,
    /// The known board cards.
    #[serde(default)]
    pub board: String,
    /// Number of runouts to simulate.
    #[serde(default = "default_iterations")]
    pub iterations: u64,
}

fn default_iterations() -> u64 {
    DEFAULT_ITERATIONS
}

impl EquityRequest {
    /// Parses the request cards and runs the simulation with `config`, the
    /// request iterations override the config iterations.
    pub fn run(&self, config: &EquityConfig) -> Result<EquityResult, EquityError> {
        let hero = parse_hand(&self.hero)?;
        let villain = parse_hand(&self.villain)?;
        let board = parse_board(&self.board)?;

        let config = EquityConfig {
            iterations: self.iterations,
            ..config.clone()
        };

        calculate_equity_with(&hero, &villain, &board, &config)
    }
}
