// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Preflop equities for common matchups.
//!
//! These are published approximations used as a quick reference, they are
//! never computed and unlisted matchups are not simulated.
use ahash::AHashMap;
use std::sync::LazyLock;

/// Hero hand, villain hand, and hero equity percentage.
const MATCHUPS: &[(&str, &str, f64)] = &[
    ("AA", "KK", 82.0),
    ("AA", "AKs", 87.0),
    ("AA", "Random", 85.0),
    ("KK", "AA", 18.0),
    ("KK", "AKs", 70.0),
    ("KK", "QQ", 82.0),
    ("KK", "Random", 83.0),
    ("AKs", "AA", 13.0),
    ("AKs", "KK", 30.0),
    ("AKs", "QQ", 46.0),
    ("AKs", "22", 48.0),
    ("AKs", "Random", 67.0),
    ("AKo", "AA", 12.0),
    ("AKo", "QQ", 43.0),
    ("AKo", "22", 46.0),
    ("AKo", "Random", 65.0),
    ("QQ", "AA", 18.0),
    ("QQ", "KK", 18.0),
    ("QQ", "AKs", 54.0),
    ("QQ", "Random", 80.0),
    ("JJ", "AA", 19.0),
    ("JJ", "AKs", 54.0),
    ("JJ", "Random", 77.0),
    ("TT", "AKs", 54.0),
    ("TT", "AQs", 55.0),
    ("TT", "Random", 75.0),
    ("77", "AKs", 51.0),
    ("77", "Overcards", 52.0),
    ("77", "Random", 66.0),
    ("22", "AKo", 54.0),
    ("22", "Overcards", 52.0),
    ("22", "Random", 50.0),
];

/// Equities by hero hand and then by villain hand.
static EQUITIES: LazyLock<AHashMap<&'static str, AHashMap<&'static str, f64>>> =
    LazyLock::new(|| {
        let mut equities = AHashMap::<_, AHashMap<_, _>>::new();
        for &(hero, villain, equity) in MATCHUPS {
            equities.entry(hero).or_default().insert(villain, equity);
        }

        equities
    });

/// Looks up the hero preflop equity for a matchup like `"AA"` vs `"KK"`,
/// returns `None` if the matchup is not in the table.
///
/// ```
/// # use showdown_eval::quick_equity_lookup;
/// assert_eq!(quick_equity_lookup("AA", "KK"), Some(82.0));
/// assert_eq!(quick_equity_lookup("AA", "72o"), None);
/// ```
pub fn quick_equity_lookup(hero: &str, villain: &str) -> Option<f64> {
    EQUITIES
        .get(hero.trim())
        .and_then(|villains| villains.get(villain.trim()))
        .copied()
}

/// Iterates through all the matchups in the table.
pub fn matchups() -> impl Iterator<Item = (&'static str, &'static str, f64)> {
    MATCHUPS.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        assert_eq!(quick_equity_lookup("AA", "KK"), Some(82.0));
        assert_eq!(quick_equity_lookup("KK", "AA"), Some(18.0));
        assert_eq!(quick_equity_lookup(" AKs ", "QQ"), Some(46.0));
        assert_eq!(quick_equity_lookup("22", "Random"), Some(50.0));
    }

    #[test]
    fn unlisted() {
        assert_eq!(quick_equity_lookup("KK", "JJ"), None);
        assert_eq!(quick_equity_lookup("AKs", "AKo"), None);
        assert_eq!(quick_equity_lookup("aa", "kk"), None);
        assert_eq!(quick_equity_lookup("", ""), None);
    }

    #[test]
    fn table_is_consistent() {
        let listed = EQUITIES.values().map(|v| v.len()).sum::<usize>();
        assert_eq!(listed, MATCHUPS.len());
        assert!(matchups().all(|(_, _, e)| (0.0..=100.0).contains(&e)));

        // Listed pair matchups in both directions sum up to 100.
        for (hero, villain, equity) in matchups() {
            if let Some(other) = quick_equity_lookup(villain, hero) {
                assert!(
                    (equity + other - 100.0).abs() <= 1.0,
                    "{hero} vs {villain}"
                );
            }
        }
    }
}
