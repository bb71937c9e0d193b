// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Binomial coefficients and k-subsets enumeration.

/// Largest subset size supported by the enumeration functions.
const MAX_K: usize = 7;

/// Creates table for nck(n, k) for n <= 52 and k <= 7, row `i` holds the
/// coefficients for `n = i + 1`.
const fn make_nck() -> [[u32; MAX_K + 1]; 52] {
    let mut t = [[0u32; MAX_K + 1]; 52];
    let mut n = 0;

    while n < 52 {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= MAX_K && k <= n + 1 {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            let n_1 = n.saturating_sub(1);
            t[n][k] = t[n_1][k - 1] + t[n_1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

const NCKS: [[u32; MAX_K + 1]; 52] = make_nck();

/// Returns the binomial coefficient for n choose k.
///
/// Panics if n > 52 or k > 7.
#[inline]
pub fn nck(n: usize, k: usize) -> usize {
    assert!(n <= 52, "n={n} must be 0 <= n <= 52");
    assert!(k <= MAX_K, "k={k} must be 0 <= k <= 7");

    if n < k || n == 0 {
        0
    } else {
        NCKS[n - 1][k] as usize
    }
}

/// Uses the combinatorial number system to convert n to a
/// k-combination (see Theorem L pg. 260 Knuth 4a).
///
/// The first `k` entries of the returned array hold the positions in
/// increasing order.
pub fn nth_ksubset(mut n: usize, k: usize) -> [usize; MAX_K] {
    assert!(k <= MAX_K, "k={k} must be 0 <= k <= 7");

    let mut out = [0; MAX_K];
    for k in (0..k).rev() {
        let mut c = k;
        while nck(c, k + 1) <= n {
            c += 1;
        }

        c = c.saturating_sub(1);
        out[k] = c;
        n = n.saturating_sub(nck(c, k + 1));
    }

    out
}

/// Calls `f` for at most `count` k-subsets of `0..n` starting from the
/// `nth` subset in colexicographic order.
pub fn for_each_ksubset<F>(n: usize, k: usize, nth: usize, count: usize, mut f: F)
where
    F: FnMut(&[usize]),
{
    if count == 0 || k > n {
        return;
    }

    // Algorithm L from TAOCP 4a, c[0] is a sentinel so that positions are 1-based.
    let mut c = [0usize; MAX_K + 3];

    let ks = nth_ksubset(nth, k);
    c[1..=k].copy_from_slice(&ks[..k]);
    c[k + 1] = n;

    let mut visited = 1;
    loop {
        f(&c[1..=k]);

        visited += 1;
        if visited > count {
            break;
        }

        let mut j = 1;
        while j <= k && c[j] + 1 == c[j + 1] {
            c[j] = j - 1;
            j += 1;
        }

        if j > k {
            break;
        }

        c[j] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nck() {
        // For n < k = 0
        assert_eq!(nck(2, 3), 0);

        [1, 52, 1326, 22100, 270725, 2598960, 20358520, 133784560]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(52, k), v));

        [1, 48, 1128, 17296, 194580, 1712304, 12271512, 73629072]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(48, k), v));

        [1, 7, 21, 35, 35, 21, 7, 1]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(7, k), v));

        [1, 5, 10, 10, 5, 1, 0, 0]
            .into_iter()
            .enumerate()
            .for_each(|(k, v)| assert_eq!(nck(5, k), v));
    }

    #[test]
    fn five_of_seven() {
        let mut subsets = Vec::new();
        for_each_ksubset(7, 5, 0, nck(7, 5), |s| subsets.push(s.to_vec()));

        assert_eq!(subsets.len(), 21);
        assert!(subsets.iter().all(|s| s.windows(2).all(|w| w[0] < w[1])));
        assert!(subsets.iter().all(|s| s.iter().all(|&p| p < 7)));

        subsets.sort();
        subsets.dedup();
        assert_eq!(subsets.len(), 21);
    }

    #[test]
    fn unranking_matches_enumeration() {
        let mut counter = 0;
        for_each_ksubset(20, 4, 0, nck(20, 4), |s| {
            let ks = nth_ksubset(counter, 4);
            assert_eq!(s, &ks[..4]);
            counter += 1;
        });
        assert_eq!(counter, nck(20, 4));

        // Start from half way and stop at the end of the subsets.
        counter = 0;
        let nth = nck(20, 4) / 2;
        for_each_ksubset(20, 4, nth, usize::MAX, |s| {
            let ks = nth_ksubset(nth + counter, 4);
            assert_eq!(s, &ks[..4]);
            counter += 1;
        });
        assert_eq!(counter, nck(20, 4) - nth);
    }

    #[test]
    fn empty_subsets() {
        let mut count = 0;
        for_each_ksubset(10, 0, 0, 1, |s| {
            assert!(s.is_empty());
            count += 1;
        });
        assert_eq!(count, 1);

        for_each_ksubset(3, 5, 0, 1, |_| panic!("k > n has no subsets"));
    }
}
