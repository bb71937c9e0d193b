// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A bounded pool of worker threads.
//!
//! The pool runs a batch of work items on a fixed number of workers, reports
//! progress on the caller thread as items complete, and hands back all the
//! results in submission order:
//!
//! ```
//! # use showdown_eval::pool::WorkPool;
//! let pool = WorkPool::new(2);
//! let mut updates = 0;
//! pool.run(
//!     vec![1, 2, 3],
//!     |n| n * 10,
//!     |_progress| updates += 1,
//!     |results| assert_eq!(results, vec![10, 20, 30]),
//! );
//! assert_eq!(updates, 3);
//! ```
use log::debug;
use parking_lot::Mutex;
use std::{collections::VecDeque, num::NonZeroUsize, sync::mpsc, thread};

/// Progress of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Number of completed items.
    pub completed: usize,
    /// Number of items in the batch.
    pub total: usize,
}

/// A fixed size pool of workers.
#[derive(Debug, Clone)]
pub struct WorkPool {
    workers: usize,
}

impl Default for WorkPool {
    fn default() -> Self {
        Self::new(thread::available_parallelism().map_or(1, NonZeroUsize::get))
    }
}

impl WorkPool {
    /// Creates a pool with the given number of workers, at least one.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Number of workers.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs `work` on each item, calls `on_progress` after each completed item
    /// and `on_complete` with the results in the items order.
    pub fn run<T, R, W, P, C>(&self, items: Vec<T>, work: W, mut on_progress: P, on_complete: C)
    where
        T: Send,
        R: Send,
        W: Fn(T) -> R + Sync,
        P: FnMut(Progress),
        C: FnOnce(Vec<R>),
    {
        let total = items.len();
        let queue = Mutex::new(items.into_iter().enumerate().collect::<VecDeque<_>>());
        let mut results = (0..total).map(|_| None).collect::<Vec<_>>();

        thread::scope(|s| {
            // Bounded so that workers wait for the caller to catch up.
            let (tx, rx) = mpsc::sync_channel(self.workers);

            for worker_id in 0..self.workers.min(total) {
                let tx = tx.clone();
                let (queue, work) = (&queue, &work);
                s.spawn(move || {
                    let mut done = 0;
                    loop {
                        let next = queue.lock().pop_front();
                        let Some((idx, item)) = next else {
                            break;
                        };

                        if tx.send((idx, work(item))).is_err() {
                            break;
                        }

                        done += 1;
                    }

                    debug!("Worker {worker_id} completed {done} items");
                });
            }

            // Drop the caller sender so the loop ends when all workers exit.
            drop(tx);

            let mut completed = 0;
            for (idx, result) in rx {
                results[idx] = Some(result);
                completed += 1;
                on_progress(Progress { completed, total });
            }
        });

        on_complete(results.into_iter().flatten().collect());
    }

    /// Runs `work` on each item and returns the results in the items order.
    pub fn map<T, R, W>(&self, items: Vec<T>, work: W) -> Vec<R>
    where
        T: Send,
        R: Send,
        W: Fn(T) -> R + Sync,
    {
        let mut out = Vec::new();
        self.run(items, work, |_| {}, |results| out = results);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn results_in_order() {
        let pool = WorkPool::new(4);
        let items = (0..100u64).collect::<Vec<_>>();

        let results = pool.map(items, |n| {
            // Make later items complete first.
            thread::sleep(Duration::from_micros(100 - n));
            n * n
        });

        assert_eq!(results, (0..100u64).map(|n| n * n).collect::<Vec<_>>());
    }

    #[test]
    fn progress_updates() {
        let pool = WorkPool::new(3);
        let mut updates = Vec::new();
        let mut completed = None;

        pool.run(
            vec!["a", "bb", "ccc", "dddd", "eeeee"],
            |s| s.len(),
            |p| updates.push(p),
            |results| completed = Some(results),
        );

        assert_eq!(updates.len(), 5);
        assert!(updates.iter().all(|p| p.total == 5));
        assert_eq!(
            updates.iter().map(|p| p.completed).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
        assert_eq!(completed, Some(vec![1, 2, 3, 4, 5]));
    }

    #[test]
    fn empty_batch() {
        let pool = WorkPool::default();
        assert!(pool.workers() >= 1);

        let mut progress = 0;
        let mut completed = false;
        pool.run(
            Vec::<u8>::new(),
            |n| n,
            |_| progress += 1,
            |results| {
                assert!(results.is_empty());
                completed = true;
            },
        );

        assert_eq!(progress, 0);
        assert!(completed);
    }

    #[test]
    fn zero_workers() {
        let pool = WorkPool::new(0);
        assert_eq!(pool.workers(), 1);
        assert_eq!(pool.map(vec![1, 2], |n| n + 1), vec![2, 3]);
    }
}
