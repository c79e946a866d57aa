//! Bounded fan-out, join and resequence.
//!
//! Drives keyed independent futures with at most `max_workers` in flight,
//! waits for all of them, and hands the results back in key order no matter
//! which finished first.

use futures::stream::{self, StreamExt};
use std::future::Future;

/// Results of a fan-out
#[derive(Debug)]
pub struct FanOut<K, T> {
    /// One entry per task, sorted by key
    pub results: Vec<(K, T)>,
    /// Keys in the order their futures completed
    pub completion_order: Vec<K>,
}

impl<K: Ord, T> FanOut<K, T> {
    /// Remove and return the result for `key`
    pub fn take(&mut self, key: &K) -> Option<T> {
        let idx = self.results.iter().position(|(k, _)| k == key)?;
        Some(self.results.remove(idx).1)
    }
}

/// Run `tasks` concurrently, at most `max_workers` at a time
pub async fn fan_out<K, T, F>(tasks: Vec<(K, F)>, max_workers: usize) -> FanOut<K, T>
where
    K: Ord + Clone,
    F: Future<Output = T>,
{
    let workers = max_workers.max(1);
    let mut results: Vec<(K, T)> = stream::iter(tasks)
        .map(|(key, task)| async move { (key, task.await) })
        .buffer_unordered(workers)
        .collect()
        .await;

    let completion_order = results.iter().map(|(key, _)| key.clone()).collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));

    FanOut {
        results,
        completion_order,
    }
}
