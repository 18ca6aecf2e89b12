//! Bounded concurrent fan-out
//!
//! Runs one future per input with at most `max_concurrent` in flight and
//! returns the outputs in input order.

use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

/// Default fan-out width for per-repository lookups
pub const DEFAULT_CONCURRENCY: usize = 6;

/// Run `fetch` for every input, keeping at most `max_concurrent` running.
pub async fn fan_out<I, T, F, Fut>(inputs: Vec<I>, fetch: F, max_concurrent: usize) -> Vec<T>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = T>,
{
    if inputs.is_empty() {
        return Vec::new();
    }

    let total = inputs.len();
    let max_concurrent = max_concurrent.max(1);
    debug!("Fanning out {} requests, max {} concurrent", total, max_concurrent);

    let mut results: Vec<Option<T>> = std::iter::repeat_with(|| None).take(total).collect();
    let mut pending = inputs.into_iter().enumerate();
    let mut running = FuturesUnordered::new();

    let start = |index: usize, input: I| {
        let fut = fetch(input);
        async move { (index, fut.await) }
    };

    // Seed initial batch up to max_concurrent
    for (index, input) in pending.by_ref().take(max_concurrent) {
        running.push(start(index, input));
    }

    while let Some((index, output)) = running.next().await {
        results[index] = Some(output);

        if let Some((next_index, next_input)) = pending.next() {
            running.push(start(next_index, next_input));
        }
    }

    results.into_iter().flatten().collect()
}
