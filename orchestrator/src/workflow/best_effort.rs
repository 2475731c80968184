//! Best-effort execution over a list of items.
//!
//! Every item is attempted; a failure is recorded next to the successes instead of
//! aborting the remaining items.

use futures::future::join_all;
use std::future::Future;

#[derive(Debug, Clone, PartialEq)]
pub struct PartialResults<T, E> {
    pub succeeded: Vec<T>,
    pub failed: Vec<E>,
}

impl<T, E> PartialResults<T, E> {
    pub fn new() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn all_failed(&self) -> bool {
        self.succeeded.is_empty() && !self.failed.is_empty()
    }

    fn push(&mut self, result: Result<T, E>) {
        match result {
            Ok(value) => self.succeeded.push(value),
            Err(err) => self.failed.push(err),
        }
    }
}

impl<T, E> Default for PartialResults<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> FromIterator<Result<T, E>> for PartialResults<T, E> {
    fn from_iter<I: IntoIterator<Item = Result<T, E>>>(iter: I) -> Self {
        let mut results = Self::new();
        for result in iter {
            results.push(result);
        }
        results
    }
}

/// Run `op` for each item one after another
pub async fn collect_sequential<I, F, Fut, T, E>(items: I, mut op: F) -> PartialResults<T, E>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut results = PartialResults::new();
    for item in items {
        results.push(op(item).await);
    }
    results
}

/// Run `op` for all items at once and wait for every attempt to finish
pub async fn collect_concurrent<I, F, Fut, T, E>(items: I, op: F) -> PartialResults<T, E>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    join_all(items.into_iter().map(op)).await.into_iter().collect()
}
