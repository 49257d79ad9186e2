use std::collections::VecDeque;

use crate::domain::Sample;

/// Sliding window over the most recent samples of every symbol combined.
///
/// `version` increases on every change a renderer should see, so consumers
/// can tell "something landed since my last redraw" without diffing.
#[derive(Debug, Clone)]
pub struct StreamBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
    version: u64,
}

impl StreamBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            version: 0,
        }
    }

    /// Append in arrival order, then evict from the front down to capacity.
    /// An empty batch changes nothing (not even the version).
    pub fn push(&mut self, batch: Vec<Sample>) {
        if batch.is_empty() {
            return;
        }
        self.samples.extend(batch);
        let overflow = self.samples.len().saturating_sub(self.capacity);
        self.samples.drain(..overflow);
        self.version += 1;
    }

    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().cloned().collect()
    }

    /// Samples for one symbol in arrival order; empty if it never appeared.
    pub fn select_series(&self, symbol: &str) -> Vec<Sample> {
        self.samples
            .iter()
            .filter(|s| s.symbol == symbol)
            .cloned()
            .collect()
    }

    /// Drop all contents (new connection). Bumps the version so the chart empties too.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.version += 1;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
