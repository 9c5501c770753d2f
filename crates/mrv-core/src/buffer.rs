//! Bounded buffer of the most recent raw replay payloads.
//!
//! The replay listener appends every payload it captures; once the buffer
//! is full the oldest entry is evicted. The viewer serves entries newest
//! first.

use std::collections::VecDeque;

use serde_json::Value;

use crate::constants::REPLAY_CAPACITY;

/// FIFO over raw replay values, holding at most `capacity` entries.
#[derive(Clone, Debug)]
pub struct ReplayBuffer {
    entries: VecDeque<Value>,
    capacity: usize,
}

impl Default for ReplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayBuffer {
    /// Buffer with the standard viewer capacity ([`REPLAY_CAPACITY`]).
    pub fn new() -> Self {
        Self::with_capacity(REPLAY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a payload, evicting the oldest entries past capacity.
    pub fn push(&mut self, value: Value) {
        self.entries.push_back(value);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Latest-first view, the order the viewer serves replays.
    pub fn newest_first(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().rev()
    }

    /// Insertion-order snapshot, suitable for feeding the pipeline.
    pub fn to_vec(&self) -> Vec<Value> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
