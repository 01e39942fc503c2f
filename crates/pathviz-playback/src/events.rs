//! Time-keyed event queue for scheduled playback events.
//!
//! Events are stored in a min-heap keyed by `(time, insertion_order)`.
//! Earlier times pop first; events at the same time pop in the order they
//! were pushed.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// An entry in the event queue.
#[derive(Debug)]
struct Entry<E> {
    event: E,
    at: u64,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Wrapped in Reverse for the BinaryHeap: this is the natural order.
        self.at.cmp(&other.at).then(self.seq.cmp(&other.seq))
    }
}

/// A queue of events due at given times (in milliseconds).
pub struct EventQueue<E> {
    heap: BinaryHeap<Reverse<Entry<E>>>,
    seq: u64,
}

impl<E> EventQueue<E> {
    /// Create an empty event queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Schedule `event` at time `at`.
    pub fn push(&mut self, event: E, at: u64) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { event, at, seq }));
    }

    /// Pop the earliest event if it is due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<(E, u64)> {
        if self.peek_time()? > now {
            return None;
        }
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.event, entry.at))
    }

    /// Time of the earliest pending event.
    pub fn peek_time(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(entry)| entry.at)
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Drop every pending event, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let n = self.heap.len();
        self.heap.clear();
        n
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Extend<(E, u64)> for EventQueue<E> {
    fn extend<I: IntoIterator<Item = (E, u64)>>(&mut self, iter: I) {
        for (event, at) in iter {
            self.push(event, at);
        }
    }
}
