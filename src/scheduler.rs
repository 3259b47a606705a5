//! Delayed-task queue
//!
//! Replaces callback-chained timeouts with an explicit queue: tasks are
//! scheduled with a delay, fire in deadline order when [`Scheduler::due`] is
//! pumped, and can be cancelled through their handle at any point before they
//! fire. Cancellation is a first-class operation, not a flag the task body
//! checks.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Entry<T> {
    fire_at_ms: u64,
    seq: u64,
    id: TaskId,
    task: T,
}

// Ordering ignores the payload: earliest deadline first, scheduling order
// as the tiebreak. BinaryHeap is a max-heap, so comparisons are reversed.
impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at_ms == other.fire_at_ms && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.fire_at_ms, other.seq).cmp(&(self.fire_at_ms, self.seq))
    }
}

/// Deadline-ordered task queue with cancellable entries
#[derive(Debug)]
pub struct Scheduler<T> {
    heap: BinaryHeap<Entry<T>>,
    pending: HashSet<TaskId>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            pending: HashSet::new(),
            next_seq: 0,
        }
    }

    /// Schedule `task` to fire `delay_ms` after `now_ms`
    pub fn schedule_after(&mut self, now_ms: u64, delay_ms: u64, task: T) -> TaskId {
        let id = TaskId(self.next_seq);
        let entry = Entry {
            fire_at_ms: now_ms + delay_ms,
            seq: self.next_seq,
            id,
            task,
        };
        self.next_seq += 1;
        self.pending.insert(id);
        self.heap.push(entry);
        id
    }

    /// Cancel a pending task. No-op if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) {
        self.pending.remove(&id);
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.contains(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drain every task whose deadline is at or before `now_ms`, in
    /// deadline order. Cancelled entries are skipped and dropped.
    pub fn due(&mut self, now_ms: u64) -> Vec<T> {
        let mut fired = Vec::new();
        while self.heap.peek().is_some_and(|e| e.fire_at_ms <= now_ms) {
            if let Some(entry) = self.heap.pop() {
                if self.pending.remove(&entry.id) {
                    fired.push(entry.task);
                }
            }
        }
        fired
    }

    /// Drop everything, pending or not
    pub fn clear(&mut self) {
        self.heap.clear();
        self.pending.clear();
    }
}
