//! Pending problem fact change queue.

use std::collections::VecDeque;
use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use planwright_core::PlanningSolution;

use super::problem_change::BoxedProblemChange;

/// Unbounded, thread-safe FIFO of problem fact changes.
///
/// Any number of producers may enqueue; the solving thread is the only
/// consumer. Drained changes count as *in flight* until the consumer
/// reports them processed, so `is_every_change_processed` stays false
/// between draining a change and finishing its application.
pub struct FactChangeQueue<S: PlanningSolution> {
    pending: Mutex<VecDeque<BoxedProblemChange<S>>>,
    in_flight: AtomicUsize,
}

impl<S: PlanningSolution> FactChangeQueue<S> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Appends a change to the tail. Never blocks and never rejects.
    pub fn enqueue(&self, change: BoxedProblemChange<S>) -> bool {
        self.pending.lock().push_back(change);
        true
    }

    /// Appends several changes to the tail, keeping their order contiguous.
    pub fn enqueue_all(&self, changes: impl IntoIterator<Item = BoxedProblemChange<S>>) -> bool {
        self.pending.lock().extend(changes);
        true
    }

    /// Removes and returns every queued change in FIFO order.
    pub fn drain_all(&self) -> Vec<BoxedProblemChange<S>> {
        let mut pending = self.pending.lock();
        let drained: Vec<_> = pending.drain(..).collect();
        self.in_flight.fetch_add(drained.len(), Ordering::SeqCst);
        drained
    }

    /// Returns true if changes are waiting. Advisory only.
    pub fn has_pending(&self) -> bool {
        !self.pending.lock().is_empty()
    }

    /// Returns the number of waiting changes. Advisory only.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Returns true if no change is waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Returns true if the queue is empty and no drained change is still
    /// being applied.
    pub fn is_every_change_processed(&self) -> bool {
        let pending = self.pending.lock();
        pending.is_empty() && self.in_flight.load(Ordering::SeqCst) == 0
    }

    /// Reports `count` drained changes as finished, applied or discarded.
    pub fn mark_processed(&self, count: usize) {
        let _ = self
            .in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                Some(n.saturating_sub(count))
            });
    }

    /// Returns drained but unapplied changes to the head of the queue,
    /// ahead of anything enqueued since, in their original order.
    pub fn requeue_front(&self, changes: Vec<BoxedProblemChange<S>>) {
        let count = changes.len();
        let mut pending = self.pending.lock();
        for change in changes.into_iter().rev() {
            pending.push_front(change);
        }
        self.mark_processed(count);
    }
}

impl<S: PlanningSolution> Default for FactChangeQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution> Debug for FactChangeQueue<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactChangeQueue")
            .field("pending", &self.len())
            .field("in_flight", &self.in_flight.load(Ordering::SeqCst))
            .finish()
    }
}
