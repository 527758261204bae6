//! Event system for solver monitoring.
//!
//! Listeners registered on an engine receive a [`BestSolutionChangedEvent`]
//! every time a new best solution is published, plus solving started /
//! ended notifications. Dispatch is synchronous, on the solving thread, in
//! registration order.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use planwright_core::{PlanningSolution, score::SimpleScore};
//! use planwright_solver::event::{BestSolutionChangedEvent, EventBus, SolverEventListener};
//!
//! #[derive(Clone, Debug)]
//! struct MySolution { score: Option<SimpleScore> }
//! impl PlanningSolution for MySolution {
//!     type Score = SimpleScore;
//!     fn score(&self) -> Option<Self::Score> { self.score }
//!     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
//! }
//!
//! #[derive(Debug)]
//! struct PrintListener;
//! impl SolverEventListener<MySolution> for PrintListener {
//!     fn on_best_solution_changed(&self, event: &BestSolutionChangedEvent<MySolution>) {
//!         println!("New best: {:?}", event.new_best_score);
//!     }
//! }
//!
//! let bus = EventBus::<MySolution>::new();
//! let handle = bus.subscribe(Arc::new(PrintListener));
//! assert!(bus.unsubscribe(handle));
//! assert!(!bus.unsubscribe(handle));
//! ```

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{debug, info};

use planwright_core::{DispatchError, ListenerFault, PlanningSolution};

/// Notification that a new best solution was published.
pub struct BestSolutionChangedEvent<S: PlanningSolution> {
    /// The published snapshot. Never mutated after publication.
    pub new_best_solution: Arc<S>,
    /// Its score; `None` while the solution is uninitialized.
    pub new_best_score: Option<S::Score>,
    /// Wall time since the run started.
    pub time_millis_spent: u64,
    /// Whether every submitted problem fact change was applied when the
    /// snapshot was taken.
    pub every_problem_fact_change_processed: bool,
}

impl<S: PlanningSolution> Clone for BestSolutionChangedEvent<S> {
    fn clone(&self) -> Self {
        Self {
            new_best_solution: Arc::clone(&self.new_best_solution),
            new_best_score: self.new_best_score,
            time_millis_spent: self.time_millis_spent,
            every_problem_fact_change_processed: self.every_problem_fact_change_processed,
        }
    }
}

impl<S: PlanningSolution> Debug for BestSolutionChangedEvent<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BestSolutionChangedEvent")
            .field("new_best_score", &self.new_best_score)
            .field("time_millis_spent", &self.time_millis_spent)
            .field(
                "every_problem_fact_change_processed",
                &self.every_problem_fact_change_processed,
            )
            .finish()
    }
}

/// Listener for solver-level events.
///
/// Callbacks run on the solving thread and hold up the search while they
/// run. A panicking callback is isolated: later listeners still receive
/// the event and the run continues.
pub trait SolverEventListener<S: PlanningSolution>: Send + Sync + Debug {
    /// Called when a new best solution is published.
    fn on_best_solution_changed(&self, event: &BestSolutionChangedEvent<S>);

    /// Called when solving starts, with the input problem.
    fn on_solving_started(&self, _solution: &S) {}

    /// Called when solving ends, with the final best solution.
    ///
    /// The engine is already idle: `is_solving()` is false and a new
    /// `solve` may be started. Not called when a run fails.
    fn on_solving_ended(&self, _solution: &S, _is_terminated_early: bool) {}
}

/// Opaque registration handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Thread-safe observer registry.
///
/// Handles grow monotonically, so iterating the map in key order is
/// registration order. Each dispatch works on a snapshot of the registry
/// taken before the first callback; listeners added or removed from inside
/// a callback only affect later dispatches.
pub struct EventBus<S: PlanningSolution> {
    listeners: RwLock<BTreeMap<u64, Arc<dyn SolverEventListener<S>>>>,
    next_handle: AtomicU64,
}

impl<S: PlanningSolution> EventBus<S> {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(BTreeMap::new()),
            next_handle: AtomicU64::new(1),
        }
    }

    /// Registers a listener. Every call returns a distinct handle, even for
    /// the same listener instance.
    pub fn subscribe(&self, listener: Arc<dyn SolverEventListener<S>>) -> ListenerHandle {
        let id = self.next_handle.fetch_add(1, Ordering::SeqCst);
        self.listeners.write().insert(id, listener);
        ListenerHandle(id)
    }

    /// Removes a registration. Returns false if it was already removed.
    pub fn unsubscribe(&self, handle: ListenerHandle) -> bool {
        self.listeners.write().remove(&handle.0).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.read().is_empty()
    }

    /// Dispatches a best solution changed event to every listener.
    pub fn publish(&self, event: &BestSolutionChangedEvent<S>) -> Result<(), DispatchError> {
        self.dispatch("best_solution_changed", |listener| {
            listener.on_best_solution_changed(event)
        })
    }

    /// Dispatches the solving started notification.
    pub fn fire_solving_started(&self, solution: &S) -> Result<(), DispatchError> {
        self.dispatch("solving_started", |listener| {
            listener.on_solving_started(solution)
        })
    }

    /// Dispatches the solving ended notification.
    pub fn fire_solving_ended(
        &self,
        solution: &S,
        is_terminated_early: bool,
    ) -> Result<(), DispatchError> {
        self.dispatch("solving_ended", |listener| {
            listener.on_solving_ended(solution, is_terminated_early)
        })
    }

    fn dispatch(
        &self,
        event: &'static str,
        callback: impl Fn(&dyn SolverEventListener<S>),
    ) -> Result<(), DispatchError> {
        let snapshot: Vec<(u64, Arc<dyn SolverEventListener<S>>)> = self
            .listeners
            .read()
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();

        let mut faults = Vec::new();
        for (handle, listener) in snapshot {
            let outcome = catch_unwind(AssertUnwindSafe(|| callback(listener.as_ref())));
            if let Err(payload) = outcome {
                faults.push(ListenerFault {
                    handle,
                    listener: format!("{listener:?}"),
                    message: panic_message(payload.as_ref()),
                });
            }
        }

        if faults.is_empty() {
            Ok(())
        } else {
            Err(DispatchError { event, faults })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

impl<S: PlanningSolution> Default for EventBus<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlanningSolution> Debug for EventBus<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// A logging listener that reports events through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventListener {
    prefix: String,
}

impl LoggingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a logging listener with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl<S: PlanningSolution> SolverEventListener<S> for LoggingEventListener {
    fn on_best_solution_changed(&self, event: &BestSolutionChangedEvent<S>) {
        info!(
            event = "best_solution_changed",
            prefix = %self.prefix,
            score = ?event.new_best_score,
            time_ms = event.time_millis_spent,
            every_change_processed = event.every_problem_fact_change_processed,
        );
    }

    fn on_solving_started(&self, _solution: &S) {
        debug!(event = "solving_started", prefix = %self.prefix);
    }

    fn on_solving_ended(&self, solution: &S, is_terminated_early: bool) {
        debug!(
            event = "solving_ended",
            prefix = %self.prefix,
            score = ?solution.score(),
            terminated_early = is_terminated_early,
        );
    }
}

/// A counting listener that tracks event occurrences.
///
/// Useful for testing and statistics collection.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    best_solution_count: AtomicUsize,
    solving_started_count: AtomicUsize,
    solving_ended_count: AtomicUsize,
}

impl CountingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best_solution_count(&self) -> usize {
        self.best_solution_count.load(Ordering::SeqCst)
    }

    pub fn solving_started_count(&self) -> usize {
        self.solving_started_count.load(Ordering::SeqCst)
    }

    pub fn solving_ended_count(&self) -> usize {
        self.solving_ended_count.load(Ordering::SeqCst)
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.best_solution_count.store(0, Ordering::SeqCst);
        self.solving_started_count.store(0, Ordering::SeqCst);
        self.solving_ended_count.store(0, Ordering::SeqCst);
    }
}

impl<S: PlanningSolution> SolverEventListener<S> for CountingEventListener {
    fn on_best_solution_changed(&self, _event: &BestSolutionChangedEvent<S>) {
        self.best_solution_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_started(&self, _solution: &S) {
        self.solving_started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_ended(&self, _solution: &S, _is_terminated_early: bool) {
        self.solving_ended_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Streams best solutions into a tokio channel.
///
/// Lets async code consume improvements while the blocking solve runs on
/// its own thread. A closed receiver is ignored.
pub struct ChannelEventListener<S: PlanningSolution> {
    sender: mpsc::UnboundedSender<(Arc<S>, Option<S::Score>)>,
}

impl<S: PlanningSolution> ChannelEventListener<S> {
    pub fn new(sender: mpsc::UnboundedSender<(Arc<S>, Option<S::Score>)>) -> Self {
        Self { sender }
    }

    /// Creates a listener together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<(Arc<S>, Option<S::Score>)>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl<S: PlanningSolution> Debug for ChannelEventListener<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelEventListener")
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

impl<S: PlanningSolution> SolverEventListener<S> for ChannelEventListener<S> {
    fn on_best_solution_changed(&self, event: &BestSolutionChangedEvent<S>) {
        let _ = self
            .sender
            .send((Arc::clone(&event.new_best_solution), event.new_best_score));
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
