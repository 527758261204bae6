//! Solver engine: one blocking solving run at a time, controllable from
//! other threads.
//!
//! The solving thread owns the working solution. Other threads interact
//! through the engine's shared state only: they enqueue problem fact
//! changes, request early termination, read the published best solution,
//! or (un)register listeners. None of these block on search work.
//!
//! # Example
//!
//! ```
//! use planwright_core::{PlanningSolution, score::SimpleScore};
//! use planwright_scoring::ScoreDirectorFactory;
//! use planwright_solver::engine::SolverEngine;
//! use planwright_solver::search::{ChangeMoveSelector, LocalSearch};
//! use planwright_solver::termination::StepCountTermination;
//!
//! #[derive(Clone, Debug)]
//! struct Line { slots: Vec<Option<i64>>, score: Option<SimpleScore> }
//!
//! impl PlanningSolution for Line {
//!     type Score = SimpleScore;
//!     fn score(&self) -> Option<Self::Score> { self.score }
//!     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
//! }
//!
//! fn count(l: &Line) -> usize { l.slots.len() }
//! fn values(_: &Line) -> Vec<i64> { (0..10).collect() }
//! fn get(l: &Line, i: usize) -> Option<i64> { l.slots[i] }
//! fn set(l: &mut Line, i: usize, v: Option<i64>) { l.slots[i] = v; }
//! fn distance_to_seven(l: &Line) -> SimpleScore {
//!     SimpleScore::of(-l.slots.iter().flatten().map(|v| (v - 7).abs()).sum::<i64>())
//! }
//!
//! let selector = ChangeMoveSelector::new(count, values, get, set, "slot");
//! let engine = SolverEngine::new(ScoreDirectorFactory::new(distance_to_seven))
//!     .with_search(Box::new(LocalSearch::new(Box::new(selector))))
//!     .with_termination(Box::new(StepCountTermination::new(200)));
//!
//! let solved = engine
//!     .solve(Line { slots: vec![Some(0), Some(9)], score: None })
//!     .unwrap();
//! assert!(solved.score.unwrap() > SimpleScore::of(-9));
//! assert!(!engine.is_solving());
//! ```

use std::fmt::{self, Debug};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, info, trace, warn};

use planwright_config::SolverConfig;
use planwright_core::{DispatchError, ParseableScore, PlanningSolution, SolverError};
use planwright_scoring::ScoreDirectorFactory;

use crate::event::{BestSolutionChangedEvent, EventBus, ListenerHandle, SolverEventListener};
use crate::realtime::{BoxedProblemChange, FactChangeQueue};
use crate::scope::SolverScope;
use crate::search::{Move, NextMove, SearchAlgorithm};
use crate::termination::{terminations_from_config, SolverState, Termination, TerminationGate};

/// How the most recent run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// `terminate_early` stopped the run.
    TerminatedEarly,
    /// A termination condition was met or the search ran out of moves.
    TerminatedNaturally,
    /// A problem fact change failed and aborted the run.
    Failed,
}

struct BestSnapshot<S: PlanningSolution> {
    solution: Option<Arc<S>>,
    score: Option<S::Score>,
}

#[derive(Debug, Default, Clone, Copy)]
struct RunClock {
    started: Option<Instant>,
    ended: Option<Instant>,
}

impl RunClock {
    fn millis(&self) -> u64 {
        let Some(started) = self.started else {
            return 0;
        };
        let end = self.ended.unwrap_or_else(Instant::now);
        end.saturating_duration_since(started).as_millis() as u64
    }
}

/// Clears the solving flag however `solve` exits.
struct RunGuard<'a>(&'a TerminationGate);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.finish();
    }
}

/// Runs a search algorithm against a problem and manages everything a
/// long-running solve needs around it.
///
/// Share it between threads with `Arc<SolverEngine<..>>`: `solve` blocks
/// the calling thread, every other method returns promptly.
pub struct SolverEngine<S: PlanningSolution, C> {
    factory: ScoreDirectorFactory<S, C>,
    search: Option<Mutex<Box<dyn SearchAlgorithm<S>>>>,
    config: SolverConfig,
    config_terminations: Vec<Box<dyn Termination<S>>>,
    terminations: Vec<Box<dyn Termination<S>>>,
    config_error: Option<String>,
    gate: TerminationGate,
    queue: FactChangeQueue<S>,
    events: EventBus<S>,
    best: RwLock<BestSnapshot<S>>,
    clock: RwLock<RunClock>,
    last_run_outcome: RwLock<Option<RunOutcome>>,
}

impl<S, C> SolverEngine<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    /// Creates an engine with no search algorithm and no termination.
    pub fn new(factory: ScoreDirectorFactory<S, C>) -> Self {
        Self {
            factory,
            search: None,
            config: SolverConfig::default(),
            config_terminations: Vec::new(),
            terminations: Vec::new(),
            config_error: None,
            gate: TerminationGate::new(),
            queue: FactChangeQueue::new(),
            events: EventBus::new(),
            best: RwLock::new(BestSnapshot {
                solution: None,
                score: None,
            }),
            clock: RwLock::new(RunClock::default()),
            last_run_outcome: RwLock::new(None),
        }
    }

    pub fn with_search(mut self, search: Box<dyn SearchAlgorithm<S>>) -> Self {
        self.search = Some(Mutex::new(search));
        self
    }

    /// Adds a termination condition. The run stops once any condition is
    /// met.
    pub fn with_termination(mut self, termination: Box<dyn Termination<S>>) -> Self {
        self.terminations.push(termination);
        self
    }

    /// Runs one solve to completion on the calling thread.
    ///
    /// Problem fact changes queued before the call are applied before the
    /// first step. Returns the best solution found, which is the input
    /// itself if no initialized solution was ever reached.
    pub fn solve(&self, problem: S) -> Result<S, SolverError> {
        if let Some(message) = &self.config_error {
            return Err(SolverError::Config(message.clone()));
        }
        let Some(search) = &self.search else {
            return Err(SolverError::Config(
                "no search algorithm configured".to_string(),
            ));
        };

        let (best, outcome) = {
            let _run = self.claim_run()?;
            let mut search = search.lock();
            self.run_to_end(problem, &mut **search)?
        };

        // Fired once the engine is idle again, so a listener may start the
        // next run from here.
        let terminated_early = outcome == RunOutcome::TerminatedEarly;
        report_dispatch(self.events.fire_solving_ended(&best, terminated_early));
        Ok(best)
    }

    /// Marks the engine as solving and resets the run clock and outcome
    /// under the same locks, so readers never see the new run with the
    /// previous run's timing.
    fn claim_run(&self) -> Result<RunGuard<'_>, SolverError> {
        let mut clock = self.clock.write();
        let mut last_outcome = self.last_run_outcome.write();
        self.gate.try_start()?;
        *clock = RunClock {
            started: Some(Instant::now()),
            ended: None,
        };
        *last_outcome = None;
        Ok(RunGuard(&self.gate))
    }

    fn run_to_end(
        &self,
        problem: S,
        search: &mut dyn SearchAlgorithm<S>,
    ) -> Result<(S, RunOutcome), SolverError> {
        let director = self.factory.build_score_director(problem);
        let mut scope = SolverScope::with_optional_seed(Box::new(director), self.config.random_seed);

        info!(
            event = "solve_start",
            algorithm = search.algorithm_name(),
            pending_changes = self.queue.len(),
            seed = ?self.config.random_seed,
        );

        let result = self.run(&mut scope, search);
        self.clock.write().ended = Some(Instant::now());

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                *self.last_run_outcome.write() = Some(RunOutcome::Failed);
                info!(
                    event = "solve_end",
                    outcome = ?RunOutcome::Failed,
                    steps = scope.total_step_count(),
                    time_ms = self.time_millis_spent(),
                );
                return Err(err);
            }
        };
        *self.last_run_outcome.write() = Some(outcome);

        let best = match self.best_solution() {
            Some(best) => (*best).clone(),
            None => scope.working_solution().clone(),
        };
        info!(
            event = "solve_end",
            outcome = ?outcome,
            score = ?best.score(),
            steps = scope.total_step_count(),
            restarts = scope.restart_count(),
            time_ms = self.time_millis_spent(),
        );
        Ok((best, outcome))
    }

    fn run(
        &self,
        scope: &mut SolverScope<'_, S>,
        search: &mut dyn SearchAlgorithm<S>,
    ) -> Result<RunOutcome, SolverError> {
        let initial_score = if scope.working_solution().is_initialized() {
            Some(scope.calculate_score())
        } else {
            None
        };
        self.install_best(scope.working_solution(), initial_score);
        scope.set_best_score(initial_score);
        report_dispatch(self.events.fire_solving_started(scope.working_solution()));
        search.solving_started(scope);

        loop {
            self.apply_fact_changes(scope, search)?;

            if self.gate.is_terminate_early() {
                return Ok(RunOutcome::TerminatedEarly);
            }

            match search.next_move(scope) {
                NextMove::Found(chosen) => self.take_step(scope, search, chosen),
                NextMove::NotFound => {
                    scope.increment_step_count();
                    std::thread::yield_now();
                }
                NextMove::Exhausted => {
                    if !self.queue.has_pending() {
                        debug!(
                            event = "search_exhausted",
                            algorithm = search.algorithm_name(),
                            steps = scope.total_step_count(),
                        );
                        return Ok(RunOutcome::TerminatedNaturally);
                    }
                }
            }

            let scope_view: &SolverScope<'_, S> = scope;
            let terminated = || {
                self.terminations
                    .iter()
                    .chain(&self.config_terminations)
                    .any(|t| t.is_terminated(scope_view))
            };
            if !self.gate.should_continue(terminated) {
                return Ok(if self.gate.is_terminate_early() {
                    RunOutcome::TerminatedEarly
                } else {
                    RunOutcome::TerminatedNaturally
                });
            }
        }
    }

    fn take_step(
        &self,
        scope: &mut SolverScope<'_, S>,
        search: &mut dyn SearchAlgorithm<S>,
        chosen: Box<dyn Move<S>>,
    ) {
        chosen.do_move(scope.score_director_mut());
        let score = scope.calculate_score();
        let step = scope.increment_step_count();
        scope.set_last_step_score(score);
        search.step_ended(&score);
        trace!(event = "step", step, score = %score, ?chosen);

        if !scope.working_solution().is_initialized() {
            return;
        }
        if scope.best_score().map_or(true, |best| score > best) {
            debug!(event = "new_best", step, score = %score);
            scope.set_best_score(Some(score));
            self.publish_best(scope.working_solution(), Some(score));
        }
    }

    /// Applies every queued change to the best solution and restarts the
    /// search from there.
    fn apply_fact_changes(
        &self,
        scope: &mut SolverScope<'_, S>,
        search: &mut dyn SearchAlgorithm<S>,
    ) -> Result<(), SolverError> {
        let changes = self.queue.drain_all();
        if changes.is_empty() {
            return Ok(());
        }
        let count = changes.len();
        debug!(event = "fact_changes_drained", count);

        if let Some(best) = self.best_solution() {
            scope
                .score_director_mut()
                .set_working_solution((*best).clone());
        }

        let mut changes = changes.into_iter();
        let mut applied = 0;
        while let Some(change) = changes.next() {
            if let Err(source) = change.apply(scope.score_director_mut()) {
                let remaining: Vec<BoxedProblemChange<S>> = changes.collect();
                let requeued = remaining.len();
                self.queue.requeue_front(remaining);
                self.queue.mark_processed(applied + 1);
                let change = format!("{change:?}");
                error!(
                    event = "fact_change_failed",
                    change = %change,
                    error = %source,
                    applied,
                    requeued,
                );
                return Err(SolverError::ProblemChange { change, source });
            }
            applied += 1;
        }
        scope.score_director_mut().trigger_variable_listeners();
        self.queue.mark_processed(count);

        scope.restart();
        search.solving_restarted(scope);

        let score = if scope.working_solution().is_initialized() {
            Some(scope.calculate_score())
        } else {
            None
        };
        debug!(
            event = "restarted",
            applied,
            restarts = scope.restart_count(),
            score = ?score,
        );
        scope.set_best_score(score);
        self.publish_best(scope.working_solution(), score);
        Ok(())
    }

    fn install_best(&self, solution: &S, score: Option<S::Score>) -> Arc<S> {
        let mut snapshot = solution.clone();
        snapshot.set_score(score);
        let snapshot = Arc::new(snapshot);
        let mut best = self.best.write();
        best.solution = Some(Arc::clone(&snapshot));
        best.score = score;
        snapshot
    }

    fn publish_best(&self, solution: &S, score: Option<S::Score>) {
        let snapshot = self.install_best(solution, score);
        let event = BestSolutionChangedEvent {
            new_best_solution: snapshot,
            new_best_score: score,
            time_millis_spent: self.time_millis_spent(),
            every_problem_fact_change_processed: self.queue.is_every_change_processed(),
        };
        report_dispatch(self.events.publish(&event));
    }

    /// The latest published best solution; `None` before the first run.
    pub fn best_solution(&self) -> Option<Arc<S>> {
        self.best.read().solution.clone()
    }

    /// Score of the latest published best solution; `None` while it is
    /// uninitialized.
    pub fn best_score(&self) -> Option<S::Score> {
        self.best.read().score
    }

    /// Wall time of the current run, or of the most recent one when idle.
    pub fn time_millis_spent(&self) -> u64 {
        self.clock.read().millis()
    }

    pub fn is_solving(&self) -> bool {
        self.gate.is_solving()
    }

    /// Asks the active run to stop at its next step boundary.
    ///
    /// Returns true only for the call that made the request; false when
    /// already requested or when no run is active.
    pub fn terminate_early(&self) -> bool {
        let requested = self.gate.request_terminate_early();
        if requested {
            info!(event = "terminate_early_requested");
        }
        requested
    }

    pub fn is_terminate_early(&self) -> bool {
        self.gate.is_terminate_early()
    }

    pub fn state(&self) -> SolverState {
        self.gate.state()
    }

    pub fn last_run_outcome(&self) -> Option<RunOutcome> {
        *self.last_run_outcome.read()
    }

    /// Queues a problem fact change. Always accepted; applied by the active
    /// run between steps, or by the next run before its first step.
    pub fn add_problem_fact_change(&self, change: BoxedProblemChange<S>) -> bool {
        self.queue.enqueue(change)
    }

    /// Queues several changes as one contiguous batch.
    pub fn add_problem_fact_changes(
        &self,
        changes: impl IntoIterator<Item = BoxedProblemChange<S>>,
    ) -> bool {
        self.queue.enqueue_all(changes)
    }

    pub fn is_every_problem_fact_change_processed(&self) -> bool {
        self.queue.is_every_change_processed()
    }

    pub fn add_event_listener(&self, listener: Arc<dyn SolverEventListener<S>>) -> ListenerHandle {
        self.events.subscribe(listener)
    }

    /// Removes a listener. Removing the same handle again is a no-op that
    /// returns false.
    pub fn remove_event_listener(&self, handle: ListenerHandle) -> bool {
        self.events.unsubscribe(handle)
    }

    pub fn score_director_factory(&self) -> &ScoreDirectorFactory<S, C> {
        &self.factory
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

impl<S, C> SolverEngine<S, C>
where
    S: PlanningSolution,
    S::Score: ParseableScore,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    /// Applies a solver config: random seed and termination conditions.
    ///
    /// An invalid config does not panic here; `solve` reports it as a
    /// configuration error without starting a run.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        let built = config.validate().map_err(|e| e.to_string()).and_then(|()| {
            match &config.termination {
                Some(termination) => terminations_from_config::<S>(termination).map_err(|e| match e {
                    SolverError::Config(message) => message,
                    other => other.to_string(),
                }),
                None => Ok(Vec::new()),
            }
        });

        match built {
            Ok(terminations) => {
                self.config_terminations = terminations;
                self.config_error = None;
            }
            Err(message) => {
                warn!(event = "invalid_config", error = %message);
                self.config_terminations = Vec::new();
                self.config_error = Some(message);
            }
        }
        self.config = config;
        self
    }
}

/// Classifies dispatch faults as a listener error and logs one warning per
/// faulting listener. The run continues either way.
fn report_dispatch(result: Result<(), DispatchError>) -> Option<SolverError> {
    let err = SolverError::from(result.err()?);
    if let SolverError::Listener(dispatch) = &err {
        for fault in &dispatch.faults {
            warn!(
                event = "listener_fault",
                error = %err,
                handle = fault.handle,
                listener = %fault.listener,
                message = %fault.message,
            );
        }
    }
    Some(err)
}

impl<S: PlanningSolution, C> Debug for SolverEngine<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverEngine")
            .field("state", &self.gate.state())
            .field("terminations", &(self.terminations.len() + self.config_terminations.len()))
            .field("queue", &self.queue)
            .field("events", &self.events)
            .field("best_score", &self.best.read().score)
            .finish()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
