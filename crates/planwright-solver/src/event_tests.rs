//! Tests for the event system.

use super::*;
use parking_lot::Mutex;
use planwright_core::score::SimpleScore;
use planwright_test::NQueensSolution;

fn event(score: i64) -> BestSolutionChangedEvent<NQueensSolution> {
    let mut solution = NQueensSolution::with_rows(&[0, 1]);
    solution.score = Some(SimpleScore::of(score));
    BestSolutionChangedEvent {
        new_best_solution: Arc::new(solution),
        new_best_score: Some(SimpleScore::of(score)),
        time_millis_spent: 0,
        every_problem_fact_change_processed: true,
    }
}

#[derive(Debug, Default)]
struct Recorder {
    name: &'static str,
    panic_on_call: Option<usize>,
    seen: Mutex<Vec<i64>>,
    log: Option<Arc<Mutex<Vec<String>>>>,
}

impl SolverEventListener<NQueensSolution> for Recorder {
    fn on_best_solution_changed(&self, event: &BestSolutionChangedEvent<NQueensSolution>) {
        let score = event.new_best_score.map(SimpleScore::value).unwrap_or(i64::MIN);
        let call = {
            let mut seen = self.seen.lock();
            seen.push(score);
            seen.len()
        };
        if let Some(log) = &self.log {
            log.lock().push(format!("{}:{score}", self.name));
        }
        if self.panic_on_call == Some(call) {
            panic!("{} refuses call {call}", self.name);
        }
    }
}

#[test]
fn test_bus_new() {
    let bus: EventBus<NQueensSolution> = EventBus::new();
    assert_eq!(bus.listener_count(), 0);
    assert!(!bus.has_listeners());
    assert!(bus.publish(&event(0)).is_ok());
}

#[test]
fn test_counting_listener() {
    let bus: EventBus<NQueensSolution> = EventBus::new();
    let listener = Arc::new(CountingEventListener::new());
    bus.subscribe(listener.clone());

    let solution = NQueensSolution::with_rows(&[0]);
    bus.fire_solving_started(&solution).unwrap();
    bus.publish(&event(-2)).unwrap();
    bus.publish(&event(-1)).unwrap();
    bus.fire_solving_ended(&solution, false).unwrap();

    assert_eq!(listener.solving_started_count(), 1);
    assert_eq!(listener.best_solution_count(), 2);
    assert_eq!(listener.solving_ended_count(), 1);

    listener.reset();
    assert_eq!(listener.best_solution_count(), 0);
}

#[test]
fn test_dispatch_in_registration_order() {
    let bus: EventBus<NQueensSolution> = EventBus::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    for name in ["first", "second", "third"] {
        bus.subscribe(Arc::new(Recorder {
            name,
            log: Some(Arc::clone(&log)),
            ..Recorder::default()
        }));
    }

    bus.publish(&event(-1)).unwrap();
    assert_eq!(*log.lock(), vec!["first:-1", "second:-1", "third:-1"]);
}

#[test]
fn test_panicking_listener_does_not_starve_others() {
    let bus: EventBus<NQueensSolution> = EventBus::new();
    let l1 = Arc::new(Recorder {
        name: "l1",
        panic_on_call: Some(2),
        ..Recorder::default()
    });
    let l2 = Arc::new(Recorder {
        name: "l2",
        ..Recorder::default()
    });
    let h1 = bus.subscribe(l1.clone());
    bus.subscribe(l2.clone());

    assert!(bus.publish(&event(-3)).is_ok());
    let err = bus.publish(&event(-2)).unwrap_err();
    assert!(bus.publish(&event(-1)).is_ok());

    assert_eq!(err.event, "best_solution_changed");
    assert_eq!(err.faults.len(), 1);
    assert_eq!(err.faults[0].handle, h1.id());
    assert_eq!(err.faults[0].message, "l1 refuses call 2");

    assert_eq!(*l1.seen.lock(), vec![-3, -2, -1]);
    assert_eq!(*l2.seen.lock(), vec![-3, -2, -1]);
}

#[test]
fn test_unsubscribe_is_idempotent() {
    let bus: EventBus<NQueensSolution> = EventBus::new();
    let listener = Arc::new(CountingEventListener::new());
    let handle = bus.subscribe(listener.clone());

    assert!(bus.unsubscribe(handle));
    assert!(!bus.unsubscribe(handle));
    bus.publish(&event(0)).unwrap();
    assert_eq!(listener.best_solution_count(), 0);
}

#[test]
fn test_same_listener_twice_gets_distinct_handles() {
    let bus: EventBus<NQueensSolution> = EventBus::new();
    let listener = Arc::new(CountingEventListener::new());
    let a = bus.subscribe(listener.clone());
    let b = bus.subscribe(listener.clone());
    assert_ne!(a, b);

    bus.publish(&event(0)).unwrap();
    assert_eq!(listener.best_solution_count(), 2);

    bus.unsubscribe(a);
    bus.publish(&event(0)).unwrap();
    assert_eq!(listener.best_solution_count(), 3);
}

#[derive(Debug)]
struct SelfRemoving {
    bus: Arc<EventBus<NQueensSolution>>,
    handle: Mutex<Option<ListenerHandle>>,
    calls: AtomicUsize,
}

impl SolverEventListener<NQueensSolution> for SelfRemoving {
    fn on_best_solution_changed(&self, _event: &BestSolutionChangedEvent<NQueensSolution>) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.handle.lock().take() {
            self.bus.unsubscribe(handle);
        }
    }
}

#[test]
fn test_unsubscribe_from_inside_callback() {
    let bus = Arc::new(EventBus::<NQueensSolution>::new());
    let listener = Arc::new(SelfRemoving {
        bus: Arc::clone(&bus),
        handle: Mutex::new(None),
        calls: AtomicUsize::new(0),
    });
    let later = Arc::new(CountingEventListener::new());

    let handle = bus.subscribe(listener.clone());
    *listener.handle.lock() = Some(handle);
    bus.subscribe(later.clone());

    bus.publish(&event(-1)).unwrap();
    bus.publish(&event(0)).unwrap();

    assert_eq!(listener.calls.load(Ordering::SeqCst), 1);
    assert_eq!(later.best_solution_count(), 2);
    assert_eq!(bus.listener_count(), 1);
}

#[test]
fn test_channel_listener_streams_best_solutions() {
    let bus: EventBus<NQueensSolution> = EventBus::new();
    let (listener, mut receiver) = ChannelEventListener::channel();
    bus.subscribe(Arc::new(listener));

    bus.publish(&event(-2)).unwrap();
    bus.publish(&event(0)).unwrap();

    let (first, first_score) = receiver.try_recv().unwrap();
    let (_, second_score) = receiver.try_recv().unwrap();
    assert_eq!(first.score, Some(SimpleScore::of(-2)));
    assert_eq!(first_score, Some(SimpleScore::of(-2)));
    assert_eq!(second_score, Some(SimpleScore::of(0)));
    assert!(receiver.try_recv().is_err());
}

#[test]
fn test_channel_listener_ignores_closed_receiver() {
    let bus: EventBus<NQueensSolution> = EventBus::new();
    let (listener, receiver) = ChannelEventListener::channel();
    drop(receiver);
    bus.subscribe(Arc::new(listener));

    assert!(bus.publish(&event(0)).is_ok());
}
