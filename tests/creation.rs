//! Integration tests for the creation entry points.

use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc, Mutex,
};

use rxlite::prelude::*;

#[test]
fn range_emits_consecutive_values() {
  let obs = TestObserver::new();
  observable::range(0, 9).subscribe_with(obs.clone());
  obs.assert_values(&[0, 1, 2, 3, 4, 5, 6, 7, 8]);
  obs.assert_complete();
  obs.assert_no_errors();
}

#[test]
fn range_with_negative_start() {
  let obs = TestObserver::new();
  observable::range(-2, 4).subscribe_with(obs.clone());
  obs.assert_values(&[-2, -1, 0, 1]);
}

#[test]
fn from_array_then_complete() {
  let result = Arc::new(Mutex::new(vec![]));
  let c_result = result.clone();
  let completed = Arc::new(AtomicUsize::new(0));
  let c_completed = completed.clone();

  observable::from_array(["a", "b", "c"]).subscribe_all(
    move |v| c_result.lock().unwrap().push(v),
    |e| panic!("unexpected error {e}"),
    move || {
      c_completed.fetch_add(1, Ordering::SeqCst);
    },
  );

  assert_eq!(*result.lock().unwrap(), vec!["a", "b", "c"]);
  assert_eq!(completed.load(Ordering::SeqCst), 1);
}

#[test]
fn just_is_one_element_sequence() {
  let obs = TestObserver::new();
  observable::just("hello").subscribe_with(obs.clone());
  obs.assert_values(&["hello"]);
  obs.assert_complete();
}

#[test]
fn from_callable_runs_at_subscribe_time() {
  let calls = Arc::new(AtomicUsize::new(0));
  let c_calls = calls.clone();
  let source = observable::from_callable(move || {
    c_calls.fetch_add(1, Ordering::SeqCst);
    Ok::<_, RxError>("value")
  });
  assert_eq!(calls.load(Ordering::SeqCst), 0);

  let obs = TestObserver::new();
  source.subscribe_with(obs.clone());
  obs.assert_values(&["value"]);
  obs.assert_complete();
  assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn from_callable_failure() {
  let obs = TestObserver::<u32>::new();
  observable::from_callable(|| {
    std::fs::read_to_string("/definitely/not/here").map(|s| s.len() as u32)
  })
  .subscribe_with(obs.clone());
  assert_eq!(obs.value_count(), 0);
  assert!(matches!(obs.assert_error(), RxError::Failure(_)));
}

#[test]
fn defer_builds_a_new_source_per_subscription() {
  let built = Arc::new(AtomicUsize::new(0));
  let c_built = built.clone();
  let source = observable::defer(move || {
    let n = c_built.fetch_add(1, Ordering::SeqCst) as i64;
    observable::range(n * 10, 2)
  });
  assert_eq!(built.load(Ordering::SeqCst), 0);

  let first = TestObserver::new();
  let second = TestObserver::new();
  source.subscribe_with(first.clone());
  source.subscribe_with(second.clone());
  first.assert_values(&[0, 1]);
  second.assert_values(&[10, 11]);
}

#[test]
fn create_with_teardown() {
  let torn_down = Arc::new(AtomicUsize::new(0));
  let c_torn_down = torn_down.clone();
  let obs = TestObserver::new();
  observable::create(move |emitter: Emitter<&str>| {
    let c_torn_down = c_torn_down.clone();
    emitter.set_cancellable(move || {
      c_torn_down.fetch_add(1, Ordering::SeqCst);
    });
    emitter.next("x");
    emitter.complete();
  })
  .subscribe_with(obs.clone());
  obs.assert_values(&["x"]);
  obs.assert_complete();
  assert_eq!(torn_down.load(Ordering::SeqCst), 1);
}

#[test]
fn create_errors_once() {
  let obs = TestObserver::<i32>::new();
  observable::create(|emitter: Emitter<i32>| {
    emitter.error(RxError::msg("first"));
    emitter.complete();
  })
  .subscribe_with(obs.clone());
  assert_eq!(obs.assert_error().to_string(), "first");
}

#[test]
fn boxed_sources_are_resubscribable() {
  let source: BoxedObservable<i64> = observable::range(1, 3).take_last(1).box_it();
  let obs = TestObserver::new();
  source.subscribe_with(obs.clone());
  source.clone().subscribe_with(obs.clone());
  obs.assert_values(&[3, 3]);
  assert_eq!(obs.completions(), 2);
}
