use std::{
  fmt::Debug,
  sync::{Arc, Condvar, Mutex, MutexGuard},
  time::{Duration, Instant},
};

use super::Observer;
use crate::{
  disposable::{Disposable, SharedDisposable},
  error::RxError,
  util::lock,
};

/// An observer that records every signal it receives, for assertions in
/// tests.
///
/// Clones share the same record, so one clone can be handed to
/// `subscribe_with` while another one is inspected. The `await_*` methods
/// block until a signal arrives from another thread.
pub struct TestObserver<Item>(Arc<(Mutex<Record<Item>>, Condvar)>);

struct Record<Item> {
  values: Vec<Item>,
  errors: Vec<RxError>,
  completions: usize,
  upstream: Option<SharedDisposable>,
  disposed: bool,
}

impl<Item> Clone for TestObserver<Item> {
  fn clone(&self) -> Self { TestObserver(self.0.clone()) }
}

impl<Item> Default for TestObserver<Item> {
  fn default() -> Self {
    let record = Record {
      values: vec![],
      errors: vec![],
      completions: 0,
      upstream: None,
      disposed: false,
    };
    TestObserver(Arc::new((Mutex::new(record), Condvar::new())))
  }
}

impl<Item> TestObserver<Item> {
  pub fn new() -> Self { Self::default() }

  fn record(&self) -> MutexGuard<'_, Record<Item>> { lock(&self.0 .0) }

  fn update(&self, f: impl FnOnce(&mut Record<Item>)) {
    f(&mut self.record());
    self.0 .1.notify_all();
  }

  pub fn values(&self) -> Vec<Item>
  where
    Item: Clone,
  {
    self.record().values.clone()
  }

  pub fn value_count(&self) -> usize { self.record().values.len() }

  pub fn errors(&self) -> Vec<RxError> { self.record().errors.clone() }

  pub fn completions(&self) -> usize { self.record().completions }

  pub fn is_completed(&self) -> bool { self.completions() > 0 }

  pub fn is_terminated(&self) -> bool {
    let record = self.record();
    record.completions > 0 || !record.errors.is_empty()
  }

  /// Whether `on_subscribe` has been received.
  pub fn is_subscribed(&self) -> bool { self.record().upstream.is_some() }

  /// Disposes the handle received through `on_subscribe`.
  pub fn dispose(&self) {
    let upstream = {
      let mut record = self.record();
      record.disposed = true;
      record.upstream.clone()
    };
    if let Some(upstream) = upstream {
      upstream.dispose();
    }
  }

  pub fn is_disposed(&self) -> bool {
    let record = self.record();
    record.disposed || record.upstream.as_ref().map_or(false, |u| u.is_disposed())
  }

  /// Blocks until a terminal signal arrives. Returns `false` on timeout.
  pub fn await_terminal(&self, timeout: Duration) -> bool {
    self.wait_until(timeout, |r| r.completions > 0 || !r.errors.is_empty())
  }

  /// Blocks until at least `count` values arrived. Returns `false` on
  /// timeout.
  pub fn await_count(&self, count: usize, timeout: Duration) -> bool {
    self.wait_until(timeout, |r| r.values.len() >= count)
  }

  fn wait_until(&self, timeout: Duration, done: impl Fn(&Record<Item>) -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    let mut record = self.record();
    loop {
      if done(&record) {
        return true;
      }
      let now = Instant::now();
      if now >= deadline {
        return false;
      }
      record = match self.0 .1.wait_timeout(record, deadline - now) {
        Ok((guard, _)) => guard,
        Err(poisoned) => poisoned.into_inner().0,
      };
    }
  }

  #[track_caller]
  pub fn assert_values(&self, expected: &[Item])
  where
    Item: PartialEq + Debug,
  {
    assert_eq!(self.record().values, expected);
  }

  #[track_caller]
  pub fn assert_complete(&self) {
    let record = self.record();
    assert_eq!(record.completions, 1, "expected exactly one completion");
    assert!(record.errors.is_empty(), "unexpected errors: {:?}", record.errors);
  }

  #[track_caller]
  pub fn assert_not_complete(&self) {
    assert_eq!(self.completions(), 0, "unexpected completion");
  }

  #[track_caller]
  pub fn assert_no_errors(&self) {
    let errors = self.errors();
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
  }

  #[track_caller]
  pub fn assert_completed_empty(&self) {
    assert_eq!(self.value_count(), 0, "expected no values");
    self.assert_complete();
  }

  /// Asserts a single error was received and returns it.
  #[track_caller]
  pub fn assert_error(&self) -> RxError {
    let record = self.record();
    assert_eq!(record.errors.len(), 1, "expected exactly one error");
    assert_eq!(record.completions, 0, "unexpected completion");
    record.errors[0].clone()
  }
}

impl<Item> Observer<Item> for TestObserver<Item> {
  fn on_subscribe(&mut self, d: SharedDisposable) {
    let dispose_now = {
      let mut record = self.record();
      record.upstream = Some(d.clone());
      record.disposed
    };
    if dispose_now {
      d.dispose();
    }
    self.0 .1.notify_all();
  }

  fn next(&mut self, value: Item) { self.update(|r| r.values.push(value)); }

  fn error(&mut self, err: RxError) { self.update(|r| r.errors.push(err)); }

  fn complete(&mut self) { self.update(|r| r.completions += 1); }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::disposable::BooleanDisposable;
  use std::thread;

  #[test]
  fn records_signals() {
    let obs = TestObserver::new();
    let mut c_obs = obs.clone();
    c_obs.on_subscribe(Arc::new(BooleanDisposable::new()));
    c_obs.next(1);
    c_obs.next(2);
    Observer::<i32>::complete(&mut c_obs);

    assert!(obs.is_subscribed());
    obs.assert_values(&[1, 2]);
    obs.assert_complete();
    obs.assert_no_errors();
  }

  #[test]
  fn dispose_reaches_upstream() {
    let upstream = BooleanDisposable::new();
    let obs = TestObserver::<i32>::new();
    obs.clone().on_subscribe(Arc::new(upstream.clone()));
    obs.dispose();
    assert!(upstream.is_disposed());
    assert!(obs.is_disposed());
  }

  #[test]
  fn dispose_before_subscribe() {
    let upstream = BooleanDisposable::new();
    let obs = TestObserver::<i32>::new();
    obs.dispose();
    obs.clone().on_subscribe(Arc::new(upstream.clone()));
    assert!(upstream.is_disposed());
  }

  #[test]
  fn await_from_other_thread() {
    let obs = TestObserver::new();
    let mut c_obs = obs.clone();
    let handle = thread::spawn(move || {
      thread::sleep(Duration::from_millis(10));
      c_obs.next("a");
      Observer::<&str>::complete(&mut c_obs);
    });
    assert!(obs.await_terminal(Duration::from_secs(5)));
    obs.assert_values(&["a"]);
    handle.join().unwrap();
  }

  #[test]
  fn await_times_out() {
    let obs = TestObserver::<i32>::new();
    assert!(!obs.await_count(1, Duration::from_millis(10)));
  }
}
