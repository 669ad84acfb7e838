use std::{collections::VecDeque, sync::Arc};

use crate::{
  disposable::{Disposable, SharedDisposable},
  error::RxError,
  observable::Observable,
  observer::Observer,
  subscription::Subscription,
};

#[derive(Clone)]
pub struct TakeLastOp<S> {
  source: S,
  count: usize,
}

impl<S> TakeLastOp<S> {
  pub(crate) fn new(source: S, count: usize) -> Self { TakeLastOp { source, count } }
}

impl<S> Observable for TakeLastOp<S>
where
  S: Observable,
  S::Item: Send + 'static,
{
  type Item = S::Item;

  fn actual_subscribe<O>(&self, observer: O)
  where
    O: Observer<Self::Item> + Send + 'static,
  {
    self.source.actual_subscribe(TakeLastObserver {
      observer,
      count: self.count,
      queue: VecDeque::new(),
      subscription: Subscription::new(),
    })
  }
}

pub struct TakeLastObserver<O, Item> {
  observer: O,
  count: usize,
  queue: VecDeque<Item>,
  subscription: Subscription,
}

impl<Item, O> Observer<Item> for TakeLastObserver<O, Item>
where
  O: Observer<Item>,
{
  fn on_subscribe(&mut self, d: SharedDisposable) {
    self.subscription.set_upstream(d);
    self.observer.on_subscribe(Arc::new(self.subscription.clone()));
  }

  fn next(&mut self, value: Item) {
    if self.count == 0 {
      return;
    }
    if self.queue.len() == self.count {
      self.queue.pop_front();
    }
    self.queue.push_back(value);
  }

  fn error(&mut self, err: RxError) {
    self.queue.clear();
    self.observer.error(err);
  }

  fn complete(&mut self) {
    while let Some(v) = self.queue.pop_front() {
      if self.subscription.is_disposed() {
        self.queue.clear();
        return;
      }
      self.observer.next(v);
    }
    if !self.subscription.is_disposed() {
      self.observer.complete();
    }
  }
}

#[cfg(test)]
mod test {
  use crate::{
    observable::{create, empty, range, throw_err, Emitter, ObservableExt},
    observer::TestObserver,
  };
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
  };

  #[test]
  fn keeps_last_values() {
    let obs = TestObserver::new();
    range(0, 9).take_last(3).subscribe_with(obs.clone());
    obs.assert_values(&[6, 7, 8]);
    obs.assert_complete();
  }

  #[test]
  fn nothing_before_complete() {
    let obs = TestObserver::new();
    let emitters = Arc::new(Mutex::new(None));
    let c_emitters = emitters.clone();
    create(move |emitter: Emitter<i32>| {
      emitter.next(1);
      emitter.next(2);
      *c_emitters.lock().unwrap() = Some(emitter);
    })
    .take_last(5)
    .subscribe_with(obs.clone());
    assert_eq!(obs.value_count(), 0);

    let emitter = emitters.lock().unwrap().take().unwrap();
    emitter.complete();
    obs.assert_values(&[1, 2]);
    obs.assert_complete();
  }

  #[test]
  fn zero_count() {
    let obs = TestObserver::new();
    range(0, 9).take_last(0).subscribe_with(obs.clone());
    obs.assert_completed_empty();
  }

  #[test]
  fn error_discards_buffer() {
    let obs = TestObserver::<i32>::new();
    create(|emitter: Emitter<i32>| {
      emitter.next(1);
      emitter.error("failed".into());
    })
    .take_last(2)
    .subscribe_with(obs.clone());
    assert_eq!(obs.value_count(), 0);
    obs.assert_error();
  }

  #[test]
  fn flush_stops_when_downstream_disposes() {
    let seen = Arc::new(AtomicUsize::new(0));
    let c_seen = seen.clone();
    let obs = TestObserver::new();
    range(0, 10)
      .take_last(5)
      .filter(move |_| {
        c_seen.fetch_add(1, Ordering::SeqCst);
        true
      })
      .take(2)
      .subscribe_with(obs.clone());
    obs.assert_values(&[5, 6]);
    obs.assert_complete();
    assert_eq!(seen.load(Ordering::SeqCst), 2);
  }

  #[test]
  fn empty_and_failing_sources() {
    let empty_obs = TestObserver::<i64>::new();
    empty().take_last(3).subscribe_with(empty_obs.clone());
    empty_obs.assert_completed_empty();

    let err_obs = TestObserver::<i64>::new();
    throw_err("x").take_last(3).subscribe_with(err_obs.clone());
    err_obs.assert_error();
  }
}
