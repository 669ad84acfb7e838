use std::sync::Arc;

use crate::{
  disposable::{Disposable, SharedDisposable},
  error::RxError,
  observable::Observable,
  observer::Observer,
  subscription::Subscription,
};

#[derive(Clone)]
pub struct TakeOp<S> {
  source: S,
  count: usize,
}

impl<S> TakeOp<S> {
  pub(crate) fn new(source: S, count: usize) -> Self { TakeOp { source, count } }
}

impl<S: Observable> Observable for TakeOp<S> {
  type Item = S::Item;

  fn actual_subscribe<O>(&self, observer: O)
  where
    O: Observer<Self::Item> + Send + 'static,
  {
    self.source.actual_subscribe(TakeObserver {
      observer,
      remaining: self.count,
      subscription: Subscription::new(),
      done: false,
    })
  }
}

pub struct TakeObserver<O> {
  observer: O,
  remaining: usize,
  subscription: Subscription,
  done: bool,
}

impl<O> TakeObserver<O> {
  fn finish<Item>(&mut self)
  where
    O: Observer<Item>,
  {
    self.done = true;
    self.subscription.dispose();
    self.observer.complete();
  }
}

impl<Item, O> Observer<Item> for TakeObserver<O>
where
  O: Observer<Item>,
{
  fn on_subscribe(&mut self, d: SharedDisposable) {
    self.subscription.set_upstream(d);
    self.observer.on_subscribe(Arc::new(self.subscription.clone()));
    if self.remaining == 0 {
      self.finish::<Item>();
    }
  }

  fn next(&mut self, value: Item) {
    if self.done {
      return;
    }
    self.remaining -= 1;
    self.observer.next(value);
    if self.remaining == 0 {
      self.finish::<Item>();
    }
  }

  fn error(&mut self, err: RxError) {
    if !self.done {
      self.done = true;
      self.observer.error(err);
    }
  }

  fn complete(&mut self) {
    if !self.done {
      self.done = true;
      self.observer.complete();
    }
  }
}

#[cfg(test)]
mod test {
  use crate::{
    observable::{create, range, Emitter, ObservableExt},
    observer::TestObserver,
  };
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  #[test]
  fn base_function() {
    let obs = TestObserver::new();
    range(0, 9).take(3).subscribe_with(obs.clone());
    obs.assert_values(&[0, 1, 2]);
    obs.assert_complete();
  }

  #[test]
  fn take_more_than_source() {
    let obs = TestObserver::new();
    range(0, 3).take(10).subscribe_with(obs.clone());
    obs.assert_values(&[0, 1, 2]);
    obs.assert_complete();
  }

  #[test]
  fn take_zero() {
    let produced = Arc::new(AtomicUsize::new(0));
    let c_produced = produced.clone();
    let obs = TestObserver::new();
    create(move |emitter: Emitter<i32>| {
      while !emitter.is_disposed() {
        c_produced.fetch_add(1, Ordering::SeqCst);
        emitter.next(1);
      }
    })
    .take(0)
    .subscribe_with(obs.clone());
    obs.assert_completed_empty();
    assert_eq!(produced.load(Ordering::SeqCst), 0);
  }

  #[test]
  fn infinite_source_stops() {
    let produced = Arc::new(AtomicUsize::new(0));
    let c_produced = produced.clone();
    let obs = TestObserver::new();
    create(move |emitter: Emitter<usize>| {
      let mut i = 0;
      while !emitter.is_disposed() {
        c_produced.fetch_add(1, Ordering::SeqCst);
        emitter.next(i);
        i += 1;
      }
    })
    .take(3)
    .subscribe_with(obs.clone());
    obs.assert_values(&[0, 1, 2]);
    obs.assert_complete();
    assert_eq!(produced.load(Ordering::SeqCst), 3);
  }

  #[test]
  fn take_after_take() {
    let obs = TestObserver::new();
    range(0, 100).take(5).take(2).subscribe_with(obs.clone());
    obs.assert_values(&[0, 1]);
    assert_eq!(obs.completions(), 1);
  }
}
