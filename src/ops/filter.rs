use std::sync::Arc;

use crate::{
  disposable::{Disposable, SharedDisposable},
  error::{catch_unwind, RxError},
  observable::Observable,
  observer::Observer,
  subscription::Subscription,
};

#[derive(Clone)]
pub struct FilterOp<S, F> {
  source: S,
  predicate: Arc<F>,
}

impl<S, F> FilterOp<S, F> {
  pub(crate) fn new(source: S, predicate: F) -> Self {
    FilterOp { source, predicate: Arc::new(predicate) }
  }
}

impl<S, F> Observable for FilterOp<S, F>
where
  S: Observable,
  F: Fn(&S::Item) -> bool + Send + Sync + 'static,
{
  type Item = S::Item;

  fn actual_subscribe<O>(&self, observer: O)
  where
    O: Observer<Self::Item> + Send + 'static,
  {
    self.source.actual_subscribe(FilterObserver {
      observer,
      predicate: self.predicate.clone(),
      subscription: Subscription::new(),
      done: false,
    })
  }
}

pub struct FilterObserver<O, F> {
  observer: O,
  predicate: Arc<F>,
  subscription: Subscription,
  done: bool,
}

impl<Item, O, F> Observer<Item> for FilterObserver<O, F>
where
  O: Observer<Item>,
  F: Fn(&Item) -> bool,
{
  fn on_subscribe(&mut self, d: SharedDisposable) {
    self.subscription.set_upstream(d);
    self.observer.on_subscribe(Arc::new(self.subscription.clone()));
  }

  fn next(&mut self, value: Item) {
    if self.done {
      return;
    }
    match catch_unwind(|| (self.predicate)(&value)) {
      Ok(true) => self.observer.next(value),
      Ok(false) => {}
      Err(err) => {
        self.done = true;
        self.subscription.dispose();
        self.observer.error(err);
      }
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
