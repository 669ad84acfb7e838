use std::{collections::HashSet, hash::Hash, sync::Arc};

use crate::{
  disposable::{Disposable, SharedDisposable},
  error::{catch_unwind, RxError},
  observable::Observable,
  observer::Observer,
  subscription::Subscription,
};

#[derive(Clone)]
pub struct DistinctOp<S> {
  source: S,
}

impl<S> DistinctOp<S> {
  pub(crate) fn new(source: S) -> Self { DistinctOp { source } }
}

impl<S> Observable for DistinctOp<S>
where
  S: Observable,
  S::Item: Eq + Hash + Clone + Send + 'static,
{
  type Item = S::Item;

  fn actual_subscribe<O>(&self, observer: O)
  where
    O: Observer<Self::Item> + Send + 'static,
  {
    self.source.actual_subscribe(DistinctObserver {
      observer,
      seen: HashSet::new(),
      subscription: Subscription::new(),
      done: false,
    })
  }
}

pub struct DistinctObserver<O, Item> {
  observer: O,
  seen: HashSet<Item>,
  subscription: Subscription,
  done: bool,
}

impl<Item, O> Observer<Item> for DistinctObserver<O, Item>
where
  O: Observer<Item>,
  Item: Eq + Hash + Clone,
{
  fn on_subscribe(&mut self, d: SharedDisposable) {
    self.subscription.set_upstream(d);
    self.observer.on_subscribe(Arc::new(self.subscription.clone()));
  }

  fn next(&mut self, value: Item) {
    if self.done {
      return;
    }
    let seen = &mut self.seen;
    // Hash and Eq are user code.
    match catch_unwind(|| seen.insert(value.clone())) {
      Ok(true) => self.observer.next(value),
      Ok(false) => {}
      Err(err) => {
        self.done = true;
        self.seen.clear();
        self.subscription.dispose();
        self.observer.error(err);
      }
    }
  }

  fn error(&mut self, err: RxError) {
    if !self.done {
      self.done = true;
      self.seen.clear();
      self.observer.error(err);
    }
  }

  fn complete(&mut self) {
    if !self.done {
      self.done = true;
      self.seen.clear();
      self.observer.complete();
    }
  }
}
