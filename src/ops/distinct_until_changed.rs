use std::sync::Arc;

use crate::{
  disposable::{Disposable, SharedDisposable},
  error::{catch_unwind, RxError},
  observable::Observable,
  observer::Observer,
  subscription::Subscription,
};

#[derive(Clone)]
pub struct DistinctUntilChangedOp<S> {
  source: S,
}

impl<S> DistinctUntilChangedOp<S> {
  pub(crate) fn new(source: S) -> Self { DistinctUntilChangedOp { source } }
}

impl<S> Observable for DistinctUntilChangedOp<S>
where
  S: Observable,
  S::Item: PartialEq + Clone + Send + 'static,
{
  type Item = S::Item;

  fn actual_subscribe<O>(&self, observer: O)
  where
    O: Observer<Self::Item> + Send + 'static,
  {
    self.source.actual_subscribe(DistinctUntilChangedObserver {
      observer,
      last: None,
      subscription: Subscription::new(),
      done: false,
    })
  }
}

pub struct DistinctUntilChangedObserver<O, Item> {
  observer: O,
  last: Option<Item>,
  subscription: Subscription,
  done: bool,
}

impl<Item, O> Observer<Item> for DistinctUntilChangedObserver<O, Item>
where
  O: Observer<Item>,
  Item: PartialEq + Clone,
{
  fn on_subscribe(&mut self, d: SharedDisposable) {
    self.subscription.set_upstream(d);
    self.observer.on_subscribe(Arc::new(self.subscription.clone()));
  }

  fn next(&mut self, value: Item) {
    if self.done {
      return;
    }
    let last = &self.last;
    match catch_unwind(|| last.as_ref() != Some(&value)) {
      Ok(true) => {
        self.last = Some(value.clone());
        self.observer.next(value);
      }
      Ok(false) => {}
      Err(err) => {
        self.done = true;
        self.last = None;
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
