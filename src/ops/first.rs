use std::sync::Arc;

use crate::{
  disposable::{Disposable, SharedDisposable},
  error::RxError,
  observable::Observable,
  observer::Observer,
  subscription::Subscription,
};

#[derive(Clone)]
pub struct FirstOp<S> {
  source: S,
}

impl<S> FirstOp<S> {
  pub(crate) fn new(source: S) -> Self { FirstOp { source } }
}

impl<S: Observable> Observable for FirstOp<S> {
  type Item = S::Item;

  fn actual_subscribe<O>(&self, observer: O)
  where
    O: Observer<Self::Item> + Send + 'static,
  {
    self.source.actual_subscribe(FirstObserver {
      observer,
      subscription: Subscription::new(),
      done: false,
    })
  }
}

pub struct FirstObserver<O> {
  observer: O,
  subscription: Subscription,
  done: bool,
}

impl<Item, O> Observer<Item> for FirstObserver<O>
where
  O: Observer<Item>,
{
  fn on_subscribe(&mut self, d: SharedDisposable) {
    self.subscription.set_upstream(d);
    self.observer.on_subscribe(Arc::new(self.subscription.clone()));
  }

  fn next(&mut self, value: Item) {
    if self.done {
      return;
    }
    self.done = true;
    self.subscription.dispose();
    self.observer.next(value);
    self.observer.complete();
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
