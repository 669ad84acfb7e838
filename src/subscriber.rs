use std::sync::Arc;

use crate::{
  disposable::{Disposable, SharedDisposable},
  error::{catch_unwind, on_undeliverable, RxError},
  observer::Observer,
  subscription::Subscription,
};

/// Wraps the consumer's observer at the end of a chain.
///
/// The wrapped observer sees at most one terminal signal and nothing after
/// its subscription is disposed. A panic inside one of its callbacks
/// disposes the subscription and is delivered to its own `error` callback
/// exactly once; anything that still cannot be delivered goes to the
/// undeliverable error hook.
pub struct Subscriber<O> {
  observer: O,
  subscription: Subscription,
  stopped: bool,
}

impl<O> Subscriber<O> {
  pub fn new(observer: O) -> Self {
    Subscriber {
      observer,
      subscription: Subscription::new(),
      stopped: false,
    }
  }

  /// The consumer facing handle of this subscriber.
  pub fn subscription(&self) -> Subscription { self.subscription.clone() }

  #[inline]
  fn is_closed(&self) -> bool { self.stopped || self.subscription.is_disposed() }

  fn terminate<Item>(&mut self, err: RxError)
  where
    O: Observer<Item>,
  {
    self.stopped = true;
    self.subscription.dispose();
    if let Err(failure) = catch_unwind(|| Observer::<Item>::error(&mut self.observer, err)) {
      on_undeliverable(failure);
    }
  }
}

impl<Item, O> Observer<Item> for Subscriber<O>
where
  O: Observer<Item>,
{
  fn on_subscribe(&mut self, d: SharedDisposable) {
    self.subscription.set_upstream(d);
    let handle: SharedDisposable = Arc::new(self.subscription.clone());
    if let Err(err) = catch_unwind(|| Observer::<Item>::on_subscribe(&mut self.observer, handle)) {
      tracing::trace!(error = %err, "consumer failed in on_subscribe");
      self.terminate::<Item>(err);
    }
  }

  fn next(&mut self, value: Item) {
    if self.is_closed() {
      return;
    }
    if let Err(err) = catch_unwind(|| self.observer.next(value)) {
      tracing::trace!(error = %err, "consumer failed in next");
      self.terminate::<Item>(err);
    }
  }

  fn error(&mut self, err: RxError) {
    if self.is_closed() {
      on_undeliverable(err);
      return;
    }
    self.terminate::<Item>(err);
  }

  fn complete(&mut self) {
    if self.is_closed() {
      return;
    }
    self.stopped = true;
    self.subscription.dispose();
    if let Err(failure) = catch_unwind(|| Observer::<Item>::complete(&mut self.observer)) {
      on_undeliverable(failure);
    }
  }
}
