use std::{sync::Arc, time::Duration};

use crate::{
  disposable::Disposable,
  observable::Observable,
  observer::Observer,
  scheduler::{computation, Scheduler, SharedScheduler},
  subscription::Subscription,
};

/// Creates an observable which emits `0` after `delay` on the shared
/// [`computation`] scheduler, then completes.
pub fn timer(delay: Duration) -> Timer<SharedScheduler> { timer_on(delay, computation()) }

/// Like [`timer`], with the emission scheduled on `scheduler`.
pub fn timer_on<S: Scheduler>(delay: Duration, scheduler: S) -> Timer<S> {
  Timer { delay, scheduler }
}

#[derive(Clone)]
pub struct Timer<S> {
  delay: Duration,
  scheduler: S,
}

impl<S: Scheduler> Observable for Timer<S> {
  type Item = u64;

  fn actual_subscribe<O>(&self, mut observer: O)
  where
    O: Observer<u64> + Send + 'static,
  {
    let subscription = Subscription::new();
    observer.on_subscribe(Arc::new(subscription.clone()));
    let c_subscription = subscription.clone();
    let handle = self.scheduler.schedule(
      self.delay,
      Box::new(move || {
        if c_subscription.is_disposed() {
          return;
        }
        observer.next(0);
        if !c_subscription.is_disposed() {
          observer.complete();
        }
        c_subscription.dispose();
      }),
    );
    subscription.set_upstream(handle);
  }
}
