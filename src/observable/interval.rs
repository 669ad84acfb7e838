use std::{sync::Arc, time::Duration};

use crate::{
  disposable::Disposable,
  observable::Observable,
  observer::Observer,
  scheduler::{computation, Scheduler, SharedScheduler},
  subscription::Subscription,
};

/// Creates an observable which will fire every `period`, the first time
/// after one `period`, on the shared [`computation`] scheduler.
///
/// Emits `0, 1, 2, ...` forever; dispose the subscription (or limit it with
/// `take`) to stop it.
pub fn interval(period: Duration) -> Interval<SharedScheduler> { interval_on(period, computation()) }

/// Like [`interval`], with the ticks scheduled on `scheduler`.
pub fn interval_on<S: Scheduler>(period: Duration, scheduler: S) -> Interval<S> {
  Interval { period, scheduler }
}

#[derive(Clone)]
pub struct Interval<S> {
  period: Duration,
  scheduler: S,
}

impl<S: Scheduler> Observable for Interval<S> {
  type Item = u64;

  fn actual_subscribe<O>(&self, mut observer: O)
  where
    O: Observer<u64> + Send + 'static,
  {
    let subscription = Subscription::new();
    observer.on_subscribe(Arc::new(subscription.clone()));
    let c_subscription = subscription.clone();
    let mut seq = 0;
    let handle = self.scheduler.schedule_periodic(
      self.period,
      self.period,
      Box::new(move || {
        if c_subscription.is_disposed() {
          return;
        }
        observer.next(seq);
        seq += 1;
      }),
    );
    subscription.set_upstream(handle);
  }
}
