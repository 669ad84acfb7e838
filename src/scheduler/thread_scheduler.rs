use std::{
  sync::Arc,
  thread::{self, Thread},
  time::{Duration, Instant},
};

use super::{clamp_period, PeriodicTask, Scheduler, Task};
use crate::{
  disposable::{disposed, BooleanDisposable, Disposable, SharedDisposable},
  error::catch_unwind,
};

/// Spawns a dedicated thread for every scheduled task.
///
/// The thread parks until its deadline and is woken early when the task is
/// disposed, so a cancelled timer does not hold its thread until the delay
/// runs out.
#[derive(Clone, Copy, Debug, Default)]
pub struct NewThreadScheduler;

struct ThreadHandle {
  flag: BooleanDisposable,
  thread: Thread,
}

impl Disposable for ThreadHandle {
  fn dispose(&self) {
    self.flag.dispose();
    self.thread.unpark();
  }

  fn is_disposed(&self) -> bool { self.flag.is_disposed() }
}

/// Parks until `deadline`. Returns `false` if `flag` got disposed first.
fn park_until(flag: &BooleanDisposable, deadline: Instant) -> bool {
  loop {
    if flag.is_disposed() {
      return false;
    }
    let now = Instant::now();
    if now >= deadline {
      return true;
    }
    thread::park_timeout(deadline - now);
  }
}

impl NewThreadScheduler {
  fn spawn(&self, work: impl FnOnce(BooleanDisposable) + Send + 'static) -> SharedDisposable {
    let flag = BooleanDisposable::new();
    let c_flag = flag.clone();
    let spawned = thread::Builder::new()
      .name("rx-new-thread".to_owned())
      .spawn(move || work(c_flag));
    match spawned {
      Ok(join) => Arc::new(ThreadHandle { flag, thread: join.thread().clone() }),
      Err(err) => {
        tracing::error!(error = %err, "failed to spawn scheduler thread");
        disposed()
      }
    }
  }
}

impl Scheduler for NewThreadScheduler {
  fn schedule(&self, delay: Duration, task: Task) -> SharedDisposable {
    tracing::debug!(?delay, "new thread schedule");
    let deadline = Instant::now() + delay;
    self.spawn(move |flag| {
      if !park_until(&flag, deadline) {
        return;
      }
      if let Err(err) = catch_unwind(task) {
        tracing::error!(error = %err, "scheduled task panicked");
      }
      flag.dispose();
    })
  }

  fn schedule_periodic(
    &self,
    initial: Duration,
    period: Duration,
    mut task: PeriodicTask,
  ) -> SharedDisposable {
    let period = clamp_period(period);
    tracing::debug!(?initial, ?period, "new thread schedule periodic");
    let mut deadline = Instant::now() + initial;
    self.spawn(move |flag| {
      while park_until(&flag, deadline) {
        if let Err(err) = catch_unwind(&mut task) {
          tracing::error!(error = %err, "periodic task panicked, cancelling it");
          flag.dispose();
          return;
        }
        deadline += period;
      }
    })
  }
}
