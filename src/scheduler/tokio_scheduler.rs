use std::{future::Future, sync::Arc, time::Duration};

use tokio::{
  runtime::Handle,
  task::AbortHandle,
  time::{sleep, sleep_until, Instant},
};

use super::{clamp_period, PeriodicTask, Scheduler, Task};
use crate::{
  disposable::{BooleanDisposable, Disposable, SharedDisposable},
  error::catch_unwind,
};

/// Runs scheduled work as tasks on a tokio runtime.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
  handle: Handle,
}

impl TokioScheduler {
  pub fn new(handle: Handle) -> Self { TokioScheduler { handle } }

  /// Uses the runtime the caller is running on.
  ///
  /// # Panics
  ///
  /// Panics when called outside of a tokio runtime.
  pub fn current() -> Self { Self::new(Handle::current()) }

  fn spawn(
    &self,
    flag: BooleanDisposable,
    work: impl Future<Output = ()> + Send + 'static,
  ) -> SharedDisposable {
    let join = self.handle.spawn(work);
    Arc::new(TokioTask { flag, abort: join.abort_handle() })
  }
}

impl Scheduler for TokioScheduler {
  fn schedule(&self, delay: Duration, task: Task) -> SharedDisposable {
    tracing::debug!(?delay, "tokio schedule");
    let flag = BooleanDisposable::new();
    let c_flag = flag.clone();
    self.spawn(flag, async move {
      sleep(delay).await;
      if c_flag.is_disposed() {
        return;
      }
      if let Err(err) = catch_unwind(task) {
        tracing::error!(error = %err, "scheduled task panicked");
      }
      c_flag.dispose();
    })
  }

  fn schedule_periodic(
    &self,
    initial: Duration,
    period: Duration,
    mut task: PeriodicTask,
  ) -> SharedDisposable {
    let period = clamp_period(period);
    tracing::debug!(?initial, ?period, "tokio schedule periodic");
    let flag = BooleanDisposable::new();
    let c_flag = flag.clone();
    self.spawn(flag, async move {
      let mut deadline = Instant::now() + initial;
      loop {
        sleep_until(deadline).await;
        if c_flag.is_disposed() {
          return;
        }
        if let Err(err) = catch_unwind(&mut task) {
          tracing::error!(error = %err, "periodic task panicked, cancelling it");
          c_flag.dispose();
          return;
        }
        deadline += period;
      }
    })
  }
}

struct TokioTask {
  flag: BooleanDisposable,
  abort: AbortHandle,
}

impl Disposable for TokioTask {
  fn dispose(&self) {
    self.flag.dispose();
    self.abort.abort();
  }

  fn is_disposed(&self) -> bool { self.flag.is_disposed() }
}
