use std::{
  io,
  sync::Arc,
  time::{Duration, Instant},
};

use futures::{
  executor::ThreadPool,
  future::{self, AbortHandle},
};
use futures_time::{task::sleep, time::Duration as FutDuration};

use super::{clamp_period, PeriodicTask, Scheduler, Task};
use crate::{
  disposable::{BooleanDisposable, Disposable, SharedDisposable},
  error::catch_unwind,
};

/// Runs scheduled work on a `futures` thread pool; timers are
/// `futures-time` sleeps.
#[derive(Clone)]
pub struct ThreadPoolScheduler {
  pool: ThreadPool,
}

pub struct ThreadPoolSchedulerBuilder {
  pool_size: Option<usize>,
  name_prefix: String,
}

impl ThreadPoolSchedulerBuilder {
  /// Number of worker threads; defaults to the number of CPUs.
  pub fn pool_size(mut self, size: usize) -> Self {
    self.pool_size = Some(size);
    self
  }

  pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.name_prefix = prefix.into();
    self
  }

  pub fn build(self) -> io::Result<ThreadPoolScheduler> {
    let mut builder = ThreadPool::builder();
    builder.name_prefix(self.name_prefix);
    if let Some(size) = self.pool_size {
      builder.pool_size(size);
    }
    let pool = builder.create()?;
    Ok(ThreadPoolScheduler { pool })
  }
}

impl ThreadPoolScheduler {
  pub fn builder() -> ThreadPoolSchedulerBuilder {
    ThreadPoolSchedulerBuilder { pool_size: None, name_prefix: "rx-computation-".to_owned() }
  }

  pub fn new() -> io::Result<Self> { Self::builder().build() }

  fn spawn(
    &self,
    flag: BooleanDisposable,
    work: impl future::Future<Output = ()> + Send + 'static,
  ) -> SharedDisposable {
    let (work, abort) = future::abortable(work);
    self.pool.spawn_ok(async move {
      let _ = work.await;
    });
    Arc::new(TaskHandle { flag, abort })
  }
}

impl Scheduler for ThreadPoolScheduler {
  fn schedule(&self, delay: Duration, task: Task) -> SharedDisposable {
    tracing::debug!(?delay, "thread pool schedule");
    let flag = BooleanDisposable::new();
    let c_flag = flag.clone();
    self.spawn(flag, async move {
      sleep(FutDuration::from(delay)).await;
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
    tracing::debug!(?initial, ?period, "thread pool schedule periodic");
    let flag = BooleanDisposable::new();
    let c_flag = flag.clone();
    self.spawn(flag, async move {
      let mut deadline = Instant::now() + initial;
      sleep(FutDuration::from(initial)).await;
      loop {
        if c_flag.is_disposed() {
          return;
        }
        if let Err(err) = catch_unwind(&mut task) {
          tracing::error!(error = %err, "periodic task panicked, cancelling it");
          c_flag.dispose();
          return;
        }
        deadline += period;
        let wait = deadline.saturating_duration_since(Instant::now());
        sleep(FutDuration::from(wait)).await;
      }
    })
  }
}

struct TaskHandle {
  flag: BooleanDisposable,
  abort: AbortHandle,
}

impl Disposable for TaskHandle {
  fn dispose(&self) {
    if !self.flag.is_disposed() {
      tracing::debug!("thread pool task cancelled");
    }
    self.flag.dispose();
    self.abort.abort();
  }

  fn is_disposed(&self) -> bool { self.flag.is_disposed() }
}
