//! Schedulers run delayed and periodic work for the timed sources.
//!
//! A scheduler is an explicit collaborator of `interval_on` and `timer_on`,
//! so tests can substitute the virtual time [`TestScheduler`] for a real
//! one. Every scheduled piece of work returns a handle; once that handle is
//! disposed the work is not started again, although a run already in flight
//! may finish.

use std::{sync::Arc, time::Duration};

use once_cell::sync::Lazy;

use crate::disposable::SharedDisposable;

mod test_scheduler;
mod thread_scheduler;
#[cfg(feature = "futures-scheduler")]
mod thread_pool_scheduler;
#[cfg(feature = "tokio-scheduler")]
mod tokio_scheduler;

pub use test_scheduler::TestScheduler;
pub use thread_scheduler::NewThreadScheduler;
#[cfg(feature = "futures-scheduler")]
pub use thread_pool_scheduler::{ThreadPoolScheduler, ThreadPoolSchedulerBuilder};
#[cfg(feature = "tokio-scheduler")]
pub use tokio_scheduler::TokioScheduler;

/// Shortest period accepted by `schedule_periodic`; smaller periods are
/// raised to it.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

pub type Task = Box<dyn FnOnce() + Send>;

pub type PeriodicTask = Box<dyn FnMut() + Send>;

/// A Scheduler is an object to order task and schedule their execution.
pub trait Scheduler: Send + Sync {
  /// Runs `task` once after `delay`.
  fn schedule(&self, delay: Duration, task: Task) -> SharedDisposable;

  /// Runs `task` after `initial`, then every `period` until the returned
  /// handle is disposed.
  fn schedule_periodic(&self, initial: Duration, period: Duration, task: PeriodicTask)
    -> SharedDisposable;
}

pub type SharedScheduler = Arc<dyn Scheduler>;

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
  #[inline]
  fn schedule(&self, delay: Duration, task: Task) -> SharedDisposable {
    (**self).schedule(delay, task)
  }

  #[inline]
  fn schedule_periodic(
    &self,
    initial: Duration,
    period: Duration,
    task: PeriodicTask,
  ) -> SharedDisposable {
    (**self).schedule_periodic(initial, period, task)
  }
}

#[inline]
pub(crate) fn clamp_period(period: Duration) -> Duration { period.max(MIN_PERIOD) }

#[cfg(feature = "futures-scheduler")]
static COMPUTATION: Lazy<SharedScheduler> = Lazy::new(|| {
  let scheduler: SharedScheduler = match ThreadPoolScheduler::builder().build() {
    Ok(pool) => Arc::new(pool),
    Err(err) => {
      tracing::error!(error = %err, "thread pool unavailable, using a thread per task");
      Arc::new(NewThreadScheduler)
    }
  };
  scheduler
});

#[cfg(not(feature = "futures-scheduler"))]
static COMPUTATION: Lazy<SharedScheduler> = Lazy::new(|| {
  let scheduler: SharedScheduler = Arc::new(NewThreadScheduler);
  scheduler
});

/// The shared scheduler used by `interval` and `timer`.
///
/// A thread pool when the `futures-scheduler` feature is enabled, otherwise
/// a thread per task.
pub fn computation() -> SharedScheduler { COMPUTATION.clone() }

/// Returns a Scheduler instance that creates a new thread for each unit of
/// work.
pub fn new_thread() -> NewThreadScheduler { NewThreadScheduler }

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn clamps_zero_period() {
    assert_eq!(clamp_period(Duration::ZERO), MIN_PERIOD);
    assert_eq!(clamp_period(Duration::from_secs(1)), Duration::from_secs(1));
  }

  #[test]
  fn computation_is_shared() {
    assert!(Arc::ptr_eq(&computation(), &computation()));
  }
}
