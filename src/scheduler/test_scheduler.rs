//! Test Scheduler for deterministic testing of time-based sources.
//!
//! Provides virtual time that only advances when explicitly instructed,
//! so `interval` and `timer` can be tested without wall-clock delays.
//!
//! # Usage
//!
//! ```rust
//! use rxlite::{prelude::*, scheduler::TestScheduler};
//! use std::time::Duration;
//!
//! let scheduler = TestScheduler::new();
//! let obs = TestObserver::new();
//! observable::timer_on(Duration::from_millis(100), scheduler.clone()).subscribe_with(obs.clone());
//!
//! scheduler.advance_by(Duration::from_millis(99));
//! assert_eq!(obs.value_count(), 0);
//! scheduler.advance_by(Duration::from_millis(1));
//! obs.assert_values(&[0]);
//! ```
//!
//! Tasks run synchronously on the thread that advances the clock, outside
//! of the scheduler's lock, so a task may schedule further work.

use std::{
  cmp::Ordering,
  collections::BinaryHeap,
  sync::{Arc, Mutex},
  time::Duration,
};

use super::{clamp_period, PeriodicTask, Scheduler, Task};
use crate::{
  disposable::{BooleanDisposable, Disposable, SharedDisposable},
  util::lock,
};

#[derive(Default)]
struct TestSchedulerState {
  virtual_time: Duration,
  task_queue: BinaryHeap<ScheduledTask>,
  next_task_id: usize,
}

enum Work {
  Once(Task),
  Periodic { task: PeriodicTask, period: Duration },
}

struct ScheduledTask {
  scheduled_time: Duration,
  task_id: usize,
  work: Work,
  handle: BooleanDisposable,
}

impl PartialEq for ScheduledTask {
  fn eq(&self, other: &Self) -> bool {
    self.scheduled_time == other.scheduled_time && self.task_id == other.task_id
  }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ScheduledTask {
  fn cmp(&self, other: &Self) -> Ordering {
    // Min-heap: earlier times first, then FIFO by task_id
    other
      .scheduled_time
      .cmp(&self.scheduled_time)
      .then_with(|| other.task_id.cmp(&self.task_id))
  }
}

impl TestSchedulerState {
  fn push(&mut self, scheduled_time: Duration, work: Work, handle: BooleanDisposable) {
    let task_id = self.next_task_id;
    self.next_task_id += 1;
    self.task_queue.push(ScheduledTask { scheduled_time, task_id, work, handle });
  }
}

/// A virtual time scheduler for deterministic testing.
///
/// Clones share the same clock and task queue.
#[derive(Clone, Default)]
pub struct TestScheduler(Arc<Mutex<TestSchedulerState>>);

impl TestScheduler {
  pub fn new() -> Self { Self::default() }

  /// Get the current virtual time.
  pub fn now(&self) -> Duration { lock(&self.0).virtual_time }

  /// Number of scheduled tasks that are not disposed yet.
  pub fn pending(&self) -> usize {
    lock(&self.0)
      .task_queue
      .iter()
      .filter(|t| !t.handle.is_disposed())
      .count()
  }

  /// Advance virtual time by `duration`, running every task that falls due
  /// on the way in time order.
  pub fn advance_by(&self, duration: Duration) {
    let target = self.now() + duration;
    self.advance_to(target);
  }

  /// Advance virtual time to `time`. Moving backwards only runs the tasks
  /// due at the current time.
  pub fn advance_to(&self, time: Duration) {
    let target = time.max(self.now());
    self.execute_tasks_until(target);
    lock(&self.0).virtual_time = target;
  }

  /// Runs the tasks due at the current virtual time without advancing it.
  pub fn trigger_actions(&self) {
    let now = self.now();
    self.execute_tasks_until(now);
  }

  fn execute_tasks_until(&self, target_time: Duration) {
    loop {
      let task = {
        let mut state = lock(&self.0);
        let due = state
          .task_queue
          .peek()
          .map_or(false, |peek| peek.scheduled_time <= target_time);
        if !due {
          return;
        }
        let task = state.task_queue.pop();
        if let Some(task) = &task {
          state.virtual_time = task.scheduled_time;
        }
        task
      };
      let Some(ScheduledTask { scheduled_time, work, handle, .. }) = task else {
        return;
      };
      if handle.is_disposed() {
        continue;
      }
      match work {
        Work::Once(task) => {
          task();
          handle.dispose();
        }
        Work::Periodic { mut task, period } => {
          task();
          if !handle.is_disposed() {
            let next = Work::Periodic { task, period };
            lock(&self.0).push(scheduled_time + period, next, handle);
          }
        }
      }
    }
  }

  fn enqueue(&self, delay: Duration, work: Work) -> SharedDisposable {
    let handle = BooleanDisposable::new();
    let mut state = lock(&self.0);
    let scheduled_time = state.virtual_time + delay;
    state.push(scheduled_time, work, handle.clone());
    Arc::new(handle)
  }
}

impl Scheduler for TestScheduler {
  fn schedule(&self, delay: Duration, task: Task) -> SharedDisposable {
    self.enqueue(delay, Work::Once(task))
  }

  fn schedule_periodic(
    &self,
    initial: Duration,
    period: Duration,
    task: PeriodicTask,
  ) -> SharedDisposable {
    self.enqueue(initial, Work::Periodic { task, period: clamp_period(period) })
  }
}
