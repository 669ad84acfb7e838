use std::sync::{
  atomic::{AtomicBool, Ordering},
  Mutex,
};

use super::Disposable;
use crate::{
  error::{catch_unwind, on_undeliverable},
  util::lock,
};

type Action = Box<dyn FnOnce() + Send>;

/// Runs a teardown closure the first time it is disposed.
///
/// A panicking closure is reported to the undeliverable error hook.
pub struct ActionDisposable {
  disposed: AtomicBool,
  action: Mutex<Option<Action>>,
}

impl ActionDisposable {
  pub fn new(action: impl FnOnce() + Send + 'static) -> Self {
    ActionDisposable {
      disposed: AtomicBool::new(false),
      action: Mutex::new(Some(Box::new(action))),
    }
  }
}

impl Disposable for ActionDisposable {
  fn dispose(&self) {
    if !self.disposed.swap(true, Ordering::AcqRel) {
      let action = lock(&self.action).take();
      if let Some(action) = action {
        if let Err(err) = catch_unwind(action) {
          on_undeliverable(err);
        }
      }
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.disposed.load(Ordering::Acquire) }
}
