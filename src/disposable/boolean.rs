use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

use super::Disposable;

/// The plain disposed flag.
///
/// Clones share the flag, so a producer running on a scheduler thread can
/// poll the same handle the subscriber disposes from its own thread.
#[derive(Clone, Debug, Default)]
pub struct BooleanDisposable(Arc<AtomicBool>);

impl BooleanDisposable {
  pub fn new() -> Self { Self::default() }
}

impl Disposable for BooleanDisposable {
  #[inline]
  fn dispose(&self) { self.0.store(true, Ordering::Release); }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.load(Ordering::Acquire) }
}
