use std::{
  fmt::{Debug, Formatter},
  mem,
  sync::{Arc, Mutex},
};

use smallvec::SmallVec;

use super::{Disposable, SharedDisposable};
use crate::util::lock;

/// What [`CompositeDisposable::add`] does with a new member after the
/// composite has been cleared.
///
/// `dispose()` always wins over either policy: once the composite itself is
/// disposed, every later `add` disposes its argument on the spot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClearPolicy {
  /// `clear()` empties the composite and it keeps accepting live members.
  #[default]
  Reuse,
  /// After the first `clear()` every added member is disposed immediately.
  DisposeIncoming,
}

/// A thread safe container that disposes its members in bulk.
///
/// Clones share the same member set, so a handle created on a scheduler
/// thread can be added to a composite owned elsewhere.
#[derive(Clone, Default)]
pub struct CompositeDisposable(Arc<Mutex<Inner>>);

#[derive(Default)]
struct Inner {
  disposed: bool,
  cleared: bool,
  policy: ClearPolicy,
  members: SmallVec<[SharedDisposable; 2]>,
}

impl Inner {
  fn rejects_new(&self) -> bool {
    self.disposed || (self.cleared && self.policy == ClearPolicy::DisposeIncoming)
  }
}

impl CompositeDisposable {
  pub fn new() -> Self { Self::default() }

  pub fn with_policy(policy: ClearPolicy) -> Self {
    let inner = Inner { policy, ..Inner::default() };
    CompositeDisposable(Arc::new(Mutex::new(inner)))
  }

  /// Adds `d` to the set. Returns `false` when `d` was disposed instead of
  /// stored, because the composite is disposed or its clear policy says so.
  pub fn add(&self, d: impl Disposable + 'static) -> bool { self.add_shared(Arc::new(d)) }

  pub fn add_shared(&self, d: SharedDisposable) -> bool {
    let mut inner = lock(&self.0);
    if inner.rejects_new() {
      drop(inner);
      d.dispose();
      return false;
    }
    inner.members.retain(|m| !m.is_disposed());
    inner.members.push(d);
    true
  }

  /// Removes `d` and disposes it. Returns whether `d` was a member.
  pub fn remove(&self, d: &SharedDisposable) -> bool {
    let removed = self.delete(d);
    if removed {
      d.dispose();
    }
    removed
  }

  /// Removes `d` without disposing it. Returns whether `d` was a member.
  pub fn delete(&self, d: &SharedDisposable) -> bool {
    let mut inner = lock(&self.0);
    let target = Arc::as_ptr(d) as *const ();
    let before = inner.members.len();
    inner
      .members
      .retain(|m| Arc::as_ptr(m) as *const () != target);
    inner.members.len() != before
  }

  /// Disposes every member and empties the set. The composite itself stays
  /// usable.
  pub fn clear(&self) {
    let members = {
      let mut inner = lock(&self.0);
      inner.cleared = true;
      mem::take(&mut inner.members)
    };
    tracing::debug!(count = members.len(), "composite cleared");
    members.iter().for_each(|m| m.dispose());
  }

  pub fn len(&self) -> usize { lock(&self.0).members.len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  pub fn policy(&self) -> ClearPolicy { lock(&self.0).policy }
}

impl Disposable for CompositeDisposable {
  fn dispose(&self) {
    let members = {
      let mut inner = lock(&self.0);
      if inner.disposed {
        return;
      }
      inner.disposed = true;
      mem::take(&mut inner.members)
    };
    tracing::debug!(count = members.len(), "composite disposed");
    members.iter().for_each(|m| m.dispose());
  }

  fn is_disposed(&self) -> bool { lock(&self.0).disposed }
}

impl Debug for CompositeDisposable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = lock(&self.0);
    f.debug_struct("CompositeDisposable")
      .field("disposed", &inner.disposed)
      .field("policy", &inner.policy)
      .field("members", &inner.members.len())
      .finish()
  }
}
