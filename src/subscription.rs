use std::{
  fmt::{Debug, Formatter},
  sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
  },
};

use crate::{
  disposable::{Disposable, SharedDisposable},
  util::lock,
};

/// Handle returned from `subscribe`, also used by operator stages as the
/// handle they pass downstream.
///
/// It proxies an upstream handle that may only arrive later: when the
/// subscription is disposed before the upstream is attached, the upstream is
/// disposed the moment it arrives. `is_disposed` reports this handle's own
/// state, so an operator cancelling its upstream early does not make the
/// handles further downstream look disposed.
#[derive(Clone, Default)]
pub struct Subscription(Arc<Inner>);

#[derive(Default)]
struct Inner {
  disposed: AtomicBool,
  upstream: Mutex<Option<SharedDisposable>>,
}

impl Subscription {
  pub fn new() -> Self { Self::default() }

  /// Attaches the handle this subscription cancels. A previously attached
  /// handle is disposed and replaced.
  pub fn set_upstream(&self, d: SharedDisposable) {
    let mut slot = lock(&self.0.upstream);
    if self.is_disposed() {
      drop(slot);
      d.dispose();
      return;
    }
    let prev = slot.replace(d);
    drop(slot);
    if let Some(prev) = prev {
      prev.dispose();
    }
  }

  /// Activates "RAII" behavior for this subscription: it is disposed as soon
  /// as the returned guard goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable, the
  /// subscription is disposed immediately.
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard { SubscriptionGuard(self) }
}

impl Disposable for Subscription {
  fn dispose(&self) {
    if self.0.disposed.swap(true, Ordering::AcqRel) {
      return;
    }
    tracing::trace!("subscription disposed");
    let upstream = lock(&self.0.upstream).take();
    if let Some(upstream) = upstream {
      upstream.dispose();
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.disposed.load(Ordering::Acquire) }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be disposed.
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard(Subscription);

impl SubscriptionGuard {
  pub fn new(subscription: Subscription) -> Self { SubscriptionGuard(subscription) }

  pub fn is_disposed(&self) -> bool { self.0.is_disposed() }
}

impl Drop for SubscriptionGuard {
  #[inline]
  fn drop(&mut self) { self.0.dispose() }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::disposable::BooleanDisposable;

  #[test]
  fn dispose_forwards_upstream() {
    let upstream = BooleanDisposable::new();
    let subscription = Subscription::new();
    subscription.set_upstream(Arc::new(upstream.clone()));
    assert!(!upstream.is_disposed());
    subscription.dispose();
    subscription.dispose();
    assert!(subscription.is_disposed());
    assert!(upstream.is_disposed());
  }

  #[test]
  fn late_upstream_disposed_on_arrival() {
    let subscription = Subscription::new();
    subscription.dispose();
    let upstream = BooleanDisposable::new();
    subscription.set_upstream(Arc::new(upstream.clone()));
    assert!(upstream.is_disposed());
  }

  #[test]
  fn upstream_state_does_not_leak_downstream() {
    let upstream = BooleanDisposable::new();
    let subscription = Subscription::new();
    subscription.set_upstream(Arc::new(upstream.clone()));
    upstream.dispose();
    assert!(!subscription.is_disposed());
  }

  #[test]
  fn replacing_upstream_disposes_previous() {
    let first = BooleanDisposable::new();
    let second = BooleanDisposable::new();
    let subscription = Subscription::new();
    subscription.set_upstream(Arc::new(first.clone()));
    subscription.set_upstream(Arc::new(second.clone()));
    assert!(first.is_disposed());
    assert!(!second.is_disposed());
  }

  #[test]
  fn guard_disposes_on_drop() {
    let upstream = BooleanDisposable::new();
    let subscription = Subscription::new();
    subscription.set_upstream(Arc::new(upstream.clone()));
    {
      let _guard = subscription.clone().unsubscribe_when_dropped();
      assert!(!upstream.is_disposed());
    }
    assert!(upstream.is_disposed());
    assert!(subscription.is_disposed());
  }
}
