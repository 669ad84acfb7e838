//! Cancellation handles.
//!
//! A [`Disposable`] stops further signal delivery for whatever it guards.
//! Disposal is idempotent and never fails; calling `dispose` on a handle
//! that is already disposed, or whose stream already terminated, does
//! nothing.

use std::sync::Arc;

mod action;
mod boolean;
mod composite;

pub use action::ActionDisposable;
pub use boolean::BooleanDisposable;
pub use composite::{ClearPolicy, CompositeDisposable};

pub trait Disposable: Send + Sync {
  /// Cancels the guarded work. Repeated calls have no further effect.
  fn dispose(&self);

  fn is_disposed(&self) -> bool;
}

/// A type-erased handle that can be cloned into several owners, e.g. an
/// operator stage and the consumer downstream of it.
pub type SharedDisposable = Arc<dyn Disposable>;

impl<T: Disposable + ?Sized> Disposable for Arc<T> {
  #[inline]
  fn dispose(&self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

impl<T: Disposable + ?Sized> Disposable for Box<T> {
  #[inline]
  fn dispose(&self) { (**self).dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { (**self).is_disposed() }
}

/// A handle that is disposed from the start.
pub fn disposed() -> SharedDisposable {
  let d = BooleanDisposable::new();
  d.dispose();
  Arc::new(d)
}
