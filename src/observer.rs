//! Observer trait and implementations
//!
//! The Observer is the consumer side of a stream. It first receives the
//! cancellation handle of its subscription through `on_subscribe`, then any
//! number of `next` values and at most one terminal `error` or `complete`.

use crate::{
  disposable::SharedDisposable,
  error::{on_undeliverable, RxError},
};

mod test_observer;
pub use test_observer::TestObserver;

/// Observer trait: The consumer of data in reactive programming
///
/// After `error` or `complete` has been delivered, no further signal may
/// reach the same observer. Sources and operators in this crate uphold that
/// rule; observers passed to `subscribe_with` are additionally guarded by a
/// [`Subscriber`](crate::subscriber::Subscriber).
pub trait Observer<Item> {
  /// Receives the handle that cancels this subscription. Always called once,
  /// before any other signal.
  fn on_subscribe(&mut self, d: SharedDisposable) { let _ = d; }

  fn next(&mut self, value: Item);

  fn error(&mut self, err: RxError);

  fn complete(&mut self);
}

/// Boxed observer, used where the concrete observer type has to be erased.
pub type BoxedObserver<Item> = Box<dyn Observer<Item> + Send>;

impl<Item, O> Observer<Item> for Box<O>
where
  O: Observer<Item> + ?Sized,
{
  #[inline]
  fn on_subscribe(&mut self, d: SharedDisposable) { (**self).on_subscribe(d) }

  #[inline]
  fn next(&mut self, value: Item) { (**self).next(value) }

  #[inline]
  fn error(&mut self, err: RxError) { (**self).error(err) }

  #[inline]
  fn complete(&mut self) { (**self).complete() }
}

/// Closure adapter behind `subscribe`, `subscribe_err` and `subscribe_all`.
#[derive(Clone)]
pub struct FnObserver<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> FnObserver<N, E, C> {
  pub fn new(next: N, error: E, complete: C) -> Self { FnObserver { next, error, complete } }
}

impl<Item, N, E, C> Observer<Item> for FnObserver<N, E, C>
where
  N: FnMut(Item),
  E: FnMut(RxError),
  C: FnMut(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value) }

  #[inline]
  fn error(&mut self, err: RxError) { (self.error)(err) }

  #[inline]
  fn complete(&mut self) { (self.complete)() }
}

/// Error callback used when the consumer registered none.
pub(crate) fn report_undelivered(err: RxError) { on_undeliverable(err) }

pub(crate) fn ignore_complete() {}
