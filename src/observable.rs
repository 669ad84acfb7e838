//! Observable trait, the chainable operator surface and the creation entry
//! points.
//!
//! An observable is a cold description of a producer: nothing runs until a
//! consumer subscribes, and every subscription starts an independent
//! execution. Subscribing takes `&self`, so the same description can be
//! subscribed any number of times.

use crate::{
  error::RxError,
  observer::{ignore_complete, report_undelivered, FnObserver, Observer},
  ops::{
    distinct::DistinctOp, distinct_until_changed::DistinctUntilChangedOp, filter::FilterOp,
    first::FirstOp, last::LastOp, take::TakeOp, take_last::TakeLastOp,
  },
  subscriber::Subscriber,
  subscription::Subscription,
};

mod boxed;
mod create;
mod defer;
mod from_callable;
mod from_iter;
mod interval;
mod timer;
mod trivial;

pub use boxed::*;
pub use create::*;
pub use defer::*;
pub use from_callable::*;
pub use from_iter::*;
pub use interval::*;
pub use timer::*;
pub use trivial::*;

pub trait Observable {
  type Item;

  /// Starts one execution that delivers its signals to `observer`.
  ///
  /// Implementations call `observer.on_subscribe` exactly once before any
  /// other signal, and never let a panic from user code escape: it is
  /// delivered as an `error` signal instead.
  fn actual_subscribe<O>(&self, observer: O)
  where
    O: Observer<Self::Item> + Send + 'static;
}

pub trait ObservableExt: Observable + Sized {
  /// Emit only those items from an Observable that pass a predicate test.
  ///
  /// A panicking predicate terminates the stream with an error.
  ///
  /// ```
  /// use rxlite::prelude::*;
  /// use std::sync::{Arc, Mutex};
  ///
  /// let evens = Arc::new(Mutex::new(vec![]));
  /// let c_evens = evens.clone();
  /// observable::range(0, 9)
  ///   .filter(|v| *v % 2 == 0)
  ///   .subscribe(move |v| c_evens.lock().unwrap().push(v));
  ///
  /// assert_eq!(*evens.lock().unwrap(), vec![0, 2, 4, 6, 8]);
  /// ```
  fn filter<F>(self, predicate: F) -> FilterOp<Self, F>
  where
    F: Fn(&Self::Item) -> bool + Send + Sync + 'static,
  {
    FilterOp::new(self, predicate)
  }

  /// Emits only the first `count` values emitted by the source Observable,
  /// then completes and disposes the source.
  ///
  /// ```
  /// use rxlite::prelude::*;
  ///
  /// observable::range(0, 10).take(5).subscribe(|v| println!("{}", v));
  ///
  /// // print logs:
  /// // 0
  /// // 1
  /// // 2
  /// // 3
  /// // 4
  /// ```
  fn take(self, count: usize) -> TakeOp<Self> { TakeOp::new(self, count) }

  /// Emits only the last `count` values emitted by the source, once the
  /// source completes.
  fn take_last(self, count: usize) -> TakeLastOp<Self> { TakeLastOp::new(self, count) }

  /// Suppresses every value that has been emitted before.
  fn distinct(self) -> DistinctOp<Self> { DistinctOp::new(self) }

  /// Suppresses a value equal to the one emitted right before it.
  fn distinct_until_changed(self) -> DistinctUntilChangedOp<Self> {
    DistinctUntilChangedOp::new(self)
  }

  /// Emits the first value and completes. An empty source completes
  /// without a value.
  fn first_element(self) -> FirstOp<Self> { FirstOp::new(self) }

  /// Emits the last value once the source completes. An empty source
  /// completes without a value.
  fn last_element(self) -> LastOp<Self> { LastOp::new(self) }

  /// Erases the concrete type of this observable.
  fn box_it(self) -> BoxedObservable<Self::Item>
  where
    Self: Send + Sync + 'static,
    Self::Item: 'static,
  {
    BoxedObservable::new(self)
  }

  /// Subscribes with a `next` callback. Errors go to the undeliverable
  /// error hook.
  fn subscribe<N>(&self, next: N) -> Subscription
  where
    N: FnMut(Self::Item) + Send + 'static,
  {
    self.subscribe_with(FnObserver::new(next, report_undelivered, ignore_complete))
  }

  fn subscribe_err<N, E>(&self, next: N, error: E) -> Subscription
  where
    N: FnMut(Self::Item) + Send + 'static,
    E: FnMut(RxError) + Send + 'static,
  {
    self.subscribe_with(FnObserver::new(next, error, ignore_complete))
  }

  fn subscribe_all<N, E, C>(&self, next: N, error: E, complete: C) -> Subscription
  where
    N: FnMut(Self::Item) + Send + 'static,
    E: FnMut(RxError) + Send + 'static,
    C: FnMut() + Send + 'static,
  {
    self.subscribe_with(FnObserver::new(next, error, complete))
  }

  /// Subscribes `observer`, guarded so that it sees at most one terminal
  /// signal and nothing after the returned subscription is disposed.
  fn subscribe_with<O>(&self, observer: O) -> Subscription
  where
    O: Observer<Self::Item> + Send + 'static,
  {
    let subscriber = Subscriber::new(observer);
    let subscription = subscriber.subscription();
    tracing::trace!("subscribe");
    self.actual_subscribe(subscriber);
    subscription
  }
}

impl<T: Observable> ObservableExt for T {}
