use std::{
  marker::PhantomData,
  sync::{Arc, Mutex},
};

use crate::{
  disposable::{ActionDisposable, Disposable},
  error::{catch_unwind, on_undeliverable, RxError},
  observable::Observable,
  observer::{BoxedObserver, Observer},
  subscription::Subscription,
  util::lock,
};

/// Creates an observable from a function that drives an [`Emitter`].
///
/// `f` runs once per subscription. It may emit synchronously or hand the
/// emitter to another thread; either way it should stop once
/// [`Emitter::is_disposed`] reports `true`. A panic inside `f` is delivered
/// as an error.
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::create(|emitter: Emitter<i32>| {
///   emitter.next(1);
///   emitter.next(2);
///   emitter.complete();
/// })
/// .subscribe(|v| println!("{}", v));
/// ```
pub fn create<F, Item>(f: F) -> Create<F, Item>
where
  F: Fn(Emitter<Item>),
{
  Create { f, _hint: PhantomData }
}

pub struct Create<F, Item> {
  f: F,
  _hint: PhantomData<fn() -> Item>,
}

impl<F: Clone, Item> Clone for Create<F, Item> {
  fn clone(&self) -> Self { Create { f: self.f.clone(), _hint: PhantomData } }
}

impl<F, Item> Observable for Create<F, Item>
where
  F: Fn(Emitter<Item>),
  Item: 'static,
{
  type Item = Item;

  fn actual_subscribe<O>(&self, mut observer: O)
  where
    O: Observer<Item> + Send + 'static,
  {
    let subscription = Subscription::new();
    observer.on_subscribe(Arc::new(subscription.clone()));
    let emitter = Emitter::new(Box::new(observer), subscription);
    if let Err(err) = catch_unwind(|| (self.f)(emitter.clone())) {
      emitter.error(err);
    }
  }
}

/// The producer side handed to a [`create`] function.
///
/// Clones share one subscription. Signals after a terminal signal or after
/// disposal are dropped; an error dropped that way goes to the undeliverable
/// error hook.
pub struct Emitter<Item>(Arc<EmitterInner<Item>>);

struct EmitterInner<Item> {
  observer: Mutex<Option<BoxedObserver<Item>>>,
  subscription: Subscription,
}

impl<Item> Clone for Emitter<Item> {
  fn clone(&self) -> Self { Emitter(self.0.clone()) }
}

impl<Item> Emitter<Item> {
  fn new(observer: BoxedObserver<Item>, subscription: Subscription) -> Self {
    Emitter(Arc::new(EmitterInner {
      observer: Mutex::new(Some(observer)),
      subscription,
    }))
  }

  pub fn next(&self, value: Item) {
    if self.is_disposed() {
      return;
    }
    if let Some(observer) = lock(&self.0.observer).as_mut() {
      observer.next(value);
    }
  }

  pub fn error(&self, err: RxError) {
    match self.take_observer() {
      Some(mut observer) => {
        observer.error(err);
        self.0.subscription.dispose();
      }
      None => on_undeliverable(err),
    }
  }

  pub fn complete(&self) {
    if let Some(mut observer) = self.take_observer() {
      observer.complete();
      self.0.subscription.dispose();
    }
  }

  /// Whether the consumer disposed the subscription or a terminal signal
  /// was already emitted.
  pub fn is_disposed(&self) -> bool { self.0.subscription.is_disposed() }

  /// Sets the resource released when the subscription is disposed or
  /// terminates. Replacing a previous resource disposes it.
  pub fn set_disposable(&self, d: impl Disposable + 'static) {
    self.0.subscription.set_upstream(Arc::new(d));
  }

  /// Like [`set_disposable`](Self::set_disposable) with a closure.
  pub fn set_cancellable(&self, f: impl FnOnce() + Send + 'static) {
    self.set_disposable(ActionDisposable::new(f));
  }

  fn take_observer(&self) -> Option<BoxedObserver<Item>> {
    if self.is_disposed() {
      return None;
    }
    lock(&self.0.observer).take()
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::{
    disposable::BooleanDisposable,
    observable::ObservableExt,
    observer::TestObserver,
  };
  use std::{thread, time::Duration};

  #[test]
  fn emits_and_completes() {
    let obs = TestObserver::new();
    create(|emitter| {
      emitter.next(1);
      emitter.next(2);
      emitter.complete();
      emitter.next(3);
      emitter.complete();
    })
    .subscribe_with(obs.clone());
    obs.assert_values(&[1, 2]);
    obs.assert_complete();
  }

  #[test]
  fn panic_in_body() {
    let obs = TestObserver::new();
    create(|emitter| {
      emitter.next(1);
      panic!("body");
    })
    .subscribe_with(obs.clone());
    obs.assert_values(&[1]);
    assert!(obs.assert_error().is_panic());
  }

  #[test]
  fn teardown_runs_on_dispose() {
    let resource = BooleanDisposable::new();
    let c_resource = resource.clone();
    let subscription = create(move |emitter: Emitter<i32>| {
      emitter.set_disposable(c_resource.clone());
    })
    .subscribe(|_| {});
    assert!(!resource.is_disposed());
    subscription.dispose();
    assert!(resource.is_disposed());
  }

  #[test]
  fn teardown_runs_on_complete() {
    let resource = BooleanDisposable::new();
    let c_resource = resource.clone();
    create(move |emitter: Emitter<i32>| {
      emitter.set_disposable(c_resource.clone());
      emitter.complete();
    })
    .subscribe(|_| {});
    assert!(resource.is_disposed());
  }

  #[test]
  fn replaced_cancellable_runs() {
    let first = BooleanDisposable::new();
    let c_first = first.clone();
    create(move |emitter: Emitter<i32>| {
      let c_first = c_first.clone();
      emitter.set_cancellable(move || c_first.dispose());
      emitter.set_disposable(BooleanDisposable::new());
    })
    .subscribe(|_| {});
    assert!(first.is_disposed());
  }

  #[test]
  fn emitter_sees_dispose_from_other_thread() {
    let obs = TestObserver::new();
    create(|emitter: Emitter<u32>| {
      thread::spawn(move || {
        let mut i = 0;
        while !emitter.is_disposed() {
          emitter.next(i);
          i += 1;
          thread::sleep(Duration::from_millis(1));
        }
      });
    })
    .subscribe_with(obs.clone());
    assert!(obs.await_count(3, Duration::from_secs(5)));
    obs.dispose();
    let seen = obs.value_count();
    thread::sleep(Duration::from_millis(20));
    assert!(obs.value_count() <= seen + 1);
    obs.assert_not_complete();
  }
}
