use std::sync::Arc;

use crate::{
  disposable::{BooleanDisposable, Disposable},
  error::{catch_unwind, RxError},
  observable::Observable,
  observer::Observer,
};

/// Creates an observable that calls `f` once per subscription and emits
/// its result.
///
/// `Ok(v)` emits `v` then completes; `Err(e)` or a panic inside `f` is
/// delivered as an error instead.
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::from_callable(|| "42".parse::<i32>().map_err(RxError::new))
///   .subscribe(|v| assert_eq!(v, 42));
/// ```
pub fn from_callable<F, Item, E>(f: F) -> FromCallable<F>
where
  F: Fn() -> Result<Item, E>,
  E: Into<RxError>,
{
  FromCallable(f)
}

#[derive(Clone)]
pub struct FromCallable<F>(F);

impl<F, Item, E> Observable for FromCallable<F>
where
  F: Fn() -> Result<Item, E>,
  E: Into<RxError>,
{
  type Item = Item;

  fn actual_subscribe<O>(&self, mut observer: O)
  where
    O: Observer<Item> + Send + 'static,
  {
    let flag = BooleanDisposable::new();
    observer.on_subscribe(Arc::new(flag.clone()));
    if flag.is_disposed() {
      return;
    }
    match catch_unwind(|| (self.0)()) {
      Ok(Ok(v)) => {
        observer.next(v);
        if !flag.is_disposed() {
          observer.complete();
        }
      }
      Ok(Err(err)) => observer.error(err.into()),
      Err(panicked) => observer.error(panicked),
    }
  }
}
