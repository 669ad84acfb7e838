use std::{iter, marker::PhantomData, sync::Arc};

use super::from_iter::FromIter;
use crate::{
  disposable::{BooleanDisposable, Disposable},
  error::RxError,
  observable::{from_iter, Observable},
  observer::Observer,
};

/// Creates an observable that produces no values.
///
/// Completes immediately. Never emits an error.
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::empty().subscribe(|v: i32| println!("{},", v));
///
/// // Result: no thing printed
/// ```
pub fn empty<Item>() -> FromIter<iter::Empty<Item>> { from_iter(iter::empty()) }

/// Creates an observable that emits no items, just terminates with an error.
pub fn throw_err<Item>(err: impl Into<RxError>) -> ThrowErr<Item> {
  ThrowErr { err: err.into(), _hint: PhantomData }
}

pub struct ThrowErr<Item> {
  err: RxError,
  _hint: PhantomData<fn() -> Item>,
}

impl<Item> Clone for ThrowErr<Item> {
  fn clone(&self) -> Self { ThrowErr { err: self.err.clone(), _hint: PhantomData } }
}

impl<Item> Observable for ThrowErr<Item> {
  type Item = Item;

  fn actual_subscribe<O>(&self, mut observer: O)
  where
    O: Observer<Item> + Send + 'static,
  {
    let flag = BooleanDisposable::new();
    observer.on_subscribe(Arc::new(flag.clone()));
    if !flag.is_disposed() {
      observer.error(self.err.clone());
    }
  }
}
