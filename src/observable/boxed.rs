//! Boxed Observable types for type erasure
//!
//! Lets heterogeneous observables with the same item type be stored or
//! returned from the same place, e.g. the branches of a `defer` supplier.

use std::sync::Arc;

use crate::{
  observable::Observable,
  observer::{BoxedObserver, Observer},
};

/// Object-safe observable trait for type erasure.
pub trait DynObservable<Item> {
  fn dyn_subscribe(&self, observer: BoxedObserver<Item>);
}

impl<T> DynObservable<T::Item> for T
where
  T: Observable,
  T::Item: 'static,
{
  fn dyn_subscribe(&self, observer: BoxedObserver<T::Item>) { self.actual_subscribe(observer) }
}

/// A type-erased observable, cheap to clone.
pub struct BoxedObservable<Item>(Arc<dyn DynObservable<Item> + Send + Sync>);

impl<Item> BoxedObservable<Item> {
  pub fn new<S>(source: S) -> Self
  where
    S: Observable<Item = Item> + Send + Sync + 'static,
    Item: 'static,
  {
    BoxedObservable(Arc::new(source))
  }
}

impl<Item> Clone for BoxedObservable<Item> {
  fn clone(&self) -> Self { BoxedObservable(self.0.clone()) }
}

impl<Item: 'static> Observable for BoxedObservable<Item> {
  type Item = Item;

  fn actual_subscribe<O>(&self, observer: O)
  where
    O: Observer<Item> + Send + 'static,
  {
    self.0.dyn_subscribe(Box::new(observer))
  }
}
