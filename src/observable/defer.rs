use crate::{
  disposable::disposed,
  error::catch_unwind,
  observable::Observable,
  observer::Observer,
};

/// Creates an observable that will on subscription defer to another observable
/// that is supplied by a supplier-function which will be run once at each
/// subscription
///
/// ```rust
/// # use rxlite::prelude::*;
///
/// observable::defer(|| {
///   println!("Hi!");
///   observable::just("Hello!")
/// })
/// .subscribe(move |v| {
///   println!("{}", v);
/// });
/// // Prints: Hi!\nHello!\n
/// ```
///
/// A panicking supplier fails the subscription with an error. Suppliers that
/// choose between different sources can return a
/// [`BoxedObservable`](super::BoxedObservable).
pub fn defer<F, S>(supplier: F) -> Defer<F>
where
  F: Fn() -> S,
  S: Observable,
{
  Defer(supplier)
}

#[derive(Clone)]
pub struct Defer<F>(F);

impl<F, S> Observable for Defer<F>
where
  F: Fn() -> S,
  S: Observable,
{
  type Item = S::Item;

  fn actual_subscribe<O>(&self, mut observer: O)
  where
    O: Observer<Self::Item> + Send + 'static,
  {
    match catch_unwind(|| (self.0)()) {
      Ok(source) => source.actual_subscribe(observer),
      Err(err) => {
        tracing::trace!(error = %err, "defer supplier failed");
        observer.on_subscribe(disposed());
        observer.error(err);
      }
    }
  }
}
