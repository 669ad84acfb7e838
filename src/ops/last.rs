use crate::{
  disposable::SharedDisposable, error::RxError, observable::Observable, observer::Observer,
};

#[derive(Clone)]
pub struct LastOp<S> {
  source: S,
}

impl<S> LastOp<S> {
  pub(crate) fn new(source: S) -> Self { LastOp { source } }
}

impl<S> Observable for LastOp<S>
where
  S: Observable,
  S::Item: Send + 'static,
{
  type Item = S::Item;

  fn actual_subscribe<O>(&self, observer: O)
  where
    O: Observer<Self::Item> + Send + 'static,
  {
    self.source.actual_subscribe(LastObserver { observer, last: None })
  }
}

pub struct LastObserver<O, Item> {
  observer: O,
  last: Option<Item>,
}

impl<Item, O> Observer<Item> for LastObserver<O, Item>
where
  O: Observer<Item>,
{
  fn on_subscribe(&mut self, d: SharedDisposable) { self.observer.on_subscribe(d) }

  fn next(&mut self, value: Item) { self.last = Some(value); }

  fn error(&mut self, err: RxError) {
    self.last = None;
    self.observer.error(err);
  }

  fn complete(&mut self) {
    if let Some(v) = self.last.take() {
      self.observer.next(v);
    }
    self.observer.complete();
  }
}
