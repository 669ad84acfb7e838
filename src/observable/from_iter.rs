use std::{iter, sync::Arc};

use crate::{
  disposable::{BooleanDisposable, Disposable},
  error::{catch_unwind, RxError},
  observable::Observable,
  observer::Observer,
};

/// Creates an observable that produces values from an iterator.
///
/// Every subscription iterates a fresh clone of `iter`. Completes when all
/// elements have been emitted; a panic while producing an element is
/// delivered as an error.
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::from_iter(vec![0, 1, 2, 3]).subscribe(|v| println!("{},", v));
/// ```
pub fn from_iter<Iter>(iter: Iter) -> FromIter<Iter>
where
  Iter: IntoIterator + Clone,
{
  FromIter(iter)
}

/// Creates an observable that emits the elements of an array in order.
pub fn from_array<Item, const N: usize>(items: [Item; N]) -> FromIter<[Item; N]>
where
  Item: Clone,
{
  FromIter(items)
}

/// Creates an observable producing a single value, then completing.
pub fn just<Item: Clone>(value: Item) -> FromIter<iter::Once<Item>> {
  FromIter(iter::once(value))
}

#[derive(Clone)]
pub struct FromIter<Iter>(Iter);

impl<Iter> Observable for FromIter<Iter>
where
  Iter: IntoIterator + Clone,
{
  type Item = Iter::Item;

  fn actual_subscribe<O>(&self, mut observer: O)
  where
    O: Observer<Self::Item> + Send + 'static,
  {
    let flag = BooleanDisposable::new();
    observer.on_subscribe(Arc::new(flag.clone()));
    let mut iter = match catch_unwind(|| self.0.clone().into_iter()) {
      Ok(iter) => iter,
      Err(err) => return observer.error(err),
    };
    loop {
      if flag.is_disposed() {
        return;
      }
      match catch_unwind(|| iter.next()) {
        Ok(Some(v)) => observer.next(v),
        Ok(None) => break,
        Err(err) => return observer.error(err),
      }
    }
    if !flag.is_disposed() {
      observer.complete();
    }
  }
}

/// Creates an observable that emits `count` consecutive integers beginning
/// at `start`.
///
/// `count == 0` only completes. A range whose last element would exceed
/// `i64::MAX` emits nothing and fails with [`RxError::Overflow`].
pub fn range(start: i64, count: u64) -> Range { Range { start, count } }

#[derive(Clone, Copy, Debug)]
pub struct Range {
  start: i64,
  count: u64,
}

impl Range {
  fn overflows(&self) -> bool {
    self.count > 0 && self.start as i128 + self.count as i128 - 1 > i64::MAX as i128
  }
}

impl Observable for Range {
  type Item = i64;

  fn actual_subscribe<O>(&self, mut observer: O)
  where
    O: Observer<i64> + Send + 'static,
  {
    let flag = BooleanDisposable::new();
    observer.on_subscribe(Arc::new(flag.clone()));
    if self.overflows() {
      return observer.error(RxError::Overflow { start: self.start, count: self.count });
    }
    let mut value = self.start;
    for _ in 0..self.count {
      if flag.is_disposed() {
        return;
      }
      observer.next(value);
      value = value.wrapping_add(1);
    }
    if !flag.is_disposed() {
      observer.complete();
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::{disposable::SharedDisposable, observable::ObservableExt, observer::TestObserver};
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
  };

  #[test]
  fn from_vec() {
    let obs = TestObserver::new();
    from_iter(vec![1, 2, 3]).subscribe_with(obs.clone());
    obs.assert_values(&[1, 2, 3]);
    obs.assert_complete();
  }

  #[test]
  fn array_and_just() {
    let obs = TestObserver::new();
    from_array(["a", "b"]).subscribe_with(obs.clone());
    obs.assert_values(&["a", "b"]);
    obs.assert_complete();

    let obs = TestObserver::new();
    just(7).subscribe_with(obs.clone());
    obs.assert_values(&[7]);
    obs.assert_complete();
  }

  #[test]
  fn range_values() {
    let obs = TestObserver::new();
    range(0, 9).subscribe_with(obs.clone());
    obs.assert_values(&[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    obs.assert_complete();
  }

  #[test]
  fn empty_range() {
    let obs = TestObserver::new();
    range(5, 0).subscribe_with(obs.clone());
    obs.assert_completed_empty();
  }

  #[test]
  fn range_up_to_max() {
    let obs = TestObserver::new();
    range(i64::MAX - 1, 2).subscribe_with(obs.clone());
    obs.assert_values(&[i64::MAX - 1, i64::MAX]);
    obs.assert_complete();
  }

  #[test]
  fn range_overflow() {
    let obs = TestObserver::new();
    range(i64::MAX, 2).subscribe_with(obs.clone());
    assert_eq!(obs.value_count(), 0);
    assert!(matches!(obs.assert_error(), RxError::Overflow { .. }));
  }

  #[test]
  fn range_over_whole_domain() {
    let obs = TestObserver::new();
    range(i64::MIN, u64::MAX).take(3).subscribe_with(obs.clone());
    obs.assert_values(&[i64::MIN, i64::MIN + 1, i64::MIN + 2]);
    obs.assert_complete();
  }

  struct DisposeAt {
    at: i32,
    handle: Option<SharedDisposable>,
    seen: Arc<Mutex<Vec<i32>>>,
  }

  impl Observer<i32> for DisposeAt {
    fn on_subscribe(&mut self, d: SharedDisposable) { self.handle = Some(d); }

    fn next(&mut self, value: i32) {
      self.seen.lock().unwrap().push(value);
      if value == self.at {
        self.handle.as_ref().unwrap().dispose();
      }
    }

    fn error(&mut self, _: RxError) {}

    fn complete(&mut self) { panic!("disposed stream must not complete") }
  }

  #[test]
  fn stops_when_disposed() {
    let produced = Arc::new(AtomicUsize::new(0));
    let c_produced = produced.clone();
    let seen = Arc::new(Mutex::new(vec![]));
    from_iter((0..100).map(move |v| {
      c_produced.fetch_add(1, Ordering::SeqCst);
      v
    }))
    .actual_subscribe(DisposeAt { at: 2, handle: None, seen: seen.clone() });
    assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    assert_eq!(produced.load(Ordering::SeqCst), 3);
  }

  #[test]
  fn panicking_iterator() {
    let obs = TestObserver::new();
    from_iter((0..5).map(|v| if v == 3 { panic!("three") } else { v })).subscribe_with(obs.clone());
    obs.assert_values(&[0, 1, 2]);
    assert!(obs.assert_error().is_panic());
  }
}
