//! Prelude module for convenient imports

pub use crate::{
  disposable::{
    ActionDisposable, BooleanDisposable, ClearPolicy, CompositeDisposable, Disposable,
    SharedDisposable,
  },
  error::RxError,
  observable,
  observable::{BoxedObservable, Emitter, Observable, ObservableExt},
  observer::{Observer, TestObserver},
  scheduler::{Scheduler, SharedScheduler},
  subscription::{Subscription, SubscriptionGuard},
};
