//! # rxlite: a compact Reactive Extensions core
//!
//! Cold observables, cancellable subscriptions and schedulers, with the
//! operators `filter`, `take`, `take_last`, `distinct`,
//! `distinct_until_changed`, `first_element` and `last_element`.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! observable::range(0, 10)
//!   .filter(|v| v % 2 == 0)
//!   .take(3)
//!   .subscribe(|v| println!("Value: {}", v));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | A re-subscribable description of a producer |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`Scheduler`] | Runs the delayed and periodic work of `timer` and `interval` |
//!
//! Finite sources run the whole chain on the subscribing thread before
//! `subscribe` returns. Timed sources emit from a scheduler thread.
//!
//! Panics raised by user callbacks never unwind out of `subscribe`; they are
//! delivered as [`RxError::Panicked`](error::RxError::Panicked). Errors with
//! nowhere left to go reach the hook set by [`error::set_error_handler`].
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): `futures` thread pool behind
//!   [`scheduler::computation`]
//! - **`tokio-scheduler`**: [`TokioScheduler`](scheduler::TokioScheduler) on a
//!   tokio runtime handle
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`Scheduler`]: scheduler::Scheduler

pub mod disposable;
pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod scheduler;
pub mod subscriber;
pub mod subscription;
mod util;
