//! The single error type carried by `error` signals, plus the process-wide
//! hook that receives errors no observer can take any more.

use std::{
  error::Error as StdError,
  panic::{self, AssertUnwindSafe},
  sync::{Arc, PoisonError, RwLock},
};

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::util::panic_message;

/// Error delivered through `Observer::error`.
///
/// Cheap to clone: every payload lives behind an `Arc`.
#[derive(Debug, Clone, Error)]
pub enum RxError {
  /// A fallible callback returned an error.
  #[error("{0}")]
  Failure(Arc<dyn StdError + Send + Sync>),
  /// A plain message error.
  #[error("{0}")]
  Message(Arc<str>),
  /// A user supplied callback panicked while the stream was running.
  #[error("callback panicked: {0}")]
  Panicked(Arc<str>),
  /// `range(start, count)` would run past `i64::MAX`.
  #[error("range starting at {start} with {count} items overflows i64")]
  Overflow { start: i64, count: u64 },
}

impl RxError {
  pub fn new<E>(err: E) -> Self
  where
    E: StdError + Send + Sync + 'static,
  {
    RxError::Failure(Arc::new(err))
  }

  pub fn msg(msg: impl Into<String>) -> Self { RxError::Message(msg.into().into()) }

  pub fn is_panic(&self) -> bool { matches!(self, RxError::Panicked(_)) }
}

impl From<&str> for RxError {
  fn from(msg: &str) -> Self { RxError::msg(msg) }
}

impl From<String> for RxError {
  fn from(msg: String) -> Self { RxError::msg(msg) }
}

impl From<std::io::Error> for RxError {
  fn from(err: std::io::Error) -> Self { RxError::new(err) }
}

impl From<Box<dyn StdError + Send + Sync>> for RxError {
  fn from(err: Box<dyn StdError + Send + Sync>) -> Self { RxError::Failure(Arc::from(err)) }
}

/// Runs a user callback, turning a panic into `RxError::Panicked`.
pub(crate) fn catch_unwind<R>(f: impl FnOnce() -> R) -> Result<R, RxError> {
  panic::catch_unwind(AssertUnwindSafe(f))
    .map_err(|payload| RxError::Panicked(panic_message(payload).into()))
}

type ErrorHandler = Arc<dyn Fn(&RxError) + Send + Sync>;

static ERROR_HANDLER: Lazy<RwLock<Option<ErrorHandler>>> = Lazy::new(|| RwLock::new(None));

/// Installs the handler that receives undeliverable errors: errors raised
/// after a subscription already terminated or was disposed, errors for a
/// consumer that registered no error callback, and panics escaping a
/// consumer's error callback.
pub fn set_error_handler(handler: impl Fn(&RxError) + Send + Sync + 'static) {
  *ERROR_HANDLER.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(handler));
}

/// Removes the handler installed by [`set_error_handler`]; undeliverable
/// errors are logged again.
pub fn reset_error_handler() {
  ERROR_HANDLER.write().unwrap_or_else(PoisonError::into_inner).take();
}

/// Hands `err` to the installed handler, or logs it when there is none.
pub fn on_undeliverable(err: RxError) {
  let handler = ERROR_HANDLER
    .read()
    .unwrap_or_else(PoisonError::into_inner)
    .clone();
  match handler {
    Some(handler) => {
      if let Err(failure) = catch_unwind(|| handler(&err)) {
        tracing::error!(error = %err, %failure, "undeliverable error handler panicked");
      }
    }
    None => tracing::error!(error = %err, "undeliverable error"),
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn display() {
    assert_eq!(RxError::msg("boom").to_string(), "boom");
    assert_eq!(RxError::from("boom").to_string(), "boom");
    let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
    assert_eq!(RxError::from(io).to_string(), "disk");
    let overflow = RxError::Overflow { start: i64::MAX, count: 2 };
    assert!(overflow.to_string().contains("overflows"));
  }

  #[test]
  fn catch_panic() {
    let ok = catch_unwind(|| 1 + 1);
    assert_eq!(ok.unwrap(), 2);

    let err = catch_unwind(|| -> i32 { panic!("inside") }).unwrap_err();
    assert!(err.is_panic());
    assert_eq!(err.to_string(), "callback panicked: inside");
  }
}
