use std::{
  any::Any,
  sync::{Mutex, MutexGuard, PoisonError},
};

/// Locks `mutex`, taking the guard back even if a previous holder panicked.
///
/// Every lock in this crate guards plain bookkeeping that stays consistent
/// across a panic, so poisoning carries no information for us.
#[inline]
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
  mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
  if let Some(msg) = payload.downcast_ref::<&'static str>() {
    (*msg).to_owned()
  } else if let Some(msg) = payload.downcast_ref::<String>() {
    msg.clone()
  } else {
    "non-string panic payload".to_owned()
  }
}
