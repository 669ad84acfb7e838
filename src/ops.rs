//! Operator stages.
//!
//! Each operator is an `XxxOp` description wrapping its source, plus the
//! `XxxObserver` stage it subscribes upstream in place of the downstream
//! observer. Stage state is created per subscription and dropped with it.

pub mod distinct;
pub mod distinct_until_changed;
pub mod filter;
pub mod first;
pub mod last;
pub mod take;
pub mod take_last;
