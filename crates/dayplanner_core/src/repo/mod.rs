//! Event storage abstractions and the in-memory implementation.
//!
//! # Responsibility
//! - Define day-keyed add/update/remove contracts.
//! - Enforce the per-day non-overlap invariant before any mutation.
//!
//! # Invariants
//! - A failed operation leaves stored state untouched.
//! - Insertion order within a day is the only ordering.

pub mod event_store;
pub mod overlap;
