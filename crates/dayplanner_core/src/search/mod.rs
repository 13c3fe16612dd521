//! Display-time event search.
//!
//! # Responsibility
//! - Narrow a day's event list for display without mutating the store.
//!
//! # See also
//! - `service::calendar_service` for the display entry point.

pub mod filter;
