//! Core scheduling logic for the dayplanner calendar.
//! This crate is the single source of truth for event invariants; the
//! presentation shell only calls into it.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::day::{DayKey, DayKeyError};
pub use model::draft::{EventDraft, EventValidationError, TimeField};
pub use model::event::{Category, CategoryParseError, Event, EventId, TimeSpan};
pub use repo::event_store::{EventRepository, EventStore, StoreError, StoreResult};
pub use repo::overlap::{first_conflict, overlaps};
pub use search::filter::{filter_events, filter_indexed, FilteredEvent};
pub use service::calendar_service::{CalendarError, CalendarResult, CalendarSession};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
