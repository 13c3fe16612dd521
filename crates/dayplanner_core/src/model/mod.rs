//! Domain model for day-scoped calendar events.
//!
//! # Responsibility
//! - Define canonical data structures used by core scheduling logic.
//! - Keep raw editor input (`EventDraft`) separate from accepted `Event`s.
//!
//! # Invariants
//! - Every accepted event satisfies `start < end` and has a non-blank name.
//! - Day keys are always canonical `YYYY-MM-DD` dates without timezone.

pub mod day;
pub mod draft;
pub mod event;
