//! Calendar session use-case service.
//!
//! # Responsibility
//! - Own one session's event store and selected day.
//! - Provide the shell-facing entry points: select, save, edit, delete,
//!   display.
//!
//! # Invariants
//! - Every store call is keyed by an explicit day; the selected day is only
//!   a convenience for display.
//! - Drafts are validated before any store call; failures leave state as-is.
//! - Edit/delete indices always address the unfiltered per-day sequence.

use crate::model::day::{DayKey, DayKeyError};
use crate::model::draft::{EventDraft, EventValidationError};
use crate::model::event::{CategoryParseError, Event, EventId};
use crate::repo::event_store::{EventRepository, EventStore, StoreError};
use crate::search::filter::{filter_events, filter_indexed, FilteredEvent};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CalendarResult<T> = Result<T, CalendarError>;

/// Shell-facing error for calendar use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Draft failed validation.
    Validation(EventValidationError),
    /// Store rejected the mutation.
    Store(StoreError),
    /// Day text could not be canonicalized.
    InvalidDay(DayKeyError),
    /// Category text is not one of the known categories.
    InvalidCategory(CategoryParseError),
    /// Internal mismatch between a write and its read-back.
    InconsistentState(&'static str),
}

impl CalendarError {
    /// Message suitable for an alert in the presentation shell.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(EventValidationError::MissingName) => {
                "Event name is required.".to_string()
            }
            Self::Validation(EventValidationError::MissingTimes) => {
                "Start time and end time are required.".to_string()
            }
            Self::Validation(EventValidationError::InvalidTime { field, value }) => {
                format!("The {field} time `{value}` is not a valid time.")
            }
            Self::Validation(EventValidationError::InvalidRange { .. })
            | Self::Store(StoreError::InvalidSpan { .. }) => {
                "Start time must be earlier than end time.".to_string()
            }
            Self::Store(StoreError::OverlapConflict { .. }) => {
                "This event overlaps with an existing event. Please adjust the time.".to_string()
            }
            Self::Store(StoreError::IndexOutOfRange { .. })
            | Self::Store(StoreError::EventNotFound { .. }) => {
                "The selected event no longer exists.".to_string()
            }
            Self::InvalidDay(err) => format!("Invalid day: {err}."),
            Self::InvalidCategory(err) => format!("Unknown category `{}`.", err.0),
            Self::InconsistentState(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidDay(err) => write!(f, "{err}"),
            Self::InvalidCategory(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent calendar state: {details}")
            }
        }
    }
}

impl Error for CalendarError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InvalidDay(err) => Some(err),
            Self::InvalidCategory(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<EventValidationError> for CalendarError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for CalendarError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<DayKeyError> for CalendarError {
    fn from(value: DayKeyError) -> Self {
        Self::InvalidDay(value)
    }
}

impl From<CategoryParseError> for CalendarError {
    fn from(value: CategoryParseError) -> Self {
        Self::InvalidCategory(value)
    }
}

/// One user's calendar session: event store plus selected day.
///
/// Sessions are independent; nothing is shared between instances.
#[derive(Debug, Default)]
pub struct CalendarSession<R: EventRepository = EventStore> {
    repo: R,
    selected_day: Option<DayKey>,
}

impl CalendarSession<EventStore> {
    /// Creates an empty in-memory session.
    pub fn new() -> Self {
        Self::with_repository(EventStore::new())
    }
}

impl<R: EventRepository> CalendarSession<R> {
    /// Creates a session over the provided repository implementation.
    pub fn with_repository(repo: R) -> Self {
        Self {
            repo,
            selected_day: None,
        }
    }

    /// Read access to the underlying store.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Marks `date` as the active day and returns its canonical key.
    pub fn select_day(&mut self, date: impl Into<DayKey>) -> DayKey {
        let day = date.into();
        self.selected_day = Some(day);
        info!("event=day_selected module=service status=ok day={}", day);
        day
    }

    /// Canonicalizes `date` text and marks it as the active day.
    ///
    /// On failure the previous selection is kept.
    pub fn select_day_str(&mut self, date: &str) -> CalendarResult<DayKey> {
        let day = DayKey::parse(date).inspect_err(|err| {
            warn!(
                "event=day_selected module=service status=error error={}",
                err
            );
        })?;
        Ok(self.select_day(day))
    }

    /// Currently active day; stays set once chosen.
    pub fn selected_day(&self) -> Option<DayKey> {
        self.selected_day
    }

    /// Validates `draft` and appends it to `day`.
    pub fn save_event(&mut self, day: DayKey, draft: &EventDraft) -> CalendarResult<Event> {
        let event = validated(day, "save", draft)?;
        let events = self
            .repo
            .add(day, event)
            .inspect_err(|err| log_rejected(day, "save", err))?;
        info!(
            "event=event_save module=service status=ok day={} index={}",
            day,
            events.len().saturating_sub(1)
        );
        events
            .last()
            .cloned()
            .ok_or(CalendarError::InconsistentState("saved event not found in read-back"))
    }

    /// Validates `draft` and replaces the entry at `index` of `day`.
    ///
    /// The entry keeps its id and position.
    pub fn edit_event(
        &mut self,
        day: DayKey,
        index: usize,
        draft: &EventDraft,
    ) -> CalendarResult<Event> {
        let event = validated(day, "edit", draft)?;
        let events = self
            .repo
            .update(day, index, event)
            .inspect_err(|err| log_rejected(day, "edit", err))?;
        info!(
            "event=event_edit module=service status=ok day={} index={}",
            day, index
        );
        events
            .get(index)
            .cloned()
            .ok_or(CalendarError::InconsistentState("edited event not found in read-back"))
    }

    /// Validates `draft` and replaces the event with stable `id` on `day`.
    pub fn edit_event_by_id(
        &mut self,
        day: DayKey,
        id: EventId,
        draft: &EventDraft,
    ) -> CalendarResult<Event> {
        let index = self.repo.position(day, id)?;
        self.edit_event(day, index, draft)
    }

    /// Removes the entry at `index` of `day`; later entries shift down.
    pub fn delete_event(&mut self, day: DayKey, index: usize) -> CalendarResult<Event> {
        let removed = self
            .repo
            .remove(day, index)
            .inspect_err(|err| log_rejected(day, "delete", err))?;
        info!(
            "event=event_delete module=service status=ok day={} index={}",
            day, index
        );
        Ok(removed)
    }

    /// Removes the event with stable `id` from `day`.
    pub fn delete_event_by_id(&mut self, day: DayKey, id: EventId) -> CalendarResult<Event> {
        let index = self.repo.position(day, id)?;
        self.delete_event(day, index)
    }

    /// Events of `day` matching `query`, in stored order.
    pub fn events_for_display(&self, day: DayKey, query: &str) -> Vec<Event> {
        filter_events(self.repo.events(day), query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Filtered view of `day` keeping unfiltered indices for edit/delete.
    pub fn events_for_display_indexed(&self, day: DayKey, query: &str) -> Vec<FilteredEvent<'_>> {
        filter_indexed(self.repo.events(day), query)
    }

    /// Filtered events of the selected day; empty when no day is selected.
    pub fn events_for_selected_day(&self, query: &str) -> Vec<Event> {
        self.selected_day
            .map(|day| self.events_for_display(day, query))
            .unwrap_or_default()
    }
}

fn validated(day: DayKey, action: &str, draft: &EventDraft) -> CalendarResult<Event> {
    let event = draft.validate().inspect_err(|err| {
        warn!(
            "event=event_{} module=service status=rejected day={} reason={}",
            action,
            day,
            validation_reason(err)
        );
    })?;
    Ok(event)
}

fn validation_reason(err: &EventValidationError) -> &'static str {
    match err {
        EventValidationError::MissingName => "missing_name",
        EventValidationError::MissingTimes => "missing_times",
        EventValidationError::InvalidTime { .. } => "invalid_time",
        EventValidationError::InvalidRange { .. } => "invalid_range",
    }
}

fn log_rejected(day: DayKey, action: &str, err: &StoreError) {
    let reason = match err {
        StoreError::InvalidSpan { .. } => "invalid_span",
        StoreError::OverlapConflict { .. } => "overlap_conflict",
        StoreError::IndexOutOfRange { .. } => "index_out_of_range",
        StoreError::EventNotFound { .. } => "event_not_found",
    };
    warn!(
        "event=event_{} module=service status=rejected day={} reason={}",
        action, day, reason
    );
}
