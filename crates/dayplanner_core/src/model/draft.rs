//! Unvalidated editor input and its validation.
//!
//! # Responsibility
//! - Hold raw form values exactly as the shell collected them.
//! - Turn a draft into an `Event` or a user-correctable error.
//!
//! # Invariants
//! - Validation is pure; it never touches stored state.
//! - Checks run in editor order: name, time presence, time format, range.

use crate::model::event::{time_of_day, Category, Event};
use chrono::NaiveTime;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Which time field failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

impl Display for TimeField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Validation failure for an event draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// Name is empty or whitespace-only.
    MissingName,
    /// Start or end time is absent.
    MissingTimes,
    /// A time value is present but is not `HH:MM[:SS]`.
    InvalidTime { field: TimeField, value: String },
    /// Start is not strictly before end.
    InvalidRange { start: NaiveTime, end: NaiveTime },
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "event name is required"),
            Self::MissingTimes => write!(f, "start and end time are required"),
            Self::InvalidTime { field, value } => {
                write!(f, "invalid {field} time `{value}`; expected HH:MM")
            }
            Self::InvalidRange { start, end } => write!(
                f,
                "start ({}) must be earlier than end ({})",
                start.format(time_of_day::FORMAT),
                end.format(time_of_day::FORMAT)
            ),
        }
    }
}

impl Error for EventValidationError {}

/// Raw event values entered in the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub name: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
    pub category: Category,
}

impl EventDraft {
    /// Creates a draft with name and times; description empty, category `work`.
    pub fn new(
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start: Some(start.into()),
            end: Some(end.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Validates this draft into a normalized event.
    ///
    /// The name is trimmed; description and category pass through unchanged.
    /// The returned event carries a provisional id; the store assigns the
    /// stable one on `add` and keeps the existing one on `update`.
    pub fn validate(&self) -> Result<Event, EventValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EventValidationError::MissingName);
        }

        let (Some(raw_start), Some(raw_end)) = (present(&self.start), present(&self.end)) else {
            return Err(EventValidationError::MissingTimes);
        };

        let start = parse_time(TimeField::Start, raw_start)?;
        let end = parse_time(TimeField::End, raw_end)?;
        if start >= end {
            return Err(EventValidationError::InvalidRange { start, end });
        }

        Ok(Event {
            id: Uuid::new_v4(),
            name: name.to_string(),
            start,
            end,
            description: self.description.clone(),
            category: self.category,
        })
    }
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            start: Some(event.start.format(time_of_day::FORMAT).to_string()),
            end: Some(event.end.format(time_of_day::FORMAT).to_string()),
            description: event.description.clone(),
            category: event.category,
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_time(field: TimeField, value: &str) -> Result<NaiveTime, EventValidationError> {
    time_of_day::parse(value).ok_or_else(|| EventValidationError::InvalidTime {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{present, EventDraft};

    #[test]
    fn present_treats_blank_as_absent() {
        assert_eq!(present(&None), None);
        assert_eq!(present(&Some("   ".to_string())), None);
        assert_eq!(present(&Some(" 09:00 ".to_string())), Some("09:00"));
    }

    #[test]
    fn draft_from_event_round_trips_editor_values() {
        let event = EventDraft::new("Lunch", "12:00", "13:00")
            .with_description("canteen")
            .validate()
            .unwrap();
        let draft = EventDraft::from(&event);
        assert_eq!(draft.start.as_deref(), Some("12:00"));
        assert_eq!(draft.end.as_deref(), Some("13:00"));
        assert_eq!(draft.description.as_deref(), Some("canteen"));
    }
}
