//! Event domain model.
//!
//! # Responsibility
//! - Define the accepted, time-boxed event record stored per day.
//! - Provide the half-open time span used by overlap checks.
//!
//! # Invariants
//! - `id` is stable for the event lifetime and never reused.
//! - `start < end` for every event produced by validation.
//! - Times are serialized as `HH:MM`.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for one stored event.
///
/// Positional index stays the display order; this id survives deletes and
/// reordering of neighbours. The store assigns it on `add`; ids on events
/// that were never stored are provisional.
pub type EventId = Uuid;

/// Event category shown as a color band by the shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Work,
    Personal,
    Others,
}

impl Category {
    /// Stable string id used on the wire and by the shell.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Others => "others",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown category string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl Display for CategoryParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported category `{}`; expected work|personal|others",
            self.0
        )
    }
}

impl Error for CategoryParseError {}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(Self::Work),
            "personal" => Ok(Self::Personal),
            "others" => Ok(Self::Others),
            other => Err(CategoryParseError(other.to_string())),
        }
    }
}

/// Half-open `[start, end)` interval within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSpan {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }
}

/// Accepted event record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Assigned by the store when the event is first accepted; provisional
    /// before that.
    pub id: EventId,
    pub name: String,
    #[serde(with = "time_of_day")]
    pub start: NaiveTime,
    #[serde(with = "time_of_day")]
    pub end: NaiveTime,
    pub description: Option<String>,
    pub category: Category,
}

impl Event {
    /// Creates an event with a provisional id.
    ///
    /// Does not validate; use `EventDraft::validate` for raw input. The store
    /// still rejects `start >= end`.
    pub fn new(
        name: impl Into<String>,
        start: NaiveTime,
        end: NaiveTime,
        category: Category,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start,
            end,
            description: None,
            category,
        }
    }

    /// Builder-style description setter.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn span(&self) -> TimeSpan {
        TimeSpan::new(self.start, self.end)
    }
}

/// `HH:MM` wire format for times of day.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";
    const FORMAT_WITH_SECONDS: &str = "%H:%M:%S";

    /// Parses `HH:MM` or `HH:MM:SS`.
    pub fn parse(value: &str) -> Option<NaiveTime> {
        let trimmed = value.trim();
        NaiveTime::parse_from_str(trimmed, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(trimmed, FORMAT_WITH_SECONDS))
            .ok()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time of day `{raw}`")))
    }
}
