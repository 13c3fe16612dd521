//! Canonical day keys.
//!
//! # Responsibility
//! - Normalize every accepted date shape into one `YYYY-MM-DD` key.
//!
//! # Invariants
//! - Keys carry calendar semantics only; no timezone conversion is applied.
//! - Timestamps keep the calendar date as written in their own offset.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Display/wire format for day keys.
pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

const DATE_FORMATS: &[&str] = &[DAY_KEY_FORMAT, "%Y/%m/%d"];
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Mapping key for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

/// Day key parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayKeyError {
    Empty,
    Unrecognized(String),
}

impl Display for DayKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "day cannot be empty"),
            Self::Unrecognized(value) => write!(f, "unrecognized day `{value}`"),
        }
    }
}

impl Error for DayKeyError {}

impl DayKey {
    /// Canonicalizes a date-ish text into a day key.
    ///
    /// Accepted shapes: `YYYY-MM-DD`, `YYYY/MM/DD`, naive ISO date-times and
    /// RFC 3339 timestamps. The time part is discarded.
    pub fn parse(input: &str) -> Result<Self, DayKeyError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DayKeyError::Empty);
        }

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(Self(date));
            }
        }
        for format in NAIVE_DATE_TIME_FORMATS {
            if let Ok(date_time) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self::from(date_time));
            }
        }
        if let Ok(date_time) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::from(date_time));
        }

        Err(DayKeyError::Unrecognized(trimmed.to_string()))
    }

    /// Underlying calendar date.
    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// Combines this day with a time of day into an absolute instant.
    pub fn at(self, time: NaiveTime) -> NaiveDateTime {
        self.0.and_time(time)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl From<NaiveDateTime> for DayKey {
    fn from(value: NaiveDateTime) -> Self {
        Self(value.date())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DayKey {
    fn from(value: DateTime<Tz>) -> Self {
        Self(value.date_naive())
    }
}

impl FromStr for DayKey {
    type Err = DayKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
