//! Day-keyed event store contracts and in-memory implementation.
//!
//! # Responsibility
//! - Hold one ordered event sequence per day.
//! - Provide add/update/remove by position and by stable event id.
//!
//! # Invariants
//! - No two events of one day have intersecting `[start, end)` spans.
//! - Every write checks span ordering and overlap before mutating; failures
//!   leave state as-is.
//! - `add` assigns a fresh id, so ids never repeat within the store.
//! - Removing the last event of a day keeps an empty sequence for that day.
//! - `update` keeps the replaced entry's id and position.

use crate::model::day::DayKey;
use crate::model::event::{time_of_day, Event, EventId, TimeSpan};
use crate::repo::overlap::first_conflict;
use chrono::NaiveTime;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for event mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Event span is empty or reversed (`start >= end`).
    InvalidSpan {
        day: DayKey,
        start: NaiveTime,
        end: NaiveTime,
    },
    /// Candidate span intersects the entry at `conflicting_index`.
    OverlapConflict {
        day: DayKey,
        conflicting_index: usize,
    },
    /// `index` does not name an entry of the day's sequence.
    IndexOutOfRange {
        day: DayKey,
        index: usize,
        len: usize,
    },
    /// No event with `id` exists on `day`.
    EventNotFound { day: DayKey, id: EventId },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSpan { day, start, end } => write!(
                f,
                "event span {}-{} on {day} must have start before end",
                start.format(time_of_day::FORMAT),
                end.format(time_of_day::FORMAT)
            ),
            Self::OverlapConflict {
                day,
                conflicting_index,
            } => write!(
                f,
                "event overlaps existing event #{conflicting_index} on {day}"
            ),
            Self::IndexOutOfRange { day, index, len } => write!(
                f,
                "event index {index} out of range for {day} ({len} event(s))"
            ),
            Self::EventNotFound { day, id } => write!(f, "event not found on {day}: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Storage interface for day-keyed event sequences.
pub trait EventRepository {
    /// Appends `event` to `day` under a freshly assigned id; returns the
    /// updated sequence.
    fn add(&mut self, day: DayKey, event: Event) -> StoreResult<&[Event]>;
    /// Replaces the entry at `index` in place; returns the updated sequence.
    fn update(&mut self, day: DayKey, index: usize, event: Event) -> StoreResult<&[Event]>;
    /// Removes the entry at `index`, shifting later entries down by one.
    fn remove(&mut self, day: DayKey, index: usize) -> StoreResult<Event>;
    /// Events of `day` in insertion order; empty when the day is unknown.
    fn events(&self, day: DayKey) -> &[Event];

    /// Current position of `id` within `day`.
    fn position(&self, day: DayKey, id: EventId) -> StoreResult<usize> {
        self.events(day)
            .iter()
            .position(|event| event.id == id)
            .ok_or(StoreError::EventNotFound { day, id })
    }

    /// Replaces the event with `id` on `day`.
    fn update_by_id(&mut self, day: DayKey, id: EventId, event: Event) -> StoreResult<&[Event]> {
        let index = self.position(day, id)?;
        self.update(day, index, event)
    }

    /// Removes the event with `id` from `day`.
    fn remove_by_id(&mut self, day: DayKey, id: EventId) -> StoreResult<Event> {
        let index = self.position(day, id)?;
        self.remove(day, index)
    }
}

/// In-memory event store. Starts empty and lives for one session.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    days: BTreeMap<DayKey, Vec<Event>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry at `index` on `day`.
    pub fn get(&self, day: DayKey, index: usize) -> Option<&Event> {
        self.events(day).get(index)
    }

    /// Locates an event by stable id across all days.
    pub fn find(&self, id: EventId) -> Option<(DayKey, usize)> {
        self.days.iter().find_map(|(day, events)| {
            events
                .iter()
                .position(|event| event.id == id)
                .map(|index| (*day, index))
        })
    }

    /// Days that hold a sequence (possibly empty), ascending.
    pub fn days(&self) -> impl Iterator<Item = DayKey> + '_ {
        self.days.keys().copied()
    }

    /// Total number of events over all days.
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_index(&self, day: DayKey, index: usize) -> StoreResult<()> {
        let len = self.events(day).len();
        if index >= len {
            warn!(
                "event=event_index_check module=repo status=error day={} index={} len={}",
                day, index, len
            );
            return Err(StoreError::IndexOutOfRange { day, index, len });
        }
        Ok(())
    }

    fn check_span(&self, day: DayKey, span: TimeSpan) -> StoreResult<()> {
        if span.start >= span.end {
            warn!("event=span_check module=repo status=error day={}", day);
            return Err(StoreError::InvalidSpan {
                day,
                start: span.start,
                end: span.end,
            });
        }
        Ok(())
    }

    fn check_overlap(
        &self,
        day: DayKey,
        candidate: TimeSpan,
        exclude: Option<usize>,
    ) -> StoreResult<()> {
        let events = self.events(day);
        let compared: Vec<usize> = (0..events.len())
            .filter(|index| Some(*index) != exclude)
            .collect();

        let conflict = first_conflict(
            day,
            candidate,
            compared.iter().map(|index| events[*index].span()),
        );
        if let Some(position) = conflict {
            let conflicting_index = compared[position];
            debug!(
                "event=overlap_check module=repo status=conflict day={} conflicting_index={}",
                day, conflicting_index
            );
            return Err(StoreError::OverlapConflict {
                day,
                conflicting_index,
            });
        }
        Ok(())
    }
}

impl EventRepository for EventStore {
    fn add(&mut self, day: DayKey, mut event: Event) -> StoreResult<&[Event]> {
        self.check_span(day, event.span())?;
        self.check_overlap(day, event.span(), None)?;

        event.id = Uuid::new_v4();
        let events = self.days.entry(day).or_default();
        events.push(event);
        debug!(
            "event=event_add module=repo status=ok day={} len={}",
            day,
            events.len()
        );
        Ok(events.as_slice())
    }

    fn update(&mut self, day: DayKey, index: usize, mut event: Event) -> StoreResult<&[Event]> {
        self.check_index(day, index)?;
        self.check_span(day, event.span())?;
        self.check_overlap(day, event.span(), Some(index))?;

        let events = self.days.entry(day).or_default();
        event.id = events[index].id;
        events[index] = event;
        debug!(
            "event=event_update module=repo status=ok day={} index={}",
            day, index
        );
        Ok(events.as_slice())
    }

    fn remove(&mut self, day: DayKey, index: usize) -> StoreResult<Event> {
        self.check_index(day, index)?;

        let events = self.days.entry(day).or_default();
        let removed = events.remove(index);
        debug!(
            "event=event_remove module=repo status=ok day={} index={} len={}",
            day,
            index,
            events.len()
        );
        Ok(removed)
    }

    fn events(&self, day: DayKey) -> &[Event] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }
}
