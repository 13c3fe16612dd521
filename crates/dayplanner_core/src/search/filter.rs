//! Case-insensitive substring filter over event name/description.
//!
//! # Invariants
//! - Output order equals source order.
//! - A blank or whitespace-only query matches every event.
//! - Any other query is matched as given, surrounding whitespace included.
//! - Indexed results always refer to positions in the unfiltered sequence.

use crate::model::event::Event;

/// One filtered event together with its position in the source sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteredEvent<'a> {
    /// Position in the unfiltered per-day sequence; safe for edit/delete.
    pub index: usize,
    pub event: &'a Event,
}

/// Returns events whose name or description contains `query`.
pub fn filter_events<'a>(events: &'a [Event], query: &str) -> Vec<&'a Event> {
    filter_indexed(events, query)
        .into_iter()
        .map(|hit| hit.event)
        .collect()
}

/// Like [`filter_events`], keeping each hit's source index.
pub fn filter_indexed<'a>(events: &'a [Event], query: &str) -> Vec<FilteredEvent<'a>> {
    let match_all = query.trim().is_empty();
    let needle = query.to_lowercase();
    events
        .iter()
        .enumerate()
        .filter(|(_, event)| match_all || matches(event, needle.as_str()))
        .map(|(index, event)| FilteredEvent { index, event })
        .collect()
}

fn matches(event: &Event, needle: &str) -> bool {
    event.name.to_lowercase().contains(needle)
        || event
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(needle))
}
