//! Half-open interval overlap checks for one day.
//!
//! Two spans conflict when `a.start < b.end && a.end > b.start`. Spans that
//! only touch at an endpoint do not conflict.

use crate::model::day::DayKey;
use crate::model::event::TimeSpan;

/// Returns whether `candidate` intersects any span in `existing` on `day`.
pub fn overlaps<I>(day: DayKey, candidate: TimeSpan, existing: I) -> bool
where
    I: IntoIterator<Item = TimeSpan>,
{
    first_conflict(day, candidate, existing).is_some()
}

/// Returns the position (in iteration order) of the first span that
/// intersects `candidate`.
pub fn first_conflict<I>(day: DayKey, candidate: TimeSpan, existing: I) -> Option<usize>
where
    I: IntoIterator<Item = TimeSpan>,
{
    let candidate_start = day.at(candidate.start);
    let candidate_end = day.at(candidate.end);

    existing.into_iter().position(|span| {
        candidate_start < day.at(span.end) && candidate_end > day.at(span.start)
    })
}
