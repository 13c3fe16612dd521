//! FFI use-case API for the calendar shell.
//!
//! # Responsibility
//! - Expose the calendar session to Dart via FRB sync calls.
//! - Translate core errors into alert-ready messages.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - One process-wide session backs every call; state is lost on exit.
//! - Indices in responses always address the unfiltered per-day sequence.

use dayplanner_core::{
    core_version as core_version_inner, init_from_config, init_logging as init_logging_inner,
    ping as ping_inner, CalendarError, CalendarSession, Category, CoreConfig, DayKey, Event,
    EventDraft, EventId, EventRepository, FilteredEvent,
};
use dayplanner_core::model::event::time_of_day;
use log::warn;
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

static SESSION: Lazy<Mutex<CalendarSession>> = Lazy::new(|| Mutex::new(CalendarSession::new()));
static CONFIG: Lazy<CoreConfig> = Lazy::new(|| {
    CoreConfig::from_env().unwrap_or_else(|err| {
        warn!("event=config_load module=ffi status=error error={}", err);
        CoreConfig::default()
    })
});

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// # Arguments
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Initializes core logging from `DAYPLANNER_*` environment variables.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Returns empty string when logging started or no directory is configured.
/// - Never panics; invalid variables come back as an error message.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging_from_env() -> String {
    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => return err.to_string(),
    };
    match init_from_config(&config) {
        Ok(_) => String::new(),
        Err(err) => err,
    }
}

/// Raw editor form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub name: String,
    /// `HH:MM`; empty when not filled.
    pub start: String,
    /// `HH:MM`; empty when not filled.
    pub end: String,
    /// Empty when not filled.
    pub description: String,
    /// `work|personal|others`; empty selects the configured default.
    pub category: String,
}

/// Event row for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    /// Position in the unfiltered per-day list; pass back for edit/delete.
    pub index: u32,
    /// Stable id; pass back to `edit_event_by_id` / `delete_event_by_id`.
    pub event_id: String,
    pub name: String,
    pub start: String,
    pub end: String,
    pub description: String,
    pub category: String,
}

/// Result envelope for day selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySelectionResponse {
    pub ok: bool,
    /// Canonical `YYYY-MM-DD` key on success.
    pub day: Option<String>,
    pub message: String,
}

/// Result envelope for save/edit/delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventActionResponse {
    pub ok: bool,
    /// Saved, edited or deleted event.
    pub event: Option<EventItem>,
    /// Alert text on failure, short confirmation on success.
    pub message: String,
}

impl EventActionResponse {
    fn success(message: impl Into<String>, event: EventItem) -> Self {
        Self {
            ok: true,
            event: Some(event),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            event: None,
            message: message.into(),
        }
    }
}

/// Result envelope for list display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListResponse {
    pub items: Vec<EventItem>,
    /// Empty-state text when nothing matches.
    pub message: String,
}

/// Marks the picked day as active and returns its canonical key.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - UI-thread safe for current implementation.
/// - Never panics; unparseable text keeps the previous selection.
#[flutter_rust_bridge::frb(sync)]
pub fn select_day(date: String) -> DaySelectionResponse {
    match session().select_day_str(&date) {
        Ok(day) => DaySelectionResponse {
            ok: true,
            day: Some(day.to_string()),
            message: String::new(),
        },
        Err(err) => DaySelectionResponse {
            ok: false,
            day: None,
            message: err.user_message(),
        },
    }
}

/// Returns the active day, or `None` before any selection.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn selected_day() -> Option<String> {
    session().selected_day().map(|day| day.to_string())
}

/// Validates `form` and appends it to `day`.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics; validation and overlap failures return `ok=false` with
///   alert text and leave the day unchanged.
/// - On success the returned item carries the stored id and index.
#[flutter_rust_bridge::frb(sync)]
pub fn save_event(day: String, form: EventForm) -> EventActionResponse {
    let result = parse_request(&day, &form).and_then(|(day, draft)| {
        let mut session = session();
        let saved = session.save_event(day, &draft)?;
        let index = session.repository().position(day, saved.id)?;
        Ok(to_event_item(index, &saved))
    });
    respond("Event saved.", result)
}

/// Validates `form` and replaces the entry at `index` of `day`.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics; `index` addresses the unfiltered per-day list.
/// - The entry keeps its id and position.
#[flutter_rust_bridge::frb(sync)]
pub fn edit_event(day: String, index: u32, form: EventForm) -> EventActionResponse {
    let result = parse_request(&day, &form).and_then(|(day, draft)| {
        let index = index as usize;
        let edited = session().edit_event(day, index, &draft)?;
        Ok(to_event_item(index, &edited))
    });
    respond("Event updated.", result)
}

/// Removes the entry at `index` of `day`.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics; an unknown index returns `ok=false`.
/// - Later entries shift down by one.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_event(day: String, index: u32) -> EventActionResponse {
    let result = parse_day(&day).and_then(|day| {
        let index = index as usize;
        let removed = session().delete_event(day, index)?;
        Ok(to_event_item(index, &removed))
    });
    respond("Event deleted.", result)
}

/// Validates `form` and replaces the event with stable `event_id` on `day`.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics; malformed or unknown ids return `ok=false`.
/// - The returned item carries the event's current index.
#[flutter_rust_bridge::frb(sync)]
pub fn edit_event_by_id(day: String, event_id: String, form: EventForm) -> EventActionResponse {
    let Some(id) = parse_event_id(&event_id) else {
        return EventActionResponse::failure(unknown_event_id_message(&event_id));
    };
    let result = parse_request(&day, &form).and_then(|(day, draft)| {
        let mut session = session();
        let edited = session.edit_event_by_id(day, id, &draft)?;
        let index = session.repository().position(day, id)?;
        Ok(to_event_item(index, &edited))
    });
    respond("Event updated.", result)
}

/// Removes the event with stable `event_id` from `day`.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics; malformed or unknown ids return `ok=false`.
/// - The returned item carries the index the event had before removal.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_event_by_id(day: String, event_id: String) -> EventActionResponse {
    let Some(id) = parse_event_id(&event_id) else {
        return EventActionResponse::failure(unknown_event_id_message(&event_id));
    };
    let result = parse_day(&day).and_then(|day| {
        let mut session = session();
        let index = session.repository().position(day, id)?;
        let removed = session.delete_event(day, index)?;
        Ok(to_event_item(index, &removed))
    });
    respond("Event deleted.", result)
}

/// Lists events of `day` whose name or description contains `query`.
///
/// # FFI contract
/// - Sync call, in-memory execution.
/// - Never panics; a bad day yields an empty list with a message.
/// - Item indices address the unfiltered per-day list.
#[flutter_rust_bridge::frb(sync)]
pub fn events_for_display(day: String, query: String) -> EventListResponse {
    let day = match parse_day(&day) {
        Ok(day) => day,
        Err(err) => {
            return EventListResponse {
                items: Vec::new(),
                message: err.user_message(),
            }
        }
    };

    let session = session();
    let items = session
        .events_for_display_indexed(day, &query)
        .into_iter()
        .map(|FilteredEvent { index, event }| to_event_item(index, event))
        .collect::<Vec<_>>();
    let message = if items.is_empty() {
        "No events match your search.".to_string()
    } else {
        String::new()
    };
    EventListResponse { items, message }
}

fn session() -> MutexGuard<'static, CalendarSession> {
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

fn parse_day(day: &str) -> Result<DayKey, CalendarError> {
    Ok(DayKey::parse(day)?)
}

fn parse_event_id(event_id: &str) -> Option<EventId> {
    Uuid::parse_str(event_id.trim())
        .inspect_err(|err| {
            warn!("event=event_id_parse module=ffi status=error error={}", err);
        })
        .ok()
}

fn unknown_event_id_message(event_id: &str) -> String {
    format!("Unknown event id `{}`.", event_id.trim())
}

fn parse_request(day: &str, form: &EventForm) -> Result<(DayKey, EventDraft), CalendarError> {
    let day = parse_day(day)?;
    let category = match form.category.trim() {
        "" => CONFIG.default_category,
        raw => raw.parse::<Category>()?,
    };
    let draft = EventDraft {
        name: form.name.clone(),
        start: Some(form.start.clone()),
        end: Some(form.end.clone()),
        description: Some(form.description.clone()).filter(|text| !text.is_empty()),
        category,
    };
    Ok((day, draft))
}

fn respond(success_message: &str, result: Result<EventItem, CalendarError>) -> EventActionResponse {
    match result {
        Ok(item) => EventActionResponse::success(success_message, item),
        Err(err) => EventActionResponse::failure(err.user_message()),
    }
}

fn to_event_item(index: usize, event: &Event) -> EventItem {
    EventItem {
        index: u32::try_from(index).unwrap_or(u32::MAX),
        event_id: event.id.to_string(),
        name: event.name.clone(),
        start: event.start.format(time_of_day::FORMAT).to_string(),
        end: event.end.format(time_of_day::FORMAT).to_string(),
        description: event.description.clone().unwrap_or_default(),
        category: event.category.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, delete_event, delete_event_by_id, edit_event, edit_event_by_id,
        events_for_display, init_logging, ping, save_event, select_day, selected_day, EventForm,
    };

    fn form(name: &str, start: &str, end: &str) -> EventForm {
        EventForm {
            name: name.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            ..EventForm::default()
        }
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn select_day_returns_canonical_key() {
        let response = select_day("2031/03/04".to_string());
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.day.as_deref(), Some("2031-03-04"));
        assert!(selected_day().is_some());

        let response = select_day("not a day".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("not a day"));
    }

    #[test]
    fn save_edit_delete_flow_reports_alert_messages() {
        let day = "2031-01-10".to_string();

        let saved = save_event(day.clone(), form("Standup", "09:00", "09:30"));
        assert!(saved.ok, "{}", saved.message);
        let saved_item = saved.event.expect("saved event");
        assert_eq!(saved_item.index, 0);
        assert_eq!(saved_item.category, "work");

        let overlap = save_event(day.clone(), form("Clash", "09:15", "09:45"));
        assert!(!overlap.ok);
        assert_eq!(
            overlap.message,
            "This event overlaps with an existing event. Please adjust the time."
        );

        let adjacent = save_event(day.clone(), form("Next", "09:30", "10:00"));
        assert!(adjacent.ok, "{}", adjacent.message);
        assert_eq!(adjacent.event.expect("adjacent event").index, 1);

        let edited = edit_event(day.clone(), 0, form("Standup", "08:45", "09:30"));
        assert!(edited.ok, "{}", edited.message);
        assert_eq!(edited.event.expect("edited event").event_id, saved_item.event_id);

        let deleted = delete_event(day.clone(), 0);
        assert!(deleted.ok, "{}", deleted.message);
        let listed = events_for_display(day.clone(), String::new());
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].name, "Next");
        assert_eq!(listed.items[0].index, 0);

        let missing = delete_event(day, 3);
        assert!(!missing.ok);
    }

    #[test]
    fn save_rejects_bad_form_values() {
        let day = "2031-02-20".to_string();
        let blank_name = save_event(day.clone(), form(" ", "09:00", "10:00"));
        assert_eq!(blank_name.message, "Event name is required.");

        let no_times = save_event(day.clone(), form("x", "", ""));
        assert_eq!(no_times.message, "Start time and end time are required.");

        let mut bad_category = form("x", "09:00", "10:00");
        bad_category.category = "hobby".to_string();
        let response = save_event(day.clone(), bad_category);
        assert!(!response.ok);
        assert!(response.message.contains("hobby"));

        assert!(events_for_display(day, String::new()).items.is_empty());
    }

    #[test]
    fn filtered_list_keeps_unfiltered_indices() {
        let day = "2031-05-05".to_string();
        assert!(save_event(day.clone(), form("Gym", "07:00", "08:00")).ok);
        let mut meeting = form("Team meeting", "10:00", "11:00");
        meeting.description = "roadmap".to_string();
        meeting.category = "Personal".to_string();
        assert!(save_event(day.clone(), meeting).ok);

        let listed = events_for_display(day.clone(), "MEET".to_string());
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].index, 1);
        assert_eq!(listed.items[0].category, "personal");
        assert_eq!(listed.items[0].description, "roadmap");

        let empty = events_for_display(day, "zzz".to_string());
        assert!(empty.items.is_empty());
        assert_eq!(empty.message, "No events match your search.");
    }

    #[test]
    fn id_addressed_edit_and_delete_follow_the_listed_event_id() {
        let day = "2031-07-07".to_string();
        let first = save_event(day.clone(), form("Gym", "07:00", "08:00"))
            .event
            .expect("first event");
        let second = save_event(day.clone(), form("Review", "10:00", "11:00"))
            .event
            .expect("second event");
        assert_ne!(first.event_id, second.event_id);

        let deleted = delete_event_by_id(day.clone(), first.event_id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert_eq!(deleted.event.expect("deleted event").index, 0);

        let edited = edit_event_by_id(
            day.clone(),
            second.event_id.clone(),
            form("Review", "12:00", "13:00"),
        );
        assert!(edited.ok, "{}", edited.message);
        let edited = edited.event.expect("edited event");
        assert_eq!(edited.index, 0);
        assert_eq!(edited.event_id, second.event_id);
        assert_eq!(edited.start, "12:00");

        let gone = delete_event_by_id(day.clone(), first.event_id);
        assert!(!gone.ok);
        assert_eq!(gone.message, "The selected event no longer exists.");

        let malformed = edit_event_by_id(
            day.clone(),
            "not-an-id".to_string(),
            form("x", "14:00", "15:00"),
        );
        assert!(!malformed.ok);
        assert!(malformed.message.contains("not-an-id"));

        let listed = events_for_display(day, String::new());
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].event_id, second.event_id);
    }
}
