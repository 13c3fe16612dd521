//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `dayplanner_core` linkage without the presentation shell.
//! - Replay a short scheduling scenario with deterministic output.

use dayplanner_core::model::event::time_of_day;
use dayplanner_core::{CalendarSession, CoreConfig, DayKey, Event, EventDraft, EventRepository};
use std::process::ExitCode;

const DEMO_DAY: &str = "2024-06-01";

fn main() -> ExitCode {
    println!("dayplanner_core ping={}", dayplanner_core::ping());
    println!("dayplanner_core version={}", dayplanner_core::core_version());

    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = dayplanner_core::init_from_config(&config) {
        eprintln!("logging error: {err}");
        return ExitCode::FAILURE;
    }

    let day_arg = std::env::args().nth(1);
    let mut session = CalendarSession::new();
    let day = match session.select_day_str(day_arg.as_deref().unwrap_or(DEMO_DAY)) {
        Ok(day) => day,
        Err(err) => {
            eprintln!("{}", err.user_message());
            return ExitCode::FAILURE;
        }
    };

    let drafts = [
        EventDraft::new("Standup", "09:00", "09:30"),
        EventDraft::new("Design review", "09:15", "09:45"),
        EventDraft::new("Design review", "09:30", "10:00"),
    ];
    for draft in drafts {
        let draft = draft.with_category(config.default_category);
        match session.save_event(day, &draft) {
            Ok(event) => println!("saved {} {}", event.name, span_label(&event)),
            Err(err) => println!("rejected {}: {}", draft.name, err.user_message()),
        }
    }

    print_day(&session, day);
    ExitCode::SUCCESS
}

fn print_day(session: &CalendarSession, day: DayKey) {
    let events = session.repository().events(day);
    println!("{day}: {} event(s)", events.len());
    for (index, event) in events.iter().enumerate() {
        println!(
            "  #{index} {} {} [{}]",
            event.name,
            span_label(event),
            event.category
        );
    }
}

/// `HH:MM-HH:MM`, the same clock format the editor uses.
fn span_label(event: &Event) -> String {
    format!(
        "{}-{}",
        event.start.format(time_of_day::FORMAT),
        event.end.format(time_of_day::FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::span_label;
    use dayplanner_core::EventDraft;

    #[test]
    fn span_label_uses_hours_and_minutes_only() {
        let event = EventDraft::new("Standup", "09:00", "09:30:00")
            .validate()
            .unwrap();
        assert_eq!(span_label(&event), "09:00-09:30");
    }
}
