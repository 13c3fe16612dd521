use chrono::NaiveTime;
use dayplanner_core::{filter_events, filter_indexed, Category, Event};

fn event(name: &str, description: Option<&str>, hour: u32) -> Event {
    let event = Event::new(
        name,
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
        Category::Personal,
    );
    match description {
        Some(text) => event.with_description(text),
        None => event,
    }
}

fn sample() -> Vec<Event> {
    vec![
        event("Team meeting", Some("weekly planning"), 9),
        event("Dentist", None, 11),
        event("Call mom", Some("Birthday MEETUP plans"), 14),
        event("Groceries", Some(""), 17),
    ]
}

#[test]
fn empty_query_returns_everything_in_order() {
    let events = sample();
    let all = filter_events(&events, "");
    assert_eq!(all.len(), events.len());
    for (filtered, source) in all.iter().zip(events.iter()) {
        assert_eq!(*filtered, source);
    }
    assert_eq!(filter_events(&events, "   ").len(), events.len());
}

#[test]
fn match_is_case_insensitive_over_name_and_description() {
    let events = sample();
    let hits = filter_events(&events, "MEET");
    let names: Vec<&str> = hits.iter().map(|event| event.name.as_str()).collect();
    assert_eq!(names, vec!["Team meeting", "Call mom"]);

    let hits = filter_events(&events, "planning");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Team meeting");
}

#[test]
fn events_without_description_match_on_name_only() {
    let events = sample();
    assert_eq!(filter_events(&events, "dent").len(), 1);
    assert!(filter_events(&events, "nothing like this").is_empty());
}

#[test]
fn indexed_hits_point_into_source_sequence() {
    let events = sample();
    let hits = filter_indexed(&events, "groc");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].index, 3);
    assert_eq!(hits[0].event.id, events[3].id);
}

#[test]
fn surrounding_whitespace_is_part_of_a_non_blank_query() {
    let events = sample();
    assert!(filter_events(&events, "meeting ").is_empty());
    assert_eq!(filter_events(&events, "team ").len(), 1);
    assert_eq!(filter_events(&events, " \t ").len(), events.len());
}
