mod common;

use std::sync::Arc;

use citytime::config::Settings;
use citytime::core::Slot;
use citytime::core::index::LocationIndex;
use citytime::core::scheduler::Scheduler;
use citytime::core::search::{MAX_SUGGESTIONS, SEARCH_DEBOUNCE_MS, SearchPipeline};
use citytime::core::session::Session;
use citytime::core::validation::FIELD_LOCATION1;
use common::{d, t, test_index, winter_session};

#[test]
fn test_index_drops_unresolvable_timezones() {
    let index = test_index();
    // "Atlantis" has a bogus zone and "Limbo" none at all; both are gone.
    assert_eq!(index.len(), 5);
    assert!(index.find_by_name("Atlantis").is_none());
    assert!(index.find_by_name("Limbo").is_none());
}

#[test]
fn test_search_matches_ascii_form() {
    let index = test_index();
    let matches = index.search("zurich", 10);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].name, "Zürich");
    // the display form matches too
    assert_eq!(index.search("zürich", 10).len(), 1);
}

#[test]
fn test_suggestions_appear_only_after_quiet_period() {
    let mut session = winter_session();

    session.keystroke(FIELD_LOCATION1, "to");
    session.advance(100);
    assert!(session.suggestions(Slot::One).is_empty());

    // A newer keystroke supersedes the pending query and restarts the clock.
    session.keystroke(FIELD_LOCATION1, "tok");
    session.advance(SEARCH_DEBOUNCE_MS - 1);
    assert!(session.suggestions(Slot::One).is_empty());

    session.advance(1);
    let names: Vec<_> = session
        .suggestions(Slot::One)
        .iter()
        .map(|l| l.name.clone())
        .collect();
    assert_eq!(names, vec!["Tokyo".to_string()]);
}

#[test]
fn test_result_list_is_replaced_atomically() {
    let mut session = winter_session();

    session.keystroke(FIELD_LOCATION1, "tok");
    session.advance(SEARCH_DEBOUNCE_MS);
    assert_eq!(session.suggestions(Slot::One).len(), 1);

    session.keystroke(FIELD_LOCATION1, "lond");
    session.advance(SEARCH_DEBOUNCE_MS);
    let names: Vec<_> = session
        .suggestions(Slot::One)
        .iter()
        .map(|l| l.name.clone())
        .collect();
    assert_eq!(names, vec!["London".to_string()]);
}

#[test]
fn test_empty_query_yields_no_results() {
    let mut session = winter_session();

    session.keystroke(FIELD_LOCATION1, "tok");
    session.advance(SEARCH_DEBOUNCE_MS);
    assert!(!session.suggestions(Slot::One).is_empty());

    session.keystroke(FIELD_LOCATION1, "");
    session.advance(SEARCH_DEBOUNCE_MS);
    assert!(session.suggestions(Slot::One).is_empty());
}

#[test]
fn test_results_are_capped() {
    let records: Vec<String> = (0..15)
        .map(|i| {
            format!(
                r#"{{ "city": "Testville {i}", "city_ascii": "Testville {i}", "country": "Testland", "timezone": "Europe/London" }}"#
            )
        })
        .collect();
    let json = format!("[{}]", records.join(","));
    let index = Arc::new(LocationIndex::from_json(&json).unwrap());
    assert_eq!(index.len(), 15);

    let mut session = Session::with_start(index, Settings::default(), d(2025, 1, 15), t(9, 30));
    session.keystroke(FIELD_LOCATION1, "testville");
    session.advance(SEARCH_DEBOUNCE_MS);
    assert_eq!(session.suggestions(Slot::One).len(), MAX_SUGGESTIONS);
}

#[test]
fn test_query_equal_to_selected_canonical_is_suppressed() {
    let index = test_index();
    let mut pipeline = SearchPipeline::new();
    let mut sched = Scheduler::new();

    // Without a selection the query finds Tokyo.
    pipeline.refresh(Slot::One, "Tokyo", None, &index);
    assert_eq!(pipeline.results(Slot::One).len(), 1);

    // With the selection's own text as the query, the list stays empty so
    // the dropdown cannot reopen right after a pick round-trips.
    pipeline.refresh(Slot::One, "Tokyo", Some("Tokyo"), &index);
    assert!(pipeline.results(Slot::One).is_empty());

    pipeline.clear(Slot::One, &mut sched);
    assert!(pipeline.results(Slot::One).is_empty());
}

#[test]
fn test_choosing_a_suggestion_commits_programmatically() {
    let mut session = winter_session();

    session.focus_gained(FIELD_LOCATION1);
    session.keystroke(FIELD_LOCATION1, "tok");
    session.advance(SEARCH_DEBOUNCE_MS);

    let picked = session.suggestions(Slot::One)[0].id;
    let journal_before = session.engine().commit_log().len();
    session.choose_suggestion(Slot::One, picked);

    assert_eq!(session.field_text(FIELD_LOCATION1), Some("Tokyo, Japan"));
    assert_eq!(session.committed(FIELD_LOCATION1), Some("Tokyo, Japan"));
    assert_eq!(session.selected(Slot::One).unwrap().name, "Tokyo");
    assert!(session.suggestions(Slot::One).is_empty());
    // the programmatic path bypasses the commit procedure entirely
    assert_eq!(session.engine().commit_log().len(), journal_before);

    // typing the canonical text back produces no dropdown
    session.keystroke(FIELD_LOCATION1, "Tokyo, Japan");
    session.advance(SEARCH_DEBOUNCE_MS);
    assert!(session.suggestions(Slot::One).is_empty());
}
