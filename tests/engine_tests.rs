mod common;

use citytime::core::validation::{
    CommitOutcome, FIELD_LOCATION1, FIELD_TIME, ValidationEngine,
};
use common::winter_session;

const NY: &str = "New York, United States";
const LONDON: &str = "London, United Kingdom";
const TOKYO: &str = "Tokyo, Japan";

#[test]
fn test_register_is_idempotent() {
    let mut engine = ValidationEngine::new();
    engine.register("time", "12:00", None);
    let state = engine.register("time", "99:99", None);
    assert_eq!(state.current_value, "12:00");
    assert_eq!(state.last_valid, "12:00");
    assert!(!state.needs_validation);
}

#[test]
fn test_set_field_value_round_trip() {
    let mut engine = ValidationEngine::new();
    engine.register("time", "", None);
    engine.set_field_value("time", "09:30");

    let state = engine.field("time").unwrap();
    assert_eq!(state.current_value, "09:30");
    assert_eq!(state.last_valid, "09:30");
    assert!(!state.needs_validation);
}

#[test]
fn test_value_change_marks_needs_validation_without_committing() {
    let mut engine = ValidationEngine::new();
    engine.register("time", "09:30", None);
    engine.set_value("time", "10:45");

    let state = engine.field("time").unwrap();
    assert_eq!(state.current_value, "10:45");
    assert_eq!(state.last_valid, "09:30");
    assert!(state.needs_validation);
}

#[test]
fn test_typing_back_the_committed_value_clears_the_flag() {
    let mut engine = ValidationEngine::new();
    engine.register("time", "09:30", None);
    engine.set_value("time", "10:45");
    engine.set_value("time", "09:30");
    assert!(!engine.field("time").unwrap().needs_validation);
}

#[test]
fn test_commit_promotes_valid_value() {
    let mut engine = ValidationEngine::new();
    engine.register("time", "09:30", None);
    engine.set_value("time", "10:45");

    assert_eq!(engine.commit_field("time"), CommitOutcome::Committed);
    let state = engine.field("time").unwrap();
    assert_eq!(state.current_value, "10:45");
    assert_eq!(state.last_valid, "10:45");
    assert!(!state.needs_validation);
}

#[test]
fn test_commit_reverts_invalid_value() {
    // default rule for generic fields: non-empty
    let mut engine = ValidationEngine::new();
    engine.register("time", "09:30", None);
    engine.set_value("time", "");

    assert_eq!(engine.commit_field("time"), CommitOutcome::Reverted);
    let state = engine.field("time").unwrap();
    assert_eq!(state.current_value, "09:30");
    assert_eq!(state.last_valid, "09:30");
    assert!(!state.needs_validation);
}

#[test]
fn test_commit_is_a_noop_without_pending_changes() {
    let mut engine = ValidationEngine::new();
    engine.register("time", "09:30", None);
    assert_eq!(engine.commit_field("time"), CommitOutcome::Unchanged);
}

#[test]
fn test_default_location_rule_requires_city_and_country() {
    let mut engine = ValidationEngine::new();
    engine.register("location1", "Rome, Italy", None);

    for bad in ["", "Rome", "Rome,", ", Italy", "   ,   "] {
        engine.set_value("location1", bad);
        assert_eq!(
            engine.commit_field("location1"),
            CommitOutcome::Reverted,
            "expected revert for {bad:?}"
        );
        assert_eq!(engine.field("location1").unwrap().current_value, "Rome, Italy");
    }

    engine.set_value("location1", "Oslo, Norway");
    assert_eq!(engine.commit_field("location1"), CommitOutcome::Committed);
}

#[test]
fn test_unregistered_ids_are_noops() {
    let mut engine = ValidationEngine::new();
    engine.set_value("ghost", "x");
    engine.set_field_value("ghost", "x");
    assert_eq!(engine.commit_field("ghost"), CommitOutcome::Unchanged);
    assert!(engine.field("ghost").is_none());
    assert!(engine.commit_log().is_empty());
}

#[test]
fn test_invalid_field_introspection() {
    let mut engine = ValidationEngine::new();
    engine.register("time", "09:30", None);
    engine.register("location1", "Rome, Italy", None);

    engine.set_value("location1", "nonsense");
    assert_eq!(engine.invalid_field_ids(), vec!["location1".to_string()]);

    assert!(!engine.has_invalid_focused_field());
    engine.begin_focus("location1");
    assert!(engine.has_invalid_focused_field());
}

#[test]
fn test_commit_all_judges_every_field() {
    let mut engine = ValidationEngine::new();
    engine.register("time", "09:30", None);
    engine.register("location1", "Rome, Italy", None);
    engine.set_value("time", "10:00");
    engine.set_value("location1", "nonsense");

    engine.commit_all();

    assert_eq!(engine.field("time").unwrap().last_valid, "10:00");
    assert_eq!(engine.field("location1").unwrap().current_value, "Rome, Italy");
    assert!(engine.invalid_field_ids().is_empty());
}

// ---------------------------------------------------------------------------
// Focus protocol, driven through a full session
// ---------------------------------------------------------------------------

#[test]
fn test_typed_invalid_then_blur_reverts() {
    let mut session = winter_session();

    session.focus_gained(FIELD_LOCATION1);
    session.keystroke(FIELD_LOCATION1, "Atlantis, Nowhere");
    session.focus_lost(FIELD_LOCATION1);

    assert_eq!(session.field_text(FIELD_LOCATION1), Some(NY));
    assert_eq!(session.committed(FIELD_LOCATION1), Some(NY));
    assert!(!session.engine().field(FIELD_LOCATION1).unwrap().needs_validation);
    assert_eq!(session.selected(citytime::core::Slot::One).unwrap().name, "New York");
}

#[test]
fn test_typed_valid_then_blur_commits_and_selects() {
    let mut session = winter_session();

    session.focus_gained(FIELD_LOCATION1);
    session.keystroke(FIELD_LOCATION1, TOKYO);
    session.focus_lost(FIELD_LOCATION1);

    assert_eq!(session.committed(FIELD_LOCATION1), Some(TOKYO));
    assert_eq!(session.selected(citytime::core::Slot::One).unwrap().name, "Tokyo");
    assert_eq!(session.settings().location1.as_ref().unwrap().name, "Tokyo");
}

#[test]
fn test_focus_change_commits_previous_field_first() {
    let mut session = winter_session();

    session.focus_gained(FIELD_LOCATION1);
    session.keystroke(FIELD_LOCATION1, "garbage");

    // Tabbing into the time field must revert location1 on the next tick,
    // before anything else touches the newly focused field.
    session.focus_gained(FIELD_TIME);

    let log = session.engine().commit_log();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].field, FIELD_LOCATION1);
    assert_eq!(log[0].outcome, CommitOutcome::Reverted);
    assert_eq!(session.field_text(FIELD_LOCATION1), Some(NY));

    // The newly focused field was untouched by the transition.
    assert_eq!(session.field_text(FIELD_TIME), Some("09:30"));
    assert_eq!(session.engine().focused_field(), Some(FIELD_TIME));

    // Later activity lands after the revert in the journal.
    session.keystroke(FIELD_TIME, "10:00");
    session.focus_lost(FIELD_TIME);
    let log = session.engine().commit_log();
    assert_eq!(log.last().unwrap().field, FIELD_TIME);
    assert_eq!(log.last().unwrap().outcome, CommitOutcome::Committed);
    assert!(log.last().unwrap().seq > log[0].seq);
}

#[test]
fn test_refocusing_the_same_field_does_not_commit_it() {
    let mut session = winter_session();

    session.focus_gained(FIELD_LOCATION1);
    session.keystroke(FIELD_LOCATION1, "garbage");
    session.focus_gained(FIELD_LOCATION1);

    // Still tentative: no judgment happened.
    assert_eq!(session.field_text(FIELD_LOCATION1), Some("garbage"));
    assert!(session.engine().commit_log().is_empty());
}

#[test]
fn test_committed_location_survives_unrelated_blur() {
    let mut session = winter_session();

    session.focus_gained(FIELD_LOCATION1);
    session.keystroke(FIELD_LOCATION1, LONDON);
    session.focus_lost(FIELD_LOCATION1);
    session.focus_gained(FIELD_TIME);
    session.focus_lost(FIELD_TIME);

    assert_eq!(session.committed(FIELD_LOCATION1), Some(LONDON));
}
