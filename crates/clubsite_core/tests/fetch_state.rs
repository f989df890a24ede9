use std::collections::BTreeMap;

use clubsite_core::{ErrorDetail, FetchState, FetchStatus};
use serde_json::json;

#[test]
fn begin_clears_the_previous_error() {
    let mut state = FetchState::new();
    state.fail(ErrorDetail::generic());

    state.begin();

    assert_eq!(state.status(), FetchStatus::Loading);
    assert_eq!(state.error(), None);
}

#[test]
fn success_and_error_are_mutually_exclusive() {
    let mut state = FetchState::new();

    state.begin();
    state.succeed(json!({"ok": true}));
    assert!(state.data().is_some());
    assert!(state.error().is_none());

    state.begin();
    state.fail(ErrorDetail::generic());
    assert_eq!(state.status(), FetchStatus::Failed);
    assert!(state.error().is_some());
    // Data survives as stale so the page keeps its last good render.
    assert!(state.data().is_some());
}

#[test]
fn validation_body_takes_first_array_element() {
    let detail = ErrorDetail::from_body(&json!({"phone": ["too short", "invalid"]}));

    let mut expected = BTreeMap::new();
    expected.insert("phone".to_string(), "too short".to_string());
    assert_eq!(detail, ErrorDetail::Fields(expected));
}

#[test]
fn mixed_validation_body_keeps_plain_strings() {
    let detail = ErrorDetail::from_body(&json!({
        "name": ["This field is required."],
        "detail": "No Article matches the given query",
    }));

    assert_eq!(detail.field("name"), Some("This field is required."));
    assert_eq!(
        detail.detail_message(),
        Some("No Article matches the given query")
    );
}

#[test]
fn scalar_bodies_become_messages() {
    assert_eq!(
        ErrorDetail::from_body(&json!("throttled")),
        ErrorDetail::Message("throttled".to_string())
    );
    assert_eq!(
        ErrorDetail::from_body(&json!(429)),
        ErrorDetail::Message("429".to_string())
    );
    assert_eq!(ErrorDetail::from_body(&json!(null)), ErrorDetail::generic());
}

#[test]
fn empty_field_array_yields_empty_message() {
    let detail = ErrorDetail::from_body(&json!({"name": []}));

    assert_eq!(detail.field("name"), Some(""));
}
