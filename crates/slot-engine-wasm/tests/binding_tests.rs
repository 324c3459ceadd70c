//! Native tests for the JSON boundary used by the WASM exports.

use serde_json::Value;
use slot_engine::SlotError;
use slot_engine_wasm::available_slots_json;

const DATA: &str = r#"{
    "openingTimes": { "timezone": "UTC", "schedule": [
        {"day": "monday"}, {"day": "tuesday"}, {"day": "wednesday"},
        {"day": "thursday"}, {"day": "friday"},
        {"day": "saturday", "isOpen": false}, {"day": "sunday", "isOpen": false}
    ]},
    "services": { "consult": { "duration": 60 } }
}"#;

const NOW: &str = "2026-03-10T08:00:00Z";

#[test]
fn computes_slots_from_json() {
    let out = available_slots_json(DATA, r#"{"date":"2026-03-16","serviceId":"consult"}"#, NOW).unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(json["serviceId"], "consult");
    assert_eq!(json["slots"].as_array().unwrap().len(), 15);
}

#[test]
fn accepts_team_member_alias() {
    let out = available_slots_json(
        DATA,
        r#"{"date":"2026-03-16","serviceId":"consult","teamMemberId":"ghost"}"#,
        NOW,
    )
    .unwrap_err();
    assert_eq!(out.status_code(), 404);
}

#[test]
fn missing_service_id_is_a_validation_error() {
    let err = available_slots_json(DATA, r#"{"date":"2026-03-16"}"#, NOW).unwrap_err();
    assert!(matches!(err, SlotError::Validation(_)));
}

#[test]
fn bad_now_is_a_validation_error() {
    let err = available_slots_json(DATA, r#"{"date":"2026-03-16","serviceId":"consult"}"#, "soon").unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[test]
fn bad_data_is_an_internal_error() {
    let err = available_slots_json("{", r#"{"date":"2026-03-16","serviceId":"consult"}"#, NOW).unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.public_message(), "Internal server error");
}
