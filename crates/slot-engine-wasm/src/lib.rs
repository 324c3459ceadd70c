//! WASM bindings for slot-engine.
//!
//! Exposes slot computation to JavaScript via `wasm-bindgen`. All complex types
//! are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use slot_engine::{BusinessSchedule, InMemorySource, SlotError, SlotRequest};
use wasm_bindgen::prelude::*;

/// Error body handed back to JavaScript, mirroring an HTTP error response.
#[derive(Serialize)]
struct ErrorDto {
    error: String,
    status: u16,
}

impl From<&SlotError> for ErrorDto {
    fn from(e: &SlotError) -> Self {
        Self {
            error: e.public_message(),
            status: e.status_code(),
        }
    }
}

fn error_json(e: &SlotError) -> JsValue {
    let body = serde_json::to_string(&ErrorDto::from(e))
        .unwrap_or_else(|_| r#"{"error":"Internal server error","status":500}"#.to_string());
    JsValue::from_str(&body)
}

/// Parse an RFC 3339 instant into `DateTime<Utc>`.
fn parse_now(s: &str) -> Result<DateTime<Utc>, SlotError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SlotError::Validation(format!("Invalid instant '{}': {}", s, e)))
}

/// Compute the slot response as a JSON string. Kept free of `JsValue` so it runs natively.
pub fn available_slots_json(
    data_json: &str,
    request_json: &str,
    now: &str,
) -> Result<String, SlotError> {
    let source = InMemorySource::from_json(data_json)
        .map_err(|e| SlotError::Source(format!("invalid data JSON: {}", e)))?;
    let request: SlotRequest = serde_json::from_str(request_json)
        .map_err(|e| SlotError::Validation(format!("Invalid request JSON: {}", e)))?;
    let now = parse_now(now)?;

    let response = slot_engine::available_slots(&source, &request, now)?;
    serde_json::to_string(&response)
        .map_err(|e| SlotError::Source(format!("serialization error: {}", e)))
}

/// Compute bookable slots.
///
/// `data_json` holds `openingTimes`, `services`, `teamMembers` and `appointments`.
/// `request_json` is `{date, serviceId, staffId?}`. `now` is an RFC 3339 instant.
/// On failure the thrown value is a JSON string `{error, status}`.
#[wasm_bindgen(js_name = "availableSlots")]
pub fn available_slots(
    data_json: &str,
    request_json: &str,
    now: &str,
) -> Result<String, JsValue> {
    available_slots_json(data_json, request_json, now).map_err(|e| error_json(&e))
}

/// The default business schedule as a JSON string.
#[wasm_bindgen(js_name = "defaultSchedule")]
pub fn default_schedule() -> Result<String, JsValue> {
    serde_json::to_string(&BusinessSchedule::default())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
