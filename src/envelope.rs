//! Request bodies and response envelopes of the Zont API.

use serde_json::{json, Value};

use crate::constants::{DEFAULT_DATA_TYPES, STATUS_FORBIDDEN, STATUS_INTERNAL, STATUS_NOT_FOUND};
use crate::error::ApiError;
use crate::value::{is_truthy, to_text};

/// Verify the `ok` flag of an API response
///
/// # Errors
/// When `ok` is not set: the `error` field (or `"<action> failed"`) with status 403
/// for `auth_failed`, 404 for `no_such_device`, 500 otherwise.
pub fn check_response(result: &Value, action: &str) -> Result<(), ApiError> {
    if is_truthy(result.get("ok")) {
        return Ok(());
    }

    let error = match result.get("error") {
        None | Some(Value::Null) => format!("{action} failed"),
        Some(other) => to_text(other),
    };
    let status_code = match error.as_str() {
        "auth_failed" => STATUS_FORBIDDEN,
        "no_such_device" => STATUS_NOT_FOUND,
        _ => STATUS_INTERNAL,
    };

    Err(ApiError::new(error, status_code))
}

/// Body of a `/load_data` request for one device over `[from, to]` (UNIX seconds)
///
/// An empty `data_types` selects [`DEFAULT_DATA_TYPES`].
#[must_use]
pub fn load_data_request(device_id: i64, data_types: &[&str], interval: (i64, i64)) -> Value {
    let data_types: Vec<&str> = if data_types.is_empty() {
        DEFAULT_DATA_TYPES.to_vec()
    } else {
        data_types.to_vec()
    };

    json!({
        "requests": [{
            "device_id": device_id,
            "data_types": data_types,
            "mintime": interval.0,
            "maxtime": interval.1,
        }]
    })
}

/// Extract the per-device response from a `/load_data` result
///
/// The returned object maps each data type to its sensors' delta-time arrays.
/// Server timings are stripped.
///
/// # Errors
/// * 404 "no data found" - no responses, or the first one is for another device
/// * 500 - the device response is not `ok`
pub fn extract_load_data(result: Value, device_id: i64) -> Result<Value, ApiError> {
    let no_data = || ApiError::new("no data found", STATUS_NOT_FOUND);

    let mut response = match result {
        Value::Object(mut root) => match root.remove("responses") {
            Some(Value::Array(responses)) => responses.into_iter().next(),
            _ => None,
        },
        _ => None,
    }
    .ok_or_else(no_data)?;

    if response.get("device_id").and_then(Value::as_i64) != Some(device_id) {
        return Err(no_data());
    }

    if !is_truthy(response.get("ok")) {
        let error = response
            .get("error")
            .filter(|e| !e.is_null())
            .map_or_else(|| "load data failed".to_owned(), to_text);
        return Err(ApiError::internal(error));
    }

    if let Some(fields) = response.as_object_mut() {
        fields.remove("timings");
    }

    Ok(response)
}
