// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response classification.
//!
//! The Qwikswitch API signals success and failure with two unrelated JSON
//! envelopes, depending on the endpoint family:
//!
//! | Dialect | Endpoints | Success | Failure |
//! |---|---|---|---|
//! | key management | `keys`, `keys/delete/` | `{"ok": 1, ...}` | `"ok": 0`, `"err"` |
//! | operation | `control`, `state` | `{"success": true, ...}` | `"success": false`, `"error"` |
//!
//! Each dialect has its own function. Callers pick the one matching the
//! endpoint they called. Neither function performs I/O.

use serde_json::{Map, Value};

use crate::error::{DecodeError, Error};
use crate::protocol::HttpExchange;
use crate::response::json_keys;

/// Marker the status endpoint puts in `error` when no device has reported yet.
const NO_DATA_MARKER: &str = "No Data";

/// A JSON object body.
pub type JsonObject = Map<String, Value>;

/// A response that passed classification.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// The body, unchanged, ready for decoding.
    Body(JsonObject),
    /// The service reported that there is nothing to decode.
    Empty,
}

impl Envelope {
    /// Returns the body, or an empty object for [`Envelope::Empty`].
    #[must_use]
    pub fn into_body(self) -> JsonObject {
        match self {
            Self::Body(body) => body,
            Self::Empty => JsonObject::new(),
        }
    }
}

/// How an operation-dialect `error` containing "No Data" is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoDataPolicy {
    /// "No Data" is a failure like any other `error`.
    Reject,
    /// "No Data" classifies as [`Envelope::Empty`]. Used for status polls.
    Empty,
}

/// Classifies a response from a key-management endpoint.
///
/// Fails with [`Error::Auth`] when:
/// - the status code is not 200,
/// - `ok` is `0` (or `false`),
/// - `err` is present,
/// - `ok` is absent and the body does not carry both `r` and `rw`.
///
/// # Errors
///
/// Returns [`Error::Auth`] for rejected requests and [`Error::Decode`] if the
/// body is not a JSON object.
pub fn classify_key_response(exchange: &HttpExchange) -> Result<JsonObject, Error> {
    if !exchange.is_ok() {
        return Err(auth_failure(exchange));
    }

    let body = parse_body(exchange)?;

    let rejected = match body.get(json_keys::OK) {
        Some(ok) => is_zero(ok),
        None => !has_key_payload(&body),
    };

    if rejected || body.contains_key(json_keys::ERR) {
        return Err(auth_failure(exchange));
    }

    Ok(body)
}

/// Classifies a response from a control or status endpoint.
///
/// Fails with [`Error::Request`] when the status code is not 200, `success`
/// is falsy (`false`, `0` or `null`), or `error` is present. With
/// [`NoDataPolicy::Empty`], an `error` containing "No Data" classifies as
/// [`Envelope::Empty`] instead, unless `success` already failed.
///
/// # Errors
///
/// Returns [`Error::Request`] for failed requests and [`Error::Decode`] if the
/// body is not a JSON object.
pub fn classify_operation_response(
    exchange: &HttpExchange,
    no_data: NoDataPolicy,
) -> Result<Envelope, Error> {
    if !exchange.is_ok() {
        return Err(request_failure(exchange));
    }

    let body = parse_body(exchange)?;

    if body.get(json_keys::SUCCESS).is_some_and(is_falsy) {
        return Err(request_failure(exchange));
    }

    if let Some(error) = body.get(json_keys::ERROR) {
        let is_no_data = error.as_str().is_some_and(|e| e.contains(NO_DATA_MARKER));
        if no_data == NoDataPolicy::Empty && is_no_data {
            tracing::trace!(url = %exchange.url(), "No data reported, returning empty result");
            return Ok(Envelope::Empty);
        }
        return Err(request_failure(exchange));
    }

    Ok(Envelope::Body(body))
}

/// Diagnostic message shared by auth and request failures.
fn failure_message(exchange: &HttpExchange) -> String {
    format!(
        "Failed to call {}. Status code: \"{}\", body: \"{}\"",
        exchange.url(),
        exchange.status(),
        exchange.body()
    )
}

fn auth_failure(exchange: &HttpExchange) -> Error {
    tracing::warn!(url = %exchange.url(), status = exchange.status(), "Key request rejected");
    Error::Auth(failure_message(exchange))
}

fn request_failure(exchange: &HttpExchange) -> Error {
    tracing::warn!(url = %exchange.url(), status = exchange.status(), "Request rejected");
    Error::Request(failure_message(exchange))
}

/// Parses the body as a JSON object. An empty body is an empty object.
fn parse_body(exchange: &HttpExchange) -> Result<JsonObject, Error> {
    let text = exchange.body().trim();
    if text.is_empty() {
        return Ok(JsonObject::new());
    }

    match serde_json::from_str::<Value>(text).map_err(DecodeError::Json)? {
        Value::Object(body) => Ok(body),
        _ => Err(DecodeError::NotAnObject(text.to_string()).into()),
    }
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Bool(b) => !b,
        _ => false,
    }
}

fn is_falsy(value: &Value) -> bool {
    value.is_null() || is_zero(value)
}

fn has_key_payload(body: &JsonObject) -> bool {
    body.get(json_keys::READ_KEY).is_some_and(Value::is_string)
        && body
            .get(json_keys::READ_WRITE_KEY)
            .is_some_and(Value::is_string)
}
