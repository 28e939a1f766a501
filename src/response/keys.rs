// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! API key response parsing.

use serde::Deserialize;
use serde_json::Value;

use crate::error::DecodeError;
use crate::response::JsonObject;

/// API keys issued for an account.
///
/// The read-write key authenticates every control and status request. The
/// read key is informational.
///
/// The service answers key issuance with JSON like:
/// `{"ok": 1, "r": "aaaa", "rw": "1111"}`
///
/// # Examples
///
/// ```
/// use qwikswitch_lib::CredentialPair;
///
/// let keys = CredentialPair::new("aaaa", "1111");
/// assert_eq!(keys.read_key(), "aaaa");
/// assert_eq!(keys.read_write_key(), "1111");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct CredentialPair {
    #[serde(rename = "r")]
    read_key: String,
    #[serde(rename = "rw")]
    read_write_key: String,
}

impl CredentialPair {
    /// Creates a credential pair from keys issued earlier.
    #[must_use]
    pub fn new(read_key: impl Into<String>, read_write_key: impl Into<String>) -> Self {
        Self {
            read_key: read_key.into(),
            read_write_key: read_write_key.into(),
        }
    }

    /// Decodes the `r` and `rw` fields of a classified key response.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if either key is missing or not a string.
    pub fn from_body(body: JsonObject) -> Result<Self, DecodeError> {
        serde_json::from_value(Value::Object(body)).map_err(DecodeError::Json)
    }

    /// Returns the key for read-only operations.
    #[must_use]
    pub fn read_key(&self) -> &str {
        &self.read_key
    }

    /// Returns the key for read-write operations (device control).
    ///
    /// This key can also be used for read access.
    #[must_use]
    pub fn read_write_key(&self) -> &str {
        &self.read_write_key
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: &Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn decode_issued_keys() {
        let body = object(&json!({"ok": 1, "r": "aaaa", "rw": "1111"}));
        let keys = CredentialPair::from_body(body).unwrap();
        assert_eq!(keys, CredentialPair::new("aaaa", "1111"));
    }

    #[test]
    fn decode_missing_read_write_key_fails() {
        let body = object(&json!({"ok": 1, "r": "aaaa"}));
        assert!(matches!(
            CredentialPair::from_body(body),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn decode_null_keys_fails() {
        let body = object(&json!({"ok": 1, "r": null, "rw": null}));
        assert!(CredentialPair::from_body(body).is_err());
    }

    #[test]
    fn decode_twice_gives_equal_values() {
        let body = object(&json!({"ok": 1, "r": "aaaa", "rw": "1111"}));
        let first = CredentialPair::from_body(body.clone()).unwrap();
        let second = CredentialPair::from_body(body).unwrap();
        assert_eq!(first, second);
    }
}
