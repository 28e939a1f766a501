// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device control response parsing.

use serde::Deserialize;
use serde_json::Value;

use crate::error::DecodeError;
use crate::response::JsonObject;

/// Result of a device control request.
///
/// The level is the one acknowledged by the service, which may differ from
/// the level requested.
///
/// The service answers with JSON like:
/// `{"success": true, "device": "@112331", "level": 50}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ControlConfirmation {
    #[serde(rename = "device")]
    device_id: String,
    level: u8,
}

impl ControlConfirmation {
    /// Decodes the `device` and `level` fields of a classified response.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if a field is missing or has the wrong type.
    pub fn from_body(body: JsonObject) -> Result<Self, DecodeError> {
        serde_json::from_value(Value::Object(body)).map_err(DecodeError::Json)
    }

    /// Returns the identifier of the controlled device.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the level the device was set to.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }
}
