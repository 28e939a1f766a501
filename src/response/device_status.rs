// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device status response parsing.
//!
//! The status endpoint returns one top-level field per device, keyed by the
//! device id, next to the `success` marker:
//!
//! ```json
//! {
//!     "success": true,
//!     "@11111a": {
//!         "type": "RELAY QS-D-S5",
//!         "hardware": "0x81",
//!         "firmware": "v3.3",
//!         "epoch": 1736018165,
//!         "rssi": "59%",
//!         "value": 0
//!     }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::DecodeError;
use crate::response::envelope::Envelope;
use crate::response::{JsonObject, json_keys};
use crate::types::DeviceClass;

/// Per-device object as sent by the service.
#[derive(Debug, Deserialize)]
struct RawDeviceState {
    #[serde(rename = "type")]
    device_type: String,
    firmware: String,
    epoch: RawEpoch,
    rssi: String,
    value: u8,
    #[serde(default)]
    hardware: Option<String>,
}

/// The service sends `epoch` either as a number or as a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEpoch {
    Seconds(i64),
    Text(String),
}

impl RawEpoch {
    fn seconds(self) -> Result<i64, DecodeError> {
        match self {
            Self::Seconds(seconds) => Ok(seconds),
            Self::Text(text) => text.parse().map_err(|_| DecodeError::InvalidValue {
                field: "epoch".to_string(),
                message: format!("not an integer: {text:?}"),
            }),
        }
    }
}

/// Parses a signal strength such as `"59%"`.
fn parse_rssi(rssi: &str) -> Result<u8, DecodeError> {
    let invalid = |message: String| DecodeError::InvalidValue {
        field: "rssi".to_string(),
        message,
    };

    let digits = rssi
        .strip_suffix('%')
        .ok_or_else(|| invalid(format!("missing '%' suffix: {rssi:?}")))?;

    let percent: u8 = digits
        .parse()
        .map_err(|_| invalid(format!("not a percentage: {rssi:?}")))?;

    if percent > 100 {
        return Err(invalid(format!("{percent} is out of range [0, 100]")));
    }

    Ok(percent)
}

/// Status of a single device, as reported by one status poll.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceStatus {
    device_id: String,
    device_type: String,
    firmware: String,
    hardware: Option<String>,
    epoch: i64,
    rssi: u8,
    value: u8,
}

impl DeviceStatus {
    /// Decodes a single-device record `{"<device id>": {...}}`.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::UnexpectedKeyCount` if the record does not have
    /// exactly one top-level key, and other `DecodeError`s if the nested
    /// object is malformed.
    pub fn from_record(record: JsonObject) -> Result<Self, DecodeError> {
        if record.len() != 1 {
            return Err(DecodeError::UnexpectedKeyCount(record.len()));
        }

        let Some((device_id, state)) = record.into_iter().next() else {
            return Err(DecodeError::UnexpectedKeyCount(0));
        };

        Self::from_entry(device_id, state)
    }

    fn from_entry(device_id: String, state: Value) -> Result<Self, DecodeError> {
        let raw: RawDeviceState = serde_json::from_value(state)?;

        Ok(Self {
            rssi: parse_rssi(&raw.rssi)?,
            epoch: raw.epoch.seconds()?,
            device_id,
            device_type: raw.device_type,
            firmware: raw.firmware,
            hardware: raw.hardware,
            value: raw.value,
        })
    }

    /// Returns the unique identifier of the device.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the device type as reported, e.g. `"RELAY QS-D-S5"`.
    #[must_use]
    pub fn device_type(&self) -> &str {
        &self.device_type
    }

    /// Returns the firmware version.
    #[must_use]
    pub fn firmware(&self) -> &str {
        &self.firmware
    }

    /// Returns the hardware revision, if reported.
    #[must_use]
    pub fn hardware(&self) -> Option<&str> {
        self.hardware.as_deref()
    }

    /// Returns the Unix time of the last status update, in seconds.
    #[must_use]
    pub fn epoch(&self) -> i64 {
        self.epoch
    }

    /// Returns the time of the last status update.
    ///
    /// Returns `None` if the epoch is outside the range `chrono` supports.
    #[must_use]
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.epoch, 0)
    }

    /// Returns the signal strength in percent (0-100).
    #[must_use]
    pub fn rssi(&self) -> u8 {
        self.rssi
    }

    /// Returns the current value: 0 is off, 1-100 is on.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns `true` if the device is on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.value > 0
    }

    /// Returns the device class from the built-in catalog.
    ///
    /// Use [`DeviceCatalog::classify`](crate::types::DeviceCatalog::classify)
    /// with [`device_type`](Self::device_type) for a custom catalog.
    #[must_use]
    pub fn device_class(&self) -> DeviceClass {
        DeviceClass::from_device_type(&self.device_type)
    }
}

/// All device statuses returned by one status poll.
///
/// Statuses keep the order of the fields in the response body. Duplicate
/// device ids are not merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceStatusSnapshot {
    statuses: Vec<DeviceStatus>,
}

impl DeviceStatusSnapshot {
    /// Decodes every device field of a classified status body.
    ///
    /// The `success` marker is skipped. Each other field is decoded with
    /// [`DeviceStatus::from_record`].
    ///
    /// # Errors
    ///
    /// Returns the first `DecodeError` raised by a device record.
    pub fn from_body(body: JsonObject) -> Result<Self, DecodeError> {
        let statuses = body
            .into_iter()
            .filter(|(key, _)| key != json_keys::SUCCESS)
            .map(|(device_id, state)| {
                let mut record = JsonObject::new();
                record.insert(device_id, state);
                DeviceStatus::from_record(record)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { statuses })
    }

    /// Decodes a classified envelope; [`Envelope::Empty`] gives an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first `DecodeError` raised by a device record.
    pub fn from_envelope(envelope: Envelope) -> Result<Self, DecodeError> {
        match envelope {
            Envelope::Body(body) => Self::from_body(body),
            Envelope::Empty => Ok(Self::default()),
        }
    }

    /// Returns the statuses in response order.
    #[must_use]
    pub fn statuses(&self) -> &[DeviceStatus] {
        &self.statuses
    }

    /// Returns the number of statuses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Returns `true` if the poll reported no device.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Iterates over the statuses.
    pub fn iter(&self) -> std::slice::Iter<'_, DeviceStatus> {
        self.statuses.iter()
    }

    /// Returns the first status for `device_id`.
    #[must_use]
    pub fn find(&self, device_id: &str) -> Option<&DeviceStatus> {
        self.statuses.iter().find(|s| s.device_id == device_id)
    }
}

impl IntoIterator for DeviceStatusSnapshot {
    type Item = DeviceStatus;
    type IntoIter = std::vec::IntoIter<DeviceStatus>;

    fn into_iter(self) -> Self::IntoIter {
        self.statuses.into_iter()
    }
}

impl<'a> IntoIterator for &'a DeviceStatusSnapshot {
    type Item = &'a DeviceStatus;
    type IntoIter = std::slice::Iter<'a, DeviceStatus>;

    fn into_iter(self) -> Self::IntoIter {
        self.statuses.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: &Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn device(device_type: &str, epoch: &Value, rssi: &str, value: u8) -> Value {
        json!({
            "type": device_type,
            "hardware": "0x81",
            "firmware": "v3.3",
            "epoch": epoch,
            "rssi": rssi,
            "value": value
        })
    }

    #[test]
    fn decode_single_record() {
        let record = object(&json!({
            "@11111a": device("RELAY QS-D-S5", &json!(1_736_018_165), "59%", 0)
        }));

        let status = DeviceStatus::from_record(record).unwrap();
        assert_eq!(status.device_id(), "@11111a");
        assert_eq!(status.device_type(), "RELAY QS-D-S5");
        assert_eq!(status.firmware(), "v3.3");
        assert_eq!(status.hardware(), Some("0x81"));
        assert_eq!(status.epoch(), 1_736_018_165);
        assert_eq!(status.rssi(), 59);
        assert_eq!(status.value(), 0);
        assert!(!status.is_on());
        assert_eq!(status.device_class(), DeviceClass::Dimmer);
    }

    #[test]
    fn decode_record_with_string_epoch() {
        let record = object(&json!({
            "@11111b": device("RELAY QS-R-S5", &json!("1736018046"), "58%", 100)
        }));

        let status = DeviceStatus::from_record(record).unwrap();
        assert_eq!(status.epoch(), 1_736_018_046);
        assert!(status.is_on());
        assert_eq!(status.device_class(), DeviceClass::Relay);
    }

    #[test]
    fn decode_record_without_hardware() {
        let record = object(&json!({
            "@1": {"type": "X", "firmware": "v1", "epoch": 0, "rssi": "0%", "value": 1}
        }));
        let status = DeviceStatus::from_record(record).unwrap();
        assert_eq!(status.hardware(), None);
        assert_eq!(status.device_class(), DeviceClass::Unknown);
    }

    #[test]
    fn decode_record_with_two_keys_fails() {
        let record = object(&json!({
            "@11111a": device("RELAY QS-D-S5", &json!(1), "59%", 0),
            "@11111b": device("RELAY QS-D-S5", &json!(2), "58%", 0)
        }));

        assert!(matches!(
            DeviceStatus::from_record(record),
            Err(DecodeError::UnexpectedKeyCount(2))
        ));
    }

    #[test]
    fn decode_empty_record_fails() {
        assert!(matches!(
            DeviceStatus::from_record(JsonObject::new()),
            Err(DecodeError::UnexpectedKeyCount(0))
        ));
    }

    #[test]
    fn rssi_requires_percent_suffix() {
        assert_eq!(parse_rssi("59%").unwrap(), 59);
        assert_eq!(parse_rssi("100%").unwrap(), 100);
        assert!(parse_rssi("59").is_err());
        assert!(parse_rssi("abc%").is_err());
        assert!(parse_rssi("%").is_err());
        assert!(parse_rssi("101%").is_err());
    }

    #[test]
    fn bad_rssi_fails_record() {
        let record = object(&json!({"@1": device("X", &json!(1), "strong", 0)}));
        assert!(matches!(
            DeviceStatus::from_record(record),
            Err(DecodeError::InvalidValue { ref field, .. }) if field == "rssi"
        ));
    }

    #[test]
    fn bad_epoch_fails_record() {
        let record = object(&json!({"@1": device("X", &json!("yesterday"), "10%", 0)}));
        assert!(matches!(
            DeviceStatus::from_record(record),
            Err(DecodeError::InvalidValue { ref field, .. }) if field == "epoch"
        ));
    }

    #[test]
    fn last_update_converts_epoch() {
        let record = object(&json!({"@1": device("X", &json!(1_736_018_165), "10%", 0)}));
        let status = DeviceStatus::from_record(record).unwrap();
        let last_update = status.last_update().unwrap();
        assert_eq!(last_update.timestamp(), 1_736_018_165);
    }

    #[test]
    fn snapshot_keeps_response_order_and_skips_success() {
        let body = object(&json!({
            "success": true,
            "@11111b": device("RELAY QS-D-S5", &json!(2), "58%", 0),
            "@11111a": device("RELAY QS-D-S5", &json!(1), "59%", 0)
        }));

        let snapshot = DeviceStatusSnapshot::from_body(body).unwrap();
        let ids: Vec<_> = snapshot.iter().map(DeviceStatus::device_id).collect();
        assert_eq!(ids, ["@11111b", "@11111a"]);
        assert_eq!(snapshot.find("@11111a").unwrap().rssi(), 59);
        assert!(snapshot.find("@missing").is_none());
    }

    #[test]
    fn snapshot_fails_on_malformed_device() {
        let body = object(&json!({
            "success": true,
            "@11111a": {"type": "RELAY QS-D-S5"}
        }));
        assert!(DeviceStatusSnapshot::from_body(body).is_err());
    }

    #[test]
    fn snapshot_from_empty_envelope() {
        let snapshot = DeviceStatusSnapshot::from_envelope(Envelope::Empty).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
    }

    #[test]
    fn snapshot_decoding_is_repeatable() {
        let body = object(&json!({
            "success": true,
            "@11111a": device("RELAY QS-D-S5", &json!(1), "59%", 0)
        }));
        let first = DeviceStatusSnapshot::from_body(body.clone()).unwrap();
        let second = DeviceStatusSnapshot::from_body(body).unwrap();
        assert_eq!(first, second);
    }
}
