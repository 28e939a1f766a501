// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device classification by reported device type.
//!
//! The status endpoint reports a free-form `type` string per device (for
//! example `"RELAY QS-D-S5"`). This module maps known type strings to a
//! [`DeviceClass`]. Unknown types classify as [`DeviceClass::Unknown`].

use std::collections::HashMap;
use std::fmt;

/// Functional class of a Qwikswitch device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// On/off relay.
    Relay,
    /// Dimmable relay (level 0-100).
    Dimmer,
    /// Humidity and temperature sensor.
    HumidityTemperature,
    /// Device type not present in the catalog.
    Unknown,
}

/// Device types known to this library.
const KNOWN_DEVICE_TYPES: &[(&str, DeviceClass)] = &[
    ("RELAY QS-D-S5", DeviceClass::Dimmer),
    ("RELAY QS-R-S5", DeviceClass::Relay),
    ("RELAY QS-R-S30", DeviceClass::Relay),
];

impl DeviceClass {
    /// Classifies a device type using the built-in catalog.
    ///
    /// # Examples
    ///
    /// ```
    /// use qwikswitch_lib::types::DeviceClass;
    ///
    /// assert_eq!(DeviceClass::from_device_type("RELAY QS-D-S5"), DeviceClass::Dimmer);
    /// assert_eq!(DeviceClass::from_device_type("RELAY QS-R-S30"), DeviceClass::Relay);
    /// assert_eq!(DeviceClass::from_device_type("SOMETHING NEW"), DeviceClass::Unknown);
    /// ```
    #[must_use]
    pub fn from_device_type(device_type: &str) -> Self {
        KNOWN_DEVICE_TYPES
            .iter()
            .find(|(known, _)| *known == device_type)
            .map_or(Self::Unknown, |(_, class)| *class)
    }

    /// Returns the class name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Relay => "relay",
            Self::Dimmer => "dimmer",
            Self::HumidityTemperature => "humidity_temperature",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup table from device type strings to device classes.
///
/// Starts from the built-in table and can be extended with device types this
/// library does not know about yet.
///
/// # Examples
///
/// ```
/// use qwikswitch_lib::types::{DeviceCatalog, DeviceClass};
///
/// let catalog = DeviceCatalog::builtin()
///     .with_device_type("SENSOR QS-S-HT", DeviceClass::HumidityTemperature);
///
/// assert_eq!(catalog.classify("SENSOR QS-S-HT"), DeviceClass::HumidityTemperature);
/// assert_eq!(catalog.classify("RELAY QS-D-S5"), DeviceClass::Dimmer);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCatalog {
    entries: HashMap<String, DeviceClass>,
}

impl DeviceCatalog {
    /// Creates a catalog with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Creates a catalog holding the built-in device types.
    #[must_use]
    pub fn builtin() -> Self {
        KNOWN_DEVICE_TYPES
            .iter()
            .fold(Self::empty(), |catalog, (device_type, class)| {
                catalog.with_device_type(*device_type, *class)
            })
    }

    /// Adds or replaces an entry.
    #[must_use]
    pub fn with_device_type(mut self, device_type: impl Into<String>, class: DeviceClass) -> Self {
        self.entries.insert(device_type.into(), class);
        self
    }

    /// Classifies a device type, falling back to [`DeviceClass::Unknown`].
    #[must_use]
    pub fn classify(&self, device_type: &str) -> DeviceClass {
        self.entries
            .get(device_type)
            .copied()
            .unwrap_or(DeviceClass::Unknown)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DeviceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_matches_static_lookup() {
        let catalog = DeviceCatalog::builtin();
        assert_eq!(catalog.len(), KNOWN_DEVICE_TYPES.len());
        for (device_type, class) in KNOWN_DEVICE_TYPES {
            assert_eq!(catalog.classify(device_type), *class);
            assert_eq!(DeviceClass::from_device_type(device_type), *class);
        }
    }

    #[test]
    fn unknown_type_classifies_as_unknown() {
        assert_eq!(DeviceCatalog::builtin().classify("relay qs-d-s5"), DeviceClass::Unknown);
        assert_eq!(DeviceClass::from_device_type(""), DeviceClass::Unknown);
    }

    #[test]
    fn empty_catalog_knows_nothing() {
        let catalog = DeviceCatalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.classify("RELAY QS-D-S5"), DeviceClass::Unknown);
    }

    #[test]
    fn entries_can_be_overridden() {
        let catalog = DeviceCatalog::default().with_device_type("RELAY QS-D-S5", DeviceClass::Relay);
        assert_eq!(catalog.classify("RELAY QS-D-S5"), DeviceClass::Relay);
    }

    #[test]
    fn device_class_display() {
        assert_eq!(DeviceClass::HumidityTemperature.to_string(), "humidity_temperature");
        assert_eq!(DeviceClass::Unknown.to_string(), "unknown");
    }
}
