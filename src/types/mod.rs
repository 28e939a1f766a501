// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Qwikswitch devices.
//!
//! # Types
//!
//! - [`DeviceClass`] - Functional class of a device (relay, dimmer, ...)
//! - [`DeviceCatalog`] - Lookup table from reported device types to classes

mod device_class;

pub use device_class::{DeviceCatalog, DeviceClass};
