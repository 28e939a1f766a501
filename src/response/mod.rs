// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response classification and decoding for Qwikswitch API responses.
//!
//! Every response goes through two steps:
//!
//! 1. [`envelope`] decides whether the exchange succeeded, using the envelope
//!    dialect of the endpoint family.
//! 2. A decoder turns the classified body into a typed result:
//!    [`CredentialPair`], [`ControlConfirmation`] or [`DeviceStatusSnapshot`].

mod control;
mod device_status;
pub mod envelope;
mod keys;

pub use control::ControlConfirmation;
pub use device_status::{DeviceStatus, DeviceStatusSnapshot};
pub use envelope::{Envelope, JsonObject, NoDataPolicy};
pub use keys::CredentialPair;

/// JSON field names used by the Qwikswitch API.
pub(crate) mod json_keys {
    pub const OK: &str = "ok";
    pub const ERR: &str = "err";
    pub const SUCCESS: &str = "success";
    pub const ERROR: &str = "error";
    pub const READ_KEY: &str = "r";
    pub const READ_WRITE_KEY: &str = "rw";
    pub const EMAIL: &str = "email";
    pub const MASTER_KEY: &str = "masterKey";
}
