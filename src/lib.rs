// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `qwikswitch_lib` - A Rust library to control Qwikswitch devices.
//!
//! This library provides an async client for the Qwikswitch cloud API
//! (<https://qwikswitch.com/api/v1/>).
//!
//! # Supported Operations
//!
//! - **API keys**: Issue and delete the read / read-write key pair of an account
//! - **Device control**: Set a device to a level (0 = off, 1-100 = on)
//! - **Device status**: Poll the status of every device of the account
//!
//! # Quick Start
//!
//! ```no_run
//! use qwikswitch_lib::QsClient;
//!
//! #[tokio::main]
//! async fn main() -> qwikswitch_lib::Result<()> {
//!     let client = QsClient::builder("me@example.com", "0123456789ab").build()?;
//!
//!     // API keys are issued transparently on the first device call
//!     client.control_device("@112331", 100).await?;
//!
//!     let snapshot = client.get_all_device_status().await?;
//!     for status in &snapshot {
//!         println!(
//!             "{} [{}] value={} rssi={}%",
//!             status.device_id(),
//!             status.device_class(),
//!             status.value(),
//!             status.rssi()
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every operation returns its result or one [`Error`]:
//! [`Error::Auth`], [`Error::Request`], [`Error::RequestFailed`] or
//! [`Error::Decode`]. See [`error`] for details.

mod client;
pub mod error;
pub mod protocol;
pub mod response;
pub mod types;

pub use client::{QsClient, QsClientBuilder};
pub use error::{DecodeError, Error, Result, TransportError};
#[cfg(feature = "http")]
pub use protocol::{HttpConfig, HttpTransport};
pub use protocol::{HttpExchange, Transport, UrlBuilder};
pub use response::{ControlConfirmation, CredentialPair, DeviceStatus, DeviceStatusSnapshot};
pub use types::{DeviceCatalog, DeviceClass};
