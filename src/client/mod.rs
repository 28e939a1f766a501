// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level client for the Qwikswitch cloud API.
//!
//! [`QsClient`] performs exactly one HTTP request per operation, classifies
//! the response and decodes it.
//!
//! # Authentication
//!
//! Control and status requests need the read-write API key. The client holds
//! the key pair once issued. If no key pair is held when
//! [`control_device`](QsClient::control_device) or
//! [`get_all_device_status`](QsClient::get_all_device_status) is called, keys
//! are issued first. Deleting keys on the server does not clear the local
//! copy; call [`clear_api_keys`](QsClient::clear_api_keys) for that.
//!
//! ```no_run
//! use qwikswitch_lib::QsClient;
//!
//! # async fn example() -> qwikswitch_lib::Result<()> {
//! let client = QsClient::builder("me@example.com", "0123456789ab").build()?;
//!
//! // Keys are issued on the first call
//! let result = client.control_device("@112331", 50).await?;
//! println!("{} is now at {}", result.device_id(), result.level());
//!
//! for status in &client.get_all_device_status().await? {
//!     println!("{}: {} ({})", status.device_id(), status.value(), status.device_class());
//! }
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::QsClientBuilder;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{Error, Result};
#[cfg(feature = "http")]
use crate::protocol::HttpTransport;
use crate::protocol::{HttpExchange, Transport, UrlBuilder};
use crate::response::envelope::{classify_key_response, classify_operation_response};
use crate::response::{
    ControlConfirmation, CredentialPair, DeviceStatusSnapshot, JsonObject, NoDataPolicy,
    json_keys,
};

/// Client for the Qwikswitch cloud API.
///
/// The only mutable state is the held [`CredentialPair`]. It is not locked
/// across requests: two concurrent first calls may both issue keys.
#[derive(Debug)]
pub struct QsClient<T: Transport> {
    transport: T,
    urls: UrlBuilder,
    email: String,
    master_key: String,
    api_keys: RwLock<Option<CredentialPair>>,
}

impl<T: Transport> QsClient<T> {
    pub(crate) fn new(
        transport: T,
        urls: UrlBuilder,
        email: String,
        master_key: String,
        api_keys: Option<CredentialPair>,
    ) -> Self {
        Self {
            transport,
            urls,
            email,
            master_key,
            api_keys: RwLock::new(api_keys),
        }
    }

    /// Returns the base URI of the API, with a trailing slash.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        self.urls.base_uri()
    }

    /// Returns the account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the held API keys, if any.
    #[must_use]
    pub fn api_keys(&self) -> Option<CredentialPair> {
        self.api_keys.read().clone()
    }

    /// Returns `true` if API keys are held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.api_keys.read().is_some()
    }

    /// Replaces the held API keys, e.g. with keys issued in an earlier session.
    pub fn set_api_keys(&self, keys: CredentialPair) {
        *self.api_keys.write() = Some(keys);
    }

    /// Drops the held API keys. The next authenticated call issues new ones.
    pub fn clear_api_keys(&self) {
        *self.api_keys.write() = None;
    }

    // ========== Key management ==========

    /// Issues API keys for the configured email and master key, and holds them
    /// for subsequent calls.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] if the service rejects the request,
    /// [`Error::RequestFailed`] on transport failure and [`Error::Decode`] if
    /// the keys cannot be read from the response.
    pub async fn generate_api_keys(&self) -> Result<CredentialPair> {
        let url = self.urls.generate_api_keys();
        let exchange = self.post_key_request(&url).await?;

        let body = classify_key_response(&exchange)?;
        let keys = CredentialPair::from_body(body)?;

        tracing::info!(email = %self.email, "Issued API keys");
        *self.api_keys.write() = Some(keys.clone());
        Ok(keys)
    }

    /// Deletes the API keys of the configured account on the server.
    ///
    /// Locally held keys are kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] if the service rejects the request and
    /// [`Error::RequestFailed`] on transport failure.
    pub async fn delete_api_keys(&self) -> Result<()> {
        let url = self.urls.delete_api_keys();
        let exchange = self.post_key_request(&url).await?;

        classify_key_response(&exchange)?;

        tracing::info!(email = %self.email, "Deleted API keys");
        Ok(())
    }

    // ========== Device operations ==========

    /// Sets a device to `level` (0 = off, 1-100 = on).
    ///
    /// Issues API keys first if none are held.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Request`] if the service reports a failure,
    /// [`Error::RequestFailed`] on transport failure, [`Error::Decode`] if the
    /// confirmation cannot be read, and any error of
    /// [`generate_api_keys`](Self::generate_api_keys).
    pub async fn control_device(&self, device_id: &str, level: u8) -> Result<ControlConfirmation> {
        let keys = self.ensure_authenticated().await?;

        tracing::debug!(device_id = %device_id, level, "Controlling device");

        let url = self.urls.control(keys.read_write_key(), device_id, level);
        let exchange = self.get(&url).await?;

        let envelope = classify_operation_response(&exchange, NoDataPolicy::Reject)?;
        Ok(ControlConfirmation::from_body(envelope.into_body())?)
    }

    /// Retrieves the status of every device registered to the account.
    ///
    /// Issues API keys first if none are held. A "No Data" answer gives an
    /// empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Request`] if the service reports a failure,
    /// [`Error::RequestFailed`] on transport failure, [`Error::Decode`] if a
    /// device record is malformed, and any error of
    /// [`generate_api_keys`](Self::generate_api_keys).
    pub async fn get_all_device_status(&self) -> Result<DeviceStatusSnapshot> {
        let keys = self.ensure_authenticated().await?;

        let url = self.urls.device_status(keys.read_write_key());
        let exchange = self.get(&url).await?;

        let envelope = classify_operation_response(&exchange, NoDataPolicy::Empty)?;
        let snapshot = DeviceStatusSnapshot::from_envelope(envelope)?;

        tracing::debug!(count = snapshot.len(), "Received device statuses");
        Ok(snapshot)
    }

    // ========== Internals ==========

    async fn ensure_authenticated(&self) -> Result<CredentialPair> {
        let held = self.api_keys.read().clone();
        if let Some(keys) = held {
            Ok(keys)
        } else {
            tracing::debug!("No API keys held, issuing new ones");
            self.generate_api_keys().await
        }
    }

    async fn post_key_request(&self, url: &str) -> Result<HttpExchange> {
        let mut body = JsonObject::new();
        body.insert(json_keys::EMAIL.to_string(), Value::from(self.email.as_str()));
        body.insert(
            json_keys::MASTER_KEY.to_string(),
            Value::from(self.master_key.as_str()),
        );
        let body = Value::Object(body);

        self.transport
            .post_json(url, &body)
            .await
            .map_err(|source| Error::RequestFailed {
                url: url.to_string(),
                source,
            })
    }

    async fn get(&self, url: &str) -> Result<HttpExchange> {
        self.transport
            .get(url)
            .await
            .map_err(|source| Error::RequestFailed {
                url: url.to_string(),
                source,
            })
    }
}

#[cfg(feature = "http")]
impl QsClient<HttpTransport> {
    /// Creates a builder for an HTTP client.
    ///
    /// # Arguments
    ///
    /// * `email` - The email address registered on qwikswitch.com
    /// * `master_key` - The 12 character device id of the Wi-Fi bridge
    #[must_use]
    pub fn builder(email: impl Into<String>, master_key: impl Into<String>) -> QsClientBuilder {
        QsClientBuilder::new(email, master_key)
    }
}
