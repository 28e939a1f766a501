// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client builder.

use std::time::Duration;

use crate::client::QsClient;
#[cfg(feature = "http")]
use crate::error::Error;
#[cfg(feature = "http")]
use crate::protocol::{HttpConfig, HttpTransport};
use crate::protocol::{DEFAULT_BASE_URI, Transport, UrlBuilder};
use crate::response::CredentialPair;

/// Builder for [`QsClient`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use qwikswitch_lib::{CredentialPair, QsClient};
///
/// # fn example() -> qwikswitch_lib::Result<()> {
/// // Public API with defaults
/// let client = QsClient::builder("me@example.com", "0123456789ab").build()?;
///
/// // Custom endpoint, shorter timeout, keys issued in an earlier session
/// let client = QsClient::builder("me@example.com", "0123456789ab")
///     .base_uri("http://localhost:8080/api/v1")
///     .timeout(Duration::from_secs(3))
///     .api_keys(CredentialPair::new("aaaa", "1111"))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct QsClientBuilder {
    email: String,
    master_key: String,
    base_uri: Option<String>,
    timeout: Option<Duration>,
    api_keys: Option<CredentialPair>,
}

impl QsClientBuilder {
    /// Creates a builder for the given account.
    ///
    /// # Arguments
    ///
    /// * `email` - The email address registered on qwikswitch.com
    /// * `master_key` - The 12 character device id of the Wi-Fi bridge
    #[must_use]
    pub fn new(email: impl Into<String>, master_key: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            master_key: master_key.into(),
            base_uri: None,
            timeout: None,
            api_keys: None,
        }
    }

    /// Sets the base URI of the API. Defaults to [`DEFAULT_BASE_URI`].
    #[must_use]
    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Sets the request timeout of the HTTP transport.
    ///
    /// Ignored by [`build_with_transport`](Self::build_with_transport).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Starts the client with API keys issued earlier.
    #[must_use]
    pub fn api_keys(mut self, keys: CredentialPair) -> Self {
        self.api_keys = Some(keys);
        self
    }

    /// Builds a client using the `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestFailed`] if the HTTP client cannot be created.
    #[cfg(feature = "http")]
    pub fn build(self) -> Result<QsClient<HttpTransport>, Error> {
        let mut config = HttpConfig::new();
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        let transport = config
            .into_transport()
            .map_err(|source| Error::RequestFailed {
                url: self.resolved_base_uri().to_string(),
                source,
            })?;

        Ok(self.build_with_transport(transport))
    }

    /// Builds a client on top of a custom transport.
    #[must_use]
    pub fn build_with_transport<T: Transport>(self, transport: T) -> QsClient<T> {
        let urls = UrlBuilder::new(self.resolved_base_uri());
        QsClient::new(transport, urls, self.email, self.master_key, self.api_keys)
    }

    fn resolved_base_uri(&self) -> &str {
        self.base_uri.as_deref().unwrap_or(DEFAULT_BASE_URI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let builder = QsClientBuilder::new("me@example.com", "0123456789ab");
        assert_eq!(builder.email, "me@example.com");
        assert_eq!(builder.master_key, "0123456789ab");
        assert!(builder.base_uri.is_none());
        assert!(builder.timeout.is_none());
        assert!(builder.api_keys.is_none());
    }

    #[cfg(feature = "http")]
    #[test]
    fn build_uses_default_base_uri() {
        let client = QsClientBuilder::new("me@example.com", "0123456789ab")
            .build()
            .unwrap();
        assert_eq!(client.base_uri(), DEFAULT_BASE_URI);
        assert_eq!(client.email(), "me@example.com");
        assert!(!client.is_authenticated());
    }

    #[cfg(feature = "http")]
    #[test]
    fn build_normalizes_base_uri() {
        let client = QsClientBuilder::new("me@example.com", "0123456789ab")
            .base_uri("http://localhost:8080/api/v1")
            .timeout(Duration::from_secs(1))
            .build()
            .unwrap();
        assert_eq!(client.base_uri(), "http://localhost:8080/api/v1/");
    }

    #[cfg(feature = "http")]
    #[test]
    fn build_with_transport_keeps_base_uri() {
        let client = QsClientBuilder::new("me@example.com", "0123456789ab")
            .base_uri("http://127.0.0.1:9000")
            .build_with_transport(HttpTransport::new().unwrap());
        assert_eq!(client.base_uri(), "http://127.0.0.1:9000/");
    }

    #[cfg(feature = "http")]
    #[test]
    fn build_with_preset_keys_is_authenticated() {
        let keys = CredentialPair::new("aaaa", "1111");
        let client = QsClientBuilder::new("me@example.com", "0123456789ab")
            .api_keys(keys.clone())
            .build()
            .unwrap();
        assert_eq!(client.api_keys(), Some(keys));
    }
}
