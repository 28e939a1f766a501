// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `reqwest`-based transport for the Qwikswitch cloud API.

use std::time::Duration;

use reqwest::Client;

use crate::error::TransportError;
use crate::protocol::{HttpExchange, Transport};

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Configuration for the HTTP transport.
///
/// The transport sends requests to absolute URLs, so the base URI of the API
/// is not part of it: see [`UrlBuilder`](crate::protocol::UrlBuilder).
///
/// # Examples
///
/// ```
/// use qwikswitch_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new().with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.timeout(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    timeout: Duration,
}

impl HttpConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates an `HttpTransport` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_transport(self) -> Result<HttpTransport, TransportError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(TransportError::Http)?;

        Ok(HttpTransport { client })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// HttpTransport
// ============================================================================

/// HTTP transport backed by `reqwest`.
///
/// Non-2xx statuses are not errors at this level: they are returned as an
/// [`HttpExchange`] so the response classifier can report them.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        HttpConfig::new().into_transport()
    }

    /// Wraps an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn read_exchange(response: reqwest::Response) -> Result<HttpExchange, TransportError> {
        let url = response.url().to_string();
        let status = response.status().as_u16();
        let body = response.text().await.map_err(TransportError::Http)?;

        tracing::debug!(url = %url, status, body = %body, "Received HTTP response");

        Ok(HttpExchange::new(url, status, body))
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<HttpExchange, TransportError> {
        tracing::debug!(url = %url, "Sending HTTP GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(TransportError::Http)?;

        Self::read_exchange(response).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpExchange, TransportError> {
        tracing::debug!(url = %url, "Sending HTTP POST");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(TransportError::Http)?;

        Self::read_exchange(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::new();
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn http_config_builder_chain() {
        let config = HttpConfig::default().with_timeout(Duration::from_millis(250));
        assert_eq!(config.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn http_config_into_transport() {
        assert!(HttpConfig::new().into_transport().is_ok());
    }
}
