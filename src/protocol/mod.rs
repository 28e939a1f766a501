// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport layer for talking to the Qwikswitch cloud API.
//!
//! The client never issues HTTP requests itself. It goes through the
//! [`Transport`] trait, which returns a completed [`HttpExchange`] (URL, status
//! code and raw body) or a [`TransportError`].
//!
//! # Implementations
//!
//! - [`HttpTransport`]: `reqwest`-based transport (requires the `http` feature)
//!
//! Endpoint URLs are produced by [`UrlBuilder`].

#[cfg(feature = "http")]
mod http;
mod url;

#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpTransport};
pub use url::{DEFAULT_BASE_URI, UrlBuilder};

use crate::error::TransportError;

/// A completed HTTP request/response pair.
///
/// Holds everything the response classifier needs: the URL the request was
/// sent to, the status code and the raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpExchange {
    url: String,
    status: u16,
    body: String,
}

impl HttpExchange {
    /// HTTP 200.
    pub const STATUS_OK: u16 = 200;

    /// Creates a new exchange.
    #[must_use]
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Returns the URL of the request.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns `true` if the status code is exactly 200.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == Self::STATUS_OK
    }
}

/// Trait for HTTP transports that can reach the Qwikswitch API.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no response could be obtained.
    async fn get(&self, url: &str) -> Result<HttpExchange, TransportError>;

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no response could be obtained.
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpExchange, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_accessors() {
        let exchange = HttpExchange::new("https://example.com/keys", 401, "");
        assert_eq!(exchange.url(), "https://example.com/keys");
        assert_eq!(exchange.status(), 401);
        assert_eq!(exchange.body(), "");
        assert!(!exchange.is_ok());
    }

    #[test]
    fn exchange_only_200_is_ok() {
        assert!(HttpExchange::new("u", 200, "{}").is_ok());
        assert!(!HttpExchange::new("u", 204, "").is_ok());
    }
}
