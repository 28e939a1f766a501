// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Endpoint URL construction.

/// Default base URI of the Qwikswitch cloud API.
pub const DEFAULT_BASE_URI: &str = "https://qwikswitch.com/api/v1/";

/// Builds endpoint URLs from a base URI.
///
/// The base URI always ends with a trailing slash, so relative paths are
/// appended below it rather than replacing its last segment.
///
/// # Examples
///
/// ```
/// use qwikswitch_lib::protocol::UrlBuilder;
///
/// let urls = UrlBuilder::new("https://qwikswitch.com/api/v1");
/// assert_eq!(urls.base_uri(), "https://qwikswitch.com/api/v1/");
/// assert_eq!(urls.generate_api_keys(), "https://qwikswitch.com/api/v1/keys");
/// assert_eq!(
///     urls.control("rw-key", "@112331", 50),
///     "https://qwikswitch.com/api/v1/control/rw-key/?device=%40112331&setlevel=50"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base_uri: String,
}

impl UrlBuilder {
    /// Creates a builder, appending a trailing slash to `base_uri` if missing.
    #[must_use]
    pub fn new(base_uri: impl Into<String>) -> Self {
        let mut base_uri = base_uri.into();
        if !base_uri.ends_with('/') {
            base_uri.push('/');
        }
        Self { base_uri }
    }

    /// Returns the normalized base URI.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// URL of the key issuance endpoint.
    #[must_use]
    pub fn generate_api_keys(&self) -> String {
        self.join("keys")
    }

    /// URL of the key deletion endpoint.
    #[must_use]
    pub fn delete_api_keys(&self) -> String {
        self.join("keys/delete/")
    }

    /// URL of the device control endpoint.
    #[must_use]
    pub fn control(&self, key: &str, device_id: &str, level: u8) -> String {
        self.join(&format!(
            "control/{}/?device={}&setlevel={level}",
            urlencoding::encode(key),
            urlencoding::encode(device_id),
        ))
    }

    /// URL of the "all device status" endpoint.
    #[must_use]
    pub fn device_status(&self, key: &str) -> String {
        self.join(&format!("state/{}/", urlencoding::encode(key)))
    }

    fn join(&self, path: &str) -> String {
        format!("{}{path}", self.base_uri)
    }
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_uri_gets_trailing_slash() {
        let urls = UrlBuilder::new("http://localhost:8080/api/v1");
        assert_eq!(urls.base_uri(), "http://localhost:8080/api/v1/");
    }

    #[test]
    fn base_uri_keeps_single_trailing_slash() {
        let urls = UrlBuilder::new("http://localhost:8080/api/v1/");
        assert_eq!(urls.base_uri(), "http://localhost:8080/api/v1/");
    }

    #[test]
    fn default_base_uri() {
        assert_eq!(UrlBuilder::default().base_uri(), DEFAULT_BASE_URI);
    }

    #[test]
    fn key_urls() {
        let urls = UrlBuilder::default();
        assert_eq!(
            urls.generate_api_keys(),
            "https://qwikswitch.com/api/v1/keys"
        );
        assert_eq!(
            urls.delete_api_keys(),
            "https://qwikswitch.com/api/v1/keys/delete/"
        );
    }

    #[test]
    fn control_url_encodes_key_and_device() {
        let urls = UrlBuilder::default();
        assert_eq!(
            urls.control("a b/c", "@1111a", 100),
            "https://qwikswitch.com/api/v1/control/a%20b%2Fc/?device=%401111a&setlevel=100"
        );
    }

    #[test]
    fn device_status_url() {
        let urls = UrlBuilder::default();
        assert_eq!(
            urls.device_status("rw-key"),
            "https://qwikswitch.com/api/v1/state/rw-key/"
        );
    }
}
