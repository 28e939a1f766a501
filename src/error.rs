// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Qwikswitch library.
//!
//! Every public operation either returns its typed result or exactly one
//! [`Error`]. The taxonomy is flat:
//!
//! - [`Error::Auth`]: the key-management endpoints rejected the request.
//! - [`Error::Request`]: any other failure reported by the remote service.
//! - [`Error::RequestFailed`]: the transport failed before a response could be
//!   classified. The transport error is kept as the source.
//! - [`Error::Decode`]: the response passed classification but its shape did
//!   not match what was expected. Decode errors are request errors too, see
//!   [`Error::is_request_error`].

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Key issuance or deletion was rejected by the remote service.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The remote service reported a failure for a control or status request.
    #[error("request error: {0}")]
    Request(String),

    /// The transport failed before a response was received.
    #[error("request to {url} failed: {source}")]
    RequestFailed {
        /// URL of the request that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: TransportError,
    },

    /// The response body did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl Error {
    /// Returns `true` for [`Error::Request`] and [`Error::Decode`].
    ///
    /// A decode error is a specialized request error: the service answered,
    /// but not in a form this library understands.
    #[must_use]
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Decode(_))
    }

    /// Returns `true` if the key-management endpoints rejected the request.
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    /// Returns `true` if the transport failed before classification.
    #[must_use]
    pub fn is_request_failed(&self) -> bool {
        matches!(self, Self::RequestFailed { .. })
    }
}

/// Errors raised while decoding a classified response body.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// JSON parsing failed, or a field is missing or has the wrong type.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The body was not a JSON object.
    #[error("response body is not a JSON object: {0}")]
    NotAnObject(String),

    /// A field was present but its value could not be used.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },

    /// A single-device record must have exactly one top-level key.
    #[error("expected one device status, got {0}")]
    UnexpectedKeyCount(usize),
}

/// Errors raised by the HTTP transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the service failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
