// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Errors returned by the metadata service client.

use http::StatusCode;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Represents an error talking to the instance metadata service.
///
/// The most common errors are transport errors, which are expected when the
/// application is not running on a cloud instance, or the service has not
/// started yet. Use [is_transient][Error::is_transient] to decide if a
/// request may succeed if attempted again.
///
/// # Example
/// ```
/// # use ec2_instance_metadata::errors::Error;
/// let err = Error::transport("simulated connection refused");
/// assert!(err.is_transport());
/// assert!(err.is_transient());
/// ```
#[derive(thiserror::Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxError>,
}

/// The category of an [Error].
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The request did not produce a response: connection refused, DNS or
    /// routing failures, or an interrupted body.
    Transport,
    /// The request did not complete before its connect or total timeout.
    Timeout,
    /// The service responded with a non-success status code.
    Status {
        /// The HTTP status code.
        code: u16,
        /// The response body, if it could be read.
        body: String,
    },
    /// The response body could not be decoded.
    Decode,
    /// The client could not be configured.
    Configuration,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport => write!(f, "transport error"),
            Self::Timeout => write!(f, "timeout"),
            Self::Status { code, .. } => write!(f, "unexpected status code {code}"),
            Self::Decode => write!(f, "cannot decode response"),
            Self::Configuration => write!(f, "invalid configuration"),
        }
    }
}

impl Error {
    fn new<M: Into<String>>(kind: ErrorKind, message: M, source: Option<BoxError>) -> Self {
        Self {
            kind,
            message: message.into(),
            source,
        }
    }

    /// A transport error without an underlying source.
    pub fn transport<M: Into<String>>(message: M) -> Self {
        Self::new(ErrorKind::Transport, message, None)
    }

    /// A transport error caused by `source`.
    pub fn transport_from<M, E>(message: M, source: E) -> Self
    where
        M: Into<String>,
        E: Into<BoxError>,
    {
        Self::new(ErrorKind::Transport, message, Some(source.into()))
    }

    /// The request did not complete in time.
    pub fn timeout<M, E>(message: M, source: E) -> Self
    where
        M: Into<String>,
        E: Into<BoxError>,
    {
        Self::new(ErrorKind::Timeout, message, Some(source.into()))
    }

    /// The service returned an unsuccessful status code.
    pub fn status<M: Into<String>>(message: M, code: StatusCode, body: String) -> Self {
        let kind = ErrorKind::Status {
            code: code.as_u16(),
            body,
        };
        Self::new(kind, message, None)
    }

    /// The response could not be decoded.
    pub fn decode<M, E>(message: M, source: E) -> Self
    where
        M: Into<String>,
        E: Into<BoxError>,
    {
        Self::new(ErrorKind::Decode, message, Some(source.into()))
    }

    pub(crate) fn decode_from_str<M: Into<String>>(message: M) -> Self {
        Self::new(ErrorKind::Decode, message, None)
    }

    pub(crate) fn configuration<M, E>(message: M, source: E) -> Self
    where
        M: Into<String>,
        E: Into<BoxError>,
    {
        Self::new(ErrorKind::Configuration, message, Some(source.into()))
    }

    /// The error category.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    pub fn is_decode(&self) -> bool {
        matches!(self.kind, ErrorKind::Decode)
    }

    /// The HTTP status code, if the service responded with an error.
    pub fn status_code(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` if the same request may succeed if attempted again.
    pub fn is_transient(&self) -> bool {
        match &self.kind {
            ErrorKind::Transport | ErrorKind::Timeout => true,
            ErrorKind::Status { code, .. } => StatusCode::from_u16(*code)
                .map(is_retryable)
                .unwrap_or(false),
            ErrorKind::Decode | ErrorKind::Configuration => false,
        }
    }
}

pub(crate) fn is_retryable(c: StatusCode) -> bool {
    // Server errors do not indicate that there is anything wrong with our
    // request, so we retry them.
    c.is_server_error() || matches!(c, StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS)
}

/// Maps a [reqwest::Error] to the kinds defined in this module.
pub(crate) fn from_http_error(err: reqwest::Error, message: &str) -> Error {
    if err.is_timeout() {
        return Error::timeout(format!("{message}, the request timed out"), err);
    }
    if err.is_connect() {
        return Error::transport_from(format!("{message}, cannot connect to the service"), err);
    }
    Error::transport_from(message, err)
}
