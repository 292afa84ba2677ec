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

//! The HTTP transport used to reach the metadata service.
//!
//! The client only needs one capability from its transport: issue a `GET`
//! with optional timeout overrides and return the full response, or a tagged
//! [Error] describing why no response was received. Applications can provide
//! their own [HttpFetcher] to add proxies, custom TLS configuration, or test
//! doubles.

use crate::Result;
use crate::constants::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT};
use crate::errors::{self, Error};
use crate::options::RequestOptions;
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A response from the metadata service.
///
/// The body is fully buffered; metadata responses are small.
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Creates a `200 OK` response with the given body, mostly useful in tests.
    pub fn from_body<B: Into<Bytes>>(body: B) -> Self {
        Self::new(StatusCode::OK, HeaderMap::new(), body.into())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body decoded as UTF-8 text.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec())
            .map_err(|e| Error::decode("response body is not valid UTF-8", e))
    }

    /// Returns the body decoded as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| Error::decode("response body is not valid JSON", e))
    }
}

/// The transport capability required by
/// [MetadataServiceClient][crate::client::MetadataServiceClient].
///
/// Implementations must not inspect the status code: any response received
/// from the service is returned as `Ok`. Failures to obtain a response are
/// reported as [Error] values, typically with
/// [ErrorKind::Transport][crate::errors::ErrorKind::Transport] or
/// [ErrorKind::Timeout][crate::errors::ErrorKind::Timeout].
#[async_trait::async_trait]
pub trait HttpFetcher: std::fmt::Debug + Send + Sync {
    async fn get(&self, url: &str, options: &RequestOptions) -> Result<Response>;
}

/// The default [HttpFetcher], backed by [reqwest].
#[derive(Clone, Debug)]
pub struct ReqwestFetcher {
    inner: reqwest::Client,
    // `None` when wrapping a caller-supplied client, whose settings we do not know.
    connect_timeout: Option<Duration>,
    timeout: Duration,
    // reqwest only supports connect timeouts at the client level.
    by_connect_timeout: Arc<Mutex<HashMap<Duration, reqwest::Client>>>,
}

impl ReqwestFetcher {
    /// Creates a fetcher with the default timeouts: 5 seconds to connect, and
    /// 10 seconds for the full request.
    pub fn new() -> Result<Self> {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT)
    }

    /// Creates a fetcher with custom default timeouts.
    pub fn with_timeouts(connect_timeout: Duration, timeout: Duration) -> Result<Self> {
        let inner = build_client(connect_timeout)?;
        Ok(Self {
            inner,
            connect_timeout: Some(connect_timeout),
            timeout,
            by_connect_timeout: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Wraps a pre-configured client.
    ///
    /// Connect timeout overrides in [RequestOptions] are ignored, as they
    /// would require building a new client and dropping any custom settings.
    /// Total timeout overrides are honored.
    pub fn from_client(inner: reqwest::Client) -> Self {
        Self {
            inner,
            connect_timeout: None,
            timeout: DEFAULT_TIMEOUT,
            by_connect_timeout: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Changes the total timeout used when a request does not override it.
    pub fn set_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn client_for(&self, options: &RequestOptions) -> Result<reqwest::Client> {
        let (Some(default), Some(wanted)) = (self.connect_timeout, options.connect_timeout())
        else {
            return Ok(self.inner.clone());
        };
        if default == wanted {
            return Ok(self.inner.clone());
        }
        let mut guard = self
            .by_connect_timeout
            .lock()
            .expect("client cache lock is poisoned");
        if let Some(client) = guard.get(&wanted) {
            return Ok(client.clone());
        }
        let client = build_client(wanted)?;
        guard.insert(wanted, client.clone());
        Ok(client)
    }
}

fn build_client(connect_timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .build()
        .map_err(|e| Error::configuration("cannot build HTTP client", e))
}

#[async_trait::async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str, options: &RequestOptions) -> Result<Response> {
        let client = self.client_for(options)?;
        let timeout = options.timeout().unwrap_or(self.timeout);
        tracing::debug!(url, ?timeout, "sending metadata request");

        let error_message = format!("GET {url} failed");
        let response = client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| errors::from_http_error(e, &error_message))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| errors::from_http_error(e, &error_message))?;
        Ok(Response::new(status, headers, body))
    }
}
