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

use std::time::Duration;

/// Per-request overrides for an [HttpFetcher][crate::http::HttpFetcher].
///
/// Fields left unset use the defaults configured in the fetcher.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl RequestOptions {
    /// Sets the total timeout for the request, including reading the body.
    pub fn set_timeout<V: Into<Duration>>(mut self, v: V) -> Self {
        self.timeout = Some(v.into());
        self
    }

    /// Sets the timeout to establish a connection.
    pub fn set_connect_timeout<V: Into<Duration>>(mut self, v: V) -> Self {
        self.connect_timeout = Some(v.into());
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }
}
