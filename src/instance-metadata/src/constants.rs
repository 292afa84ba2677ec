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

/// The link-local address of the metadata service, including the version prefix.
pub const METADATA_ROOT: &str = "http://169.254.169.254/latest/";
/// The version prefix appended to endpoint overrides that omit it.
pub(crate) const VERSION_PREFIX: &str = "latest/";
/// Overrides the metadata service endpoint, e.g. `http://127.0.0.1:1338`.
pub const METADATA_ENDPOINT_ENV_VAR: &str = "AWS_EC2_METADATA_SERVICE_ENDPOINT";

/// Lists the instance profile, or returns its credentials when suffixed with the name.
pub(crate) const SECURITY_CREDENTIALS_PATH: &str = "meta-data/iam/security-credentials/";

pub(crate) const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// The service may be slow to come up, probes get more generous timeouts.
pub(crate) const PROBE_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub(crate) const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// The default upper bound for [wait_until_running][crate::client::MetadataServiceClient::wait_until_running].
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(120);
/// Approximate wall-clock cost of one failed probe, used to size the attempt budget.
pub(crate) const SECONDS_PER_ATTEMPT: u64 = 11;
