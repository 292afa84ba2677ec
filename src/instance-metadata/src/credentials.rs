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

//! Instance profile credentials.
//!
//! The metadata service returns the temporary credentials for the instance
//! profile as a JSON object. [CredentialSet] is that object, as returned by
//! the service. [Credentials] is a typed view of the commonly used fields.

use crate::Result;
use crate::errors::Error;
use time::OffsetDateTime;

/// The decoded credentials document, without interpretation.
pub type CredentialSet = serde_json::Map<String, serde_json::Value>;

/// Temporary credentials for the IAM role attached to the instance.
#[derive(Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credentials {
    /// The access key id, e.g. `ASIA...`.
    pub access_key_id: String,

    /// The secret access key.
    pub secret_access_key: String,

    /// The session token. Temporary credentials are unusable without it.
    pub token: String,

    /// The time at which these credentials expire.
    #[serde(with = "time::serde::rfc3339")]
    pub expiration: OffsetDateTime,

    /// The status of the credentials, `"Success"` when valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// The credential type, typically `"AWS-HMAC"`.
    #[serde(default, rename = "Type", skip_serializing_if = "Option::is_none")]
    pub credential_type: Option<String>,

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<OffsetDateTime>,
}

impl Credentials {
    /// Returns `true` if the credentials expire at or before `now`.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.expiration <= now
    }
}

impl TryFrom<CredentialSet> for Credentials {
    type Error = Error;

    fn try_from(value: CredentialSet) -> Result<Self> {
        serde_json::from_value(serde_json::Value::Object(value))
            .map_err(|e| Error::decode("credentials document is missing required fields", e))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[censored]")
            .field("token", &"[censored]")
            .field("expiration", &self.expiration)
            .field("code", &self.code)
            .field("credential_type", &self.credential_type)
            .field("last_updated", &self.last_updated)
            .finish()
    }
}
