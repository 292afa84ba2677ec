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

//! A client for the [instance metadata service].
//!
//! Example usage:
//!
//! ```no_run
//! # use ec2_instance_metadata::client::{MetadataServiceClient, Readiness};
//! # use std::time::Duration;
//! # tokio_test::block_on(async {
//! let client = MetadataServiceClient::new()?;
//! if let Readiness::Ready { .. } = client.wait_until_running(Duration::from_secs(30)).await {
//!     let credentials = client.instance_profile_credentials_typed(None).await?;
//!     println!("access key: {}", credentials.access_key_id);
//! }
//! # Ok::<(), ec2_instance_metadata::errors::Error>(())
//! # });
//! ```
//!
//! [instance metadata service]: https://docs.aws.amazon.com/AWSEC2/latest/UserGuide/ec2-instance-metadata.html

use crate::Result;
use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, METADATA_ENDPOINT_ENV_VAR, METADATA_ROOT,
    PROBE_CONNECT_TIMEOUT, PROBE_TIMEOUT, SECURITY_CREDENTIALS_PATH, VERSION_PREFIX,
};
use crate::credentials::{CredentialSet, Credentials};
use crate::errors::Error;
use crate::http::{HttpFetcher, ReqwestFetcher, Response};
use crate::options::RequestOptions;
use crate::retry::{LoopOutcome, RetryPolicy, retry_loop};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// The outcome of [MetadataServiceClient::wait_until_running].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// The service answered a request.
    Ready { attempts: u32 },
    /// Every attempt failed and the attempt budget is exhausted.
    TimedOut { attempts: u32 },
    /// The wait was cancelled before the service answered.
    Cancelled { attempts: u32 },
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// The number of probe requests that were started.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Ready { attempts } | Self::TimedOut { attempts } | Self::Cancelled { attempts } => {
                *attempts
            }
        }
    }
}

/// Retrieves instance attributes and instance profile credentials.
///
/// The client is cheap to clone, clones share the underlying transport.
#[derive(Clone, Debug)]
pub struct MetadataServiceClient {
    endpoint: String,
    fetcher: Arc<dyn HttpFetcher>,
    /// True if the endpoint was NOT overridden by env var or builder.
    is_default_endpoint: bool,
}

/// Configures a [MetadataServiceClient].
///
/// Without any settings the client uses `http://169.254.169.254/latest/`,
/// a 5 second connect timeout and a 10 second request timeout. The
/// `AWS_EC2_METADATA_SERVICE_ENDPOINT` environment variable takes precedence
/// over [with_endpoint][Builder::with_endpoint].
#[derive(Debug, Default)]
pub struct Builder {
    endpoint: Option<String>,
    fetcher: Option<Arc<dyn HttpFetcher>>,
    http_client: Option<reqwest::Client>,
    connect_timeout: Option<Duration>,
    timeout: Option<Duration>,
}

impl Builder {
    /// Sets the base URL, including the version prefix, e.g.
    /// `http://127.0.0.1:1338/latest/`.
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Uses a custom transport. Takes precedence over all the other transport
    /// settings.
    pub fn with_fetcher<F: HttpFetcher + 'static>(mut self, fetcher: F) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Uses a pre-configured [reqwest::Client], e.g. to set up a proxy.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn with_connect_timeout<V: Into<Duration>>(mut self, v: V) -> Self {
        self.connect_timeout = Some(v.into());
        self
    }

    pub fn with_timeout<V: Into<Duration>>(mut self, v: V) -> Self {
        self.timeout = Some(v.into());
        self
    }

    pub fn build(self) -> Result<MetadataServiceClient> {
        let (endpoint, is_default_endpoint) = resolve_endpoint(self.endpoint)?;
        let fetcher: Arc<dyn HttpFetcher> = match (self.fetcher, self.http_client) {
            (Some(f), _) => f,
            (None, Some(client)) => Arc::new(
                ReqwestFetcher::from_client(client)
                    .set_timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT)),
            ),
            (None, None) => Arc::new(ReqwestFetcher::with_timeouts(
                self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
                self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            )?),
        };
        Ok(MetadataServiceClient {
            endpoint,
            fetcher,
            is_default_endpoint,
        })
    }
}

/// Determine the endpoint and whether it was overridden.
fn resolve_endpoint(endpoint_override: Option<String>) -> Result<(String, bool)> {
    let from_env = std::env::var(METADATA_ENDPOINT_ENV_VAR)
        .ok()
        .filter(|h| !h.is_empty());
    let (endpoint, is_default) = if let Some(host) = from_env {
        // The variable names the service, without the version prefix.
        let host = host.trim_end_matches('/');
        let host = host.strip_suffix("/latest").unwrap_or(host);
        (format!("{host}/{VERSION_PREFIX}"), false)
    } else if let Some(e) = endpoint_override {
        (e, false)
    } else {
        (METADATA_ROOT.to_string(), true)
    };
    let endpoint = format!("{}/", endpoint.trim_end_matches('/'));
    reqwest::Url::parse(&endpoint)
        .map_err(|e| Error::configuration(format!("invalid endpoint {endpoint}"), e))?;
    Ok((endpoint, is_default))
}

impl MetadataServiceClient {
    /// Creates a client with the default configuration.
    pub fn new() -> Result<Self> {
        Builder::default().build()
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The base URL, always ending in `/`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_default_endpoint(&self) -> bool {
        self.is_default_endpoint
    }

    /// Waits until the metadata service responds to requests.
    ///
    /// Probes the base path up to `max(1, max_wait / 11s)` times, back to
    /// back, each probe with 10 second connect and request timeouts. Any
    /// response counts as ready, whatever its status code. Failed probes are
    /// not errors: the function returns [Readiness::TimedOut] once the budget
    /// is spent.
    pub async fn wait_until_running(&self, max_wait: Duration) -> Readiness {
        self.wait_until_running_with_cancellation(max_wait, &CancellationToken::new())
            .await
    }

    /// Like [wait_until_running][Self::wait_until_running], but stops early,
    /// returning [Readiness::Cancelled], when `cancel` fires.
    pub async fn wait_until_running_with_cancellation(
        &self,
        max_wait: Duration,
        cancel: &CancellationToken,
    ) -> Readiness {
        let policy = RetryPolicy::from_max_wait(max_wait);
        let options = RequestOptions::default()
            .set_connect_timeout(PROBE_CONNECT_TIMEOUT)
            .set_timeout(PROBE_TIMEOUT);
        let url = self.endpoint.as_str();
        let fetcher = &self.fetcher;

        let outcome = retry_loop(
            async |attempt| {
                fetcher.get(url, &options).await.inspect_err(|e| {
                    tracing::debug!(attempt, error = %e, "metadata service is not responding");
                })
            },
            async |d| tokio::time::sleep(d).await,
            &policy,
            cancel,
        )
        .await;

        match outcome {
            LoopOutcome::Success { value, attempts } => {
                tracing::info!(
                    attempts,
                    status = value.status().as_u16(),
                    "metadata service is running"
                );
                Readiness::Ready { attempts }
            }
            LoopOutcome::Exhausted {
                last_error,
                attempts,
            } => {
                tracing::warn!(
                    attempts,
                    error = %last_error,
                    "gave up waiting for the metadata service"
                );
                Readiness::TimedOut { attempts }
            }
            LoopOutcome::Cancelled { attempts, .. } => {
                tracing::debug!(attempts, "wait for the metadata service was cancelled");
                Readiness::Cancelled { attempts }
            }
        }
    }

    /// Fetches `path`, relative to the endpoint.
    ///
    /// The path is neither validated nor escaped. Transport errors, and
    /// responses with a non-success status code, are returned as errors.
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.endpoint, path);
        let response = self.fetcher.get(&url, &RequestOptions::default()).await?;
        check_response_status(response, path)
    }

    /// Returns the name of the instance profile attached to the instance.
    pub async fn instance_profile(&self) -> Result<String> {
        self.get(SECURITY_CREDENTIALS_PATH).await?.text()
    }

    /// Returns the credentials for `profile`, as decoded from the service.
    ///
    /// If `profile` is `None` or empty, the profile attached to the instance
    /// is discovered first. A failure to discover the profile is returned
    /// without fetching any credentials.
    pub async fn instance_profile_credentials(
        &self,
        profile: Option<&str>,
    ) -> Result<CredentialSet> {
        let profile = match profile.filter(|p| !p.is_empty()) {
            Some(p) => p.to_string(),
            None => self.instance_profile().await?.trim_end().to_string(),
        };
        if profile.is_empty() {
            return Err(Error::decode_from_str(
                "the metadata service returned an empty instance profile name",
            ));
        }
        let path = format!("{SECURITY_CREDENTIALS_PATH}{profile}");
        self.get(&path).await?.json::<CredentialSet>()
    }

    /// Like [instance_profile_credentials][Self::instance_profile_credentials],
    /// returning the typed [Credentials].
    pub async fn instance_profile_credentials_typed(
        &self,
        profile: Option<&str>,
    ) -> Result<Credentials> {
        Credentials::try_from(self.instance_profile_credentials(profile).await?)
    }
}

fn check_response_status(response: Response, path: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = String::from_utf8_lossy(response.body()).into_owned();
    Err(Error::status(format!("GET {path} failed"), status, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_MAX_WAIT;
    use crate::http::tests::MockHttpFetcher;
    use http::{HeaderMap, StatusCode};
    use mockall::Sequence;
    use scoped_env::ScopedEnv;
    use serde_json::json;
    use serial_test::{parallel, serial};
    use test_case::test_case;

    type TestResult = anyhow::Result<()>;

    const ENDPOINT: &str = "http://test.invalid/latest/";
    const CREDENTIALS_URL: &str =
        "http://test.invalid/latest/meta-data/iam/security-credentials/my-role";
    const DISCOVERY_URL: &str = "http://test.invalid/latest/meta-data/iam/security-credentials/";

    fn client(fetcher: MockHttpFetcher) -> Result<MetadataServiceClient> {
        Builder::default()
            .with_endpoint(ENDPOINT)
            .with_fetcher(fetcher)
            .build()
    }

    fn credentials_body() -> String {
        json!({
            "AccessKeyId": "AKIA-test-only",
            "SecretAccessKey": "secret-test-only",
            "Token": "token-test-only",
            "Expiration": "2024-01-01T00:00:00Z"
        })
        .to_string()
    }

    fn refused() -> Result<Response> {
        Err(Error::transport("connection refused"))
    }

    #[test_case(0, 1)]
    #[test_case(22, 2)]
    #[test_case(33, 3)]
    #[test_case(120, 10)]
    #[tokio::test]
    async fn wait_exhausts_budget(seconds: u64, budget: u32) -> TestResult {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get()
            .times(budget as usize)
            .returning(|_, _| refused());

        let readiness = client(mock)?
            .wait_until_running(Duration::from_secs(seconds))
            .await;
        assert_eq!(readiness, Readiness::TimedOut { attempts: budget });
        assert!(!readiness.is_ready());
        Ok(())
    }

    #[tokio::test]
    #[parallel]
    async fn wait_stops_on_first_response() -> TestResult {
        let mut seq = Sequence::new();
        let mut mock = MockHttpFetcher::new();
        mock.expect_get()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_, _| refused());
        // The status code is not inspected.
        mock.expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Ok(Response::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    HeaderMap::new(),
                    "starting".into(),
                ))
            });

        let readiness = client(mock)?
            .wait_until_running(Duration::from_secs(120))
            .await;
        assert_eq!(readiness, Readiness::Ready { attempts: 3 });
        assert_eq!(readiness.attempts(), 3);
        Ok(())
    }

    #[tokio::test]
    #[parallel]
    async fn wait_probes_base_path_with_long_timeouts() -> TestResult {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get()
            .withf(|url, options| {
                url.to_string() == ENDPOINT
                    && options.connect_timeout() == Some(Duration::from_secs(10))
                    && options.timeout() == Some(Duration::from_secs(10))
            })
            .times(1)
            .returning(|_, _| Ok(Response::from_body("")));

        let readiness = client(mock)?.wait_until_running(DEFAULT_MAX_WAIT).await;
        assert!(readiness.is_ready(), "{readiness:?}");
        Ok(())
    }

    #[tokio::test]
    #[parallel]
    async fn wait_cancelled() -> TestResult {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get().never();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let readiness = client(mock)?
            .wait_until_running_with_cancellation(DEFAULT_MAX_WAIT, &cancel)
            .await;
        assert_eq!(readiness, Readiness::Cancelled { attempts: 0 });
        Ok(())
    }

    #[tokio::test]
    #[parallel]
    async fn get_success() -> TestResult {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get()
            .withf(|url, options| {
                url.to_string() == "http://test.invalid/latest/foo"
                    && options.timeout().is_none()
                    && options.connect_timeout().is_none()
            })
            .times(1)
            .returning(|_, _| Ok(Response::from_body("bar")));

        let response = client(mock)?.get("foo").await?;
        assert_eq!(response, Response::from_body("bar"));
        Ok(())
    }

    #[tokio::test]
    #[parallel]
    async fn get_transport_error() -> TestResult {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get().times(1).returning(|_, _| refused());

        let err = client(mock)?.get("foo").await.unwrap_err();
        assert!(err.is_transport(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    #[parallel]
    async fn get_error_status() -> TestResult {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get().times(1).returning(|_, _| {
            Ok(Response::new(
                StatusCode::NOT_FOUND,
                HeaderMap::new(),
                "Not Found".into(),
            ))
        });

        let err = client(mock)?.get("meta-data/nope").await.unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert!(
            matches!(err.kind(), crate::errors::ErrorKind::Status { body, .. } if body == "Not Found"),
            "{err:?}"
        );
        assert!(err.to_string().contains("meta-data/nope"), "{err}");
        Ok(())
    }

    #[tokio::test]
    #[parallel]
    async fn instance_profile() -> TestResult {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get()
            .withf(|url, _| url.to_string() == DISCOVERY_URL)
            .times(1)
            .returning(|_, _| Ok(Response::from_body("my-role")));

        let profile = client(mock)?.instance_profile().await?;
        assert_eq!(profile, "my-role");
        Ok(())
    }

    #[tokio::test]
    #[parallel]
    async fn credentials_discovers_profile() -> TestResult {
        let mut seq = Sequence::new();
        let mut mock = MockHttpFetcher::new();
        mock.expect_get()
            .withf(|url, _| url.to_string() == DISCOVERY_URL)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(Response::from_body("my-role")));
        // The profile name appears exactly once in the credentials path.
        mock.expect_get()
            .withf(|url, _| url.to_string() == CREDENTIALS_URL)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(Response::from_body(credentials_body())));

        let got = client(mock)?.instance_profile_credentials(None).await?;
        let want = json!({
            "AccessKeyId": "AKIA-test-only",
            "SecretAccessKey": "secret-test-only",
            "Token": "token-test-only",
            "Expiration": "2024-01-01T00:00:00Z"
        });
        assert_eq!(serde_json::Value::Object(got), want);
        Ok(())
    }

    #[tokio::test]
    #[parallel]
    async fn credentials_explicit_profile_skips_discovery() -> TestResult {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get()
            .withf(|url, _| url.to_string() == DISCOVERY_URL)
            .never();
        mock.expect_get()
            .withf(|url, _| url.to_string() == CREDENTIALS_URL)
            .times(1)
            .returning(|_, _| Ok(Response::from_body(credentials_body())));

        let got = client(mock)?
            .instance_profile_credentials_typed(Some("my-role"))
            .await?;
        assert_eq!(got.access_key_id, "AKIA-test-only");
        assert_eq!(got.token, "token-test-only");
        Ok(())
    }

    #[tokio::test]
    #[parallel]
    async fn credentials_empty_profile_discovers() -> TestResult {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get()
            .withf(|url, _| url.to_string() == DISCOVERY_URL)
            .times(1)
            .returning(|_, _| Ok(Response::from_body("my-role")));
        mock.expect_get()
            .withf(|url, _| url.to_string() == CREDENTIALS_URL)
            .times(1)
            .returning(|_, _| Ok(Response::from_body(credentials_body())));

        let got = client(mock)?.instance_profile_credentials(Some("")).await?;
        assert!(got.contains_key("AccessKeyId"), "{got:?}");
        Ok(())
    }

    #[tokio::test]
    #[parallel]
    async fn credentials_discovered_profile_is_trimmed() -> TestResult {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get()
            .withf(|url, _| url.to_string() == DISCOVERY_URL)
            .times(1)
            .returning(|_, _| Ok(Response::from_body("my-role\n")));
        mock.expect_get()
            .withf(|url, _| url.to_string() == CREDENTIALS_URL)
            .times(1)
            .returning(|_, _| Ok(Response::from_body(credentials_body())));

        let got = client(mock)?.instance_profile_credentials(None).await?;
        assert!(got.contains_key("AccessKeyId"), "{got:?}");
        Ok(())
    }

    #[tokio::test]
    #[parallel]
    async fn credentials_discovery_failure_short_circuits() -> TestResult {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get().times(1).returning(|_, _| refused());

        let err = client(mock)?
            .instance_profile_credentials(None)
            .await
            .unwrap_err();
        assert!(err.is_transport(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    #[parallel]
    async fn credentials_empty_discovered_profile() -> TestResult {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get()
            .times(1)
            .returning(|_, _| Ok(Response::from_body("")));

        let err = client(mock)?
            .instance_profile_credentials(None)
            .await
            .unwrap_err();
        assert!(err.is_decode(), "{err:?}");
        Ok(())
    }

    #[test_case("not json")]
    #[test_case("[1, 2, 3]")]
    #[test_case("\"my-role\"")]
    #[tokio::test]
    #[parallel]
    async fn credentials_decode_error(body: &'static str) -> TestResult {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get()
            .times(1)
            .returning(move |_, _| Ok(Response::from_body(body)));

        let err = client(mock)?
            .instance_profile_credentials(Some("my-role"))
            .await
            .unwrap_err();
        assert!(err.is_decode(), "{err:?}");
        assert!(!err.is_transient(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    #[parallel]
    async fn credentials_error_status() -> TestResult {
        let mut mock = MockHttpFetcher::new();
        mock.expect_get().times(1).returning(|_, _| {
            Ok(Response::new(
                StatusCode::NOT_FOUND,
                HeaderMap::new(),
                Default::default(),
            ))
        });

        let err = client(mock)?
            .instance_profile_credentials(Some("unknown-role"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(404), "{err:?}");
        Ok(())
    }

    #[test]
    #[serial]
    fn resolve_endpoint_default() -> TestResult {
        let _e = ScopedEnv::remove(METADATA_ENDPOINT_ENV_VAR);
        let client = MetadataServiceClient::new()?;
        assert_eq!(client.endpoint(), "http://169.254.169.254/latest/");
        assert!(client.is_default_endpoint());
        Ok(())
    }

    #[test_case("http://custom.endpoint/latest/"; "with slash")]
    #[test_case("http://custom.endpoint/latest"; "without slash")]
    #[serial]
    fn resolve_endpoint_override(endpoint: &str) -> TestResult {
        let _e = ScopedEnv::remove(METADATA_ENDPOINT_ENV_VAR);
        let client = Builder::default().with_endpoint(endpoint).build()?;
        assert_eq!(client.endpoint(), "http://custom.endpoint/latest/");
        assert!(!client.is_default_endpoint());
        Ok(())
    }

    #[test_case("http://127.0.0.1:1338")]
    #[test_case("http://127.0.0.1:1338/")]
    #[test_case("http://127.0.0.1:1338/latest")]
    #[test_case("http://127.0.0.1:1338/latest/")]
    #[serial]
    fn resolve_endpoint_env_var(value: &str) -> TestResult {
        let _e = ScopedEnv::set(METADATA_ENDPOINT_ENV_VAR, value);
        let client = MetadataServiceClient::new()?;
        assert_eq!(client.endpoint(), "http://127.0.0.1:1338/latest/");
        assert!(!client.is_default_endpoint());
        Ok(())
    }

    #[test]
    #[serial]
    fn resolve_endpoint_empty_env_var() -> TestResult {
        let _e = ScopedEnv::set(METADATA_ENDPOINT_ENV_VAR, "");
        let client = MetadataServiceClient::new()?;
        assert_eq!(client.endpoint(), "http://169.254.169.254/latest/");
        assert!(client.is_default_endpoint());

        let client = Builder::default()
            .with_endpoint("http://custom.endpoint/latest/")
            .build()?;
        assert_eq!(client.endpoint(), "http://custom.endpoint/latest/");
        Ok(())
    }

    #[test]
    #[serial]
    fn resolve_endpoint_priority() -> TestResult {
        let _e = ScopedEnv::set(METADATA_ENDPOINT_ENV_VAR, "http://env.priority.host");
        // Env var should take precedence over the builder.
        let client = Builder::default()
            .with_endpoint("http://custom.endpoint/latest/")
            .build()?;
        assert_eq!(client.endpoint(), "http://env.priority.host/latest/");
        Ok(())
    }

    #[test]
    #[serial]
    fn resolve_endpoint_invalid() {
        let _e = ScopedEnv::remove(METADATA_ENDPOINT_ENV_VAR);
        let err = Builder::default()
            .with_endpoint("not a url")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), &crate::errors::ErrorKind::Configuration);
    }

    #[test]
    #[serial]
    fn build_with_http_client() -> TestResult {
        let _e = ScopedEnv::remove(METADATA_ENDPOINT_ENV_VAR);
        let client = Builder::default()
            .with_http_client(reqwest::Client::new())
            .with_timeout(Duration::from_secs(1))
            .build()?;
        assert!(format!("{client:?}").contains("ReqwestFetcher"));
        Ok(())
    }
}
