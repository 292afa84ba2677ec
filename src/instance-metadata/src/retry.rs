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

//! A bounded retry loop.
//!
//! The loop knows nothing about HTTP: the attempt function returns a
//! `Result`, and any `Err` is treated as "try again". Use it where every
//! failure is assumed to be transient, such as waiting for a service to start.

use crate::constants::SECONDS_PER_ATTEMPT;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Controls how many attempts a [retry_loop] makes and how far apart they are.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    interval: Duration,
    max_attempts: u32,
}

impl RetryPolicy {
    /// Creates a policy making at most `max_attempts` attempts, separated by
    /// `interval`. A zero `max_attempts` is treated as one.
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Derives a policy that spends roughly `max_wait` probing a service.
    ///
    /// Each failed attempt may itself take a full request timeout, so the
    /// budget is one attempt per 11 seconds, rounded down, and never less
    /// than one. Attempts are back-to-back.
    ///
    /// # Example
    /// ```
    /// # use ec2_instance_metadata::retry::RetryPolicy;
    /// # use std::time::Duration;
    /// assert_eq!(RetryPolicy::from_max_wait(Duration::from_secs(120)).max_attempts(), 10);
    /// assert_eq!(RetryPolicy::from_max_wait(Duration::from_secs(5)).max_attempts(), 1);
    /// ```
    pub fn from_max_wait(max_wait: Duration) -> Self {
        Self::new(Duration::ZERO, attempt_budget(max_wait))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

/// Computes `max(1, floor(max_wait / 11s))`.
pub fn attempt_budget(max_wait: Duration) -> u32 {
    let attempts = max_wait.as_secs() / SECONDS_PER_ATTEMPT;
    u32::try_from(attempts).unwrap_or(u32::MAX).max(1)
}

/// The final state of a [retry_loop].
#[derive(Debug, PartialEq)]
pub enum LoopOutcome<T, E> {
    /// An attempt succeeded.
    Success { value: T, attempts: u32 },
    /// The policy ran out of attempts. Contains the last error.
    Exhausted { last_error: E, attempts: u32 },
    /// The loop was cancelled. `last_error` is `None` if no attempt completed.
    Cancelled {
        last_error: Option<E>,
        attempts: u32,
    },
}

impl<T, E> LoopOutcome<T, E> {
    /// The number of attempts that were started.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Success { attempts, .. }
            | Self::Exhausted { attempts, .. }
            | Self::Cancelled { attempts, .. } => *attempts,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Calls `inner` until it succeeds, the policy is exhausted, or `cancel`
/// fires.
///
/// `inner` receives the 1-based attempt number. Between attempts the loop
/// waits `policy.interval()` using `sleep`; there is no wait after the last
/// attempt, and none at all when the interval is zero. An attempt in flight
/// when `cancel` fires is dropped.
pub async fn retry_loop<F, S, T, E>(
    mut inner: F,
    sleep: S,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> LoopOutcome<T, E>
where
    F: AsyncFnMut(u32) -> Result<T, E>,
    S: AsyncFn(Duration) -> (),
{
    let mut last_error = None;
    for attempt in 1..=policy.max_attempts() {
        if cancel.is_cancelled() {
            return LoopOutcome::Cancelled {
                last_error,
                attempts: attempt - 1,
            };
        }
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return LoopOutcome::Cancelled { last_error, attempts: attempt };
            }
            r = inner(attempt) => r,
        };
        match result {
            Ok(value) => {
                return LoopOutcome::Success {
                    value,
                    attempts: attempt,
                };
            }
            Err(e) if attempt == policy.max_attempts() => {
                return LoopOutcome::Exhausted {
                    last_error: e,
                    attempts: attempt,
                };
            }
            Err(e) => last_error = Some(e),
        }
        if !policy.interval().is_zero() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return LoopOutcome::Cancelled { last_error, attempts: attempt };
                }
                _ = sleep(policy.interval()) => {}
            }
        }
    }
    unreachable!("the loop returns on the last attempt, and max_attempts is at least 1")
}
