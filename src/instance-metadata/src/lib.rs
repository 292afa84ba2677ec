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

//! A client for the EC2 instance metadata service.
//!
//! Cloud instances can query a link-local HTTP service, at
//! `http://169.254.169.254/latest/`, for information about themselves. This
//! includes temporary credentials for the IAM role attached to the instance
//! through its instance profile. This crate provides:
//!
//! * [MetadataServiceClient][client::MetadataServiceClient], to wait for the
//!   service to start, fetch arbitrary paths, discover the instance profile,
//!   and fetch its credentials.
//! * [HttpFetcher][http::HttpFetcher], the transport capability used by the
//!   client. Applications may provide their own.
//! * [retry_loop][retry::retry_loop], the bounded retry helper used to wait for
//!   the service.
//!
//! The crate does not cache or refresh credentials.

pub mod client;
pub mod constants;
pub mod credentials;
pub mod errors;
pub mod http;
pub mod options;
pub mod retry;

/// A `Result` alias where the `Err` case is
/// `ec2_instance_metadata::errors::Error`.
pub type Result<T> = std::result::Result<T, crate::errors::Error>;
