// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! AWS service support with convenience APIs
//!
//! This module provides AWS signing functionality along with the
//! constructors for ready to use clients.

// Re-export all AWS signing types
pub use kinesign_aws_v4::*;

use crate::{HttpSend, SigningClient};

/// Client signing with the scope taken from the endpoint host.
pub type EndpointClient = SigningClient<EndpointSigner>;

/// Client signing for a fixed region and service.
pub type RegionClient = SigningClient<RequestSigner>;

/// Create a client with the default signer and the default transport.
///
/// The service and region are read from the endpoint of every request, so
/// requests must go to hosts like `kinesis.us-east-1.amazonaws.com`.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> kinesign::Result<()> {
/// use kinesign::aws::{default_client, Credential};
///
/// let client = default_client(Credential::new("access_key_id", "secret_access_key"));
///
/// let req = http::Request::post("https://kinesis.us-east-1.amazonaws.com/")
///     .header("x-amz-target", "Kinesis_20131202.ListStreams")
///     .body(bytes::Bytes::from_static(b"{}"))?;
/// let resp = client.send(req).await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-http-send")]
pub fn default_client(credential: Credential) -> EndpointClient {
    client_with_http_send(credential, crate::ReqwestHttpSend::default())
}

/// Create a client with the default signer and a custom transport.
///
/// Use this to set timeouts:
///
/// ```no_run
/// use kinesign::aws::{client_with_http_send, Credential};
/// use kinesign::ReqwestHttpSend;
/// use std::time::Duration;
///
/// # fn main() -> anyhow::Result<()> {
/// let http = reqwest::Client::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// let client = client_with_http_send(
///     Credential::new("access_key_id", "secret_access_key"),
///     ReqwestHttpSend::new(http),
/// );
/// # Ok(())
/// # }
/// ```
pub fn client_with_http_send(credential: Credential, http: impl HttpSend) -> EndpointClient {
    SigningClient::new(credential, EndpointSigner::new(), http)
}

/// Create a client signing for given region and service with a custom
/// transport.
///
/// Unlike [`client_with_http_send`], the endpoint host is free, which allows
/// VPC endpoints or local emulators.
pub fn region_client(
    credential: Credential,
    region: &str,
    service: &str,
    http: impl HttpSend,
) -> RegionClient {
    SigningClient::new(credential, RequestSigner::new(service, region), http)
}
