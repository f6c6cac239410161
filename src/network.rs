/*
 * SPDX-FileCopyrightText: Copyright (c) 2023 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: MIT
 *
 * Permission is hereby granted, free of charge, to any person obtaining a
 * copy of this software and associated documentation files (the "Software"),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in
 * all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
 * THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */
use std::{sync::Arc, time::Duration};

use reqwest::{
    blocking::Client as HttpClient, blocking::ClientBuilder as HttpClientBuilder,
    header::HeaderValue, header::ACCEPT, header::CONTENT_TYPE, Method, StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{AggregationPolicy, CollectorConfig};
use crate::standard::RedfishCollector;
use crate::InventoryCollector;
pub use crate::RedfishError;

pub const REDFISH_ENDPOINT: &str = "redfish/v1";

/// What came back from the BMC, before anybody looked at the body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

/// The only way the rest of the crate talks to a BMC.
pub trait Transport: Send + Sync {
    /// Sends one request. `path` is either absolute (`/redfish/v1/...`, as found
    /// in `@odata.id`) or relative to the service root.
    fn issue(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        override_timeout: Option<Duration>,
    ) -> Result<RawResponse, RedfishError>;

    /// Full URL for `path`, used in errors and logs
    fn url(&self, path: &str) -> String;
}

#[derive(Debug)]
pub struct RedfishClientPoolBuilder {
    config: CollectorConfig,
}

impl RedfishClientPoolBuilder {
    /// Prevents the Redfish Client from accepting self signed certificates
    /// and other invalid certificates.
    ///
    /// By default self signed certificates will be accepted, since BMCs usually
    /// use those.
    pub fn reject_invalid_certs(mut self) -> RedfishClientPoolBuilder {
        self.config.accept_invalid_certs = false;
        self
    }

    /// Overwrites the timeout that will be applied to every request
    pub fn timeout(mut self, timeout: Duration) -> RedfishClientPoolBuilder {
        self.config.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn policy(mut self, policy: AggregationPolicy) -> RedfishClientPoolBuilder {
        self.config.policy = policy;
        self
    }

    pub fn max_concurrent_fetches(mut self, n: usize) -> RedfishClientPoolBuilder {
        self.config.max_concurrent_fetches = n;
        self
    }

    /// Builds a Redfish Client Network Configuration
    pub fn build(&self) -> Result<RedfishClientPool, RedfishError> {
        let http_client = HttpClientBuilder::new()
            .danger_accept_invalid_certs(self.config.accept_invalid_certs)
            .timeout(self.config.timeout())
            .build()
            .map_err(|source| RedfishError::ClientBuildError { source })?;
        Ok(RedfishClientPool {
            http_client,
            config: self.config.clone(),
        })
    }
}

/// The endpoint that the redfish client connects to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    /// Hostname or IP address of BMC
    pub host: String,
    /// BMC port. If absent the default HTTPS port 443 will be used
    pub port: Option<u16>,
    /// BMC username
    pub user: Option<String>,
    /// BMC password
    pub password: Option<String>,
    /// Send the credentials as HTTP Basic auth on every request
    pub basic_auth: bool,
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint {
            host: "".to_string(),
            port: None,
            user: None,
            password: None,
            basic_auth: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RedfishClientPool {
    http_client: HttpClient,
    config: CollectorConfig,
}

impl RedfishClientPool {
    /// Returns Builder for configuring a Redfish HTTP connection pool
    pub fn builder() -> RedfishClientPoolBuilder {
        RedfishClientPoolBuilder {
            config: CollectorConfig::default(),
        }
    }

    /// Builder seeded from a loaded configuration
    pub fn builder_from_config(config: CollectorConfig) -> RedfishClientPoolBuilder {
        RedfishClientPoolBuilder { config }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Creates an inventory collector for a certain endpoint.
    ///
    /// No request is made until a facet is asked for. Use `support()` on the
    /// result to check the BMC speaks Redfish at all.
    pub fn create_client(&self, endpoint: Endpoint) -> Box<dyn InventoryCollector> {
        Box::new(self.create_collector(endpoint))
    }

    pub fn create_collector(&self, endpoint: Endpoint) -> RedfishCollector {
        let client = RedfishHttpClient::new(self.http_client.clone(), endpoint)
            .with_request_timeout(self.config.timeout());
        RedfishCollector::new(Arc::new(client), self.config.clone())
    }
}

/// A HTTP client which targets a single BMC
pub struct RedfishHttpClient {
    endpoint: Endpoint,
    http_client: HttpClient,
    request_timeout: Option<Duration>,
}

impl RedfishHttpClient {
    pub fn new(http_client: HttpClient, endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            http_client,
            request_timeout: None,
        }
    }

    /// Timeout `http_client` was built with. A per-call deadline never
    /// stretches a request past it.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

impl Transport for RedfishHttpClient {
    fn url(&self, path: &str) -> String {
        let authority = match self.endpoint.port {
            Some(p) => format!("{}:{}", self.endpoint.host, p),
            None => self.endpoint.host.clone(),
        };
        if path.starts_with('/') {
            format!("https://{authority}{path}")
        } else {
            format!("https://{authority}/{REDFISH_ENDPOINT}/{path}")
        }
    }

    // All the HTTP requests happen from here.
    fn issue(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        override_timeout: Option<Duration>,
    ) -> Result<RawResponse, RedfishError> {
        let url = self.url(path);
        // Bodies we send can carry credentials, only their size is logged.
        debug!(
            "TX {} {} ({} bytes)",
            method,
            url,
            body.as_ref().map(String::len).unwrap_or_default()
        );

        let mut req_b = self
            .http_client
            .request(method, &url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if self.endpoint.basic_auth {
            if let Some(user) = &self.endpoint.user {
                req_b = req_b.basic_auth(user, self.endpoint.password.as_ref());
            }
        }
        let timeout = match (override_timeout, self.request_timeout) {
            (Some(remaining), Some(configured)) => Some(remaining.min(configured)),
            (remaining, _) => remaining,
        };
        if let Some(t) = timeout {
            req_b = req_b.timeout(t);
        }
        if let Some(b) = body {
            req_b = req_b.body(b);
        }
        let response = req_b.send().map_err(|e| {
            warn!("Request to {url} failed: {e}");
            RedfishError::NetworkError {
                url: url.clone(),
                source: e,
            }
        })?;
        let status = response.status();
        // read the body even if not status 2XX, because BMCs give useful error messages as JSON
        let body = response.text().map_err(|e| RedfishError::NetworkError {
            url: url.clone(),
            source: e,
        })?;
        if body.is_empty() {
            debug!("RX {status}");
        } else {
            debug!("RX {status} {body}");
        }
        Ok(RawResponse { url, status, body })
    }
}
