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

//! In-memory BMC serving a fixed resource graph. Used by this crate's tests
//! and available to upstream crates that want to exercise a collector without
//! a real BMC.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
    thread::sleep,
    time::Duration,
};

use reqwest::{Method, StatusCode};
use serde_json::json;

use crate::network::{RawResponse, Transport, REDFISH_ENDPOINT};
use crate::RedfishError;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
struct Route {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
}

#[derive(Debug, Default)]
pub struct MockBmc {
    routes: HashMap<(Method, String), Route>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockBmc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with 200 on GET `path`
    pub fn with_resource(self, path: &str, body: serde_json::Value) -> Self {
        self.with_raw(path, StatusCode::OK, &body.to_string())
    }

    /// Serve a collection envelope listing `members` on GET `path`
    pub fn with_collection(self, path: &str, members: &[&str]) -> Self {
        let refs: Vec<_> = members.iter().map(|m| json!({ "@odata.id": m })).collect();
        self.with_resource(
            path,
            json!({
                "@odata.id": path,
                "Members@odata.count": members.len(),
                "Members": refs,
            }),
        )
    }

    pub fn with_raw(mut self, path: &str, status: StatusCode, body: &str) -> Self {
        self.routes.insert(
            (Method::GET, normalize(path)),
            Route {
                status,
                body: body.to_string(),
                delay: None,
            },
        );
        self
    }

    pub fn with_post(mut self, path: &str, status: StatusCode, body: &str) -> Self {
        self.routes.insert(
            (Method::POST, normalize(path)),
            Route {
                status,
                body: body.to_string(),
                delay: None,
            },
        );
        self
    }

    /// Make GET `path` take at least `delay`. The route must already exist.
    pub fn with_delay(mut self, path: &str, delay: Duration) -> Self {
        if let Some(route) = self.routes.get_mut(&(Method::GET, normalize(path))) {
            route.delay = Some(delay);
        }
        self
    }

    /// Every request received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock_requests().clone()
    }

    /// How many GETs hit `path`
    pub fn get_count(&self, path: &str) -> usize {
        let path = normalize(path);
        self.lock_requests()
            .iter()
            .filter(|r| r.method == Method::GET && r.path == path)
            .count()
    }

    fn lock_requests(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Transport for MockBmc {
    fn url(&self, path: &str) -> String {
        format!("https://mock-bmc{}", normalize(path))
    }

    fn issue(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        _override_timeout: Option<Duration>,
    ) -> Result<RawResponse, RedfishError> {
        let path = normalize(path);
        let url = self.url(&path);
        self.lock_requests().push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            body,
        });
        let resp = match self.routes.get(&(method, path)) {
            Some(route) => {
                if let Some(d) = route.delay {
                    sleep(d);
                }
                RawResponse {
                    url,
                    status: route.status,
                    body: route.body.clone(),
                }
            }
            None => RawResponse {
                url,
                status: StatusCode::NOT_FOUND,
                body: json!({"error": {"code": "Base.1.0.ResourceMissingAtURI"}}).to_string(),
            },
        };
        Ok(resp)
    }
}

fn normalize(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{REDFISH_ENDPOINT}/{path}")
    }
}
