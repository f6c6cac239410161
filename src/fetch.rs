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
use std::{fmt::Debug, sync::Arc};

use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::context::CallContext;
use crate::network::{RawResponse, Transport};
use crate::RedfishError;

/// Typed GET/POST on top of a [`Transport`], scoped to one [`CallContext`].
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    ctx: CallContext,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>, ctx: CallContext) -> Self {
        Self { transport, ctx }
    }

    pub fn context(&self) -> &CallContext {
        &self.ctx
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Same transport, different call context
    pub fn scoped(&self, ctx: CallContext) -> Fetcher {
        Fetcher {
            transport: self.transport.clone(),
            ctx,
        }
    }

    /// GET `path`, require 200 and decode the body into `T`.
    pub fn get_object<T>(&self, path: &str) -> Result<T, RedfishError>
    where
        T: DeserializeOwned,
    {
        let resp = self.send(Method::GET, path, None)?;
        expect_status(&resp, StatusCode::OK)?;
        decode(resp)
    }

    /// POST `body` as JSON to `path` and require 201. Whatever the BMC sends
    /// back is ignored.
    pub fn post_object<B>(&self, path: &str, body: &B) -> Result<(), RedfishError>
    where
        B: Serialize + Debug,
    {
        let resp = self.post(path, body)?;
        expect_status(&resp, StatusCode::CREATED)
    }

    /// Like `post_object` but also decodes the response body into `R`.
    pub fn post_object_with_response<B, R>(&self, path: &str, body: &B) -> Result<R, RedfishError>
    where
        B: Serialize + Debug,
        R: DeserializeOwned,
    {
        let resp = self.post(path, body)?;
        expect_status(&resp, StatusCode::CREATED)?;
        decode(resp)
    }

    /// GET `path` and report whether it answered 200. Never fails: any error
    /// means "not supported".
    pub fn probe_support(&self, path: &str) -> bool {
        match self.send(Method::GET, path, None) {
            Ok(resp) => {
                if resp.status != StatusCode::OK {
                    debug!("{} answered {}, not supported", resp.url, resp.status);
                }
                resp.status == StatusCode::OK
            }
            Err(e) => {
                debug!("Support probe of {path} failed: {e}");
                false
            }
        }
    }

    fn post<B>(&self, path: &str, body: &B) -> Result<RawResponse, RedfishError>
    where
        B: Serialize + Debug,
    {
        let body_enc =
            serde_json::to_string(body).map_err(|e| RedfishError::JsonSerializeError {
                url: self.transport.url(path),
                object_debug: format!("{body:?}"),
                source: e,
            })?;
        self.send(Method::POST, path, Some(body_enc))
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<RawResponse, RedfishError> {
        let remaining = self.ctx.check(&self.transport.url(path))?;
        self.transport.issue(method, path, body, remaining)
    }
}

fn expect_status(resp: &RawResponse, expected: StatusCode) -> Result<(), RedfishError> {
    if resp.status == expected {
        return Ok(());
    }
    warn!(
        "Request to {} failed, response code {}, expected {}",
        resp.url, resp.status, expected
    );
    Err(RedfishError::HTTPErrorCode {
        url: resp.url.clone(),
        status_code: resp.status,
        expected,
    })
}

fn decode<T: DeserializeOwned>(resp: RawResponse) -> Result<T, RedfishError> {
    if resp.body.is_empty() {
        return Err(RedfishError::NoContent { url: resp.url });
    }
    serde_json::from_str(&resp.body).map_err(|e| {
        warn!("Could not decode response from {}: {e}", resp.url);
        RedfishError::JsonDeserializeError {
            url: resp.url,
            body: resp.body,
            source: e,
        }
    })
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use reqwest::{Method, StatusCode};
    use serde::Serialize;
    use serde_json::json;

    use super::Fetcher;
    use crate::context::{CallContext, CancelToken};
    use crate::mockup::MockBmc;
    use crate::model::Collection;
    use crate::{ErrorKind, RedfishError};

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct NewThing {
        name: String,
    }

    fn fetcher(bmc: MockBmc) -> (Arc<MockBmc>, Fetcher) {
        let bmc = Arc::new(bmc);
        (bmc.clone(), Fetcher::new(bmc, CallContext::new()))
    }

    #[test]
    fn test_get_object() {
        let bmc = MockBmc::new().with_collection(
            "/redfish/v1/Systems",
            &["/redfish/v1/Systems/1", "/redfish/v1/Systems/2"],
        );
        let (_, f) = fetcher(bmc);
        let c: Collection = f.get_object("/redfish/v1/Systems").unwrap();
        assert_eq!(c.count, Some(2));
        assert_eq!(c.members[1].odata_id, "/redfish/v1/Systems/2");
    }

    #[test]
    fn test_get_object_errors() {
        let bmc = MockBmc::new()
            .with_raw("/redfish/v1/Bad", StatusCode::OK, "{ not json")
            .with_raw("/redfish/v1/Empty", StatusCode::OK, "")
            .with_raw(
                "/redfish/v1/Broken",
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"error": {"message": "boom"}}"#,
            )
            .with_resource("/redfish/v1/Shape", json!({"Members": "not a list"}));
        let (_, f) = fetcher(bmc);

        let err = f.get_object::<Collection>("/redfish/v1/Missing").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);
        let err = f.get_object::<Collection>("/redfish/v1/Broken").unwrap_err();
        assert!(matches!(
            err,
            RedfishError::HTTPErrorCode {
                status_code: StatusCode::INTERNAL_SERVER_ERROR,
                ..
            }
        ));
        let err = f.get_object::<Collection>("/redfish/v1/Bad").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        let err = f.get_object::<Collection>("/redfish/v1/Empty").unwrap_err();
        assert!(matches!(err, RedfishError::NoContent { .. }));
        let err = f.get_object::<Collection>("/redfish/v1/Shape").unwrap_err();
        assert!(matches!(err, RedfishError::JsonDeserializeError { .. }));
    }

    #[test]
    fn test_post_object_requires_created() {
        let bmc = MockBmc::new()
            .with_post("/redfish/v1/Things", StatusCode::CREATED, "")
            .with_post("/redfish/v1/Others", StatusCode::OK, "{}");
        let (bmc, f) = fetcher(bmc);
        let body = NewThing {
            name: "a".to_string(),
        };
        f.post_object("/redfish/v1/Things", &body).unwrap();
        let err = f.post_object("/redfish/v1/Others", &body).unwrap_err();
        assert!(matches!(
            err,
            RedfishError::HTTPErrorCode {
                status_code: StatusCode::OK,
                expected: StatusCode::CREATED,
                ..
            }
        ));

        let sent = bmc.requests();
        assert_eq!(sent[0].method, Method::POST);
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"Name":"a"}"#));
    }

    #[test]
    fn test_post_object_with_response() {
        let bmc = MockBmc::new().with_post(
            "/redfish/v1/Things",
            StatusCode::CREATED,
            r#"{"@odata.id": "/redfish/v1/Things/7"}"#,
        );
        let (_, f) = fetcher(bmc);
        let body = NewThing {
            name: "b".to_string(),
        };
        let created: crate::model::ODataId = f
            .post_object_with_response("/redfish/v1/Things", &body)
            .unwrap();
        assert_eq!(created.odata_id, "/redfish/v1/Things/7");
    }

    #[test]
    fn test_probe_support() {
        let bmc = MockBmc::new()
            .with_resource("/redfish/v1", json!({"@odata.id": "/redfish/v1"}))
            .with_raw("/redfish/v2", StatusCode::INTERNAL_SERVER_ERROR, "");
        let (_, f) = fetcher(bmc);
        assert!(f.probe_support("/redfish/v1"));
        assert!(!f.probe_support("/redfish/v2"));
        assert!(!f.probe_support("/nothing/here"));
    }

    #[test]
    fn test_cancelled_context_sends_nothing() {
        let bmc = Arc::new(MockBmc::new().with_collection("/redfish/v1/Chassis", &[]));
        let token = CancelToken::new();
        let f = Fetcher::new(
            bmc.clone(),
            CallContext::new().with_cancel_token(token.clone()),
        );
        token.cancel();
        let err = f.get_object::<Collection>("/redfish/v1/Chassis").unwrap_err();
        assert!(matches!(err, RedfishError::Cancelled { .. }));
        assert!(bmc.requests().is_empty());
        // the probe swallows it like every other failure
        assert!(!f.probe_support("/redfish/v1/Chassis"));
    }
}
