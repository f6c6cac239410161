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
use std::fmt;

use reqwest::StatusCode;

/// Coarse classification of a [`RedfishError`], used by callers that only care
/// about which layer failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Could not talk to the BMC at all: connection, TLS, timeout, cancellation.
    Transport,
    /// The BMC answered with an unexpected HTTP status.
    Protocol,
    /// The body was not JSON or did not have the expected shape.
    Decode,
    /// Well-formed response that breaks a required domain invariant.
    Business,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RedfishError {
    #[error("Network error talking to BMC at {url}. {source}")]
    NetworkError { url: String, source: reqwest::Error },

    #[error("Could not build HTTP client. {source}")]
    ClientBuildError { source: reqwest::Error },

    #[error("HTTP {status_code} at {url}, expected {expected}. See debug logs for details.")]
    HTTPErrorCode {
        url: String,
        status_code: StatusCode,
        expected: StatusCode,
    },

    #[error("Could not deserialize response from {url}. Body: {body}. {source}")]
    JsonDeserializeError {
        url: String,
        body: String,
        source: serde_json::Error,
    },

    #[error("Could not serialize request body for {url}. Obj: {object_debug}. {source}")]
    JsonSerializeError {
        url: String,
        object_debug: String,
        source: serde_json::Error,
    },

    #[error("Remote returned empty body at {url}")]
    NoContent { url: String },

    #[error("Chassis {chassis_uri} has no ChassisType, cannot classify the server")]
    MissingChassisType { chassis_uri: String },

    #[error("Request to {url} cancelled")]
    Cancelled { url: String },

    #[error("Deadline exceeded before request to {url}")]
    DeadlineExceeded { url: String },
}

impl RedfishError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RedfishError::NetworkError { .. }
            | RedfishError::ClientBuildError { .. }
            | RedfishError::Cancelled { .. }
            | RedfishError::DeadlineExceeded { .. } => ErrorKind::Transport,
            RedfishError::HTTPErrorCode { .. } => ErrorKind::Protocol,
            RedfishError::JsonDeserializeError { .. }
            | RedfishError::JsonSerializeError { .. }
            | RedfishError::NoContent { .. } => ErrorKind::Decode,
            RedfishError::MissingChassisType { .. } => ErrorKind::Business,
        }
    }

    /// URL of the request that failed, when the error is tied to one.
    pub fn url(&self) -> Option<&str> {
        match self {
            RedfishError::NetworkError { url, .. }
            | RedfishError::HTTPErrorCode { url, .. }
            | RedfishError::JsonDeserializeError { url, .. }
            | RedfishError::JsonSerializeError { url, .. }
            | RedfishError::NoContent { url }
            | RedfishError::Cancelled { url }
            | RedfishError::DeadlineExceeded { url } => Some(url),
            RedfishError::ClientBuildError { .. } | RedfishError::MissingChassisType { .. } => {
                None
            }
        }
    }
}
