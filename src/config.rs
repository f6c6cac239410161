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
use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;

/// What a collection walk does when one member cannot be fetched.
#[derive(Debug, Default, Serialize, Deserialize, Copy, Clone, Eq, PartialEq)]
pub enum AggregationPolicy {
    /// Abort the walk and return the error of the failing member.
    #[default]
    FailFast,
    /// Skip the failing member and record it in the call's failure log.
    BestEffort,
}

impl fmt::Display for AggregationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Collector settings. Every field has a default so a partial document
/// (or an empty one) deserializes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CollectorConfig {
    /// Timeout applied to every HTTP request, in milliseconds
    pub timeout_ms: u64,
    /// BMCs usually ship self signed certificates, so this defaults to true
    pub accept_invalid_certs: bool,
    pub policy: AggregationPolicy,
    /// Upper bound on member fetches in flight for one collection walk.
    /// 1 keeps every walk strictly sequential.
    pub max_concurrent_fetches: usize,
    /// Overall budget for one aggregation call, if any
    pub call_deadline_secs: Option<u64>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        CollectorConfig {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            accept_invalid_certs: true,
            policy: AggregationPolicy::FailFast,
            max_concurrent_fetches: 1,
            call_deadline_secs: None,
        }
    }
}

impl CollectorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn call_deadline(&self) -> Option<Duration> {
        self.call_deadline_secs.map(Duration::from_secs)
    }

    // Zero would mean "no workers at all", treat it as sequential.
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_fetches.max(1)
    }
}
