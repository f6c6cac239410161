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
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::{Duration, Instant},
};

use crate::RedfishError;

/// Shared flag that aborts every fetch of the aggregation call it was handed to.
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A collection member that could not be fetched during a best-effort walk.
#[derive(Debug)]
pub struct MemberFailure {
    pub uri: String,
    pub error: RedfishError,
}

/// Request scoped state for one aggregation call: deadline, cancellation and
/// the members that were skipped under `AggregationPolicy::BestEffort`.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel: CancelToken,
    failures: Arc<Mutex<Vec<MemberFailure>>>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context whose deadline is `budget` from now
    pub fn with_timeout(budget: Duration) -> Self {
        Self::default().with_deadline(Instant::now() + budget)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// A context with its own deadline and cancel token that records into the
    /// same failure log as `self`.
    pub(crate) fn renewed(&self, budget: Option<Duration>) -> CallContext {
        CallContext {
            deadline: budget.map(|b| Instant::now() + b),
            cancel: CancelToken::new(),
            failures: self.failures.clone(),
        }
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Called before every request. Fails if the call was cancelled or ran out
    /// of time, otherwise returns how much time is left (if there is a deadline)
    /// so the transport can cap its own timeout.
    pub fn check(&self, url: &str) -> Result<Option<Duration>, RedfishError> {
        if self.cancel.is_cancelled() {
            return Err(RedfishError::Cancelled {
                url: url.to_string(),
            });
        }
        match self.deadline {
            None => Ok(None),
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return Err(RedfishError::DeadlineExceeded {
                        url: url.to_string(),
                    });
                }
                Ok(Some(deadline - now))
            }
        }
    }

    pub(crate) fn record_failure(&self, uri: &str, error: RedfishError) {
        self.lock_failures().push(MemberFailure {
            uri: uri.to_string(),
            error,
        });
    }

    pub fn failure_count(&self) -> usize {
        self.lock_failures().len()
    }

    /// Drains the failures recorded so far
    pub fn take_failures(&self) -> Vec<MemberFailure> {
        std::mem::take(&mut *self.lock_failures())
    }

    // A panic while holding the lock only ever leaves a fully pushed Vec behind.
    fn lock_failures(&self) -> MutexGuard<'_, Vec<MemberFailure>> {
        self.failures.lock().unwrap_or_else(|e| e.into_inner())
    }
}
