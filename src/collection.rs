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
use std::sync::Arc;

use rayon::{prelude::*, ThreadPool};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::AggregationPolicy;
use crate::fetch::Fetcher;
use crate::model::{Collection, ODataId};
use crate::RedfishError;

/// Dereferences collection members. Output always follows envelope order,
/// however many fetches run at once.
#[derive(Clone)]
pub struct Walker {
    fetcher: Fetcher,
    policy: AggregationPolicy,
    pool: Option<Arc<ThreadPool>>,
}

impl Walker {
    /// Strictly sequential walker
    pub fn new(fetcher: Fetcher, policy: AggregationPolicy) -> Self {
        Walker {
            fetcher,
            policy,
            pool: None,
        }
    }

    /// Fetch members on `pool` instead of the calling thread
    pub fn with_pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    /// Fetch the envelope at `path`, then every member it lists. The envelope
    /// itself is always fail-fast.
    pub fn walk_collection<T>(&self, path: &str) -> Result<Vec<T>, RedfishError>
    where
        T: DeserializeOwned + Send,
    {
        let collection: Collection = self.fetcher.get_object(path)?;
        if let Some(count) = collection.count {
            if usize::try_from(count).ok() != Some(collection.members.len()) {
                warn!(
                    "{path} reports {count} members but lists {}, using the list",
                    collection.members.len()
                );
            }
        }
        self.walk_refs(&collection.members)
    }

    /// Fetch every reference in `refs`
    pub fn walk_refs<T>(&self, refs: &[ODataId]) -> Result<Vec<T>, RedfishError>
    where
        T: DeserializeOwned + Send,
    {
        let results: Vec<Result<T, RedfishError>> = match &self.pool {
            Some(pool) if refs.len() > 1 => pool.install(|| {
                refs.par_iter()
                    .map(|r| self.fetcher.get_object(&r.odata_id))
                    .collect()
            }),
            _ => {
                let mut results = Vec::with_capacity(refs.len());
                for r in refs {
                    let result = self.fetcher.get_object(&r.odata_id);
                    let failed = result.is_err();
                    results.push(result);
                    if failed && self.policy == AggregationPolicy::FailFast {
                        break;
                    }
                }
                results
            }
        };

        let mut members = Vec::with_capacity(results.len());
        for (r, result) in refs.iter().zip(results) {
            match result {
                Ok(member) => members.push(member),
                Err(e) => match self.policy {
                    AggregationPolicy::FailFast => return Err(e),
                    AggregationPolicy::BestEffort => {
                        debug!("Skipping {}: {e}", r.odata_id);
                        self.fetcher.context().record_failure(&r.odata_id, e);
                    }
                },
            }
        }
        Ok(members)
    }
}
