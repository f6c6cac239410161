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
use serde::{Deserialize, Serialize};

use super::{ProductInfo, Resource};

/// http://redfish.dmtf.org/schemas/v1/Memory.v1_10_0.json
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Memory {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(flatten)]
    pub product_info: ProductInfo,
    #[serde(rename = "CapacityMiB")]
    pub capacity_mib: Option<i64>,
    pub operating_speed_mhz: Option<i64>,
    pub memory_device_type: Option<String>,
    pub data_width_bits: Option<i64>,
    pub rank_count: Option<i64>,
    pub device_locator: Option<String>,
    pub memory_location: Option<MemoryLocation>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct MemoryLocation {
    pub socket: Option<i64>,
    #[serde(rename = "MemoryController")]
    pub controller: Option<i64>,
    pub channel: Option<i64>,
    pub slot: Option<i64>,
}
