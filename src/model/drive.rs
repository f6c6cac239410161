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

use super::{Location, ProductInfo, Resource};

/// http://redfish.dmtf.org/schemas/v1/Drive.v1_4_0.json
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Drive {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(flatten)]
    pub product_info: ProductInfo,
    pub status_indicator: Option<String>,
    #[serde(rename = "IndicatorLED")]
    pub indicator_led: Option<String>,
    pub revision: Option<String>,
    pub capacity_bytes: Option<i64>,
    pub failure_predicted: Option<bool>,
    pub protocol: Option<String>,
    pub media_type: Option<String>,
    pub hotspare_type: Option<String>,
    pub capable_speed_gbs: Option<f64>,
    pub negotiated_speed_gbs: Option<f64>,
    pub predicted_media_life_left_percent: Option<f64>,
    #[serde(default)]
    pub location: Vec<Location>,
}
