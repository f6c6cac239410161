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

use super::{Member, ProductInfo, Resource, Threshold};

/// http://redfish.dmtf.org/schemas/v1/Thermal.v1_6_0.json
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Thermal {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(default)]
    pub temperatures: Vec<Temperature>,
    #[serde(default)]
    pub fans: Vec<Fan>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Temperature {
    #[serde(flatten)]
    pub member: Member,
    #[serde(flatten)]
    pub threshold: Threshold,
    pub sensor_number: Option<i64>,
    pub reading_celsius: Option<f64>,
    pub min_reading_range_temp: Option<f64>,
    pub max_reading_range_temp: Option<f64>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Fan {
    #[serde(flatten)]
    pub member: Member,
    #[serde(flatten)]
    pub product_info: ProductInfo,
    #[serde(flatten)]
    pub threshold: Threshold,
    pub reading: Option<f64>,
    pub min_reading_range: Option<f64>,
    pub max_reading_range: Option<f64>,
    pub reading_units: Option<String>,
}

#[cfg(test)]
mod test {
    #[test]
    fn test_thermal_parser() {
        let test_data = include_str!("testdata/thermal.json");
        let result: super::Thermal = serde_json::from_str(test_data).unwrap();
        assert_eq!(result.temperatures.len(), 2);
        assert_eq!(result.fans.len(), 2);
        let inlet = &result.temperatures[0];
        assert_eq!(inlet.member.member_id.as_deref(), Some("0"));
        assert_eq!(inlet.reading_celsius, Some(23.0));
        assert_eq!(inlet.threshold.upper_threshold_critical, Some(46.0));
        assert_eq!(inlet.threshold.lower_threshold_fatal, None);
        let fan = &result.fans[1];
        assert!(fan.member.odata_id.is_none());
        assert_eq!(fan.reading_units.as_deref(), Some("RPM"));
        assert_eq!(fan.product_info.part_number.as_deref(), Some("02311VVK"));
    }
}
