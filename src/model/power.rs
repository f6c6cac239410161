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

use super::{Member, ODataId, ProductInfo, Resource, Threshold};

/// http://redfish.dmtf.org/schemas/v1/Power.v1_7_1.json
/// Every section is optional on its own: a BMC may report supplies but no
/// voltages, or nothing but power control.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Power {
    #[serde(flatten)]
    pub resource: Resource,
    pub power_control: Option<Vec<PowerControl>>,
    pub voltages: Option<Vec<Voltage>>,
    pub power_supplies: Option<Vec<PowerSupply>>,
    pub redundancy: Option<Vec<Redundancy>>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PowerControl {
    #[serde(flatten)]
    pub member: Member,
    #[serde(flatten)]
    pub product_info: ProductInfo,
    pub power_consumed_watts: Option<f64>,
    pub power_requested_watts: Option<f64>,
    pub power_available_watts: Option<f64>,
    pub power_capacity_watts: Option<f64>,
    pub power_allocated_watts: Option<f64>,
    pub power_metrics: Option<PowerMetrics>,
    pub power_limit: Option<PowerLimit>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PowerMetrics {
    pub min_consumed_watts: Option<f64>,
    pub max_consumed_watts: Option<f64>,
    pub average_consumed_watts: Option<f64>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PowerLimit {
    pub limit_in_watts: Option<f64>,
    pub limit_exception: Option<String>,
    pub correction_in_ms: Option<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Voltage {
    #[serde(flatten)]
    pub member: Member,
    #[serde(flatten)]
    pub threshold: Threshold,
    pub sensor_number: Option<i64>,
    pub reading_volts: Option<f64>,
    pub min_reading_range: Option<f64>,
    pub max_reading_range: Option<f64>,
    pub physical_context: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PowerSupply {
    #[serde(flatten)]
    pub member: Member,
    #[serde(flatten)]
    pub product_info: ProductInfo,
    pub power_supply_type: Option<String>,
    pub line_input_voltage_type: Option<String>,
    pub line_input_voltage: Option<f64>,
    pub power_capacity_watts: Option<f64>,
    pub last_power_output_watts: Option<f64>,
    pub firmware_version: Option<String>,
    #[serde(rename = "IndicatorLED")]
    pub indicator_led: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Redundancy {
    #[serde(flatten)]
    pub member: Member,
    pub mode: Option<String>,
    pub max_num_supported: Option<i64>,
    pub min_num_needed: Option<i64>,
    pub redundancy_enabled: Option<bool>,
    #[serde(default)]
    pub redundancy_set: Vec<ODataId>,
}

#[cfg(test)]
mod test {
    #[test]
    fn test_power_parser() {
        let test_data = include_str!("testdata/power.json");
        let result: super::Power = serde_json::from_str(test_data).unwrap();
        assert_eq!(result.resource.odata_id, "/redfish/v1/Chassis/1/Power");
        let supplies = result.power_supplies.unwrap();
        assert_eq!(supplies.len(), 2);
        assert_eq!(supplies[0].member.name.as_deref(), Some("PSU1"));
        assert_eq!(supplies[0].product_info.serial_number.as_deref(), Some("2102311TYBN0J4000123"));
        assert_eq!(supplies[1].line_input_voltage, Some(220.0));
        let control = result.power_control.unwrap();
        assert_eq!(control[0].power_consumed_watts, Some(348.0));
        assert!(control[0].power_limit.is_some());
        let redundancy = result.redundancy.unwrap();
        assert_eq!(redundancy[0].redundancy_set.len(), 3);
        assert_eq!(result.voltages.unwrap()[0].threshold.upper_threshold_critical, Some(13.2));
    }

    #[test]
    fn test_power_without_sections() {
        let result: super::Power = serde_json::from_str(
            r#"{"@odata.id": "/redfish/v1/Chassis/1/Power", "Id": "Power", "Name": "Power"}"#,
        )
        .unwrap();
        assert!(result.power_control.is_none());
        assert!(result.voltages.is_none());
        assert!(result.power_supplies.is_none());
        assert!(result.redundancy.is_none());
    }
}
