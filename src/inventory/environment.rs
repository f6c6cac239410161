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
use serde::Serialize;

use super::{Member, ProductInfo, Resource, Threshold};
use crate::model::{power as wire_power, thermal as wire_thermal};
use crate::resolve::resolve_redundancy_set;

/// Power facet of a chassis. Each list is `None` when the BMC did not report
/// that section at all.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Power {
    pub resource: Resource,
    pub power_control: Option<Vec<PowerControl>>,
    pub voltages: Option<Vec<Voltage>>,
    pub power_supplies: Option<Vec<PowerSupply>>,
    pub redundancy: Option<Vec<Redundancy>>,
}

impl From<wire_power::Power> for Power {
    fn from(wire: wire_power::Power) -> Self {
        let supplies = wire.power_supplies.as_deref().unwrap_or_default();
        let redundancy = wire.redundancy.map(|groups| {
            groups
                .into_iter()
                .map(|group| {
                    let names = resolve_redundancy_set(&group.redundancy_set, supplies);
                    Redundancy {
                        redundancy_set: names,
                        ..group.into()
                    }
                })
                .collect()
        });
        Power {
            resource: wire.resource.into(),
            power_control: map_each(wire.power_control),
            voltages: map_each(wire.voltages),
            power_supplies: map_each(wire.power_supplies),
            redundancy,
        }
    }
}

fn map_each<W, D: From<W>>(items: Option<Vec<W>>) -> Option<Vec<D>> {
    items.map(|v| v.into_iter().map(Into::into).collect())
}

impl_inventory_mapping! {
    pub struct PowerControl from wire_power::PowerControl {
        member: Member => into,
        product_info: ProductInfo => into,
        power_consumed_watts: Option<f64>,
        power_requested_watts: Option<f64>,
        power_available_watts: Option<f64>,
        power_capacity_watts: Option<f64>,
        power_allocated_watts: Option<f64>,
        power_metrics: Option<PowerMetrics> => map,
        power_limit: Option<PowerLimit> => map,
    }
}

impl_inventory_mapping! {
    pub struct PowerMetrics from wire_power::PowerMetrics {
        min_consumed_watts: Option<f64>,
        max_consumed_watts: Option<f64>,
        average_consumed_watts: Option<f64>,
    }
}

impl_inventory_mapping! {
    pub struct PowerLimit from wire_power::PowerLimit {
        limit_in_watts: Option<f64>,
        limit_exception: Option<String>,
        correction_in_ms: Option<i64>,
    }
}

impl_inventory_mapping! {
    pub struct Voltage from wire_power::Voltage {
        member: Member => into,
        threshold: Threshold => into,
        sensor_number: Option<i64>,
        reading_volts: Option<f64>,
        min_reading_range: Option<f64>,
        max_reading_range: Option<f64>,
        physical_context: Option<String>,
    }
}

impl_inventory_mapping! {
    pub struct PowerSupply from wire_power::PowerSupply {
        member: Member => into,
        product_info: ProductInfo => into,
        power_supply_type: Option<String>,
        line_input_voltage_type: Option<String>,
        line_input_voltage: Option<f64>,
        power_capacity_watts: Option<f64>,
        last_power_output_watts: Option<f64>,
        firmware_version: Option<String>,
        indicator_led: Option<String>,
    }
}

impl_inventory_mapping! {
    pub struct Redundancy from wire_power::Redundancy {
        member: Member => into,
        mode: Option<String>,
        max_num_supported: Option<i64>,
        min_num_needed: Option<i64>,
        redundancy_enabled: Option<bool>,
        /// Names of the power supplies in the set
        redundancy_set: Vec<String> => skip,
    }
}

impl_inventory_mapping! {
    pub struct Thermal from wire_thermal::Thermal {
        resource: Resource => into,
        temperatures: Vec<Temperature> => each,
        fans: Vec<Fan> => each,
    }
}

impl_inventory_mapping! {
    pub struct Temperature from wire_thermal::Temperature {
        member: Member => into,
        threshold: Threshold => into,
        sensor_number: Option<i64>,
        reading_celsius: Option<f64>,
        min_reading_range_temp: Option<f64>,
        max_reading_range_temp: Option<f64>,
    }
}

impl_inventory_mapping! {
    pub struct Fan from wire_thermal::Fan {
        member: Member => into,
        product_info: ProductInfo => into,
        threshold: Threshold => into,
        reading: Option<f64>,
        min_reading_range: Option<f64>,
        max_reading_range: Option<f64>,
        reading_units: Option<String>,
    }
}
