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

use super::{Location, Member, ProductInfo, Resource};
use crate::model::{drive as wire_drive, pcie as wire_pcie, storage as wire_storage};

impl_inventory_mapping! {
    pub struct Storage from wire_storage::Storage {
        resource: Resource => into,
        drive_uris: Vec<String> = drives => each,
        storage_controllers: Vec<StorageController> => each,
    }
}

impl_inventory_mapping! {
    pub struct StorageController from wire_storage::StorageController {
        member: Member => into,
        product_info: ProductInfo => into,
        speed_gbps: Option<f64>,
        firmware_version: Option<String>,
        supported_device_protocols: Option<Vec<String>>,
    }
}

impl_inventory_mapping! {
    pub struct Drive from wire_drive::Drive {
        resource: Resource => into,
        product_info: ProductInfo => into,
        status_indicator: Option<String>,
        indicator_led: Option<String>,
        revision: Option<String>,
        capacity_bytes: Option<i64>,
        failure_predicted: Option<bool>,
        protocol: Option<String>,
        media_type: Option<String>,
        hotspare_type: Option<String>,
        capable_speed_gbs: Option<f64>,
        negotiated_speed_gbs: Option<f64>,
        predicted_media_life_left_percent: Option<f64>,
        locations: Vec<Location> = location => each,
    }
}

impl_inventory_mapping! {
    pub struct PCIeDevice from wire_pcie::PCIeDevice {
        resource: Resource => into,
        product_info: ProductInfo => into,
        device_type: Option<String>,
        firmware_version: Option<String>,
        pcie_functions: Vec<PCIeFunction> => skip,
    }
}

impl PCIeDevice {
    pub fn with_functions(
        wire: wire_pcie::PCIeDevice,
        functions: Vec<wire_pcie::PCIeFunction>,
    ) -> Self {
        PCIeDevice {
            pcie_functions: functions.into_iter().map(Into::into).collect(),
            ..wire.into()
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct PCIeFunction {
    pub resource: Resource,
    pub device_class: Option<String>,
    pub device_id: Option<String>,
    pub vendor_id: Option<String>,
    pub subsystem_id: Option<String>,
    pub subsystem_vendor_id: Option<String>,
    /// Ethernet interfaces exposed through this function
    pub ethernet_interface_uris: Vec<String>,
}

impl From<wire_pcie::PCIeFunction> for PCIeFunction {
    fn from(wire: wire_pcie::PCIeFunction) -> Self {
        PCIeFunction {
            resource: wire.resource.into(),
            device_class: wire.device_class,
            device_id: wire.device_id,
            vendor_id: wire.vendor_id,
            subsystem_id: wire.subsystem_id,
            subsystem_vendor_id: wire.subsystem_vendor_id,
            ethernet_interface_uris: wire
                .links
                .map(|l| l.ethernet_interfaces.into_iter().map(Into::into).collect())
                .unwrap_or_default(),
        }
    }
}
