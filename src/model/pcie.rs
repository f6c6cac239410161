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

use super::{ODataId, ProductInfo, Resource};

/// http://redfish.dmtf.org/schemas/v1/PCIeDevice.v1_3_0.json
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PCIeDevice {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(flatten)]
    pub product_info: ProductInfo,
    pub device_type: Option<String>,
    pub firmware_version: Option<String>,
    pub links: Option<PCIeDeviceLinks>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PCIeDeviceLinks {
    #[serde(default, rename = "PCIeFunctions")]
    pub pcie_functions: Vec<ODataId>,
}

/// http://redfish.dmtf.org/schemas/v1/PCIeFunction.v1_2_0.json
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PCIeFunction {
    #[serde(flatten)]
    pub resource: Resource,
    pub device_class: Option<String>,
    pub device_id: Option<String>,
    pub vendor_id: Option<String>,
    pub subsystem_id: Option<String>,
    pub subsystem_vendor_id: Option<String>,
    pub links: Option<PCIeFunctionLinks>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct PCIeFunctionLinks {
    #[serde(default)]
    pub ethernet_interfaces: Vec<ODataId>,
}
