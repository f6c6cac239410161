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

use super::{ODataId, Resource};

/// http://redfish.dmtf.org/schemas/v1/EthernetInterface.v1_6_0.json
/// The EthernetInterface schema contains an inventory of Ethernet interface components.
/// This can include Network Device parameters such as current IP addresses, MAC address, link status, etc.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct EthernetInterface {
    #[serde(flatten)]
    pub resource: Resource,
    // uefi_device_path is present for systems interfaces except lenovo.
    pub uefi_device_path: Option<String>,
    pub interface_enabled: Option<bool>,
    #[serde(rename = "PermanentMACAddress")]
    pub permanent_mac_address: Option<String>,
    #[serde(rename = "MACAddress")]
    pub mac_address: Option<String>,
    pub speed_mbps: Option<i64>,
    pub auto_neg: Option<bool>,
    pub full_duplex: Option<bool>,
    #[serde(rename = "MTUSize")]
    pub mtu_size: Option<i64>,
    pub host_name: Option<String>,
    #[serde(rename = "FQDN")]
    pub fqdn: Option<String>,
    #[serde(rename = "MaxIPv6StaticAddresses")]
    pub max_ipv6_static_addresses: Option<i64>,
    pub link_status: Option<String>,
    #[serde(rename = "IPv4Addresses")]
    pub ipv4_addresses: Option<Vec<IPv4Address>>,
    #[serde(rename = "IPv6Addresses")]
    pub ipv6_addresses: Option<Vec<IPv6Address>>,
    #[serde(rename = "VLANs")]
    pub vlans: Option<ODataId>,
}

/// http://redfish.dmtf.org/schemas/v1/IPAddresses.v1_0_10.json
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct IPv4Address {
    pub address: Option<String>,
    pub subnet_mask: Option<String>,
    pub address_origin: Option<String>,
    pub gateway: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct IPv6Address {
    pub address: Option<String>,
    pub prefix_length: Option<i64>,
    pub address_origin: Option<String>,
    pub address_state: Option<String>,
}

/// http://redfish.dmtf.org/schemas/v1/VLanNetworkInterface.v1_3_0.json
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct VLanNetworkInterface {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(rename = "VLANEnable")]
    pub vlan_enable: Option<bool>,
    #[serde(rename = "VLANId")]
    pub vlan_id: Option<i64>,
}
