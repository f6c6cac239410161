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

use super::{ProductInfo, Resource};
use crate::model::{
    ethernet_interface as wire_eth, network_adapter as wire_adapter,
    network_interface as wire_iface,
};

impl_inventory_mapping! {
    pub struct EthernetInterface from wire_eth::EthernetInterface {
        resource: Resource => into,
        uefi_device_path: Option<String>,
        interface_enabled: Option<bool>,
        permanent_mac_address: Option<String>,
        mac_address: Option<String>,
        speed_mbps: Option<i64>,
        auto_neg: Option<bool>,
        full_duplex: Option<bool>,
        mtu_size: Option<i64>,
        host_name: Option<String>,
        fqdn: Option<String>,
        max_ipv6_static_addresses: Option<i64>,
        link_status: Option<String>,
        ipv4_addresses: Option<Vec<IPv4Address>> => map_each,
        ipv6_addresses: Option<Vec<IPv6Address>> => map_each,
        vlans: Vec<VLanNetworkInterface> => skip,
    }
}

impl EthernetInterface {
    /// The interface together with the VLANs fetched from its VLAN collection
    pub fn with_vlans(
        wire: wire_eth::EthernetInterface,
        vlans: Vec<wire_eth::VLanNetworkInterface>,
    ) -> Self {
        EthernetInterface {
            vlans: vlans.into_iter().map(Into::into).collect(),
            ..wire.into()
        }
    }
}

impl_inventory_mapping! {
    pub struct IPv4Address from wire_eth::IPv4Address {
        address: Option<String>,
        subnet_mask: Option<String>,
        address_origin: Option<String>,
        gateway: Option<String>,
    }
}

impl_inventory_mapping! {
    pub struct IPv6Address from wire_eth::IPv6Address {
        address: Option<String>,
        prefix_length: Option<i64>,
        address_origin: Option<String>,
        address_state: Option<String>,
    }
}

impl_inventory_mapping! {
    pub struct VLanNetworkInterface from wire_eth::VLanNetworkInterface {
        resource: Resource => into,
        vlan_enable: Option<bool>,
        vlan_id: Option<i64>,
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct NetworkInterface {
    pub resource: Resource,
    /// The adapter this interface belongs to
    pub network_adapter_uri: Option<String>,
}

impl From<wire_iface::NetworkInterface> for NetworkInterface {
    fn from(wire: wire_iface::NetworkInterface) -> Self {
        NetworkInterface {
            resource: wire.resource.into(),
            network_adapter_uri: wire
                .links
                .and_then(|l| l.network_adapter)
                .map(|adapter| adapter.odata_id),
        }
    }
}

impl_inventory_mapping! {
    pub struct NetworkAdapter from wire_adapter::NetworkAdapter {
        resource: Resource => into,
        product_info: ProductInfo => into,
        controllers: Vec<AdapterController> => skip,
    }
}

impl NetworkAdapter {
    /// `ports` holds the fetched ports of each controller, in controller order.
    pub fn with_ports(
        mut wire: wire_adapter::NetworkAdapter,
        ports: Vec<Vec<wire_adapter::NetworkPort>>,
    ) -> Self {
        let controllers = std::mem::take(&mut wire.controllers)
            .into_iter()
            .zip(ports.into_iter().chain(std::iter::repeat_with(Vec::new)))
            .map(|(c, p)| AdapterController::with_ports(c, p))
            .collect();
        NetworkAdapter {
            controllers,
            ..wire.into()
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct AdapterController {
    pub firmware_package_version: Option<String>,
    pub network_port_count: Option<i64>,
    pub network_ports: Vec<NetworkPort>,
}

impl AdapterController {
    pub fn with_ports(
        wire: wire_adapter::Controller,
        ports: Vec<wire_adapter::NetworkPort>,
    ) -> Self {
        AdapterController {
            firmware_package_version: wire.firmware_package_version,
            network_port_count: wire
                .controller_capabilities
                .and_then(|c| c.network_port_count),
            network_ports: ports.into_iter().map(Into::into).collect(),
        }
    }
}

impl_inventory_mapping! {
    pub struct NetworkPort from wire_adapter::NetworkPort {
        resource: Resource => into,
        physical_port_number: Option<String>,
        link_status: Option<String>,
        associated_network_addresses: Option<Vec<String>>,
    }
}
