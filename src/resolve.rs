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
//! Cross references between resources: the links a facet walk follows and
//! the redundancy sets that are resolved against data already in hand.

use tracing::debug;

use crate::model::{
    chassis::Chassis, ethernet_interface::EthernetInterface, network_adapter::Controller,
    pcie::PCIeDevice, power::PowerSupply, ODataId,
};

/// Names of the power supplies a redundancy set points at, in reference
/// order. A reference naming several supplies yields every one of them, in
/// supply order. References that match no named supply are dropped.
pub fn resolve_redundancy_set(refs: &[ODataId], supplies: &[PowerSupply]) -> Vec<String> {
    let mut names = Vec::with_capacity(refs.len());
    for r in refs {
        let before = names.len();
        names.extend(
            supplies
                .iter()
                .filter(|ps| ps.member.odata_id.as_deref() == Some(r.odata_id.as_str()))
                .filter_map(|ps| ps.member.name.clone()),
        );
        if names.len() == before {
            debug!("Redundancy member {} not resolved", r.odata_id);
        }
    }
    names
}

/// Where the VLANs of `iface` live
pub fn vlan_collection_uri(iface: &EthernetInterface) -> String {
    match &iface.vlans {
        Some(link) => link.odata_id.clone(),
        None => format!("{}/VLANs", iface.resource.odata_id.trim_end_matches('/')),
    }
}

pub fn chassis_drive_links(chassis: &Chassis) -> &[ODataId] {
    chassis
        .links
        .as_ref()
        .map(|l| l.drives.as_slice())
        .unwrap_or_default()
}

pub fn chassis_pcie_device_links(chassis: &Chassis) -> &[ODataId] {
    chassis
        .links
        .as_ref()
        .map(|l| l.pcie_devices.as_slice())
        .unwrap_or_default()
}

pub fn pcie_function_links(device: &PCIeDevice) -> &[ODataId] {
    device
        .links
        .as_ref()
        .map(|l| l.pcie_functions.as_slice())
        .unwrap_or_default()
}

pub fn network_port_links(controller: &Controller) -> &[ODataId] {
    controller
        .links
        .as_ref()
        .map(|l| l.network_ports.as_slice())
        .unwrap_or_default()
}
