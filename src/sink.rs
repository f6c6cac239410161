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
use tracing::{info, warn};

use crate::config::AggregationPolicy;
use crate::context::CallContext;
use crate::inventory::{
    BasicInfoOutcome, Drive, EthernetInterface, Memory, NetworkAdapter, NetworkInterface,
    OemHuaweiBoard, PCIeDevice, Power, Processor, ServerBasicInfo, Storage, Thermal,
};
use crate::{InventoryCollector, RedfishError};

/// One facet of a server's inventory, as handed to an [`InventorySink`].
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryFacet {
    Processors(Vec<Processor>),
    Memory(Vec<Memory>),
    EthernetInterfaces(Vec<EthernetInterface>),
    NetworkInterfaces(Vec<NetworkInterface>),
    Storages(Vec<Storage>),
    Power(Power),
    Thermal(Thermal),
    OemHuaweiBoards(Vec<OemHuaweiBoard>),
    NetworkAdapters(Vec<NetworkAdapter>),
    Drives(Vec<Drive>),
    PCIeDevices(Vec<PCIeDevice>),
}

impl InventoryFacet {
    pub fn name(&self) -> &'static str {
        match self {
            InventoryFacet::Processors(_) => "processors",
            InventoryFacet::Memory(_) => "memory",
            InventoryFacet::EthernetInterfaces(_) => "ethernet interfaces",
            InventoryFacet::NetworkInterfaces(_) => "network interfaces",
            InventoryFacet::Storages(_) => "storages",
            InventoryFacet::Power(_) => "power",
            InventoryFacet::Thermal(_) => "thermal",
            InventoryFacet::OemHuaweiBoards(_) => "boards",
            InventoryFacet::NetworkAdapters(_) => "network adapters",
            InventoryFacet::Drives(_) => "drives",
            InventoryFacet::PCIeDevices(_) => "PCIe devices",
        }
    }
}

/// Where collected inventory goes. Implemented upstream, typically by a
/// database writer.
pub trait InventorySink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn store_basic_info(&mut self, info: &ServerBasicInfo) -> Result<(), Self::Error>;

    fn store_facet(
        &mut self,
        server: &ServerBasicInfo,
        facet: InventoryFacet,
    ) -> Result<(), Self::Error>;
}

#[derive(thiserror::Error, Debug)]
pub enum CollectError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Redfish(#[from] RedfishError),

    #[error("Inventory sink failed. {0}")]
    Sink(#[source] E),
}

/// Collect every facet of the server behind `collector` into `sink`.
///
/// All requests share `ctx`. Under `AggregationPolicy::FailFast` the first
/// failing facet aborts the run; under `BestEffort` a failing facet is
/// recorded in `ctx` with the URI it was collected from and the run goes on.
/// A BMC that is not a single server is reported back without touching the
/// sink.
pub fn collect_inventory<S: InventorySink>(
    collector: &dyn InventoryCollector,
    ctx: &CallContext,
    sink: &mut S,
) -> Result<BasicInfoOutcome, CollectError<S::Error>> {
    let collector = collector.scoped(ctx.clone());
    let outcome = collector.get_basic_info()?;
    let info = match &outcome {
        BasicInfoOutcome::Found(info) => info,
        BasicInfoOutcome::NotApplicable {
            chassis_count,
            system_count,
        } => {
            info!("Skipping inventory: {chassis_count} chassis, {system_count} systems");
            return Ok(outcome);
        }
    };
    sink.store_basic_info(info).map_err(CollectError::Sink)?;

    let system = info.origin_uris.system.as_deref().unwrap_or_default();
    let chassis = info.origin_uris.chassis.as_deref().unwrap_or_default();
    let c = collector.as_ref();
    let facets: [(&str, &dyn Fn() -> Result<InventoryFacet, RedfishError>); 11] = [
        (system, &|| c.get_processors(system).map(InventoryFacet::Processors)),
        (system, &|| c.get_memory(system).map(InventoryFacet::Memory)),
        (system, &|| {
            c.get_ethernet_interfaces(system)
                .map(InventoryFacet::EthernetInterfaces)
        }),
        (system, &|| {
            c.get_network_interfaces(system)
                .map(InventoryFacet::NetworkInterfaces)
        }),
        (system, &|| c.get_storages(system).map(InventoryFacet::Storages)),
        (chassis, &|| c.get_power(chassis).map(InventoryFacet::Power)),
        (chassis, &|| c.get_thermal(chassis).map(InventoryFacet::Thermal)),
        (chassis, &|| {
            c.get_oem_huawei_boards(chassis)
                .map(InventoryFacet::OemHuaweiBoards)
        }),
        (chassis, &|| {
            c.get_network_adapters(chassis)
                .map(InventoryFacet::NetworkAdapters)
        }),
        (chassis, &|| c.get_drives(chassis).map(InventoryFacet::Drives)),
        (chassis, &|| c.get_pcie_devices(chassis).map(InventoryFacet::PCIeDevices)),
    ];

    for (root, fetch) in facets {
        match fetch() {
            Ok(facet) => sink.store_facet(info, facet).map_err(CollectError::Sink)?,
            Err(e) => match collector.policy() {
                AggregationPolicy::FailFast => return Err(e.into()),
                AggregationPolicy::BestEffort => {
                    warn!("Facet under {root} failed, continuing. {e}");
                    ctx.record_failure(root, e);
                }
            },
        }
    }
    Ok(outcome)
}
