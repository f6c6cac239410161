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
//! Hardware inventory collection over Redfish.
//!
//! A [`RedfishClientPool`] hands out one [`InventoryCollector`] per BMC. Each
//! facet accessor walks the BMC's resource graph and returns the facet in the
//! stable shapes of [`inventory`]. [`collect_inventory`] runs every facet for
//! one server and feeds the results to an [`InventorySink`].

pub mod collection;
pub mod config;
pub mod context;
mod error;
pub mod fetch;
pub mod inventory;
pub mod mockup;
pub mod model;
mod network;
pub mod resolve;
pub mod sink;
pub mod standard;

pub use config::{AggregationPolicy, CollectorConfig};
pub use context::{CallContext, CancelToken, MemberFailure};
pub use error::{ErrorKind, RedfishError};
pub use inventory::{BasicInfoOutcome, ServerBasicInfo};
pub use mockup::MockBmc;
pub use network::{
    Endpoint, RawResponse, RedfishClientPool, RedfishClientPoolBuilder, RedfishHttpClient,
    Transport, REDFISH_ENDPOINT,
};
pub use sink::{collect_inventory, CollectError, InventoryFacet, InventorySink};
pub use standard::RedfishCollector;

use inventory::{
    Drive, EthernetInterface, Memory, NetworkAdapter, NetworkInterface, NetworkPort,
    OemHuaweiBoard, PCIeDevice, Power, Processor, Storage, Thermal,
};

/// Inventory of one BMC. All calls except `protocol` make one or more HTTP
/// requests.
///
/// `system_uri` and `chassis_uri` are `@odata.id` values, usually the ones in
/// [`ServerBasicInfo::origin_uris`].
pub trait InventoryCollector: Send + Sync + 'static {
    /// Does the BMC answer on the Redfish service root? Never fails.
    fn support(&self) -> bool;

    /// Identifier of the protocol dialect, `"RedfishV1"`
    fn protocol(&self) -> &'static str;

    /// What a walk does with a member it cannot fetch
    fn policy(&self) -> AggregationPolicy;

    /// Identity of the server, if the BMC manages exactly one chassis and
    /// one system.
    fn get_basic_info(&self) -> Result<BasicInfoOutcome, RedfishError>;

    /// Create an Administrator account
    fn create_management_account(&self, username: &str, password: &str) -> Result<(), RedfishError>;

    fn get_processors(&self, system_uri: &str) -> Result<Vec<Processor>, RedfishError>;

    fn get_memory(&self, system_uri: &str) -> Result<Vec<Memory>, RedfishError>;

    /// Ethernet interfaces with their VLANs
    fn get_ethernet_interfaces(&self, system_uri: &str)
        -> Result<Vec<EthernetInterface>, RedfishError>;

    fn get_network_interfaces(&self, system_uri: &str)
        -> Result<Vec<NetworkInterface>, RedfishError>;

    fn get_storages(&self, system_uri: &str) -> Result<Vec<Storage>, RedfishError>;

    /// Power control, voltages, supplies and redundancy. Redundancy sets list
    /// power supply names.
    fn get_power(&self, chassis_uri: &str) -> Result<Power, RedfishError>;

    fn get_thermal(&self, chassis_uri: &str) -> Result<Thermal, RedfishError>;

    /// Huawei iBMC only
    fn get_oem_huawei_boards(&self, chassis_uri: &str) -> Result<Vec<OemHuaweiBoard>, RedfishError>;

    /// Adapters with their controllers and the ports of each controller
    fn get_network_adapters(&self, chassis_uri: &str) -> Result<Vec<NetworkAdapter>, RedfishError>;

    /// Walk any NetworkPort collection
    fn get_network_ports(&self, uri: &str) -> Result<Vec<NetworkPort>, RedfishError>;

    /// Drives linked from the chassis
    fn get_drives(&self, chassis_uri: &str) -> Result<Vec<Drive>, RedfishError>;

    /// PCIe devices linked from the chassis, with their functions
    fn get_pcie_devices(&self, chassis_uri: &str) -> Result<Vec<PCIeDevice>, RedfishError>;

    /// The same collector with every call bound to `ctx`
    fn scoped(&self, ctx: CallContext) -> Box<dyn InventoryCollector>;

    /// Drains the members skipped by best-effort walks. Unscoped collectors
    /// keep one log across calls, scoped ones read the bound context's log.
    fn take_failures(&self) -> Vec<MemberFailure>;
}
