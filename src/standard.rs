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
use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use crate::collection::Walker;
use crate::config::{AggregationPolicy, CollectorConfig};
use crate::context::{CallContext, MemberFailure};
use crate::fetch::Fetcher;
use crate::inventory::{
    BasicInfoOutcome, Drive, EthernetInterface, Memory, NetworkAdapter, NetworkInterface,
    NetworkPort, OemHuaweiBoard, OriginUris, PCIeDevice, Power, Processor, ServerBasicInfo,
    Storage, Thermal, PROTOCOL,
};
use crate::model::{
    self, account_service::ManagerAccountCreate, chassis::Chassis, system::ComputerSystem,
    Collection,
};
use crate::network::Transport;
use crate::resolve;
use crate::{InventoryCollector, RedfishError};

const SERVICE_ROOT: &str = "/redfish/v1";
const CHASSIS_COLLECTION: &str = "/redfish/v1/Chassis";
const SYSTEM_COLLECTION: &str = "/redfish/v1/Systems";
const ACCOUNTS: &str = "/redfish/v1/AccountService/Accounts";

/// Collects inventory with the plain DMTF schema plus the Huawei board
/// extension.
#[derive(Clone)]
pub struct RedfishCollector {
    transport: Arc<dyn Transport>,
    config: CollectorConfig,
    ctx: Option<CallContext>,
    // Failure log of unbound calls
    unbound: CallContext,
    pool: Option<Arc<ThreadPool>>,
}

impl RedfishCollector {
    pub fn new(transport: Arc<dyn Transport>, config: CollectorConfig) -> Self {
        let pool = fetch_pool(config.concurrency());
        RedfishCollector {
            transport,
            config,
            ctx: None,
            unbound: CallContext::new(),
            pool,
        }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// This collector bound to `ctx`: every fetch checks its deadline and
    /// cancel token, and best-effort walks record their failures in it.
    pub fn with_context(&self, ctx: CallContext) -> RedfishCollector {
        RedfishCollector {
            ctx: Some(ctx),
            ..self.clone()
        }
    }

    // Unbound collectors start a fresh deadline for every facet call, but
    // keep one failure log across calls.
    fn context(&self) -> CallContext {
        match &self.ctx {
            Some(ctx) => ctx.clone(),
            None => self.unbound.renewed(self.config.call_deadline()),
        }
    }

    fn fetcher(&self) -> Fetcher {
        Fetcher::new(self.transport.clone(), self.context())
    }

    fn walker(&self) -> Walker {
        let walker = Walker::new(self.fetcher(), self.config.policy);
        match &self.pool {
            Some(pool) => walker.with_pool(pool.clone()),
            None => walker,
        }
    }

    fn ethernet_interface(
        &self,
        walker: &Walker,
        iface: model::ethernet_interface::EthernetInterface,
    ) -> Result<EthernetInterface, RedfishError> {
        let vlans = walker.walk_collection(&resolve::vlan_collection_uri(&iface))?;
        Ok(EthernetInterface::with_vlans(iface, vlans))
    }

    fn network_adapter(
        &self,
        walker: &Walker,
        adapter: model::network_adapter::NetworkAdapter,
    ) -> Result<NetworkAdapter, RedfishError> {
        let ports = adapter
            .controllers
            .iter()
            .map(|c| walker.walk_refs(resolve::network_port_links(c)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NetworkAdapter::with_ports(adapter, ports))
    }

    fn pcie_device(
        &self,
        walker: &Walker,
        device: model::pcie::PCIeDevice,
    ) -> Result<PCIeDevice, RedfishError> {
        let functions = walker.walk_refs(resolve::pcie_function_links(&device))?;
        Ok(PCIeDevice::with_functions(device, functions))
    }
}

fn fetch_pool(threads: usize) -> Option<Arc<ThreadPool>> {
    if threads <= 1 {
        return None;
    }
    match ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("redfish-fetch-{i}"))
        .build()
    {
        Ok(pool) => Some(Arc::new(pool)),
        Err(e) => {
            warn!("Could not start {threads} fetch threads, fetching sequentially. {e}");
            None
        }
    }
}

impl InventoryCollector for RedfishCollector {
    fn support(&self) -> bool {
        self.fetcher().probe_support(SERVICE_ROOT)
    }

    fn protocol(&self) -> &'static str {
        PROTOCOL
    }

    fn policy(&self) -> AggregationPolicy {
        self.config.policy
    }

    fn get_basic_info(&self) -> Result<BasicInfoOutcome, RedfishError> {
        let fetcher = self.fetcher();
        let chassis: Collection = fetcher.get_object(CHASSIS_COLLECTION)?;
        let systems: Collection = fetcher.get_object(SYSTEM_COLLECTION)?;

        let (chassis_ref, system_ref) = match (&chassis.members[..], &systems.members[..]) {
            ([c], [s]) => (c.odata_id.clone(), s.odata_id.clone()),
            _ => {
                debug!(
                    "{} chassis and {} systems, not a single server",
                    chassis.members.len(),
                    systems.members.len()
                );
                return Ok(BasicInfoOutcome::NotApplicable {
                    chassis_count: chassis.members.len(),
                    system_count: systems.members.len(),
                });
            }
        };

        let system: ComputerSystem = fetcher.get_object(&system_ref)?;
        let chassis: Chassis = fetcher.get_object(&chassis_ref)?;
        let server_type = match chassis.chassis_type {
            Some(t) if !t.is_empty() => t,
            _ => {
                warn!("{chassis_ref} has no ChassisType");
                return Err(RedfishError::MissingChassisType {
                    chassis_uri: chassis_ref,
                });
            }
        };
        info!("{system_ref} is a {server_type} server");
        Ok(BasicInfoOutcome::Found(ServerBasicInfo {
            origin_uris: OriginUris {
                system: Some(system_ref),
                chassis: Some(chassis_ref),
            },
            physical_uuid: system.uuid,
            protocol: PROTOCOL.to_string(),
            server_type,
        }))
    }

    fn create_management_account(&self, username: &str, password: &str) -> Result<(), RedfishError> {
        let account = ManagerAccountCreate::administrator(username, password);
        self.fetcher().post_object(ACCOUNTS, &account)?;
        info!("Created management account {account}");
        Ok(())
    }

    fn get_processors(&self, system_uri: &str) -> Result<Vec<Processor>, RedfishError> {
        let processors: Vec<model::processor::Processor> = self
            .walker()
            .walk_collection(&format!("{system_uri}/Processors"))?;
        info!("Found {} processors under {system_uri}", processors.len());
        Ok(processors.into_iter().map(Processor::from).collect())
    }

    fn get_memory(&self, system_uri: &str) -> Result<Vec<Memory>, RedfishError> {
        let memory: Vec<model::memory::Memory> = self
            .walker()
            .walk_collection(&format!("{system_uri}/Memory"))?;
        info!("Found {} memory modules under {system_uri}", memory.len());
        Ok(memory.into_iter().map(Memory::from).collect())
    }

    fn get_ethernet_interfaces(
        &self,
        system_uri: &str,
    ) -> Result<Vec<EthernetInterface>, RedfishError> {
        let walker = self.walker();
        let interfaces: Vec<model::ethernet_interface::EthernetInterface> =
            walker.walk_collection(&format!("{system_uri}/EthernetInterfaces"))?;
        let ret = interfaces
            .into_iter()
            .map(|iface| self.ethernet_interface(&walker, iface))
            .collect::<Result<Vec<_>, _>>()?;
        info!("Found {} ethernet interfaces under {system_uri}", ret.len());
        Ok(ret)
    }

    fn get_network_interfaces(
        &self,
        system_uri: &str,
    ) -> Result<Vec<NetworkInterface>, RedfishError> {
        let interfaces: Vec<model::network_interface::NetworkInterface> = self
            .walker()
            .walk_collection(&format!("{system_uri}/NetworkInterfaces"))?;
        info!("Found {} network interfaces under {system_uri}", interfaces.len());
        Ok(interfaces.into_iter().map(NetworkInterface::from).collect())
    }

    fn get_storages(&self, system_uri: &str) -> Result<Vec<Storage>, RedfishError> {
        let storages: Vec<model::storage::Storage> = self
            .walker()
            .walk_collection(&format!("{system_uri}/Storages"))?;
        info!("Found {} storage subsystems under {system_uri}", storages.len());
        Ok(storages.into_iter().map(Storage::from).collect())
    }

    fn get_power(&self, chassis_uri: &str) -> Result<Power, RedfishError> {
        let power: model::power::Power = self
            .fetcher()
            .get_object(&format!("{chassis_uri}/Power"))?;
        Ok(Power::from(power))
    }

    fn get_thermal(&self, chassis_uri: &str) -> Result<Thermal, RedfishError> {
        let thermal: model::thermal::Thermal = self
            .fetcher()
            .get_object(&format!("{chassis_uri}/Thermal"))?;
        Ok(Thermal::from(thermal))
    }

    fn get_oem_huawei_boards(&self, chassis_uri: &str) -> Result<Vec<OemHuaweiBoard>, RedfishError> {
        let boards: Vec<model::oem::huawei::Board> = self
            .walker()
            .walk_collection(&format!("{chassis_uri}/Boards"))?;
        info!("Found {} boards under {chassis_uri}", boards.len());
        Ok(boards.into_iter().map(OemHuaweiBoard::from).collect())
    }

    fn get_network_adapters(&self, chassis_uri: &str) -> Result<Vec<NetworkAdapter>, RedfishError> {
        let walker = self.walker();
        let adapters: Vec<model::network_adapter::NetworkAdapter> =
            walker.walk_collection(&format!("{chassis_uri}/NetworkAdapters"))?;
        let ret = adapters
            .into_iter()
            .map(|adapter| self.network_adapter(&walker, adapter))
            .collect::<Result<Vec<_>, _>>()?;
        info!("Found {} network adapters under {chassis_uri}", ret.len());
        Ok(ret)
    }

    fn get_network_ports(&self, uri: &str) -> Result<Vec<NetworkPort>, RedfishError> {
        let ports: Vec<model::network_adapter::NetworkPort> = self.walker().walk_collection(uri)?;
        Ok(ports.into_iter().map(NetworkPort::from).collect())
    }

    fn get_drives(&self, chassis_uri: &str) -> Result<Vec<Drive>, RedfishError> {
        let walker = self.walker();
        let chassis: Chassis = walker.fetcher().get_object(chassis_uri)?;
        let drives: Vec<model::drive::Drive> =
            walker.walk_refs(resolve::chassis_drive_links(&chassis))?;
        info!("Found {} drives under {chassis_uri}", drives.len());
        Ok(drives.into_iter().map(Drive::from).collect())
    }

    fn get_pcie_devices(&self, chassis_uri: &str) -> Result<Vec<PCIeDevice>, RedfishError> {
        let walker = self.walker();
        let chassis: Chassis = walker.fetcher().get_object(chassis_uri)?;
        let devices: Vec<model::pcie::PCIeDevice> =
            walker.walk_refs(resolve::chassis_pcie_device_links(&chassis))?;
        let ret = devices
            .into_iter()
            .map(|device| self.pcie_device(&walker, device))
            .collect::<Result<Vec<_>, _>>()?;
        info!("Found {} PCIe devices under {chassis_uri}", ret.len());
        Ok(ret)
    }

    fn scoped(&self, ctx: CallContext) -> Box<dyn InventoryCollector> {
        Box::new(self.with_context(ctx))
    }

    fn take_failures(&self) -> Vec<MemberFailure> {
        self.ctx.as_ref().unwrap_or(&self.unbound).take_failures()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use reqwest::{Method, StatusCode};
    use serde_json::json;

    use super::RedfishCollector;
    use crate::config::{AggregationPolicy, CollectorConfig};
    use crate::context::{CallContext, MemberFailure};
    use crate::inventory::BasicInfoOutcome;
    use crate::mockup::MockBmc;
    use crate::{ErrorKind, InventoryCollector, RedfishError};

    fn collector(bmc: MockBmc) -> (Arc<MockBmc>, RedfishCollector) {
        let bmc = Arc::new(bmc);
        (bmc.clone(), RedfishCollector::new(bmc, CollectorConfig::default()))
    }

    fn single_server(chassis: serde_json::Value) -> MockBmc {
        MockBmc::new()
            .with_collection("/redfish/v1/Chassis", &["/redfish/v1/Chassis/1"])
            .with_collection("/redfish/v1/Systems", &["/redfish/v1/Systems/1"])
            .with_resource(
                "/redfish/v1/Systems/1",
                json!({
                    "@odata.id": "/redfish/v1/Systems/1",
                    "Id": "1",
                    "UUID": "877AA112-58F9-8711-8000-58F9877AA112"
                }),
            )
            .with_resource("/redfish/v1/Chassis/1", chassis)
    }

    #[test]
    fn test_basic_info_single_server() {
        let (_, c) = collector(single_server(json!({
            "@odata.id": "/redfish/v1/Chassis/1",
            "ChassisType": "RackMount"
        })));
        let info = c.get_basic_info().unwrap().found().unwrap();
        assert_eq!(info.server_type, "RackMount");
        assert_eq!(info.protocol, "RedfishV1");
        assert_eq!(info.origin_uris.system.as_deref(), Some("/redfish/v1/Systems/1"));
        assert_eq!(info.origin_uris.chassis.as_deref(), Some("/redfish/v1/Chassis/1"));
        assert_eq!(
            info.physical_uuid.as_deref(),
            Some("877AA112-58F9-8711-8000-58F9877AA112")
        );
    }

    #[test]
    fn test_basic_info_missing_chassis_type() {
        for chassis in [
            json!({"@odata.id": "/redfish/v1/Chassis/1", "ChassisType": ""}),
            json!({"@odata.id": "/redfish/v1/Chassis/1"}),
        ] {
            let (_, c) = collector(single_server(chassis));
            let err = c.get_basic_info().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Business);
            assert!(matches!(err, RedfishError::MissingChassisType { .. }));
        }
    }

    #[test]
    fn test_basic_info_not_applicable() {
        let bmc = MockBmc::new()
            .with_collection(
                "/redfish/v1/Chassis",
                &["/redfish/v1/Chassis/1", "/redfish/v1/Chassis/2"],
            )
            .with_collection("/redfish/v1/Systems", &["/redfish/v1/Systems/1"]);
        let (bmc, c) = collector(bmc);
        assert_eq!(
            c.get_basic_info().unwrap(),
            BasicInfoOutcome::NotApplicable {
                chassis_count: 2,
                system_count: 1
            }
        );
        // no member was dereferenced
        assert_eq!(bmc.requests().len(), 2);

        let bmc = MockBmc::new()
            .with_collection("/redfish/v1/Chassis", &["/redfish/v1/Chassis/1"])
            .with_collection("/redfish/v1/Systems", &[]);
        let (_, c) = collector(bmc);
        assert!(c.get_basic_info().unwrap().found().is_none());
    }

    #[test]
    fn test_create_management_account() {
        let bmc = MockBmc::new().with_post(
            "/redfish/v1/AccountService/Accounts",
            StatusCode::CREATED,
            "",
        );
        let (bmc, c) = collector(bmc);
        c.create_management_account("ops", "pa55").unwrap();
        let sent = bmc.requests();
        assert_eq!(sent[0].method, Method::POST);
        let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"UserName": "ops", "Password": "pa55", "RoleId": "Administrator"})
        );

        let bmc = MockBmc::new().with_post(
            "/redfish/v1/AccountService/Accounts",
            StatusCode::BAD_REQUEST,
            r#"{"error": {}}"#,
        );
        let (_, c) = collector(bmc);
        let err = c.create_management_account("ops", "pa55").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }

    #[test]
    fn test_support_and_protocol() {
        let bmc = MockBmc::new().with_resource("/redfish/v1", json!({"@odata.id": "/redfish/v1"}));
        let (_, c) = collector(bmc);
        assert!(c.support());
        assert_eq!(c.protocol(), "RedfishV1");

        let bmc = MockBmc::new().with_raw("/redfish/v1", StatusCode::INTERNAL_SERVER_ERROR, "");
        let (_, c) = collector(bmc);
        assert!(!c.support());
    }

    #[test]
    fn test_vlans_walk_their_own_members() {
        let iface = "/redfish/v1/Systems/1/EthernetInterfaces/eth0";
        let bmc = MockBmc::new()
            .with_collection("/redfish/v1/Systems/1/EthernetInterfaces", &[iface])
            .with_resource(iface, json!({"@odata.id": iface, "Id": "eth0"}))
            .with_collection(
                &format!("{iface}/VLANs"),
                &[&format!("{iface}/VLANs/10"), &format!("{iface}/VLANs/20")],
            )
            .with_resource(
                &format!("{iface}/VLANs/10"),
                json!({"@odata.id": format!("{iface}/VLANs/10"), "VLANId": 10, "VLANEnable": true}),
            )
            .with_resource(
                &format!("{iface}/VLANs/20"),
                json!({"@odata.id": format!("{iface}/VLANs/20"), "VLANId": 20, "VLANEnable": false}),
            );
        let (_, c) = collector(bmc);
        let ifaces = c.get_ethernet_interfaces("/redfish/v1/Systems/1").unwrap();
        assert_eq!(ifaces.len(), 1);
        let ids: Vec<_> = ifaces[0].vlans.iter().map(|v| v.vlan_id).collect();
        assert_eq!(ids, [Some(10), Some(20)]);
        assert_eq!(ifaces[0].vlans[1].vlan_enable, Some(false));
    }

    #[test]
    fn test_thermal_decode_error_propagates() {
        let bmc = MockBmc::new().with_raw(
            "/redfish/v1/Chassis/1/Thermal",
            StatusCode::OK,
            r#"{"@odata.id": "/redfish/v1/Chassis/1/Thermal", "Fans": {}}"#,
        );
        let (_, c) = collector(bmc);
        let err = c.get_thermal("/redfish/v1/Chassis/1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_best_effort_scoped_context() {
        let bmc = MockBmc::new()
            .with_collection(
                "/redfish/v1/Chassis/1/Boards",
                &["/redfish/v1/Chassis/1/Boards/A", "/redfish/v1/Chassis/1/Boards/B"],
            )
            .with_resource(
                "/redfish/v1/Chassis/1/Boards/B",
                json!({"@odata.id": "/redfish/v1/Chassis/1/Boards/B", "BoardName": "B"}),
            );
        let config = CollectorConfig {
            policy: AggregationPolicy::BestEffort,
            ..Default::default()
        };
        let c = RedfishCollector::new(Arc::new(bmc), config);
        let ctx = CallContext::new();
        let boards = c
            .scoped(ctx.clone())
            .get_oem_huawei_boards("/redfish/v1/Chassis/1")
            .unwrap();
        assert_eq!(boards.len(), 1);
        assert_eq!(boards[0].board_name.as_deref(), Some("B"));
        let failures = ctx.take_failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].uri, "/redfish/v1/Chassis/1/Boards/A");
    }

    #[test]
    fn test_best_effort_unscoped_keeps_failures() {
        let bmc = MockBmc::new()
            .with_collection(
                "/redfish/v1/Chassis/1/Boards",
                &["/redfish/v1/Chassis/1/Boards/A", "/redfish/v1/Chassis/1/Boards/B"],
            )
            .with_resource(
                "/redfish/v1/Chassis/1/Boards/B",
                json!({"@odata.id": "/redfish/v1/Chassis/1/Boards/B", "BoardName": "B"}),
            );
        let config = CollectorConfig {
            policy: AggregationPolicy::BestEffort,
            ..Default::default()
        };
        let c = RedfishCollector::new(Arc::new(bmc), config);
        let boards = c.get_oem_huawei_boards("/redfish/v1/Chassis/1").unwrap();
        assert_eq!(boards.len(), 1);
        // A second call must not lose the first call's failure.
        c.get_oem_huawei_boards("/redfish/v1/Chassis/1").unwrap();

        let failures = c.take_failures();
        assert_eq!(failures.len(), 2);
        assert!(failures
            .iter()
            .all(|f| f.uri == "/redfish/v1/Chassis/1/Boards/A"));
        assert!(c.take_failures().is_empty());
    }

    #[test]
    fn test_pcie_devices_follow_links() {
        let dev = "/redfish/v1/Chassis/1/PCIeDevices/NIC1";
        let func = "/redfish/v1/Chassis/1/PCIeDevices/NIC1/PCIeFunctions/1";
        let bmc = MockBmc::new()
            .with_resource(
                "/redfish/v1/Chassis/1",
                json!({
                    "@odata.id": "/redfish/v1/Chassis/1",
                    "ChassisType": "RackMount",
                    "Links": {"PCIeDevices": [{"@odata.id": dev}]}
                }),
            )
            .with_resource(
                dev,
                json!({"@odata.id": dev, "Links": {"PCIeFunctions": [{"@odata.id": func}]}}),
            )
            .with_resource(func, json!({"@odata.id": func, "DeviceClass": "NetworkController"}));
        let (_, c) = collector(bmc);
        let devices = c.get_pcie_devices("/redfish/v1/Chassis/1").unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(
            devices[0].pcie_functions[0].device_class.as_deref(),
            Some("NetworkController")
        );
        // no Drives link on this chassis
        assert!(c.get_drives("/redfish/v1/Chassis/1").unwrap().is_empty());
    }
}
