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
/// Drives the public API against an in-memory BMC serving the resource graph
/// mirrored in tests/mockup, one JSON document keyed by resource path.
use std::{
    sync::{Arc, Once},
    time::Duration,
};

use anyhow::Context;
use redfish_inventory::{
    collect_inventory, inventory::OemHuaweiBoard, AggregationPolicy, BasicInfoOutcome,
    CallContext, CancelToken, CollectorConfig, Endpoint, ErrorKind, InventoryCollector,
    InventoryFacet, InventorySink, MockBmc, RedfishClientPool, RedfishCollector, RedfishError,
    ServerBasicInfo,
};
use reqwest::StatusCode;

const SYSTEM: &str = "/redfish/v1/Systems/1";
const CHASSIS: &str = "/redfish/v1/Chassis/1";

static SETUP: Once = Once::new();

fn setup() {
    SETUP.call_once(|| {
        use tracing_subscriber::fmt::Layer;
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{filter::LevelFilter, EnvFilter};
        tracing_subscriber::registry()
            .with(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy()
                    .add_directive("hyper=warn".parse().unwrap())
                    .add_directive("reqwest=warn".parse().unwrap())
                    .add_directive("rustls=warn".parse().unwrap()),
            )
            .with(
                Layer::default()
                    .compact()
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_test_writer(),
            )
            .init();
    });
}

fn mockup() -> Result<MockBmc, anyhow::Error> {
    let graph: serde_json::Value =
        serde_json::from_str(include_str!("mockup/huawei_rh2288.json"))?;
    let resources = graph.as_object().context("mockup is not a JSON object")?;
    let mut bmc = MockBmc::new();
    for (path, body) in resources {
        bmc = bmc.with_resource(path, body.clone());
    }
    let power: serde_json::Value =
        serde_json::from_str(include_str!("../src/model/testdata/power.json"))?;
    let thermal: serde_json::Value =
        serde_json::from_str(include_str!("../src/model/testdata/thermal.json"))?;
    Ok(bmc
        .with_resource("/redfish/v1/Chassis/1/Power", power)
        .with_resource("/redfish/v1/Chassis/1/Thermal", thermal)
        .with_post("/redfish/v1/AccountService/Accounts", StatusCode::CREATED, ""))
}

fn collector(bmc: MockBmc, config: CollectorConfig) -> (Arc<MockBmc>, RedfishCollector) {
    let bmc = Arc::new(bmc);
    (bmc.clone(), RedfishCollector::new(bmc, config))
}

#[derive(Default)]
struct MemorySink {
    servers: Vec<ServerBasicInfo>,
    facets: Vec<InventoryFacet>,
}

impl InventorySink for MemorySink {
    type Error = std::convert::Infallible;

    fn store_basic_info(&mut self, info: &ServerBasicInfo) -> Result<(), Self::Error> {
        self.servers.push(info.clone());
        Ok(())
    }

    fn store_facet(
        &mut self,
        _server: &ServerBasicInfo,
        facet: InventoryFacet,
    ) -> Result<(), Self::Error> {
        self.facets.push(facet);
        Ok(())
    }
}

#[test]
fn test_full_inventory() -> Result<(), anyhow::Error> {
    setup();
    let (_, c) = collector(mockup()?, CollectorConfig::default());
    assert!(c.support());

    let mut sink = MemorySink::default();
    let ctx = CallContext::new();
    let outcome = collect_inventory(&c, &ctx, &mut sink)?;
    let info = outcome.found().context("expected a single server")?;
    assert_eq!(info.server_type, "RackMount");
    assert_eq!(info.origin_uris.system.as_deref(), Some(SYSTEM));
    assert_eq!(sink.servers, [info]);
    assert_eq!(sink.facets.len(), 11);
    assert_eq!(ctx.failure_count(), 0);

    for facet in &sink.facets {
        match facet {
            InventoryFacet::Processors(p) => {
                assert_eq!(p.len(), 2);
                assert_eq!(p[0].total_cores, Some(8));
                assert_eq!(p[1].resource.physical_state.as_deref(), Some("Absent"));
                assert_eq!(p[1].resource.physical_health, None);
                assert_eq!(p[1].processor_id, None);
            }
            InventoryFacet::Memory(m) => {
                assert_eq!(m[0].capacity_mib, Some(16384));
                assert_eq!(m[1].capacity_mib, None);
            }
            InventoryFacet::EthernetInterfaces(e) => {
                assert_eq!(e[0].vlans.len(), 1);
                assert_eq!(e[0].vlans[0].vlan_id, Some(100));
            }
            InventoryFacet::Storages(s) => {
                assert_eq!(s[0].drive_uris.len(), 2);
                assert_eq!(s[0].storage_controllers[0].speed_gbps, Some(12.0));
            }
            InventoryFacet::OemHuaweiBoards(b) => {
                let names: Vec<_> = b.iter().map(|b| b.resource.origin_id.as_deref()).collect();
                assert_eq!(names, [Some("chassisMainboard"), Some("chassisDiskBP1")]);
            }
            InventoryFacet::NetworkAdapters(a) => {
                let ports = &a[0].controllers[0].network_ports;
                assert_eq!(ports.len(), 2);
                assert_eq!(ports[1].link_status.as_deref(), Some("Down"));
            }
            InventoryFacet::PCIeDevices(d) => {
                assert_eq!(d[0].pcie_functions[0].device_id.as_deref(), Some("0x1015"));
            }
            _ => {}
        }
    }
    Ok(())
}

#[test]
fn test_power_redundancy_resolves_names() -> Result<(), anyhow::Error> {
    setup();
    let (_, c) = collector(mockup()?, CollectorConfig::default());
    let power = c.get_power(CHASSIS)?;
    let redundancy = power.redundancy.context("no redundancy")?;
    assert_eq!(redundancy[0].redundancy_set, ["PSU2", "PSU1"]);
    Ok(())
}

#[test]
fn test_facets_in_any_order() -> Result<(), anyhow::Error> {
    setup();
    let (bmc, c) = collector(mockup()?, CollectorConfig::default());
    let drives = c.get_drives(CHASSIS)?;
    let thermal = c.get_thermal(CHASSIS)?;
    let boards: Vec<OemHuaweiBoard> = c.get_oem_huawei_boards(CHASSIS)?;
    assert_eq!(drives.len(), 2);
    assert_eq!(drives[1].resource.physical_health.as_deref(), Some("Warning"));
    assert_eq!(drives[0].locations[0].info.as_deref(), Some("Disk0"));
    assert_eq!(thermal.fans.len(), 2);
    assert_eq!(boards[0].board_id.as_deref(), Some("0x00a3"));

    let ports =
        c.get_network_ports("/redfish/v1/Chassis/1/NetworkAdapters/mainboardLOM/NetworkPorts")?;
    assert_eq!(ports.len(), 2);
    assert_eq!(ports[0].physical_port_number.as_deref(), Some("1"));

    let interfaces = c.get_network_interfaces(SYSTEM)?;
    assert_eq!(
        interfaces[0].network_adapter_uri.as_deref(),
        Some("/redfish/v1/Chassis/1/NetworkAdapters/mainboardLOM")
    );
    // No facet touched another facet's collections
    assert_eq!(bmc.get_count("/redfish/v1/Systems/1/Processors"), 0);
    Ok(())
}

#[test]
fn test_parallel_matches_sequential() -> Result<(), anyhow::Error> {
    setup();
    let (_, sequential) = collector(mockup()?, CollectorConfig::default());
    let (_, parallel) = collector(
        mockup()?,
        CollectorConfig {
            max_concurrent_fetches: 4,
            ..Default::default()
        },
    );
    assert_eq!(sequential.get_processors(SYSTEM)?, parallel.get_processors(SYSTEM)?);
    assert_eq!(sequential.get_memory(SYSTEM)?, parallel.get_memory(SYSTEM)?);
    assert_eq!(sequential.get_drives(CHASSIS)?, parallel.get_drives(CHASSIS)?);
    assert_eq!(
        sequential.get_network_adapters(CHASSIS)?,
        parallel.get_network_adapters(CHASSIS)?
    );
    Ok(())
}

#[test]
fn test_failed_member_aborts_facet() -> Result<(), anyhow::Error> {
    setup();
    let bmc = mockup()?.with_raw(
        "/redfish/v1/Systems/1/Memory/mainboardDIMM000",
        StatusCode::INTERNAL_SERVER_ERROR,
        "",
    );
    let (bmc, c) = collector(bmc, CollectorConfig::default());
    let err = c.get_memory(SYSTEM).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(bmc.get_count("/redfish/v1/Systems/1/Memory/mainboardDIMM010"), 0);
    // other facets are unaffected
    assert_eq!(c.get_processors(SYSTEM)?.len(), 2);
    Ok(())
}

#[test]
fn test_basic_info_cardinality() -> Result<(), anyhow::Error> {
    setup();
    let bmc = mockup()?.with_resource(
        "/redfish/v1/Chassis",
        serde_json::json!({
            "Members@odata.count": 2,
            "Members": [{"@odata.id": CHASSIS}, {"@odata.id": "/redfish/v1/Chassis/2"}]
        }),
    );
    let (_, c) = collector(bmc, CollectorConfig::default());
    assert_eq!(
        c.get_basic_info()?,
        BasicInfoOutcome::NotApplicable {
            chassis_count: 2,
            system_count: 1
        }
    );
    Ok(())
}

#[test]
fn test_cancelled_call_sends_nothing() -> Result<(), anyhow::Error> {
    setup();
    let (bmc, c) = collector(mockup()?, CollectorConfig::default());
    let token = CancelToken::new();
    let scoped = c.scoped(CallContext::new().with_cancel_token(token.clone()));
    token.cancel();
    let err = scoped.get_pcie_devices(CHASSIS).unwrap_err();
    assert!(matches!(err, RedfishError::Cancelled { .. }));
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(bmc.requests().is_empty());
    Ok(())
}

#[test]
fn test_deadline_stops_nested_fetches() -> Result<(), anyhow::Error> {
    setup();
    let bmc = mockup()?.with_delay(
        "/redfish/v1/Systems/1/Processors/1",
        Duration::from_millis(300),
    );
    let (bmc, c) = collector(bmc, CollectorConfig::default());
    let scoped = c.scoped(CallContext::with_timeout(Duration::from_millis(100)));
    let err = scoped.get_processors(SYSTEM).unwrap_err();
    assert!(matches!(err, RedfishError::DeadlineExceeded { .. }));
    assert_eq!(bmc.get_count("/redfish/v1/Systems/1/Processors/2"), 0);
    Ok(())
}

#[test]
fn test_best_effort_policy() -> Result<(), anyhow::Error> {
    setup();
    let bmc = mockup()?.with_raw(
        "/redfish/v1/Chassis/1/Drives/HDDPlaneDisk0",
        StatusCode::OK,
        "<html>",
    );
    let (_, c) = collector(
        bmc,
        CollectorConfig {
            policy: AggregationPolicy::BestEffort,
            ..Default::default()
        },
    );
    let ctx = CallContext::new();
    let drives = c.scoped(ctx.clone()).get_drives(CHASSIS)?;
    assert_eq!(drives.len(), 1);
    assert_eq!(drives[0].resource.origin_id.as_deref(), Some("HDDPlaneDisk1"));
    let failures = ctx.take_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].uri, "/redfish/v1/Chassis/1/Drives/HDDPlaneDisk0");
    assert_eq!(failures[0].error.kind(), ErrorKind::Decode);
    Ok(())
}

#[test]
fn test_create_management_account() -> Result<(), anyhow::Error> {
    setup();
    let (bmc, c) = collector(mockup()?, CollectorConfig::default());
    c.create_management_account("inventory", "Huawei12#$")?;
    let sent = bmc.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].path, "/redfish/v1/AccountService/Accounts");
    Ok(())
}

#[test]
fn test_probe_connection_refused() -> Result<(), anyhow::Error> {
    setup();
    let pool = RedfishClientPool::builder()
        .timeout(Duration::from_secs(2))
        .build()?;
    let client = pool.create_client(Endpoint {
        host: "127.0.0.1".to_string(),
        port: Some(1),
        user: Some("root".to_string()),
        password: Some("secret".to_string()),
        ..Default::default()
    });
    assert!(!client.support());
    let err = client.get_basic_info().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    Ok(())
}
