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
//! Stable domain model handed to upstream inventory code. Every type here is
//! built from its wire counterpart in [`crate::model`] by a pure conversion;
//! values the BMC did not report stay `None`.

use serde::Serialize;

use crate::model;

/// Declares a domain struct together with `From<wire>` for it.
///
/// Each field is taken from the wire field of the same name (or the one
/// named after `=`) and converted according to the optional marker:
///
/// * none: moved as is
/// * `into`: `Into::into`, for shared fragments
/// * `map`: `Option<W>` to `Option<D>`
/// * `each`: `Vec<W>` to `Vec<D>`
/// * `map_each`: `Option<Vec<W>>` to `Option<Vec<D>>`
/// * `skip`: left at its default, filled in by the owning composite from
///   fetched or resolved data
macro_rules! impl_inventory_mapping {
    (
        $(#[$meta:meta])*
        pub struct $name:ident from $wire:path {
            $(
                $(#[$fmeta:meta])*
                $field:ident: $ty:ty $(= $src:ident)? $(=> $conv:ident)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, PartialEq, serde::Serialize)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        impl From<$wire> for $name {
            #[allow(unused_variables)]
            fn from(wire: $wire) -> Self {
                $name {
                    $(
                        $field: impl_inventory_mapping!(
                            @convert (impl_inventory_mapping!(@field wire, $field $(, $src)?))
                            $(, $conv)?
                        ),
                    )*
                }
            }
        }
    };
    (@field $wire:ident, $field:ident) => { $wire.$field };
    (@field $wire:ident, $field:ident, $src:ident) => { $wire.$src };
    (@convert $value:expr) => { $value };
    (@convert $value:expr, into) => { $value.into() };
    (@convert $value:expr, map) => { $value.map(Into::into) };
    (@convert $value:expr, each) => { $value.into_iter().map(Into::into).collect() };
    (@convert $value:expr, map_each) => {
        $value.map(|v| v.into_iter().map(Into::into).collect())
    };
    (@convert $value:expr, skip) => { Default::default() };
}

mod compute;
mod environment;
mod network;
mod oem;
mod storage;

pub use compute::{Memory, MemoryLocation, Processor, ProcessorId};
pub use environment::{
    Fan, Power, PowerControl, PowerLimit, PowerMetrics, PowerSupply, Redundancy, Temperature,
    Thermal, Voltage,
};
pub use network::{
    AdapterController, EthernetInterface, IPv4Address, IPv6Address, NetworkAdapter,
    NetworkInterface, NetworkPort, VLanNetworkInterface,
};
pub use oem::OemHuaweiBoard;
pub use storage::{Drive, PCIeDevice, PCIeFunction, Storage, StorageController};

/// Value of [`ServerBasicInfo::protocol`] for everything this crate collects
pub const PROTOCOL: &str = "RedfishV1";

/// Header of an addressable resource
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub uri: String,
    /// The BMC's own `Id`
    pub origin_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub physical_state: Option<String>,
    pub physical_health: Option<String>,
}

impl From<model::Resource> for Resource {
    fn from(wire: model::Resource) -> Self {
        let (physical_state, physical_health) = match wire.status {
            Some(s) => (s.state, s.health),
            None => (None, None),
        };
        Resource {
            uri: wire.odata_id,
            origin_id: wire.id,
            name: wire.name,
            description: wire.description,
            physical_state,
            physical_health,
        }
    }
}

/// Header of an item embedded in its parent's body
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Member {
    pub uri: Option<String>,
    pub origin_member_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub physical_state: Option<String>,
    pub physical_health: Option<String>,
}

impl From<model::Member> for Member {
    fn from(wire: model::Member) -> Self {
        let (physical_state, physical_health) = match wire.status {
            Some(s) => (s.state, s.health),
            None => (None, None),
        };
        Member {
            uri: wire.odata_id,
            origin_member_id: wire.member_id,
            name: wire.name,
            description: wire.description,
            physical_state,
            physical_health,
        }
    }
}

impl_inventory_mapping! {
    pub struct ProductInfo from model::ProductInfo {
        model: Option<String>,
        manufacturer: Option<String>,
        sku: Option<String>,
        serial_number: Option<String>,
        part_number: Option<String>,
        spare_part_number: Option<String>,
        asset_tag: Option<String>,
    }
}

impl_inventory_mapping! {
    pub struct Location from model::Location {
        info: Option<String>,
        info_format: Option<String>,
    }
}

impl_inventory_mapping! {
    pub struct Threshold from model::Threshold {
        upper_threshold_non_critical: Option<f64>,
        upper_threshold_critical: Option<f64>,
        upper_threshold_fatal: Option<f64>,
        lower_threshold_non_critical: Option<f64>,
        lower_threshold_critical: Option<f64>,
        lower_threshold_fatal: Option<f64>,
    }
}

/// Where a [`ServerBasicInfo`] was read from
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct OriginUris {
    pub system: Option<String>,
    pub chassis: Option<String>,
}

/// Identity of a single-system, single-chassis server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerBasicInfo {
    pub origin_uris: OriginUris,
    pub physical_uuid: Option<String>,
    pub protocol: String,
    /// Chassis type as reported, e.g. `RackMount` or `Blade`. Never empty.
    pub server_type: String,
}

/// Result of looking for the basic info of a BMC
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BasicInfoOutcome {
    Found(ServerBasicInfo),
    /// The BMC manages more (or less) than one chassis and one system, so
    /// there is no single server to describe.
    NotApplicable {
        chassis_count: usize,
        system_count: usize,
    },
}

impl BasicInfoOutcome {
    pub fn found(self) -> Option<ServerBasicInfo> {
        match self {
            BasicInfoOutcome::Found(info) => Some(info),
            BasicInfoOutcome::NotApplicable { .. } => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_resource_all_fields() {
        let wire: model::Resource = serde_json::from_str(
            r#"{
                "@odata.id": "/redfish/v1/Chassis/1",
                "Id": "1",
                "Name": "Computer System Chassis",
                "Description": "Main chassis",
                "Status": {"State": "Enabled", "Health": "Warning"}
            }"#,
        )
        .unwrap();
        let r = Resource::from(wire);
        assert_eq!(
            r,
            Resource {
                uri: "/redfish/v1/Chassis/1".to_string(),
                origin_id: Some("1".to_string()),
                name: Some("Computer System Chassis".to_string()),
                description: Some("Main chassis".to_string()),
                physical_state: Some("Enabled".to_string()),
                physical_health: Some("Warning".to_string()),
            }
        );
    }

    #[test]
    fn test_resource_without_status() {
        let wire: model::Resource =
            serde_json::from_str(r#"{"@odata.id": "/redfish/v1/Chassis/1", "Name": ""}"#).unwrap();
        let r = Resource::from(wire);
        assert_eq!(r.physical_state, None);
        assert_eq!(r.physical_health, None);
        assert_eq!(r.origin_id, None);
        // an empty string is a value, not an absence
        assert_eq!(r.name.as_deref(), Some(""));
    }

    #[test]
    fn test_member_status_half_present() {
        let wire: model::Member =
            serde_json::from_str(r#"{"MemberId": "0", "Status": {"State": "Absent"}}"#).unwrap();
        let m = Member::from(wire);
        assert_eq!(m.uri, None);
        assert_eq!(m.origin_member_id.as_deref(), Some("0"));
        assert_eq!(m.physical_state.as_deref(), Some("Absent"));
        assert_eq!(m.physical_health, None);
    }

    #[test]
    fn test_product_info_and_threshold() {
        let p = ProductInfo::from(model::ProductInfo {
            sku: Some("SKU-1".to_string()),
            serial_number: Some("SN".to_string()),
            ..Default::default()
        });
        assert_eq!(p.sku.as_deref(), Some("SKU-1"));
        assert_eq!(p.serial_number.as_deref(), Some("SN"));
        assert_eq!(p.model, None);

        let t = Threshold::from(model::Threshold {
            lower_threshold_fatal: Some(-2.0),
            ..Default::default()
        });
        assert_eq!(t.lower_threshold_fatal, Some(-2.0));
        assert_eq!(t, Threshold { lower_threshold_fatal: Some(-2.0), ..Default::default() });
    }

    #[test]
    fn test_basic_info_outcome() {
        let outcome = BasicInfoOutcome::NotApplicable {
            chassis_count: 2,
            system_count: 1,
        };
        assert_eq!(outcome.found(), None);
    }
}
