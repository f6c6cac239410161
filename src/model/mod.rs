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

//! Wire shapes of the Redfish resources the collector reads. Everything the
//! BMC may leave out is an `Option`; nothing here is defaulted on behalf of
//! the BMC.

use serde::{Deserialize, Serialize};

pub mod account_service;
pub mod chassis;
pub mod drive;
pub mod ethernet_interface;
pub mod memory;
pub mod network_adapter;
pub mod network_interface;
pub mod oem;
pub mod pcie;
pub mod power;
pub mod processor;
pub mod storage;
pub mod system;
pub mod thermal;

/// A reference to another resource
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ODataId {
    #[serde(rename = "@odata.id")]
    pub odata_id: String,
}

impl From<String> for ODataId {
    fn from(item: String) -> Self {
        ODataId { odata_id: item }
    }
}

impl From<&str> for ODataId {
    fn from(item: &str) -> Self {
        ODataId {
            odata_id: item.to_string(),
        }
    }
}

impl From<ODataId> for String {
    fn from(item: ODataId) -> Self {
        item.odata_id
    }
}

/// Collection envelope: the member count and references, never the members.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Collection {
    #[serde(rename = "@odata.id")]
    pub odata_id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "Members@odata.count")]
    pub count: Option<i64>,
    #[serde(default)]
    pub members: Vec<ODataId>,
}

#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Status {
    pub state: Option<String>,
    pub health: Option<String>,
}

/// Common header of every addressable resource
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    #[serde(rename = "@odata.id")]
    pub odata_id: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
}

/// Common header of an item embedded in an array of its parent (fans,
/// power supplies, ...). Some BMCs leave out `@odata.id` on those.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Member {
    #[serde(rename = "@odata.id")]
    pub odata_id: Option<String>,
    pub member_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ProductInfo {
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    #[serde(rename = "SKU")]
    pub sku: Option<String>,
    pub serial_number: Option<String>,
    pub part_number: Option<String>,
    pub spare_part_number: Option<String>,
    pub asset_tag: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    pub info: Option<String>,
    pub info_format: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Threshold {
    pub upper_threshold_non_critical: Option<f64>,
    pub upper_threshold_critical: Option<f64>,
    pub upper_threshold_fatal: Option<f64>,
    pub lower_threshold_non_critical: Option<f64>,
    pub lower_threshold_critical: Option<f64>,
    pub lower_threshold_fatal: Option<f64>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_resource_status_absent() {
        let r: Resource = serde_json::from_str(
            r#"{"@odata.id": "/redfish/v1/Chassis/1", "Id": "1", "Name": "Chassis"}"#,
        )
        .unwrap();
        assert_eq!(r.odata_id, "/redfish/v1/Chassis/1");
        assert_eq!(r.id.as_deref(), Some("1"));
        assert!(r.status.is_none());
        assert!(r.description.is_none());
    }

    #[test]
    fn test_resource_requires_odata_id() {
        let r = serde_json::from_str::<Resource>(r#"{"Id": "1"}"#);
        assert!(r.is_err());
    }

    #[test]
    fn test_collection_envelope() {
        let c: Collection = serde_json::from_str(
            r#"{
                "@odata.id": "/redfish/v1/Systems",
                "Name": "Computer System Collection",
                "Members@odata.count": 1,
                "Members": [{"@odata.id": "/redfish/v1/Systems/1"}]
            }"#,
        )
        .unwrap();
        assert_eq!(c.count, Some(1));
        assert_eq!(c.members, vec![ODataId::from("/redfish/v1/Systems/1")]);
    }

    #[test]
    fn test_threshold_accepts_integers() {
        let t: Threshold = serde_json::from_str(
            r#"{"UpperThresholdCritical": 90, "LowerThresholdFatal": -5.5}"#,
        )
        .unwrap();
        assert_eq!(t.upper_threshold_critical, Some(90.0));
        assert_eq!(t.lower_threshold_fatal, Some(-5.5));
        assert_eq!(t.upper_threshold_fatal, None);
    }
}
