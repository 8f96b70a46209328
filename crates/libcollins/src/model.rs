/*
 * SPDX-FileCopyrightText: Copyright (c) 2021-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: LicenseRef-NvidiaProprietary
 *
 * NVIDIA CORPORATION, its affiliates and licensors retain all intellectual
 * property and proprietary rights in and to this material, related
 * documentation and any modifications thereto. Any use, reproduction,
 * disclosure or distribution of this material and related documentation
 * without an express license agreement from NVIDIA CORPORATION or
 * its affiliates is strictly prohibited.
 */
use std::collections::HashMap;

use serde::Deserialize;

/// Collins stores free-form attributes in numbered slots. Everything this
/// service reads lives in slot "0".
pub const ATTRIBUTE_SLOT: &str = "0";

/// Attribute on a primary asset naming the role descriptor asset that holds
/// its configuration templates.
pub const PRIMARY_ROLE: &str = "PRIMARY_ROLE";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetHeader {
    #[serde(rename = "ID", default)]
    pub id: i64,
    #[serde(rename = "TAG")]
    pub tag: String,
    #[serde(rename = "STATUS", default)]
    pub status: String,
    #[serde(rename = "TYPE", default)]
    pub asset_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    #[serde(rename = "POOL", default)]
    pub pool: String,
    #[serde(rename = "ADDRESS", default)]
    pub address: String,
    #[serde(rename = "NETMASK", default)]
    pub netmask: String,
    #[serde(rename = "GATEWAY", default)]
    pub gateway: String,
}

/// Out-of-band management credentials. Collins reports the address with an
/// optional CIDR suffix.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ipmi {
    #[serde(rename = "IPMI_ADDRESS", default)]
    pub address: String,
    #[serde(rename = "IPMI_USERNAME", default)]
    pub username: String,
    #[serde(rename = "IPMI_PASSWORD", default)]
    pub password: String,
}

/// The `data` payload of a Collins asset response. Fields the service never
/// reads are not modeled; serde ignores them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Asset {
    #[serde(rename = "ASSET")]
    pub asset: AssetHeader,
    #[serde(rename = "ATTRIBS", default)]
    pub attributes: HashMap<String, HashMap<String, String>>,
    #[serde(rename = "ADDRESSES", default)]
    pub addresses: Vec<Address>,
    #[serde(rename = "IPMI", default)]
    pub ipmi: Option<Ipmi>,
}

impl Asset {
    pub fn tag(&self) -> &str {
        &self.asset.tag
    }

    pub fn status(&self) -> &str {
        &self.asset.status
    }

    /// Slot-0 attribute lookup. An empty value counts as absent.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(ATTRIBUTE_SLOT)
            .and_then(|slot| slot.get(name))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssetResponse {
    pub data: Asset,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddressesResponse {
    pub data: AddressList,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddressList {
    #[serde(rename = "ADDRESSES", default)]
    pub addresses: Vec<Address>,
}

/// Severity for asset log entries, named the way the Collins API spells them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSeverity {
    Informational,
    Warning,
    Critical,
}

impl LogSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Informational => "INFORMATIONAL",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}
