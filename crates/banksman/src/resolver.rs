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
//! Resolves the configuration template an asset should render.
//!
//! Templates are not stored on the booting asset itself but on a shared
//! role descriptor asset, named by the booting asset's `PRIMARY_ROLE`
//! attribute. One role descriptor can carry several variants
//! (`CONFIG`, `CONFIG_NET`, ...) next to the iPXE script (`CONFIG_IPXE`).

use libcollins::model::Asset;
use libcollins::{Inventory, PRIMARY_ROLE};

use crate::errors::RouterError;

/// Attribute holding the iPXE script served to installing machines.
pub const CONFIG_IPXE_ATTRIBUTE: &str = "CONFIG_IPXE";

/// Base attribute for generic config requests.
pub const CONFIG_ATTRIBUTE: &str = "CONFIG";

/// Maps a config request's optional variant sub-path onto the role
/// descriptor attribute to read: no variant means `CONFIG`, variant "net"
/// means `CONFIG_NET`.
pub fn config_attribute(variant: Option<&str>) -> String {
    match variant {
        Some(variant) if !variant.is_empty() => {
            format!("{CONFIG_ATTRIBUTE}_{}", variant.to_uppercase())
        }
        _ => CONFIG_ATTRIBUTE.to_string(),
    }
}

/// Fetches the asset's role descriptor and extracts `attribute` from it.
///
/// Single pass, no retries. Callers report any failure against the booting
/// asset's tag, not the role descriptor's, so operators see the error on
/// the machine in front of them rather than on a shared template asset.
pub async fn resolve(
    inventory: &dyn Inventory,
    asset: &Asset,
    attribute: &str,
) -> Result<String, RouterError> {
    let role_tag = asset
        .attribute(PRIMARY_ROLE)
        .ok_or_else(|| RouterError::AttributeMissing(PRIMARY_ROLE.to_string()))?;

    let role = inventory
        .get_asset(role_tag)
        .await
        .map_err(|source| RouterError::Lookup {
            tag: role_tag.to_string(),
            source,
        })?
        .ok_or_else(|| RouterError::NotFound {
            tag: role_tag.to_string(),
        })?;

    role.attribute(attribute)
        .map(str::to_string)
        .ok_or_else(|| RouterError::AttributeMissing(attribute.to_string()))
}
