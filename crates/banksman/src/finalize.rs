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
//! End-of-installation hand-off.
//!
//! Two ordered steps: switch the machine's persistent boot device to disk
//! over its out-of-band management interface, then mark the asset
//! provisioned in the inventory. An asset must never read "Provisioned"
//! while its boot device still points at the network. If the status update
//! fails after the hardware step succeeded there is no rollback; the asset
//! is left inconsistent and re-running finalize is the recovery path (the
//! hardware command is idempotent).

use async_trait::async_trait;
use libcollins::Inventory;
use libcollins::model::Ipmi;
use mockall::automock;

use crate::cmd::{Cmd, CmdError};
use crate::config::RuntimeConfig;
use crate::errors::RouterError;

/// Terminal lifecycle status written after a successful hand-off.
pub const PROVISIONED_STATUS: &str = "Provisioned";

const STATUS_REASON: &str = "Installation finished, boot device set to disk";

/// Out-of-band boot device control.
#[automock]
#[async_trait]
pub trait BootDevice: Send + Sync {
    /// Makes the local disk the persistent boot device.
    async fn set_persistent_boot_disk(&self, ipmi: &Ipmi) -> Result<(), CmdError>;
}

/// [`BootDevice`] backed by the ipmitool executable.
#[derive(Debug, Clone)]
pub struct Ipmitool {
    path: String,
    interface: String,
    timeout: u64,
}

impl Ipmitool {
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            path: config.ipmitool_path.clone(),
            interface: config.ipmi_interface.clone(),
            timeout: config.ipmitool_timeout,
        }
    }
}

/// Collins reports IPMI addresses with an optional CIDR suffix; ipmitool
/// wants the bare address.
fn strip_cidr(address: &str) -> &str {
    address.split_once('/').map_or(address, |(ip, _)| ip)
}

#[async_trait]
impl BootDevice for Ipmitool {
    async fn set_persistent_boot_disk(&self, ipmi: &Ipmi) -> Result<(), CmdError> {
        Cmd::new(&self.path)
            .args([
                "-I",
                &self.interface,
                "-H",
                strip_cidr(&ipmi.address),
                "-U",
                &ipmi.username,
                "-P",
                &ipmi.password,
                "chassis",
                "bootdev",
                "disk",
                "options=persistent",
            ])
            .timeout(self.timeout)
            .output()
            .await
            .map(|_| ())
    }
}

/// Runs the finalize workflow for `tag` and returns the confirmation
/// message.
pub async fn run(
    inventory: &dyn Inventory,
    boot_device: &dyn BootDevice,
    tag: &str,
) -> Result<String, RouterError> {
    let asset = inventory
        .get_asset(tag)
        .await
        .map_err(|source| RouterError::Lookup {
            tag: tag.to_string(),
            source,
        })?
        .ok_or_else(|| RouterError::NotFound {
            tag: tag.to_string(),
        })?;

    let ipmi = asset
        .ipmi
        .as_ref()
        .filter(|ipmi| !ipmi.address.is_empty())
        .ok_or_else(|| RouterError::AttributeMissing("IPMI".to_string()))?;

    // Hardware first. If this fails the status update must not happen;
    // a machine marked provisioned with its boot device still on the
    // network would netboot straight back into the installer.
    boot_device
        .set_persistent_boot_disk(ipmi)
        .await
        .map_err(|source| RouterError::HardwareCommand {
            tag: tag.to_string(),
            source,
        })?;

    inventory
        .update_status(tag, PROVISIONED_STATUS, STATUS_REASON)
        .await
        .map_err(|source| RouterError::StatusUpdate {
            tag: tag.to_string(),
            source,
        })?;

    Ok(format!(
        "Asset '{tag}': boot device set to disk, status now {PROVISIONED_STATUS}"
    ))
}
