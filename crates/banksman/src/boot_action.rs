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
use libcollins::model::Asset;

use crate::config::RuntimeConfig;

/// What a boot-script request should answer for a machine in its current
/// lifecycle state. Recomputed on every request, never cached, so a status
/// change in Collins takes effect on the very next boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootAction {
    /// Unknown or retired machine: hand out the registration script.
    Register,
    /// Machine is being installed: render its role's iPXE template.
    Install,
    /// Any other status is a data problem, not something to guess around.
    Unsupported { tag: String, status: String },
}

pub fn classify(asset: Option<&Asset>, config: &RuntimeConfig) -> BootAction {
    let Some(asset) = asset else {
        return BootAction::Register;
    };

    let status = asset.status();
    if config.register_statuses.iter().any(|s| s == status) {
        return BootAction::Register;
    }
    if status == config.installing_status {
        return BootAction::Install;
    }

    BootAction::Unsupported {
        tag: asset.tag().to_string(),
        status: status.to_string(),
    }
}
