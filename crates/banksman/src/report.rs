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
use libcollins::Inventory;
use libcollins::model::LogSeverity;

use crate::errors::RouterError;

/// Terminal handler for every core failure: formats `[tag]: error`,
/// appends it to the asset's audit log (best effort) and returns the
/// message the HTTP layer should serve. If the log append itself fails the
/// message says so, but the original error stays the one surfaced.
pub async fn report(inventory: &dyn Inventory, tag: &str, error: &RouterError) -> String {
    let mut message = format!("[{tag}]: {error}");

    if let Err(log_error) = inventory
        .append_log(tag, &message, LogSeverity::Critical)
        .await
    {
        message = format!("{message}. Couldn't log error: {log_error}");
    }

    tracing::error!("{message}");
    message
}
