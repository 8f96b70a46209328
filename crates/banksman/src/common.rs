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
use std::sync::Arc;

use libcollins::Inventory;

use crate::config::RuntimeConfig;
use crate::finalize::BootDevice;
use crate::render::Renderer;

/// Shared application state. The core holds nothing mutable; everything in
/// here is constructed once at startup and read concurrently.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RuntimeConfig>,
    pub inventory: Arc<dyn Inventory>,
    pub renderer: Arc<Renderer>,
    pub boot_device: Arc<dyn BootDevice>,
}
