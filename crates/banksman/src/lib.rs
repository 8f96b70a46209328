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
//! Network-boot configuration service.
//!
//! Machines netboot into this service during provisioning. What they get
//! back depends on their lifecycle status in the Collins inventory: unknown
//! or retired machines receive a registration boot script, machines being
//! installed receive the iPXE template stored on their role descriptor
//! asset, and at the end of installation the rendered script calls back to
//! the finalize operation, which switches the persistent boot device to
//! disk and marks the asset provisioned.

pub mod boot_action;
pub mod cmd;
pub mod common;
pub mod config;
pub mod errors;
pub mod finalize;
pub mod middleware;
pub mod ops;
pub mod render;
pub mod report;
pub mod resolver;
pub mod routes;
