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
use libcollins::CollinsError;
use thiserror::Error;

use crate::cmd::CmdError;

/// Everything that can terminate a provisioning request. All of these
/// funnel through [`crate::report::report`]; none are retried.
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Couldn't get asset '{tag}': {source}")]
    Lookup {
        tag: String,
        #[source]
        source: CollinsError,
    },

    #[error("Couldn't find asset '{tag}'")]
    NotFound { tag: String },

    #[error("Attribute {0} missing")]
    AttributeMissing(String),

    #[error("Couldn't parse template {attribute}: {source}")]
    TemplateParse {
        attribute: String,
        source: gtmpl::error::ParseError,
    },

    /// Execution failed after `partial` bytes were already emitted. The
    /// partial output is part of the response, not discarded.
    #[error("Couldn't render template {attribute}: {source}")]
    TemplateExec {
        attribute: String,
        partial: Vec<u8>,
        source: gtmpl::error::ExecError,
    },

    #[error("Couldn't set boot device for asset '{tag}': {source}")]
    HardwareCommand {
        tag: String,
        #[source]
        source: CmdError,
    },

    #[error("Couldn't update status of asset '{tag}': {source}")]
    StatusUpdate {
        tag: String,
        #[source]
        source: CollinsError,
    },

    #[error("Status '{status}' not supported")]
    UnsupportedState { tag: String, status: String },
}
