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
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[clap(name = "banksman")]
pub struct Args {
    #[clap(long, default_value = "false", help = "Print version number and exit")]
    pub version: bool,

    #[arg(long, default_value = "127.0.0.1:8080", help = "Address to listen on.")]
    pub listen: String,

    #[arg(
        long,
        default_value = "http://localhost:9000/api",
        help = "URL to the Collins API."
    )]
    pub uri: String,

    #[arg(long, default_value = "blake", help = "Collins user.")]
    pub user: String,

    #[arg(long, default_value = "admin:first", help = "Collins password.")]
    pub password: String,

    #[arg(
        long,
        default_value = "static",
        help = "Directory served under /static."
    )]
    pub static_dir: String,

    #[arg(long, help = "URL of the registration kernel. Defaults to /static/kernel on this server.")]
    pub kernel: Option<String>,

    #[arg(long, help = "URL of the registration initrd. Defaults to /static/initrd.gz on this server.")]
    pub initrd: Option<String>,

    #[arg(
        long,
        default_value = "",
        help = "Extra kernel options appended to the registration kernel line."
    )]
    pub kernel_options: String,

    #[arg(long, default_value = "ipmitool", help = "Path to the ipmitool executable.")]
    pub ipmitool: String,

    #[arg(
        long,
        default_value = "lanplus",
        help = "ipmitool interface selector (-I)."
    )]
    pub ipmi_interface: String,

    #[arg(
        long,
        default_value_t = 60,
        help = "Timeout in seconds for ipmitool invocations."
    )]
    pub ipmitool_timeout: u64,

    #[arg(
        long = "register-status",
        default_values_t = default_register_statuses(),
        help = "Asset statuses answered with the registration script. Repeatable."
    )]
    pub register_statuses: Vec<String>,

    #[arg(
        long,
        default_value = "Provisioning",
        help = "Asset status answered with the role's iPXE template."
    )]
    pub installing_status: String,
}

fn default_register_statuses() -> Vec<String> {
    vec![
        "Maintenance".to_string(),
        "Decommissioned".to_string(),
        "Incomplete".to_string(),
    ]
}

/// Immutable runtime configuration, built once from the parsed flags and
/// shared by reference through the application state.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub listen: String,
    pub collins_uri: String,
    pub collins_user: String,
    pub collins_password: String,
    pub static_dir: String,
    pub kernel_url: String,
    pub initrd_url: String,
    pub kernel_options: String,
    pub ipmitool_path: String,
    pub ipmi_interface: String,
    pub ipmitool_timeout: u64,
    pub register_statuses: Vec<String>,
    pub installing_status: String,
}

impl From<Args> for RuntimeConfig {
    fn from(args: Args) -> Self {
        let kernel_url = args
            .kernel
            .unwrap_or_else(|| format!("http://{}/static/kernel", args.listen));
        let initrd_url = args
            .initrd
            .unwrap_or_else(|| format!("http://{}/static/initrd.gz", args.listen));

        Self {
            listen: args.listen,
            collins_uri: args.uri,
            collins_user: args.user,
            collins_password: args.password,
            static_dir: args.static_dir,
            kernel_url,
            initrd_url,
            kernel_options: args.kernel_options,
            ipmitool_path: args.ipmitool,
            ipmi_interface: args.ipmi_interface,
            ipmitool_timeout: args.ipmitool_timeout,
            register_statuses: args.register_statuses,
            installing_status: args.installing_status,
        }
    }
}
