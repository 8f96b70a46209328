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
use std::ffi::OsStr;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

#[derive(thiserror::Error, Debug)]
pub enum CmdError {
    #[error("Error running '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("'{program}' timed out after {seconds}s")]
    Timeout { program: String, seconds: u64 },

    #[error("'{program}' {}: {output}", exit_reason(.code))]
    Failed {
        program: String,
        code: Option<i32>,
        output: String,
    },
}

fn exit_reason(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with {code}"),
        None => "killed by a signal".to_string(),
    }
}

pub type CmdResult<T> = std::result::Result<T, CmdError>;

/// Single-attempt async subprocess runner. Arguments never appear in
/// errors; they can carry credentials and the errors end up in the
/// inventory audit log.
#[derive(Debug)]
pub struct Cmd {
    command: TokioCommand,
    program: String,
    timeout: u64,
}

impl Cmd {
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            command: TokioCommand::new(program.as_ref()),
            program: program.as_ref().to_string_lossy().to_string(),
            timeout: 60,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.command.args(args);
        self
    }

    pub fn timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn output(mut self) -> CmdResult<String> {
        let child = self
            .command
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CmdError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let output = timeout(Duration::from_secs(self.timeout), child.wait_with_output())
            .await
            .map_err(|_| CmdError::Timeout {
                program: self.program.clone(),
                seconds: self.timeout,
            })?
            .map_err(|source| CmdError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let details = if output.stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).to_string()
            } else {
                String::from_utf8_lossy(&output.stderr).to_string()
            };
            return Err(CmdError::Failed {
                program: self.program,
                code: output.status.code(),
                output: details,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
