// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! SoC temperature via the platform's firmware utility.
//!
//! On Raspberry Pi OS, `vcgencmd measure_temp` prints a single line of the
//! form `temp=48.3'C`. The probe runs the utility, checks its exit status
//! and parses that line. Hosts without the utility can substitute any
//! command printing the same format via [`CpuProbe::with_command`].

use std::process::Command;

use crate::{ProbeError, TemperatureProbe};

const MEASURE_CMD: &str = "vcgencmd";
const MEASURE_ARGS: &[&str] = &["measure_temp"];

/// The primary temperature source: the SoC sensor behind the firmware
/// utility.
///
/// Each reading spawns the measurement command, so a probe is cheap to
/// construct and holds no file descriptors between cycles.
#[derive(Debug, Clone)]
pub struct CpuProbe {
    command: String,
    args: Vec<String>,
}

impl CpuProbe {
    /// Creates a probe over `vcgencmd measure_temp`.
    pub fn new() -> Self {
        Self::with_command(MEASURE_CMD, MEASURE_ARGS)
    }

    /// Creates a probe over a custom measurement command.
    ///
    /// The command must print one `temp=<float>'C` line on stdout.
    pub fn with_command(command: impl Into<String>, args: &[&str]) -> Self {
        Self {
            command: command.into(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn invoke(&self) -> Result<String, ProbeError> {
        let output = Command::new(&self.command)
            .args(&self.args)
            .output()
            .map_err(|e| ProbeError::Unavailable {
                command: self.command.clone(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.trim().is_empty() {
                format!("exit status {}", output.status)
            } else {
                format!("exit status {}: {}", output.status, stderr.trim())
            };
            return Err(ProbeError::Unavailable {
                command: self.command.clone(),
                detail,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for CpuProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl TemperatureProbe for CpuProbe {
    fn source(&self) -> &'static str {
        "cpu"
    }

    fn read_celsius(&mut self) -> Result<f64, ProbeError> {
        let raw = self.invoke()?;
        let celsius = parse_measure_temp(&raw)?;
        if !celsius.is_finite() {
            return Err(ProbeError::NotFinite {
                sensor: self.source(),
            });
        }
        Ok(celsius)
    }
}

/// Parses the `temp=<float>'C` line printed by the measurement utility.
fn parse_measure_temp(raw: &str) -> Result<f64, ProbeError> {
    let line = raw.trim();
    let value = line
        .strip_prefix("temp=")
        .and_then(|rest| rest.strip_suffix("'C"))
        .ok_or_else(|| ProbeError::Parse {
            output: line.to_string(),
        })?;
    value.parse::<f64>().map_err(|_| ProbeError::Parse {
        output: line.to_string(),
    })
}
