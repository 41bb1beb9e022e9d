// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Daemon configuration from TOML files.
//!
//! Every field has a default matching the stock Raspberry Pi deployment,
//! so an empty file (or no file at all) yields a working configuration:
//!
//! ```toml
//! target_temp = 55.0
//! hysteresis_margin = 5.0
//! cycle_interval = 15
//! log_path = "temperature_log.txt"
//! log_cap_bytes = 10000
//! bus_path = "/dev/i2c-22"
//! bus_address = 5
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{ControlBand, ControlError};

/// Configuration for the fan control daemon.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DaemonConfig {
    /// Switching setpoint in degrees Celsius.
    #[serde(default = "default_target_temp")]
    pub target_temp: f64,

    /// Deadband half-width in degrees Celsius. Must be non-negative.
    #[serde(default = "default_hysteresis_margin")]
    pub hysteresis_margin: f64,

    /// Seconds between control cycles.
    #[serde(default = "default_cycle_interval")]
    pub cycle_interval: u64,

    /// Cycle log file path. Relative paths resolve against the daemon's
    /// working directory.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// Log size cap in bytes; past it the log keeps only the newest record.
    #[serde(default = "default_log_cap_bytes")]
    pub log_cap_bytes: u64,

    /// I2C character device of the fan helper board.
    #[serde(default = "default_bus_path")]
    pub bus_path: String,

    /// 7-bit I2C address of the fan helper board.
    #[serde(default = "default_bus_address")]
    pub bus_address: u16,
}

fn default_target_temp() -> f64 {
    55.0
}

fn default_hysteresis_margin() -> f64 {
    5.0
}

fn default_cycle_interval() -> u64 {
    15
}

fn default_log_path() -> PathBuf {
    PathBuf::from("temperature_log.txt")
}

fn default_log_cap_bytes() -> u64 {
    cycle_log::DEFAULT_CAP_BYTES
}

fn default_bus_path() -> String {
    "/dev/i2c-22".to_string()
}

fn default_bus_address() -> u16 {
    0x05
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            target_temp: default_target_temp(),
            hysteresis_margin: default_hysteresis_margin(),
            cycle_interval: default_cycle_interval(),
            log_path: default_log_path(),
            log_cap_bytes: default_log_cap_bytes(),
            bus_path: default_bus_path(),
            bus_address: default_bus_address(),
        }
    }
}

impl DaemonConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ControlError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ControlError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ControlError> {
        toml::from_str(toml_str).map_err(|e| ControlError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises the configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ControlError> {
        toml::to_string_pretty(self)
            .map_err(|e| ControlError::Config(format!("TOML serialise error: {e}")))
    }

    /// Checks that every field is usable before any hardware is touched.
    pub fn validate(&self) -> Result<(), ControlError> {
        // Threshold checks live with the band itself.
        self.band()?;
        if self.cycle_interval == 0 {
            return Err(ControlError::Config(
                "cycle_interval must be at least 1 second".to_string(),
            ));
        }
        if self.log_cap_bytes == 0 {
            return Err(ControlError::Config(
                "log_cap_bytes must be positive".to_string(),
            ));
        }
        if self.bus_address > 0x7F {
            return Err(ControlError::Config(format!(
                "bus_address must be a 7-bit address, got {:#x}",
                self.bus_address
            )));
        }
        Ok(())
    }

    /// The switching band described by this configuration.
    pub fn band(&self) -> Result<ControlBand, ControlError> {
        ControlBand::new(self.target_temp, self.hysteresis_margin)
    }

    /// The tick period of the control loop.
    pub fn cycle_period(&self) -> Duration {
        Duration::from_secs(self.cycle_interval)
    }
}
