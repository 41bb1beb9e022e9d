// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI plumbing.

pub mod config;
pub mod run;
pub mod status;

use std::path::{Path, PathBuf};

use clap::Args;
use controller::DaemonConfig;
use tracing_subscriber::EnvFilter;

/// Initializes tracing based on verbosity.
///
/// `RUST_LOG` takes precedence when set; otherwise `-v` repetitions map to
/// info / debug / trace.
pub fn init_tracing(verbose: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::new(level)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Per-field CLI overrides applied on top of the file configuration.
#[derive(Debug, Clone, Args)]
pub struct ConfigOverrides {
    /// Switching setpoint in degrees Celsius.
    #[arg(long)]
    target_temp: Option<f64>,

    /// Deadband half-width in degrees Celsius.
    #[arg(long)]
    hysteresis_margin: Option<f64>,

    /// Seconds between control cycles.
    #[arg(long)]
    cycle_interval: Option<u64>,

    /// Cycle log file path.
    #[arg(long)]
    log_path: Option<PathBuf>,

    /// Log size cap in bytes.
    #[arg(long)]
    log_cap_bytes: Option<u64>,

    /// I2C character device of the fan helper board.
    #[arg(long)]
    bus_path: Option<String>,

    /// 7-bit I2C address, decimal (`5`) or hex (`0x05`).
    #[arg(long, value_parser = parse_bus_address)]
    bus_address: Option<u16>,
}

impl ConfigOverrides {
    fn apply(self, config: &mut DaemonConfig) {
        if let Some(v) = self.target_temp {
            config.target_temp = v;
        }
        if let Some(v) = self.hysteresis_margin {
            config.hysteresis_margin = v;
        }
        if let Some(v) = self.cycle_interval {
            config.cycle_interval = v;
        }
        if let Some(v) = self.log_path {
            config.log_path = v;
        }
        if let Some(v) = self.log_cap_bytes {
            config.log_cap_bytes = v;
        }
        if let Some(v) = self.bus_path {
            config.bus_path = v;
        }
        if let Some(v) = self.bus_address {
            config.bus_address = v;
        }
    }
}

/// Merges defaults, the optional TOML file and the CLI overrides, then
/// validates the result.
pub fn load_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> anyhow::Result<DaemonConfig> {
    let mut config = match path {
        Some(p) => DaemonConfig::from_file(p)?,
        None => DaemonConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

/// Parses a 7-bit bus address, decimal (`5`) or hex (`0x05`).
fn parse_bus_address(s: &str) -> Result<u16, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    parsed.map_err(|_| format!("invalid bus address '{s}'"))
}
