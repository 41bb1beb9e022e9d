// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `pifan status` command: one-shot readout of both sensors.
//!
//! Each source is read independently and a failure is reported inline, so
//! the command still completes on hosts missing the firmware utility or
//! the bus device.

use std::path::Path;

use controller::ControlBand;
use fan_bus::LinuxSmbus;
use probes::{AttinyProbe, CpuProbe, TemperatureProbe};

use super::ConfigOverrides;

pub async fn execute(config_path: Option<&Path>, overrides: ConfigOverrides) -> anyhow::Result<()> {
    let config = super::load_config(config_path, overrides)?;
    let band = config.band()?;

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║               pifan · Thermal Status                ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    // ── Sensors ────────────────────────────────────────────────
    println!("  Sensors");
    let mut cpu = CpuProbe::new();
    match cpu.read_celsius() {
        Ok(t) => println!("   CPU:      {t:.1} C  {}", temp_bar(t, &band)),
        Err(e) => println!("   CPU:      unavailable ({e})"),
    }
    match LinuxSmbus::open(&config.bus_path, config.bus_address) {
        Ok(bus) => {
            let mut attiny = AttinyProbe::new(bus);
            match attiny.read_celsius() {
                Ok(t) => println!("   ATtiny:   {t:.1} C  {}", temp_bar(t, &band)),
                Err(e) => println!("   ATtiny:   unavailable ({e})"),
            }
        }
        Err(e) => println!("   ATtiny:   bus unavailable ({e})"),
    }
    println!();

    // ── Controller ─────────────────────────────────────────────
    println!("  Controller");
    println!("   Band:     {band}");
    println!("   Cadence:  every {}s", config.cycle_interval);
    println!(
        "   Bus:      {} @ {:#04x}",
        config.bus_path, config.bus_address
    );
    println!();

    // ── Cycle log ──────────────────────────────────────────────
    println!("  Cycle log");
    println!("   Path:     {}", config.log_path.display());
    println!("   Cap:      {} bytes", config.log_cap_bytes);
    match std::fs::read_to_string(&config.log_path) {
        Ok(content) => {
            println!("   Size:     {} bytes", content.len());
            if let Some(latest) = content.lines().last() {
                println!("   Latest:   {latest}");
            }
        }
        Err(_) => println!("   Size:     (no file yet)"),
    }

    Ok(())
}

/// Visual temperature bar (0-100 C scale); the symbol marks the reading's
/// position relative to the switching band.
fn temp_bar(celsius: f64, band: &ControlBand) -> String {
    let filled = ((celsius / 100.0) * 20.0).round() as usize;
    let filled = filled.min(20);
    let empty = 20 - filled;
    let symbol = if celsius > band.upper() {
        "#"
    } else if celsius > band.lower() {
        "="
    } else {
        "-"
    };
    format!("[{}{}]", symbol.repeat(filled), ".".repeat(empty))
}
