// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the control crate.

/// Errors surfaced by configuration, band construction and the driver.
///
/// Per-cycle sensor, actuator and log failures never appear here; the
/// driver absorbs those and keeps running. This type covers the failures
/// that prevent the daemon from starting at all.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    /// The configured thresholds are unusable.
    #[error("invalid control band: {0}")]
    InvalidBand(String),

    /// Configuration could not be loaded, parsed or validated.
    #[error("configuration error: {0}")]
    Config(String),

    /// The bus could not be brought up, or the startup fan-off command was
    /// rejected.
    #[error("bus startup failed: {0}")]
    Startup(#[from] fan_bus::BusError),
}
