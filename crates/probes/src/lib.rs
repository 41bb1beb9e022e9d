// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # probes
//!
//! Temperature sources for the fan control loop.
//!
//! Two sources feed the controller each cycle, behind one trait:
//!
//! - [`CpuProbe`] (primary): the SoC temperature reported by the platform's
//!   firmware utility (`vcgencmd measure_temp` on Raspberry Pi OS). This is
//!   the reading the control decision is made on.
//! - [`AttinyProbe`] (secondary): the fan helper board's own sensor, read
//!   over the bus with a trigger/settle/read transaction. Recorded alongside
//!   the primary reading for later correlation; it never influences the
//!   decision.
//!
//! Both probes reject unusable readings with a typed [`ProbeError`] instead
//! of handing garbage to the controller.

mod attiny;
mod cpu;
mod error;

pub use attiny::{raw_to_celsius, AttinyProbe};
pub use cpu::CpuProbe;
pub use error::ProbeError;

/// A temperature source sampled once per control cycle.
pub trait TemperatureProbe {
    /// Short source name used in diagnostics (`"cpu"`, `"attiny"`).
    fn source(&self) -> &'static str;

    /// Reads the current temperature in degrees Celsius.
    ///
    /// Returned values are always finite; a sensor that produces a
    /// non-finite value fails with [`ProbeError::NotFinite`].
    fn read_celsius(&mut self) -> Result<f64, ProbeError>;
}
