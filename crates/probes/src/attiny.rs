// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Helper-board temperature via a two-phase bus transaction.
//!
//! The ATtiny firmware measures on demand: writing the trigger payload
//! starts an ADC conversion, and after a settling delay the result is
//! available as a low/high byte pair. The AVR's internal sensor maps
//! counts onto Celsius roughly linearly:
//!
//! ```text
//! temp:   -40'C   +25'C   +85'C
//! count:   230     300     370
//! ```
//!
//! which the firmware's scaling reduces to `high * 256 + low - 275`. The
//! fit is exact at 25 degrees and drifts a few degrees at the extremes,
//! which is accurate enough for a reading that is only recorded, never
//! acted on.

use std::time::Duration;

use fan_bus::{registers, FanBus};

use crate::{ProbeError, TemperatureProbe};

/// Offset of the linear count-to-Celsius mapping.
const RAW_OFFSET: i32 = 275;

/// Settling delay between triggering a conversion and reading it out.
const SETTLE_DELAY: Duration = Duration::from_millis(10);

/// The secondary temperature source on the fan helper board.
///
/// Each reading blocks the calling thread for the settling delay plus
/// three bus transactions.
#[derive(Debug)]
pub struct AttinyProbe<B: FanBus> {
    bus: B,
}

impl<B: FanBus> AttinyProbe<B> {
    /// Wraps a bus transport.
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Raw ADC count: trigger, settle, then read the low/high pair.
    fn read_raw(&mut self) -> Result<u16, ProbeError> {
        self.bus
            .write_register(registers::TRIGGER, registers::TRIGGER_MEASUREMENT)?;
        std::thread::sleep(SETTLE_DELAY);
        let low = self.bus.read_register(registers::TEMP_LOW)?;
        let high = self.bus.read_register(registers::TEMP_HIGH)?;
        Ok(u16::from(high) << 8 | u16::from(low))
    }
}

impl<B: FanBus> TemperatureProbe for AttinyProbe<B> {
    fn source(&self) -> &'static str {
        "attiny"
    }

    fn read_celsius(&mut self) -> Result<f64, ProbeError> {
        let raw = self.read_raw()?;
        let celsius = raw_to_celsius(raw);
        tracing::trace!("attiny raw count {raw} -> {celsius}'C");
        Ok(celsius)
    }
}

/// Converts a raw ADC count to degrees Celsius.
pub fn raw_to_celsius(raw: u16) -> f64 {
    f64::from(i32::from(raw) - RAW_OFFSET)
}
