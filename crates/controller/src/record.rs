// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! One log record per control cycle.

use chrono::NaiveTime;
use fan_bus::FanPower;

/// A single cycle observation, formatted as one log line.
///
/// The textual form is fixed; downstream scripts match on it:
///
/// ```text
/// 14:03:25: pi(57.8'C) attiny(49.0'C) -> true
/// ```
///
/// Temperatures are printed with one decimal and the fan state as a plain
/// boolean, `true` meaning running.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleRecord {
    /// Wall-clock time of the cycle, second resolution.
    pub time: NaiveTime,
    /// Primary (SoC) reading in degrees Celsius.
    pub cpu_celsius: f64,
    /// Secondary (helper board) reading in degrees Celsius.
    pub attiny_celsius: f64,
    /// Fan state after this cycle's decision.
    pub fan_on: bool,
}

impl CycleRecord {
    /// Builds a record with an explicit timestamp.
    pub fn at(time: NaiveTime, cpu_celsius: f64, attiny_celsius: f64, fan: FanPower) -> Self {
        Self {
            time,
            cpu_celsius,
            attiny_celsius,
            fan_on: fan.is_on(),
        }
    }
}

impl std::fmt::Display for CycleRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: pi({:.1}'C) attiny({:.1}'C) -> {}",
            self.time.format("%H:%M:%S"),
            self.cpu_celsius,
            self.attiny_celsius,
            self.fan_on
        )
    }
}
