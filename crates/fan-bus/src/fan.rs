// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The fan actuator: one power register, no readback.

use crate::{registers, BusError, FanBus};

/// Fan drive level.
///
/// The helper board's firmware is binary: it latches `0x00` as off and
/// `0xFF` as full drive, with no intermediate duty cycles and no way to
/// read the level back. The caller therefore owns the authoritative notion
/// of fan state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanPower {
    /// Fan stopped (`0x00`).
    Off,
    /// Fan at full drive (`0xFF`).
    Full,
}

impl FanPower {
    /// The byte written to the power register for this level.
    pub fn register_value(self) -> u8 {
        match self {
            FanPower::Off => 0x00,
            FanPower::Full => 0xFF,
        }
    }

    /// Returns `true` when the level drives the fan.
    pub fn is_on(self) -> bool {
        matches!(self, FanPower::Full)
    }
}

impl std::fmt::Display for FanPower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FanPower::Off => write!(f, "off"),
            FanPower::Full => write!(f, "full"),
        }
    }
}

/// Capability seam for driving the fan.
///
/// The control pipeline talks to this trait so tests can substitute a
/// recording fake for the hardware.
pub trait FanDrive {
    /// Drives the fan to `power`.
    fn set_power(&mut self, power: FanPower) -> Result<(), BusError>;
}

/// The physical fan behind the helper board's power register.
#[derive(Debug)]
pub struct Fan<B: FanBus> {
    bus: B,
}

impl<B: FanBus> Fan<B> {
    /// Wraps a bus transport.
    pub fn new(bus: B) -> Self {
        Self { bus }
    }
}

impl<B: FanBus> FanDrive for Fan<B> {
    /// Writes the power sentinel to the fan register.
    ///
    /// Open-loop: success means the bus transaction completed, not that the
    /// rotor moved. The board latches the level until the next write.
    fn set_power(&mut self, power: FanPower) -> Result<(), BusError> {
        self.bus
            .write_register(registers::FAN_POWER, power.register_value())?;
        tracing::trace!("fan power register written: {power}");
        Ok(())
    }
}
