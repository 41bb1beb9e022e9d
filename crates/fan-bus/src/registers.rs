// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Register map of the ATtiny fan helper board.

/// Low byte of the last temperature conversion.
pub const TEMP_LOW: u8 = 0x00;

/// High byte of the last temperature conversion.
pub const TEMP_HIGH: u8 = 0x01;

/// Measurement trigger. Writing [`TRIGGER_MEASUREMENT`] starts an ADC
/// conversion; the result is valid after a short settling delay.
pub const TRIGGER: u8 = 0x02;

/// Fan power. The firmware treats the value as a binary drive level,
/// `0x00` off and `0xFF` full.
pub const FAN_POWER: u8 = 0x03;

/// Payload written to [`TRIGGER`] to start a conversion.
pub const TRIGGER_MEASUREMENT: u8 = 0x34;
