// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # fan-bus
//!
//! SMBus access to the ATtiny fan helper board.
//!
//! The helper board is a small AVR on the I2C bus that exposes a four-register
//! map: a 16-bit temperature readout (low/high pair), a measurement trigger,
//! and a fan power register. This crate provides:
//!
//! - [`FanBus`]: the byte-register transport trait, with a production
//!   implementation over the Linux i2c-dev interface ([`LinuxSmbus`]) and a
//!   sharing impl for `Rc<RefCell<_>>` so one opened handle can serve both
//!   the temperature probe and the fan.
//! - [`Fan`] / [`FanDrive`]: the binary fan actuator behind the power
//!   register.
//! - [`registers`]: the board's register map.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────┐     write/read register      ┌──────────────────┐
//!   │  FanBus    │ ───────────────────────────▶ │  /dev/i2c-*      │
//!   │  (trait)   │      SMBus byte data         │  (LinuxSmbus)    │
//!   └────────────┘                              └──────────────────┘
//!         ▲
//!         │ shared via Rc<RefCell<_>> within one thread
//!   ┌─────┴──────┐
//!   │ Fan, probe │
//!   └────────────┘
//! ```

mod error;
mod fan;
pub mod registers;
mod transport;

pub use error::BusError;
pub use fan::{Fan, FanDrive, FanPower};
pub use transport::{FanBus, LinuxSmbus};
