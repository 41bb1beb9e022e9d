// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`FanBus`] transport trait and its Linux i2c-dev implementation.

use std::cell::RefCell;
use std::rc::Rc;

use i2cdev::core::I2CDevice;
use i2cdev::linux::LinuxI2CDevice;

use crate::BusError;

/// Byte-register transport to the helper board.
///
/// The board speaks plain SMBus byte-data transactions against a single
/// fixed slave address, so the trait carries only the register offset; the
/// address is bound when the transport is constructed.
pub trait FanBus {
    /// Writes one byte to a device register.
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), BusError>;

    /// Reads one byte from a device register.
    fn read_register(&mut self, register: u8) -> Result<u8, BusError>;
}

/// One opened handle shared by several owners within a single thread.
///
/// The control loop is a sequential actor: the secondary probe and the fan
/// never touch the bus concurrently, so `RefCell` borrows cannot collide.
impl<B: FanBus> FanBus for Rc<RefCell<B>> {
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), BusError> {
        self.borrow_mut().write_register(register, value)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, BusError> {
        self.borrow_mut().read_register(register)
    }
}

/// SMBus transport over the kernel's `/dev/i2c-*` character devices.
pub struct LinuxSmbus {
    dev: LinuxI2CDevice,
    path: String,
}

impl LinuxSmbus {
    /// Opens the bus device and binds the 7-bit slave address.
    pub fn open(path: &str, address: u16) -> Result<Self, BusError> {
        let dev = LinuxI2CDevice::new(path, address).map_err(|e| BusError::Open {
            path: path.to_string(),
            detail: e.to_string(),
        })?;
        tracing::debug!("opened i2c bus {path}, slave address {address:#04x}");
        Ok(Self {
            dev,
            path: path.to_string(),
        })
    }
}

impl FanBus for LinuxSmbus {
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), BusError> {
        self.dev
            .smbus_write_byte_data(register, value)
            .map_err(|e| BusError::WriteFailed {
                register,
                detail: e.to_string(),
            })
    }

    fn read_register(&mut self, register: u8) -> Result<u8, BusError> {
        self.dev
            .smbus_read_byte_data(register)
            .map_err(|e| BusError::ReadFailed {
                register,
                detail: e.to_string(),
            })
    }
}

impl std::fmt::Debug for LinuxSmbus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinuxSmbus").field("path", &self.path).finish()
    }
}
