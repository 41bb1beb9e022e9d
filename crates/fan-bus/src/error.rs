// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the bus transport layer.

/// Errors raised by [`FanBus`](crate::FanBus) transports.
///
/// The kernel-level error is carried as text rather than as a typed source:
/// callers switch on the failed operation, not on the errno behind it.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// The bus character device could not be opened or the slave address
    /// could not be bound.
    #[error("cannot open i2c bus '{path}': {detail}")]
    Open {
        /// Device path, e.g. `/dev/i2c-22`.
        path: String,
        /// Underlying failure.
        detail: String,
    },

    /// A register write failed (NACK, timeout, lost arbitration).
    #[error("i2c write to register {register:#04x} failed: {detail}")]
    WriteFailed {
        /// Target register.
        register: u8,
        /// Underlying failure.
        detail: String,
    },

    /// A register read failed.
    #[error("i2c read from register {register:#04x} failed: {detail}")]
    ReadFailed {
        /// Source register.
        register: u8,
        /// Underlying failure.
        detail: String,
    },
}
