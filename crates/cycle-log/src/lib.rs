// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # cycle-log
//!
//! Bounded append-only log file for control cycle records.
//!
//! An always-on daemon appending one line per cycle would grow its log
//! without limit on boards where the "disk" is an SD card. [`BoundedLog`]
//! enforces a byte cap with the simplest possible policy: when an append
//! pushes the file past the cap, the whole file is rewritten to contain
//! only the line just appended. No rotation, no archives; the newest
//! observation always survives, the history restarts from there.

mod bounded;
mod error;

pub use bounded::{BoundedLog, DEFAULT_CAP_BYTES};
pub use error::LogError;
