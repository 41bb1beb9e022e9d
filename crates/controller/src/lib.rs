// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # controller
//!
//! The hysteresis decision core and the daemon driver.
//!
//! Everything that makes the fan daemon a *controller* lives here: the
//! switching band, the two-state hysteresis machine, the per-cycle
//! pipeline and the fixed-cadence driver that runs it forever.
//!
//! ## Cycle pipeline
//!
//! ```text
//!   ┌────────┐   ┌────────┐   ┌──────────┐   ┌─────────┐   ┌────────┐
//!   │ sample │──▶│ sample │──▶│ evaluate │──▶│ actuate │──▶│ record │
//!   │  cpu   │   │ attiny │   │   band   │   │  (edge) │   │  line  │
//!   └────────┘   └────────┘   └──────────┘   └─────────┘   └────────┘
//! ```
//!
//! Failure policy is hardened for unattended operation: any failure inside
//! a cycle is logged and counted, and the next cycle starts on schedule.
//! Only two things are fatal, both at startup: opening the bus and the
//! initial fan-off command.
//!
//! The decision is made on the primary (SoC) reading alone. The secondary
//! reading is sampled and recorded every cycle so the two sensors can be
//! correlated offline, but it never influences switching.

mod band;
mod config;
mod cycle;
mod driver;
mod error;
mod hysteresis;
mod record;
mod stats;

pub use band::ControlBand;
pub use config::DaemonConfig;
pub use cycle::{run_cycle, run_cycle_at, CycleReport};
pub use driver::{ControlLoop, SharedBus};
pub use error::ControlError;
pub use hysteresis::HysteresisController;
pub use record::CycleRecord;
pub use stats::LoopStats;
