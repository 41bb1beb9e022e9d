// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! A single control cycle: sample, decide, actuate, record.

use chrono::NaiveTime;
use cycle_log::BoundedLog;
use fan_bus::{FanDrive, FanPower};
use probes::{ProbeError, TemperatureProbe};

use crate::{CycleRecord, HysteresisController};

/// What a completed cycle did, for the driver's bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// The record built this cycle (appended to the log unless
    /// `log_failed` is set).
    pub record: CycleRecord,
    /// The transition committed this cycle, if any.
    pub command: Option<FanPower>,
    /// The actuator rejected a transition; the fan state was left
    /// unchanged and the transition will be retried.
    pub actuator_failed: bool,
    /// The record could not be appended to the log file.
    pub log_failed: bool,
}

/// Runs one control cycle stamped with the current wall clock.
///
/// See [`run_cycle_at`] for the semantics.
pub fn run_cycle<P, S, F>(
    primary: &mut P,
    secondary: &mut S,
    fan: &mut F,
    controller: &mut HysteresisController,
    log: &mut BoundedLog,
) -> Result<CycleReport, ProbeError>
where
    P: TemperatureProbe,
    S: TemperatureProbe,
    F: FanDrive,
{
    run_cycle_at(
        chrono::Local::now().time(),
        primary,
        secondary,
        fan,
        controller,
        log,
    )
}

/// Runs one control cycle with an explicit timestamp.
///
/// Both sensors are sampled before anything else; a failure in either
/// aborts the cycle with no decision, no actuation and no log record.
/// After a successful sample the cycle always produces a record, even when
/// the actuator or the log fail; those failures are flagged in the report
/// and the controller state stays truthful (a rejected transition is not
/// committed).
pub fn run_cycle_at<P, S, F>(
    time: NaiveTime,
    primary: &mut P,
    secondary: &mut S,
    fan: &mut F,
    controller: &mut HysteresisController,
    log: &mut BoundedLog,
) -> Result<CycleReport, ProbeError>
where
    P: TemperatureProbe,
    S: TemperatureProbe,
    F: FanDrive,
{
    let cpu_celsius = match primary.read_celsius() {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!("sensor '{}' read failed, cycle skipped: {e}", primary.source());
            return Err(e);
        }
    };
    let attiny_celsius = match secondary.read_celsius() {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!("sensor '{}' read failed, cycle skipped: {e}", secondary.source());
            return Err(e);
        }
    };

    let command = controller.evaluate(cpu_celsius);
    let mut actuator_failed = false;
    if let Some(power) = command {
        match fan.set_power(power) {
            Ok(()) => {
                controller.commit(power);
                tracing::info!("fan -> {power} (cpu {cpu_celsius:.1}'C)");
            }
            Err(e) => {
                actuator_failed = true;
                tracing::warn!("actuator write failed, fan state unchanged: {e}");
            }
        }
    }

    // The record shows the state the controller actually holds, which on an
    // actuator failure is the old one.
    let record = CycleRecord::at(time, cpu_celsius, attiny_celsius, controller.fan_state());
    tracing::info!("{record}");

    let mut log_failed = false;
    if let Err(e) = log.append(&record.to_string()) {
        log_failed = true;
        tracing::warn!("log append failed: {e}");
    }

    Ok(CycleReport {
        record,
        command: if actuator_failed { None } else { command },
        actuator_failed,
        log_failed,
    })
}
