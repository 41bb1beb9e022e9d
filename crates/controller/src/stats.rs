// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Diagnostic counters for the control loop.

use crate::CycleReport;

/// Running totals the driver reports on the diagnostic channel.
///
/// Under the hardened failure policy nothing inside a cycle is fatal, so
/// the counters are the only place persistent trouble (a dead sensor, a
/// flaky bus, a full disk) becomes visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoopStats {
    /// Cycles attempted, including failed ones.
    pub cycles: u64,
    /// Committed fan transitions.
    pub transitions: u64,
    /// Cycles abandoned on a sensor failure.
    pub sensor_failures: u64,
    /// Transitions rejected by the actuator.
    pub actuator_failures: u64,
    /// Records that could not be appended to the log.
    pub log_failures: u64,
}

impl LoopStats {
    /// Folds a completed cycle into the totals.
    pub fn record_report(&mut self, report: &CycleReport) {
        self.cycles += 1;
        if report.command.is_some() {
            self.transitions += 1;
        }
        if report.actuator_failed {
            self.actuator_failures += 1;
        }
        if report.log_failed {
            self.log_failures += 1;
        }
    }

    /// Folds an abandoned cycle into the totals.
    pub fn record_sensor_failure(&mut self) {
        self.cycles += 1;
        self.sensor_failures += 1;
    }

    /// One-line summary for periodic reporting.
    pub fn summary(&self) -> String {
        format!(
            "{} cycles, {} transitions, failures: {} sensor / {} actuator / {} log",
            self.cycles,
            self.transitions,
            self.sensor_failures,
            self.actuator_failures,
            self.log_failures
        )
    }
}
