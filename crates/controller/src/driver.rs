// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The daemon driver: startup actuation and the fixed-cadence loop.

use std::cell::RefCell;
use std::rc::Rc;

use cycle_log::BoundedLog;
use fan_bus::{Fan, FanDrive, FanPower, LinuxSmbus};
use probes::{AttinyProbe, CpuProbe, TemperatureProbe};
use tokio::time::MissedTickBehavior;

use crate::{run_cycle, ControlError, DaemonConfig, HysteresisController, LoopStats};

/// Cycles between periodic stats lines; one hour at the default cadence.
const STATS_EVERY: u64 = 240;

/// One bus handle shared by the secondary probe and the fan.
///
/// The loop is a single-threaded actor, so the handle never crosses a
/// thread boundary and `RefCell` borrows never overlap.
pub type SharedBus = Rc<RefCell<LinuxSmbus>>;

/// The control loop: owns every resource a cycle touches and runs cycles
/// strictly sequentially on a fixed cadence.
///
/// Cycle failures are absorbed into [`LoopStats`]; the loop itself only
/// fails at startup (bus open, initial fan-off). It runs until the process
/// is terminated.
pub struct ControlLoop<P, S, F> {
    config: DaemonConfig,
    primary: P,
    secondary: S,
    fan: F,
    controller: HysteresisController,
    log: BoundedLog,
    stats: LoopStats,
}

impl ControlLoop<CpuProbe, AttinyProbe<SharedBus>, Fan<SharedBus>> {
    /// Opens the hardware named by `config` and builds the loop over it.
    ///
    /// The bus is opened exactly once; the secondary probe and the fan
    /// share the handle. An open failure is fatal.
    pub fn open(config: DaemonConfig) -> Result<Self, ControlError> {
        config.validate()?;
        let bus: SharedBus = Rc::new(RefCell::new(LinuxSmbus::open(
            &config.bus_path,
            config.bus_address,
        )?));
        let secondary = AttinyProbe::new(Rc::clone(&bus));
        let fan = Fan::new(bus);
        Self::with_parts(config, CpuProbe::new(), secondary, fan)
    }
}

impl<P, S, F> ControlLoop<P, S, F>
where
    P: TemperatureProbe,
    S: TemperatureProbe,
    F: FanDrive,
{
    /// Builds a loop over explicit parts (for testing).
    pub fn with_parts(
        config: DaemonConfig,
        primary: P,
        secondary: S,
        fan: F,
    ) -> Result<Self, ControlError> {
        config.validate()?;
        let band = config.band()?;
        if band.is_degenerate() {
            tracing::warn!(
                "hysteresis margin is 0, the fan may toggle every cycle around {:.1}'C",
                band.target_temp()
            );
        }
        let log = BoundedLog::with_cap(&config.log_path, config.log_cap_bytes);
        tracing::info!("control band: {band}");
        tracing::info!(
            "cycle log: {} (cap {} bytes), cadence {}s",
            log.path().display(),
            log.cap_bytes(),
            config.cycle_interval
        );
        Ok(Self {
            config,
            primary,
            secondary,
            fan,
            controller: HysteresisController::new(band),
            log,
            stats: LoopStats::default(),
        })
    }

    /// Issues the startup fan-off command so the hardware matches the
    /// controller's assumed initial state, whatever ran before.
    ///
    /// [`run`](Self::run) calls this before the first tick. A failure here
    /// is fatal and the daemon does not start.
    pub fn startup(&mut self) -> Result<(), ControlError> {
        self.fan.set_power(FanPower::Off)?;
        tracing::info!("startup: fan commanded off");
        Ok(())
    }

    /// Runs one cycle immediately and folds the outcome into the stats.
    pub fn step(&mut self) {
        match run_cycle(
            &mut self.primary,
            &mut self.secondary,
            &mut self.fan,
            &mut self.controller,
            &mut self.log,
        ) {
            Ok(report) => self.stats.record_report(&report),
            Err(_) => self.stats.record_sensor_failure(),
        }
        if self.stats.cycles % STATS_EVERY == 0 {
            tracing::info!("{}", self.stats.summary());
        }
    }

    /// Runs forever on the configured cadence.
    ///
    /// The first cycle runs immediately after the startup command. Cycles
    /// never overlap: a tick that lands while a cycle is still executing is
    /// delayed, so log order always matches cycle order.
    pub async fn run(mut self) -> Result<(), ControlError> {
        self.startup()?;

        let mut ticks = tokio::time::interval(self.config.cycle_period());
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticks.tick().await;
            self.step();
        }
    }

    /// The current counters.
    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    /// The configuration the loop was built with.
    pub fn config(&self) -> &DaemonConfig {
        &self.config
    }

    /// The controller's current notion of fan state.
    pub fn fan_state(&self) -> FanPower {
        self.controller.fan_state()
    }
}

impl<P, S, F> std::fmt::Debug for ControlLoop<P, S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlLoop")
            .field("band", &self.controller.band())
            .field("fan_state", &self.controller.fan_state())
            .field("cycles", &self.stats.cycles)
            .finish()
    }
}
