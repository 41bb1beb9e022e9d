// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! End-to-end tests of the control loop against fake hardware: the full
//! sample/decide/actuate/record pipeline, the hardened failure policy and
//! the fixed-cadence driver.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use controller::{ControlError, ControlLoop, DaemonConfig};
use fan_bus::{BusError, FanDrive, FanPower};
use probes::{ProbeError, TemperatureProbe};

/// Serves a fixed script of readings, one per cycle.
struct ScriptedProbe {
    name: &'static str,
    readings: VecDeque<Result<f64, ()>>,
}

impl ScriptedProbe {
    fn new(name: &'static str, readings: &[Result<f64, ()>]) -> Self {
        Self {
            name,
            readings: readings.iter().copied().collect(),
        }
    }
}

impl TemperatureProbe for ScriptedProbe {
    fn source(&self) -> &'static str {
        self.name
    }

    fn read_celsius(&mut self) -> Result<f64, ProbeError> {
        self.readings
            .pop_front()
            .expect("probe script exhausted")
            .map_err(|_| ProbeError::Unavailable {
                command: "vcgencmd".to_string(),
                detail: "scripted failure".to_string(),
            })
    }
}

/// Serves the same reading forever.
struct SteadyProbe(f64);

impl TemperatureProbe for SteadyProbe {
    fn source(&self) -> &'static str {
        "steady"
    }

    fn read_celsius(&mut self) -> Result<f64, ProbeError> {
        Ok(self.0)
    }
}

/// Records every command through a handle that outlives the loop.
#[derive(Clone)]
struct SharedFan {
    commands: Arc<Mutex<Vec<FanPower>>>,
    fail: Arc<AtomicBool>,
}

impl SharedFan {
    fn new() -> Self {
        Self {
            commands: Arc::new(Mutex::new(Vec::new())),
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    fn commands(&self) -> Vec<FanPower> {
        self.commands.lock().unwrap().clone()
    }
}

impl FanDrive for SharedFan {
    fn set_power(&mut self, power: FanPower) -> Result<(), BusError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(BusError::WriteFailed {
                register: 0x03,
                detail: "NACK".to_string(),
            });
        }
        self.commands.lock().unwrap().push(power);
        Ok(())
    }
}

fn test_config(name: &str) -> DaemonConfig {
    let log_path = std::env::temp_dir().join(format!("pifan_integration_test_{name}"));
    let _ = std::fs::remove_file(&log_path);
    DaemonConfig {
        log_path,
        ..DaemonConfig::default()
    }
}

fn log_fan_states(path: &Path) -> Vec<bool> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| {
            if line.ends_with("-> true") {
                true
            } else {
                assert!(line.ends_with("-> false"), "malformed line: {line}");
                false
            }
        })
        .collect()
}

#[test]
fn test_band_crossing_scenario_through_the_full_pipeline() {
    let config = test_config("scenario");
    let log_path = config.log_path.clone();

    let cpu = ScriptedProbe::new(
        "cpu",
        &[Ok(50.0), Ok(58.0), Ok(61.0), Ok(53.0), Ok(48.0)],
    );
    let fan = SharedFan::new();
    let mut control =
        ControlLoop::with_parts(config, cpu, SteadyProbe(45.0), fan.clone()).unwrap();

    control.startup().unwrap();
    for _ in 0..5 {
        control.step();
    }

    // Startup off, then one switch on crossing 60 and one off crossing 50.
    assert_eq!(
        fan.commands(),
        vec![FanPower::Off, FanPower::Full, FanPower::Off]
    );
    assert_eq!(
        log_fan_states(&log_path),
        vec![false, false, true, true, false]
    );
    assert_eq!(control.stats().cycles, 5);
    assert_eq!(control.stats().transitions, 2);
    assert_eq!(control.fan_state(), FanPower::Off);

    let _ = std::fs::remove_file(&log_path);
}

#[test]
fn test_hovering_inside_the_band_never_actuates() {
    let config = test_config("hover");
    let log_path = config.log_path.clone();

    // Every reading sits inside the closed band [50, 60].
    let cpu = ScriptedProbe::new(
        "cpu",
        &[Ok(50.0), Ok(59.9), Ok(60.0), Ok(50.1), Ok(55.0), Ok(60.0)],
    );
    let fan = SharedFan::new();
    let mut control =
        ControlLoop::with_parts(config, cpu, SteadyProbe(45.0), fan.clone()).unwrap();

    control.startup().unwrap();
    for _ in 0..6 {
        control.step();
    }

    assert_eq!(fan.commands(), vec![FanPower::Off]);
    assert_eq!(control.stats().transitions, 0);
    assert_eq!(log_fan_states(&log_path), vec![false; 6]);

    let _ = std::fs::remove_file(&log_path);
}

#[test]
fn test_sensor_dropout_skips_the_cycle_and_recovers() {
    let config = test_config("dropout");
    let log_path = config.log_path.clone();

    let cpu = ScriptedProbe::new("cpu", &[Ok(61.0), Err(()), Ok(53.0)]);
    let fan = SharedFan::new();
    let mut control =
        ControlLoop::with_parts(config, cpu, SteadyProbe(45.0), fan.clone()).unwrap();

    control.startup().unwrap();
    for _ in 0..3 {
        control.step();
    }

    // The failed cycle leaves no record and no actuation; the fan stays on
    // through it and through the in-band reading after it.
    assert_eq!(fan.commands(), vec![FanPower::Off, FanPower::Full]);
    assert_eq!(log_fan_states(&log_path), vec![true, true]);
    assert_eq!(control.stats().cycles, 3);
    assert_eq!(control.stats().sensor_failures, 1);
    assert_eq!(control.fan_state(), FanPower::Full);

    let _ = std::fs::remove_file(&log_path);
}

#[test]
fn test_actuator_dropout_retries_until_the_bus_recovers() {
    let config = test_config("actuator_dropout");
    let log_path = config.log_path.clone();

    let cpu = ScriptedProbe::new("cpu", &[Ok(61.0), Ok(61.5), Ok(62.0)]);
    let fan = SharedFan::new();
    let mut control =
        ControlLoop::with_parts(config, cpu, SteadyProbe(45.0), fan.clone()).unwrap();

    control.startup().unwrap();
    fan.fail.store(true, Ordering::SeqCst);
    control.step();
    control.step();
    fan.fail.store(false, Ordering::SeqCst);
    control.step();

    assert_eq!(fan.commands(), vec![FanPower::Off, FanPower::Full]);
    assert_eq!(control.stats().actuator_failures, 2);
    assert_eq!(control.stats().transitions, 1);
    // The log never claimed the fan was on while the writes were failing.
    assert_eq!(log_fan_states(&log_path), vec![false, false, true]);

    let _ = std::fs::remove_file(&log_path);
}

#[test]
fn test_log_stays_bounded_across_many_cycles() {
    let mut config = test_config("bounded");
    config.log_cap_bytes = 100;
    let log_path = config.log_path.clone();

    let fan = SharedFan::new();
    let mut control =
        ControlLoop::with_parts(config, SteadyProbe(40.0), SteadyProbe(38.0), fan.clone())
            .unwrap();

    control.startup().unwrap();
    // One record is 45 bytes with its terminator.
    for _ in 0..20 {
        control.step();
        let size = std::fs::metadata(&log_path).unwrap().len();
        assert!(size <= 100 + 45, "log grew to {size} bytes");
    }

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(!content.is_empty());
    assert!(content.ends_with('\n'));
    assert_eq!(control.stats().log_failures, 0);

    let _ = std::fs::remove_file(&log_path);
}

#[tokio::test(start_paused = true)]
async fn test_run_ticks_on_the_configured_cadence() {
    let config = test_config("cadence");
    let log_path = config.log_path.clone();

    let fan = SharedFan::new();
    let control =
        ControlLoop::with_parts(config, SteadyProbe(40.0), SteadyProbe(38.0), fan.clone())
            .unwrap();

    // First cycle at t=0, then every 15 s: four cycles before t=50.
    tokio::select! {
        res = control.run() => panic!("run returned: {res:?}"),
        () = tokio::time::sleep(std::time::Duration::from_secs(50)) => {}
    }

    assert_eq!(fan.commands(), vec![FanPower::Off]);
    assert_eq!(
        std::fs::read_to_string(&log_path).unwrap().lines().count(),
        4
    );

    let _ = std::fs::remove_file(&log_path);
}

#[tokio::test]
async fn test_run_aborts_when_startup_actuation_fails() {
    let config = test_config("startup_abort");
    let log_path = config.log_path.clone();

    let fan = SharedFan::new();
    fan.fail.store(true, Ordering::SeqCst);
    let control =
        ControlLoop::with_parts(config, SteadyProbe(40.0), SteadyProbe(38.0), fan.clone())
            .unwrap();

    let err = control.run().await.unwrap_err();
    assert!(matches!(err, ControlError::Startup(_)));
    assert!(fan.commands().is_empty());
    assert!(!log_path.exists());
}
