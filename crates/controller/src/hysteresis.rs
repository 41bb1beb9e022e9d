// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The two-state hysteresis decision core.
//!
//! ```text
//!              temp > target + margin
//!        ┌──────────────────────────────┐
//!        │                              ▼
//!      ┌─────┐                       ┌──────┐
//!      │ Off │                       │ Full │
//!      └─────┘                       └──────┘
//!        ▲                              │
//!        └──────────────────────────────┘
//!              temp < target - margin
//! ```
//!
//! Transitions are edge-triggered: a command is produced only when the
//! state changes, never repeated while the state holds. Between the two
//! edges the current state wins, which is what keeps the fan from
//! chattering when the temperature hovers near the target.

use fan_bus::FanPower;

use crate::ControlBand;

/// Owns the fan state and applies the per-cycle switching decision.
///
/// [`evaluate`](Self::evaluate) is pure: it inspects the reading against
/// the band and returns the transition the actuator should perform, if
/// any. The caller reports a successful actuation back through
/// [`commit`](Self::commit); a transition whose bus write failed is left
/// uncommitted and re-emerges on the next cycle as long as the reading
/// still calls for it.
///
/// A fresh controller assumes the fan is off, which the driver makes true
/// by commanding the fan off before the first cycle.
#[derive(Debug, Clone)]
pub struct HysteresisController {
    band: ControlBand,
    fan_state: FanPower,
}

impl HysteresisController {
    /// Creates a controller with the fan assumed off.
    pub fn new(band: ControlBand) -> Self {
        Self {
            band,
            fan_state: FanPower::Off,
        }
    }

    /// The controller's current notion of fan state.
    pub fn fan_state(&self) -> FanPower {
        self.fan_state
    }

    /// The configured band.
    pub fn band(&self) -> ControlBand {
        self.band
    }

    /// Decides whether the fan state must change for this reading.
    ///
    /// Comparisons are strict, so readings inside the closed band
    /// `[target - margin, target + margin]` hold the state. A non-finite
    /// reading compares false on both edges and also holds the state.
    pub fn evaluate(&self, primary_celsius: f64) -> Option<FanPower> {
        match self.fan_state {
            FanPower::Off if primary_celsius > self.band.upper() => Some(FanPower::Full),
            FanPower::Full if primary_celsius < self.band.lower() => Some(FanPower::Off),
            _ => None,
        }
    }

    /// Records a transition after the actuator accepted it.
    pub fn commit(&mut self, power: FanPower) {
        self.fan_state = power;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> HysteresisController {
        HysteresisController::new(ControlBand::new(55.0, 5.0).unwrap())
    }

    #[test]
    fn test_off_holds_up_to_and_including_upper_edge() {
        let c = controller();
        assert_eq!(c.evaluate(50.0), None);
        assert_eq!(c.evaluate(58.0), None);
        assert_eq!(c.evaluate(60.0), None);
    }

    #[test]
    fn test_off_switches_on_strictly_above_upper_edge() {
        let c = controller();
        assert_eq!(c.evaluate(60.1), Some(FanPower::Full));
        assert_eq!(c.evaluate(61.0), Some(FanPower::Full));
    }

    #[test]
    fn test_full_holds_down_to_and_including_lower_edge() {
        let mut c = controller();
        c.commit(FanPower::Full);
        assert_eq!(c.evaluate(53.0), None);
        assert_eq!(c.evaluate(50.0), None);
        assert_eq!(c.evaluate(59.0), None);
    }

    #[test]
    fn test_full_switches_off_strictly_below_lower_edge() {
        let mut c = controller();
        c.commit(FanPower::Full);
        assert_eq!(c.evaluate(49.9), Some(FanPower::Off));
        assert_eq!(c.evaluate(48.0), Some(FanPower::Off));
    }

    #[test]
    fn test_no_chatter_inside_band_from_either_state() {
        let hover = [51.0, 59.0, 50.0, 60.0, 55.0];

        let off = controller();
        for temp in hover {
            assert_eq!(off.evaluate(temp), None);
        }

        let mut full = controller();
        full.commit(FanPower::Full);
        for temp in hover {
            assert_eq!(full.evaluate(temp), None);
        }
    }

    #[test]
    fn test_evaluate_does_not_mutate() {
        let c = controller();
        assert_eq!(c.evaluate(61.0), Some(FanPower::Full));
        // Uncommitted, the same reading produces the same command again.
        assert_eq!(c.evaluate(61.0), Some(FanPower::Full));
        assert_eq!(c.fan_state(), FanPower::Off);
    }

    #[test]
    fn test_commit_after_failed_actuation_is_retried() {
        let mut c = controller();
        let command = c.evaluate(61.0).unwrap();
        // Actuator rejected the write: no commit, next cycle re-emits.
        assert_eq!(c.evaluate(61.0), Some(command));
        c.commit(command);
        assert_eq!(c.evaluate(61.0), None);
    }

    #[test]
    fn test_zero_margin_switches_only_strictly_past_target() {
        let c = HysteresisController::new(ControlBand::new(55.0, 0.0).unwrap());
        assert_eq!(c.evaluate(55.0), None);
        assert_eq!(c.evaluate(55.1), Some(FanPower::Full));

        let mut full = HysteresisController::new(ControlBand::new(55.0, 0.0).unwrap());
        full.commit(FanPower::Full);
        assert_eq!(full.evaluate(55.0), None);
        assert_eq!(full.evaluate(54.9), Some(FanPower::Off));
    }

    #[test]
    fn test_non_finite_reading_holds_state() {
        let off = controller();
        assert_eq!(off.evaluate(f64::NAN), None);

        let mut full = controller();
        full.commit(FanPower::Full);
        assert_eq!(full.evaluate(f64::NAN), None);
    }

    #[test]
    fn test_band_crossing_sequence() {
        // 55'C target, 5'C margin, fan initially off.
        let mut c = controller();
        let mut states = Vec::new();
        for temp in [50.0, 58.0, 61.0, 53.0, 48.0] {
            if let Some(command) = c.evaluate(temp) {
                c.commit(command);
            }
            states.push(c.fan_state());
        }
        assert_eq!(
            states,
            vec![
                FanPower::Off,
                FanPower::Off,
                FanPower::Full,
                FanPower::Full,
                FanPower::Off,
            ]
        );
    }
}
