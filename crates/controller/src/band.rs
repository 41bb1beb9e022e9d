// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The switching band around the target temperature.

use crate::ControlError;

/// Immutable switching thresholds.
///
/// The band spans `[target - margin, target + margin]`. An off fan switches
/// on only strictly above the upper edge; a running fan switches off only
/// strictly below the lower edge. Readings inside the closed band, the
/// edges included, never switch.
///
/// A zero margin is accepted and degenerates to plain threshold switching,
/// which can toggle every cycle when the reading hovers at the target; the
/// driver logs a warning for that configuration at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlBand {
    target_temp: f64,
    hysteresis_margin: f64,
}

impl ControlBand {
    /// Creates a band, rejecting non-finite values and negative margins.
    pub fn new(target_temp: f64, hysteresis_margin: f64) -> Result<Self, ControlError> {
        if !target_temp.is_finite() {
            return Err(ControlError::InvalidBand(format!(
                "target temperature must be finite, got {target_temp}"
            )));
        }
        if !hysteresis_margin.is_finite() || hysteresis_margin < 0.0 {
            return Err(ControlError::InvalidBand(format!(
                "hysteresis margin must be finite and non-negative, got {hysteresis_margin}"
            )));
        }
        Ok(Self {
            target_temp,
            hysteresis_margin,
        })
    }

    /// The switching setpoint in degrees Celsius.
    pub fn target_temp(&self) -> f64 {
        self.target_temp
    }

    /// The deadband half-width in degrees Celsius.
    pub fn hysteresis_margin(&self) -> f64 {
        self.hysteresis_margin
    }

    /// Edge above which an off fan switches on.
    pub fn upper(&self) -> f64 {
        self.target_temp + self.hysteresis_margin
    }

    /// Edge below which a running fan switches off.
    pub fn lower(&self) -> f64 {
        self.target_temp - self.hysteresis_margin
    }

    /// Returns `true` for the degenerate zero-width band.
    pub fn is_degenerate(&self) -> bool {
        self.hysteresis_margin == 0.0
    }
}

impl std::fmt::Display for ControlBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "target {:.1}'C, margin {:.1}'C (band {:.1}..{:.1})",
            self.target_temp,
            self.hysteresis_margin,
            self.lower(),
            self.upper()
        )
    }
}
