// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for temperature probes.

/// Errors raised by [`TemperatureProbe`](crate::TemperatureProbe)
/// implementations.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The external measurement command could not be run or exited with an
    /// error.
    #[error("measurement command '{command}' unavailable: {detail}")]
    Unavailable {
        /// The command that was invoked.
        command: String,
        /// Spawn failure or exit status.
        detail: String,
    },

    /// Command output did not match the expected `temp=<float>'C` form.
    #[error("unparseable sensor output '{output}'")]
    Parse {
        /// The offending line, trimmed.
        output: String,
    },

    /// The sensor produced a non-finite value (NaN or infinity).
    #[error("sensor '{sensor}' returned a non-finite reading")]
    NotFinite {
        /// Which probe rejected the reading.
        sensor: &'static str,
    },

    /// The bus transaction behind the reading failed.
    #[error("sensor bus failure: {0}")]
    Bus(#[from] fan_bus::BusError),
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_not_finite_names_the_sensor() {
        let err = ProbeError::NotFinite { sensor: "cpu" };
        assert_eq!(err.to_string(), "sensor 'cpu' returned a non-finite reading");
        // The sensor name is plain payload, not an underlying cause.
        assert!(err.source().is_none());
    }

    #[test]
    fn test_bus_failure_keeps_the_cause_chain() {
        let err = ProbeError::from(fan_bus::BusError::ReadFailed {
            register: 0x00,
            detail: "NACK".to_string(),
        });
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("sensor bus failure"));
    }
}
