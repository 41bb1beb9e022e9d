// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `pifan run` command: the foreground control loop.
//!
//! Opens the bus, commands the fan off, then cycles forever:
//! ```text
//! sample cpu → sample attiny → evaluate band → actuate (edge) → record
//! ```
//! Intended to sit under a process supervisor (systemd unit or similar);
//! it stops only on termination or on a startup failure.

use std::path::Path;

use anyhow::Context;
use controller::ControlLoop;

use super::ConfigOverrides;

pub async fn execute(config_path: Option<&Path>, overrides: ConfigOverrides) -> anyhow::Result<()> {
    let config = super::load_config(config_path, overrides)?;

    let control = ControlLoop::open(config).context("cannot bring up the fan helper board")?;
    tracing::info!(
        "pifan running in the foreground, cycling every {}s",
        control.config().cycle_interval
    );
    control.run().await.context("control loop stopped")?;
    Ok(())
}
