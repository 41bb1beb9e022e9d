// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `pifan config` command: print the effective configuration.
//!
//! Renders the merged result of defaults, the optional TOML file and the
//! CLI overrides, exactly as `pifan run` would use it. The output is
//! itself valid configuration, so it can seed a file:
//!
//! ```bash
//! pifan config --target-temp 50 > /etc/pifan.toml
//! ```

use std::path::Path;

use super::ConfigOverrides;

pub async fn execute(config_path: Option<&Path>, overrides: ConfigOverrides) -> anyhow::Result<()> {
    let config = super::load_config(config_path, overrides)?;
    print!("{}", config.to_toml()?);
    Ok(())
}
