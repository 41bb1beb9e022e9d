// Copyright (c) 2025 pifan contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # pifan
//!
//! Command-line interface for the pifan thermal controller.
//!
//! ## Usage
//! ```bash
//! # Run the control loop in the foreground
//! pifan run
//!
//! # Run with explicit thresholds
//! pifan run --target-temp 50 --hysteresis-margin 3
//!
//! # One-shot readout of both sensors
//! pifan status
//!
//! # Print the effective configuration as TOML
//! pifan config --config /etc/pifan.toml
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pifan",
    about = "Hysteresis fan controller for single-board computers",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (CLI flags override it).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the control loop in the foreground until terminated.
    Run {
        #[command(flatten)]
        overrides: commands::ConfigOverrides,
    },

    /// Read both temperature sensors once and show the controller setup.
    Status {
        #[command(flatten)]
        overrides: commands::ConfigOverrides,
    },

    /// Print the effective configuration (defaults, file, CLI merged).
    Config {
        #[command(flatten)]
        overrides: commands::ConfigOverrides,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Run { overrides } => commands::run::execute(cli.config.as_deref(), overrides).await,
        Commands::Status { overrides } => {
            commands::status::execute(cli.config.as_deref(), overrides).await
        }
        Commands::Config { overrides } => {
            commands::config::execute(cli.config.as_deref(), overrides).await
        }
    }
}
