// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-rt
//!
//! Command-line interface for the tensor core and its feed-forward network.
//!
//! ## Usage
//! ```bash
//! # Train the XOR network
//! tensor-rt train --epochs 2000 --learning-rate 0.05
//!
//! # Show the network a configuration would build
//! tensor-rt inspect --config train.toml
//!
//! # Walk through reshape, broadcasting, transpose and matmul
//! tensor-rt demo
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tensor-rt",
    about = "Fixed-rank tensors and a small feed-forward network",
    version,
    author
)]
struct Cli {
    /// Path to a TOML training configuration file.
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a network on XOR and print its predictions.
    Train {
        /// Number of epochs (overrides the configuration).
        #[arg(short, long)]
        epochs: Option<usize>,

        /// SGD learning rate (overrides the configuration).
        #[arg(short, long)]
        learning_rate: Option<f32>,

        /// Weight-initialisation seed (overrides the configuration).
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Print the layer layout a configuration builds.
    Inspect,

    /// Walk through the core tensor operations.
    Demo,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Train {
            epochs,
            learning_rate,
            seed,
        } => {
            let mut config = commands::load_config(cli.config.as_deref())?;
            if let Some(epochs) = epochs {
                config.epochs = epochs;
            }
            if let Some(lr) = learning_rate {
                config.learning_rate = lr;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            commands::train::execute(config)
        }
        Commands::Inspect => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::inspect::execute(config)
        }
        Commands::Demo => commands::demo::execute(),
    }
}
