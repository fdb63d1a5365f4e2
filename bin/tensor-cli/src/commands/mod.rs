// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI plumbing.

pub mod demo;
pub mod inspect;
pub mod train;

use std::path::Path;

use nn::TrainConfig;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` repetitions raise the level
/// from `warn` to `info`, `debug` and `trace`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Loads the training configuration, falling back to the XOR defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<TrainConfig> {
    match path {
        Some(path) => {
            let config = TrainConfig::from_file(path)?;
            tracing::info!(path = %path.display(), "loaded configuration");
            Ok(config)
        }
        None => Ok(TrainConfig {
            layers: vec![16],
            epochs: 2000,
            ..Default::default()
        }),
    }
}
