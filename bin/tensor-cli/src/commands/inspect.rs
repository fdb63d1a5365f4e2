// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tensor-rt inspect` command: display the network a configuration builds.

use nn::{NeuralNetwork, TrainConfig};

pub fn execute(config: TrainConfig) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              tensor-rt · Network Inspector           ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let net = NeuralNetwork::from_config(&config, 2, 1)
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // ── Summary ────────────────────────────────────────────────
    println!("  Layers:     {}", net.len());
    println!("  Parameters: {}", net.num_parameters());
    println!();

    // ── Per-Layer Detail ───────────────────────────────────────
    for line in net.summary().lines() {
        println!("  {line}");
    }
    println!();

    // ── Configuration ──────────────────────────────────────────
    println!("  As TOML:");
    for line in config.to_toml()?.lines() {
        println!("   {line}");
    }

    Ok(())
}
