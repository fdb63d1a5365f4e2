// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tensor-rt train` command: fit the XOR truth table.

use nn::{Matrix, NeuralNetwork, TrainConfig};

pub fn execute(config: TrainConfig) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              tensor-rt · XOR Trainer                 ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    config.validate()?;

    // ── Configuration ──────────────────────────────────────────
    println!("  Config:");
    println!("   Hidden:     {:?}", config.layers);
    println!("   Activation: {}", config.activation);
    println!("   Epochs:     {}", config.epochs);
    println!("   LR:         {}", config.learning_rate);
    match config.seed {
        Some(seed) => println!("   Seed:       {seed}"),
        None => println!("   Seed:       (random)"),
    }
    println!();

    let x = Matrix::from_vec([4, 2], vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0])?;
    let y = Matrix::from_vec([4, 1], vec![0.0, 1.0, 1.0, 0.0])?;

    // ── Training ───────────────────────────────────────────────
    let mut net = NeuralNetwork::from_config(&config, 2, 1)?;
    let metrics = net.fit(&x, &y, &config)?;
    println!("  {}", metrics.summary());
    println!();

    // ── Predictions ────────────────────────────────────────────
    let predictions = net.predict(&x)?;
    println!("  {:<6} {:<6} {:>8} {:>10}", "a", "b", "target", "predicted");
    println!("  {}", "-".repeat(34));
    for i in 0..4 {
        println!(
            "  {:<6} {:<6} {:>8} {:>10.4}",
            x.get([i, 0])?,
            x.get([i, 1])?,
            y.get([i, 0])?,
            predictions.get([i, 0])?,
        );
    }

    Ok(())
}
