// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: Compare activations on the XOR problem.
//!
//! Trains the same layout with ReLU and sigmoid hidden layers and prints
//! the loss curve endpoints and the learned truth table.
//!
//! ```bash
//! cargo run -p nn --example xor
//! ```

use nn::{Matrix, NeuralNetwork, TrainConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing.
    tracing_subscriber::fmt().with_env_filter("info").init();

    let x = Matrix::from_vec([4, 2], vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0])?;
    let y = Matrix::from_vec([4, 1], vec![0.0, 1.0, 1.0, 0.0])?;

    println!(
        "{:<10} {:>8} {:>12} {:>12} {:>10}",
        "Activation", "Epochs", "First loss", "Final loss", "Time ms",
    );
    println!("{}", "-".repeat(56));

    let mut trained = Vec::new();
    for activation in ["relu", "sigmoid"] {
        let config = TrainConfig {
            layers: vec![16],
            activation: activation.into(),
            epochs: 2000,
            learning_rate: 0.05,
            seed: Some(42),
            log_every: 500,
        };
        let mut net = NeuralNetwork::from_config(&config, 2, 1)?;
        let metrics = net.fit(&x, &y, &config)?;
        println!(
            "{:<10} {:>8} {:>12.6} {:>12.6} {:>10.2}",
            activation,
            metrics.epochs.len(),
            metrics.initial_loss().unwrap_or(0.0),
            metrics.final_loss().unwrap_or(0.0),
            metrics.total_duration.as_secs_f64() * 1000.0,
        );
        trained.push((activation, net));
    }

    for (activation, mut net) in trained {
        println!("\n--- {activation} ---");
        let predictions = net.predict(&x)?;
        for i in 0..4 {
            println!(
                "{} xor {} -> {:.3}",
                x.get([i, 0])?,
                x.get([i, 1])?,
                predictions.get([i, 0])?
            );
        }
    }

    Ok(())
}
