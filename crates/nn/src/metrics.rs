// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Training metrics.
//!
//! [`TrainingMetrics`] collects the mean loss of every epoch together with
//! wall-clock timing, so runs with different configurations can be compared.

use std::time::Duration;

/// Metrics for a single epoch.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EpochMetrics {
    /// Zero-based epoch number.
    pub epoch: usize,
    /// Mean loss over all samples in this epoch.
    pub mean_loss: f32,
    /// Time spent on this epoch.
    pub duration: Duration,
}

/// Aggregate metrics for a complete training run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TrainingMetrics {
    /// Total wall-clock time for the run.
    pub total_duration: Duration,
    /// Number of samples per epoch.
    pub num_samples: usize,
    /// Per-epoch metrics.
    pub epochs: Vec<EpochMetrics>,
}

impl TrainingMetrics {
    /// Creates an empty metrics container.
    pub fn new(num_samples: usize) -> Self {
        Self {
            total_duration: Duration::ZERO,
            num_samples,
            epochs: Vec::new(),
        }
    }

    /// Records one finished epoch.
    pub fn record_epoch(&mut self, mean_loss: f32, duration: Duration) {
        self.epochs.push(EpochMetrics {
            epoch: self.epochs.len(),
            mean_loss,
            duration,
        });
    }

    /// Finalises metrics with the total wall-clock time.
    pub fn finalise(&mut self, total: Duration) {
        self.total_duration = total;
    }

    /// Mean loss of the first epoch, if any.
    pub fn initial_loss(&self) -> Option<f32> {
        self.epochs.first().map(|e| e.mean_loss)
    }

    /// Mean loss of the last epoch, if any.
    pub fn final_loss(&self) -> Option<f32> {
        self.epochs.last().map(|e| e.mean_loss)
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "Training: {} epochs x {} samples in {:.2}ms, loss {:.6} -> {:.6}",
            self.epochs.len(),
            self.num_samples,
            self.total_duration.as_secs_f64() * 1000.0,
            self.initial_loss().unwrap_or(0.0),
            self.final_loss().unwrap_or(0.0),
        )
    }
}
