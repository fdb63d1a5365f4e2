// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for network layers and training.

use tensor_core::{Shape, TensorError};

/// Errors that can occur while running or training a network.
#[derive(Debug, thiserror::Error)]
pub enum NnError {
    /// A layer or loss received a tensor of the wrong shape.
    #[error("invalid shape for {layer}: expected {expected}, got {actual}")]
    InvalidShape {
        layer: &'static str,
        expected: Shape,
        actual: Shape,
    },

    /// `backward` was called without a preceding `forward`.
    #[error("{layer}: backward called before forward")]
    MissingForward { layer: &'static str },

    /// Inputs and targets disagree on the number of samples.
    #[error("{inputs} input samples but {targets} target samples")]
    SampleMismatch { inputs: usize, targets: usize },

    /// A tensor operation failed inside a layer.
    #[error("tensor operation failed: {0}")]
    Tensor(#[from] TensorError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
