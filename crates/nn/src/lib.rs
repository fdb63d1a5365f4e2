// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # nn
//!
//! A small feed-forward network built on `tensor-core` matrices.
//!
//! Every layer works on column vectors (`[features, 1]` matrices) and caches
//! what it needs from `forward` for the following `backward`. A
//! [`NeuralNetwork`] chains layers, measures [`MseLoss`] and applies
//! per-sample stochastic gradient descent.
//!
//! ```
//! use nn::{Matrix, NeuralNetwork, TrainConfig};
//!
//! let config = TrainConfig { layers: vec![4], epochs: 10, ..Default::default() };
//! let mut net = NeuralNetwork::from_config(&config, 2, 1).unwrap();
//! let x = Matrix::from_vec([2, 2], vec![0.0, 1.0, 1.0, 0.0]).unwrap();
//! let y = Matrix::from_vec([2, 1], vec![1.0, 1.0]).unwrap();
//! let metrics = net.fit(&x, &y, &config).unwrap();
//! assert_eq!(metrics.epochs.len(), 10);
//! ```

mod activation;
mod config;
mod dense;
mod error;
mod layer;
mod loss;
mod metrics;
mod network;

pub use activation::{Activation, ReLU, Sigmoid};
pub use config::TrainConfig;
pub use dense::Dense;
pub use error::NnError;
pub use layer::Layer;
pub use loss::MseLoss;
pub use metrics::{EpochMetrics, TrainingMetrics};
pub use network::NeuralNetwork;

/// The matrix type every layer consumes and produces.
pub type Matrix = tensor_core::Tensor<f32, 2>;
