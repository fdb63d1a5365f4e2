// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sequential feed-forward network with per-sample SGD.
//!
//! Samples are the rows of an `[n, features]` matrix. Each row is fed
//! through the layers as an `[features, 1]` column vector; predictions are
//! gathered back into `[n, outputs]`.

use std::time::Instant;

use crate::{Dense, Layer, Matrix, MseLoss, NnError, TrainConfig, TrainingMetrics};

/// An ordered stack of layers trained against [`MseLoss`].
#[derive(Debug, Default)]
pub struct NeuralNetwork {
    layers: Vec<Box<dyn Layer>>,
    loss: MseLoss,
}

impl NeuralNetwork {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds `in_features -> config.layers... -> out_features` with the
    /// configured activation after every hidden layer and a linear output.
    pub fn from_config(
        config: &TrainConfig,
        in_features: usize,
        out_features: usize,
    ) -> Result<Self, NnError> {
        config.validate()?;
        let activation = config.parse_activation()?;

        let mut widths = Vec::with_capacity(config.layers.len() + 2);
        widths.push(in_features);
        widths.extend_from_slice(&config.layers);
        widths.push(out_features);

        let mut network = Self::new();
        let mut rng = rand::thread_rng();
        for (i, pair) in widths.windows(2).enumerate() {
            let dense = match config.seed {
                Some(seed) => Dense::with_seed(pair[0], pair[1], seed.wrapping_add(i as u64)),
                None => Dense::with_rng(pair[0], pair[1], &mut rng),
            };
            network.add_layer(Box::new(dense));
            if i + 2 < widths.len() {
                network.add_layer(activation.layer());
            }
        }

        tracing::info!(
            widths = ?widths,
            activation = activation.as_str(),
            parameters = network.num_parameters(),
            "network built"
        );
        Ok(network)
    }

    /// Appends a layer.
    pub fn add_layer(&mut self, layer: Box<dyn Layer>) {
        self.layers.push(layer);
    }

    /// Builder form of [`NeuralNetwork::add_layer`].
    pub fn with_layer(mut self, layer: impl Layer + 'static) -> Self {
        self.add_layer(Box::new(layer));
        self
    }

    /// Number of layers, activations included.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if no layer has been added.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Iterates over the layers in execution order.
    pub fn layers(&self) -> impl Iterator<Item = &dyn Layer> {
        self.layers.iter().map(|l| l.as_ref())
    }

    /// Total number of trainable scalars.
    pub fn num_parameters(&self) -> usize {
        self.layers.iter().map(|l| l.num_parameters()).sum()
    }

    /// Runs one column vector through every layer.
    pub fn forward(&mut self, input: &Matrix) -> Result<Matrix, NnError> {
        let mut activation = input.clone();
        for layer in &mut self.layers {
            activation = layer.forward(&activation)?;
        }
        Ok(activation)
    }

    /// Propagates `grad` back through every layer, last to first.
    pub fn backward(&mut self, grad: &Matrix) -> Result<Matrix, NnError> {
        let mut grad = grad.clone();
        for layer in self.layers.iter_mut().rev() {
            grad = layer.backward(&grad)?;
        }
        Ok(grad)
    }

    /// Applies the gradients recorded by the last backward pass.
    pub fn optimize(&mut self, learning_rate: f32) -> Result<(), NnError> {
        for layer in &mut self.layers {
            layer.update(learning_rate)?;
        }
        Ok(())
    }

    /// Trains for `epochs` passes of per-sample SGD and returns the mean loss
    /// of the final epoch.
    ///
    /// With `epochs == 0` the network is left untouched and the current mean
    /// loss is returned.
    pub fn train(
        &mut self,
        inputs: &Matrix,
        targets: &Matrix,
        epochs: usize,
        learning_rate: f32,
    ) -> Result<f32, NnError> {
        if epochs == 0 {
            return self.evaluate(inputs, targets);
        }
        let metrics = self.run(inputs, targets, epochs, learning_rate, 0)?;
        Ok(metrics.final_loss().unwrap_or(0.0))
    }

    /// Trains with the epochs, learning rate and logging cadence of `config`.
    pub fn fit(
        &mut self,
        inputs: &Matrix,
        targets: &Matrix,
        config: &TrainConfig,
    ) -> Result<TrainingMetrics, NnError> {
        config.validate()?;
        self.run(
            inputs,
            targets,
            config.epochs,
            config.learning_rate,
            config.log_every,
        )
    }

    /// Mean loss over all samples without updating any parameters.
    pub fn evaluate(&mut self, inputs: &Matrix, targets: &Matrix) -> Result<f32, NnError> {
        let n = check_samples(inputs, targets)?;
        let mut total = 0.0;
        for i in 0..n {
            let output = self.forward(&row_as_column(inputs, i)?)?;
            total += self.loss.forward(&output, &row_as_column(targets, i)?)?;
        }
        Ok(total / n.max(1) as f32)
    }

    /// Output width of the last layer that fixes one, or `None` for a
    /// network without such a layer.
    pub fn output_features(&self) -> Option<usize> {
        self.layers.iter().rev().find_map(|l| l.output_features())
    }

    /// Runs every row of `inputs` through the network; the result has one
    /// row per sample. An input without rows yields `[0, output_features]`.
    pub fn predict(&mut self, inputs: &Matrix) -> Result<Matrix, NnError> {
        let [n, _] = *inputs.shape();
        let mut data = Vec::new();
        let mut width = self.output_features().unwrap_or(0);
        for i in 0..n {
            let output = self.forward(&row_as_column(inputs, i)?)?;
            width = output.size();
            data.extend(output.into_vec());
        }
        Ok(Matrix::from_vec([n, width], data)?)
    }

    /// One line per layer with its parameter count.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for (i, layer) in self.layers.iter().enumerate() {
            out.push_str(&format!(
                "{i:>3}: {:<8} {:>6} params\n",
                layer.name(),
                layer.num_parameters()
            ));
        }
        out.push_str(&format!("total: {} params", self.num_parameters()));
        out
    }

    fn run(
        &mut self,
        inputs: &Matrix,
        targets: &Matrix,
        epochs: usize,
        learning_rate: f32,
        log_every: usize,
    ) -> Result<TrainingMetrics, NnError> {
        let n = check_samples(inputs, targets)?;
        let samples = (0..n)
            .map(|i| -> Result<_, NnError> {
                Ok((row_as_column(inputs, i)?, row_as_column(targets, i)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(samples = n, epochs, learning_rate, "training started");

        let mut metrics = TrainingMetrics::new(n);
        let start = Instant::now();

        for epoch in 0..epochs {
            let epoch_start = Instant::now();
            let mut total = 0.0;
            for (x, y) in &samples {
                let output = self.forward(x)?;
                total += self.loss.forward(&output, y)?;
                let grad = self.loss.backward()?;
                self.backward(&grad)?;
                self.optimize(learning_rate)?;
            }
            let mean_loss = total / n.max(1) as f32;

            if !mean_loss.is_finite() {
                tracing::warn!(epoch, mean_loss, "loss is not finite");
            }
            if log_every > 0 && (epoch + 1) % log_every == 0 {
                tracing::info!(epoch = epoch + 1, mean_loss, "epoch complete");
            }
            metrics.record_epoch(mean_loss, epoch_start.elapsed());
        }

        metrics.finalise(start.elapsed());
        tracing::info!(
            final_loss = metrics.final_loss().unwrap_or(0.0),
            elapsed_ms = metrics.total_duration.as_secs_f64() * 1000.0,
            "training finished"
        );
        Ok(metrics)
    }
}

fn check_samples(inputs: &Matrix, targets: &Matrix) -> Result<usize, NnError> {
    let (n, m) = (inputs.shape()[0], targets.shape()[0]);
    if n != m {
        return Err(NnError::SampleMismatch {
            inputs: n,
            targets: m,
        });
    }
    Ok(n)
}

/// Copies row `i` of `m` into an `[cols, 1]` column vector.
fn row_as_column(m: &Matrix, i: usize) -> Result<Matrix, NnError> {
    let cols = m.shape()[1];
    let row = m.as_slice()[i * cols..(i + 1) * cols].to_vec();
    Ok(Matrix::from_vec([cols, 1], row)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReLU;

    fn identity_dense(n: usize) -> Dense {
        let mut w = Matrix::zeros([n, n]);
        for i in 0..n {
            w.set([i, i], 1.0).unwrap();
        }
        Dense::from_parts(w, Matrix::zeros([n, 1])).unwrap()
    }

    #[test]
    fn test_forward_folds_layers() {
        let mut net = NeuralNetwork::new()
            .with_layer(identity_dense(2))
            .with_layer(ReLU::new());
        let x = Matrix::from_vec([2, 1], vec![-1.0, 3.0]).unwrap();
        let y = net.forward(&x).unwrap();
        assert_eq!(y.as_slice(), &[0.0, 3.0]);
        assert_eq!(net.len(), 2);
    }

    #[test]
    fn test_backward_reverses_layers() {
        let mut net = NeuralNetwork::new()
            .with_layer(identity_dense(2))
            .with_layer(ReLU::new());
        net.forward(&Matrix::from_vec([2, 1], vec![-1.0, 3.0]).unwrap())
            .unwrap();
        let g = net.backward(&Matrix::full([2, 1], 1.0)).unwrap();
        assert_eq!(g.as_slice(), &[0.0, 1.0]);
    }

    #[test]
    fn test_predict_shape() {
        let mut net = NeuralNetwork::new().with_layer(Dense::new(3, 2));
        let x = Matrix::zeros([4, 3]);
        let y = net.predict(&x).unwrap();
        assert_eq!(y.shape(), &[4, 2]);
    }

    #[test]
    fn test_predict_without_rows_keeps_output_width() {
        let mut net = NeuralNetwork::new()
            .with_layer(Dense::new(3, 2))
            .with_layer(ReLU::new());
        assert_eq!(net.output_features(), Some(2));
        let y = net.predict(&Matrix::zeros([0, 3])).unwrap();
        assert_eq!(y.shape(), &[0, 2]);
        assert_eq!(y.size(), 0);

        assert_eq!(NeuralNetwork::new().output_features(), None);
    }

    #[test]
    fn test_sample_mismatch() {
        let mut net = NeuralNetwork::new().with_layer(Dense::new(2, 1));
        let err = net
            .train(&Matrix::zeros([4, 2]), &Matrix::zeros([3, 1]), 1, 0.1)
            .unwrap_err();
        assert!(matches!(
            err,
            NnError::SampleMismatch {
                inputs: 4,
                targets: 3
            }
        ));
    }

    #[test]
    fn test_wrong_feature_count() {
        let mut net = NeuralNetwork::new().with_layer(Dense::new(2, 1));
        assert!(matches!(
            net.predict(&Matrix::zeros([1, 3])),
            Err(NnError::InvalidShape { layer: "dense", .. })
        ));
    }

    #[test]
    fn test_zero_epochs_evaluates() {
        let mut net = NeuralNetwork::new().with_layer(Dense::new(1, 1));
        let x = Matrix::from_vec([2, 1], vec![1.0, 2.0]).unwrap();
        let y = Matrix::from_vec([2, 1], vec![1.0, 3.0]).unwrap();
        // Zero weights predict 0: mean of (1 + 9) / 2.
        assert_eq!(net.train(&x, &y, 0, 0.1).unwrap(), 5.0);
    }

    #[test]
    fn test_from_config_layout() {
        let config = TrainConfig {
            layers: vec![4, 3],
            ..Default::default()
        };
        let net = NeuralNetwork::from_config(&config, 2, 1).unwrap();
        let names: Vec<_> = net.layers().map(|l| l.name()).collect();
        assert_eq!(names, ["dense", "relu", "dense", "relu", "dense"]);
        assert_eq!(net.num_parameters(), (2 * 4 + 4) + (4 * 3 + 3) + (3 + 1));
        assert!(net.summary().contains("total: 31 params"));
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = TrainConfig {
            activation: "swish".into(),
            ..Default::default()
        };
        assert!(NeuralNetwork::from_config(&config, 2, 1).is_err());
    }

    #[test]
    fn test_linear_regression_converges() {
        // y = 2x + 1
        let mut net = NeuralNetwork::new().with_layer(Dense::new(1, 1));
        let x = Matrix::from_vec([4, 1], vec![0.0, 0.5, 1.0, 1.5]).unwrap();
        let y = x.map(|v| 2.0 * v + 1.0);
        let loss = net.train(&x, &y, 500, 0.1).unwrap();
        assert!(loss < 1e-4, "loss = {loss}");
    }
}
