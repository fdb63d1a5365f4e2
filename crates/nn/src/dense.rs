// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fully connected (affine) layer.

use crate::{Layer, Matrix, NnError};
use rand::{Rng, SeedableRng};
use tensor_core::Shape;

/// A dense layer: `y = W x + b` on column vectors.
///
/// `W` is `[out_features, in_features]`, `b` is `[out_features, 1]`, and the
/// input must be a column vector `[in_features, 1]`.
#[derive(Debug, Clone)]
pub struct Dense {
    weights: Matrix,
    bias: Matrix,
    grad_weights: Matrix,
    grad_bias: Matrix,
    last_input: Option<Matrix>,
}

impl Dense {
    /// Creates a layer with all parameters set to zero.
    pub fn new(in_features: usize, out_features: usize) -> Self {
        Self {
            weights: Matrix::zeros([out_features, in_features]),
            bias: Matrix::zeros([out_features, 1]),
            grad_weights: Matrix::zeros([out_features, in_features]),
            grad_bias: Matrix::zeros([out_features, 1]),
            last_input: None,
        }
    }

    /// Creates a layer with Kaiming-uniform weights drawn from `rng` and a
    /// zero bias.
    pub fn with_rng<R: Rng + ?Sized>(in_features: usize, out_features: usize, rng: &mut R) -> Self {
        let mut layer = Self::new(in_features, out_features);
        let limit = if in_features == 0 {
            0.0
        } else {
            (6.0 / in_features as f32).sqrt()
        };
        layer
            .weights
            .iter_mut()
            .for_each(|w| *w = rng.gen_range(-limit..=limit));
        layer
    }

    /// Creates a randomly initialised layer from a fixed seed.
    pub fn with_seed(in_features: usize, out_features: usize, seed: u64) -> Self {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        Self::with_rng(in_features, out_features, &mut rng)
    }

    /// Creates a layer from explicit parameters.
    ///
    /// `bias` must be `[weights.rows, 1]`.
    pub fn from_parts(weights: Matrix, bias: Matrix) -> Result<Self, NnError> {
        let [out_features, in_features] = *weights.shape();
        if bias.shape() != &[out_features, 1] {
            return Err(NnError::InvalidShape {
                layer: "dense",
                expected: Shape::from([out_features, 1]),
                actual: bias.dims(),
            });
        }
        Ok(Self {
            weights,
            bias,
            grad_weights: Matrix::zeros([out_features, in_features]),
            grad_bias: Matrix::zeros([out_features, 1]),
            last_input: None,
        })
    }

    /// Number of input features.
    pub fn in_features(&self) -> usize {
        self.weights.shape()[1]
    }

    /// Number of output features.
    pub fn out_features(&self) -> usize {
        self.weights.shape()[0]
    }

    /// Weight matrix, `[out_features, in_features]`.
    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    /// Bias column, `[out_features, 1]`.
    pub fn bias(&self) -> &Matrix {
        &self.bias
    }

    /// Gradient of the loss with respect to `W` from the last backward pass.
    pub fn grad_weights(&self) -> &Matrix {
        &self.grad_weights
    }

    /// Gradient of the loss with respect to `b` from the last backward pass.
    pub fn grad_bias(&self) -> &Matrix {
        &self.grad_bias
    }

    fn expect_column(&self, t: &Matrix, rows: usize) -> Result<(), NnError> {
        if t.shape() != &[rows, 1] {
            return Err(NnError::InvalidShape {
                layer: "dense",
                expected: Shape::from([rows, 1]),
                actual: t.dims(),
            });
        }
        Ok(())
    }
}

impl Layer for Dense {
    fn name(&self) -> &'static str {
        "dense"
    }

    fn forward(&mut self, input: &Matrix) -> Result<Matrix, NnError> {
        self.expect_column(input, self.in_features())?;
        let output = (self.weights.matmul(input)? + &self.bias)?;
        self.last_input = Some(input.clone());
        Ok(output)
    }

    fn backward(&mut self, grad: &Matrix) -> Result<Matrix, NnError> {
        self.expect_column(grad, self.out_features())?;
        let input = self
            .last_input
            .as_ref()
            .ok_or(NnError::MissingForward { layer: "dense" })?;

        self.grad_weights = grad.matmul(&input.transpose()?)?;
        self.grad_bias = grad.clone();
        Ok(self.weights.transpose()?.matmul(grad)?)
    }

    fn update(&mut self, learning_rate: f32) -> Result<(), NnError> {
        self.weights = (&self.weights - &(&self.grad_weights * learning_rate))?;
        self.bias = (&self.bias - &(&self.grad_bias * learning_rate))?;
        Ok(())
    }

    fn num_parameters(&self) -> usize {
        self.weights.size() + self.bias.size()
    }

    fn output_features(&self) -> Option<usize> {
        Some(self.out_features())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[f32]) -> Matrix {
        Matrix::from_vec([values.len(), 1], values.to_vec()).unwrap()
    }

    #[test]
    fn test_rejects_bad_input_shapes() {
        let mut dense = Dense::new(2, 4);
        for shape in [[3, 1], [1, 1], [2, 0], [2, 7]] {
            assert!(matches!(
                dense.forward(&Matrix::zeros(shape)),
                Err(NnError::InvalidShape { layer: "dense", .. })
            ));
        }
        assert!(dense.forward(&column(&[5.0, 2.0])).is_ok());
    }

    #[test]
    fn test_forward_affine() {
        let w = Matrix::from_vec([2, 3], vec![1.0, 0.0, 2.0, -1.0, 3.0, 1.0]).unwrap();
        let b = column(&[0.5, -0.5]);
        let mut dense = Dense::from_parts(w, b).unwrap();
        let y = dense.forward(&column(&[3.0, 2.0, 1.0])).unwrap();
        assert_eq!(y.as_slice(), &[5.5, 3.5]);
    }

    #[test]
    fn test_backward_gradients() {
        let w = Matrix::from_vec([1, 2], vec![2.0, -1.0]).unwrap();
        let mut dense = Dense::from_parts(w, column(&[0.0])).unwrap();
        dense.forward(&column(&[3.0, 4.0])).unwrap();

        let grad_in = dense.backward(&column(&[0.5])).unwrap();
        assert_eq!(grad_in.as_slice(), &[1.0, -0.5]);
        assert_eq!(dense.grad_weights().as_slice(), &[1.5, 2.0]);
        assert_eq!(dense.grad_bias().as_slice(), &[0.5]);
    }

    #[test]
    fn test_update_steps_against_gradient() {
        let w = Matrix::from_vec([1, 1], vec![1.0]).unwrap();
        let mut dense = Dense::from_parts(w, column(&[0.0])).unwrap();
        dense.forward(&column(&[2.0])).unwrap();
        dense.backward(&column(&[1.0])).unwrap();
        dense.update(0.1).unwrap();
        assert!((dense.weights().as_slice()[0] - 0.8).abs() < 1e-6);
        assert!((dense.bias().as_slice()[0] + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_backward_requires_forward() {
        let mut dense = Dense::new(2, 1);
        assert!(matches!(
            dense.backward(&column(&[1.0])),
            Err(NnError::MissingForward { .. })
        ));
    }

    #[test]
    fn test_seeded_init_is_deterministic() {
        let a = Dense::with_seed(4, 3, 7);
        let b = Dense::with_seed(4, 3, 7);
        assert_eq!(a.weights(), b.weights());
        let limit = (6.0f32 / 4.0).sqrt();
        assert!(a.weights().iter().all(|w| w.abs() <= limit));
        assert!(a.weights().iter().any(|&w| w != 0.0));
        assert_eq!(a.num_parameters(), 15);
        assert_eq!(a.output_features(), Some(3));
    }

    #[test]
    fn test_from_parts_checks_bias() {
        let w = Matrix::zeros([2, 3]);
        assert!(Dense::from_parts(w, Matrix::zeros([3, 1])).is_err());
    }
}
