// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`Layer`] trait.

use crate::{Matrix, NnError};

/// A differentiable stage of a [`crate::NeuralNetwork`].
///
/// Layers cache whatever `forward` needs so that the following `backward`
/// can turn the gradient with respect to the output into the gradient with
/// respect to the input. Parameter gradients stay inside the layer until
/// [`Layer::update`] applies them.
pub trait Layer: std::fmt::Debug {
    /// Human-readable name of this layer.
    fn name(&self) -> &'static str;

    /// Computes the layer output for `input`.
    fn forward(&mut self, input: &Matrix) -> Result<Matrix, NnError>;

    /// Propagates `grad` (d loss / d output) back to d loss / d input.
    fn backward(&mut self, grad: &Matrix) -> Result<Matrix, NnError>;

    /// Applies one gradient-descent step to the layer's parameters.
    fn update(&mut self, _learning_rate: f32) -> Result<(), NnError> {
        Ok(())
    }

    /// Number of trainable scalars.
    fn num_parameters(&self) -> usize {
        0
    }

    /// Output width, for layers that fix it. Elementwise layers keep the
    /// width of their input and return `None`.
    fn output_features(&self) -> Option<usize> {
        None
    }
}
