// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Mean squared error loss.

use crate::{Matrix, NnError};

/// Mean squared error: `mean((prediction - target)^2)`.
///
/// `forward` remembers its operands so that `backward` can return
/// `2 / n * (prediction - target)`.
#[derive(Debug, Clone, Default)]
pub struct MseLoss {
    last: Option<(Matrix, Matrix)>,
}

impl MseLoss {
    /// Creates a loss with no remembered operands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the loss for one prediction.
    ///
    /// # Errors
    /// Returns [`NnError::InvalidShape`] if the shapes differ.
    pub fn forward(&mut self, prediction: &Matrix, target: &Matrix) -> Result<f32, NnError> {
        if prediction.shape() != target.shape() {
            return Err(NnError::InvalidShape {
                layer: "mse_loss",
                expected: target.dims(),
                actual: prediction.dims(),
            });
        }

        let diff = (prediction - target)?;
        let n = diff.size();
        let loss = if n == 0 {
            0.0
        } else {
            diff.iter().map(|d| d * d).sum::<f32>() / n as f32
        };

        self.last = Some((prediction.clone(), target.clone()));
        Ok(loss)
    }

    /// Gradient of the last computed loss with respect to the prediction.
    pub fn backward(&self) -> Result<Matrix, NnError> {
        let (prediction, target) = self
            .last
            .as_ref()
            .ok_or(NnError::MissingForward { layer: "mse_loss" })?;
        let diff = (prediction - target)?;
        let scale = 2.0 / diff.size().max(1) as f32;
        Ok(diff * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_backward() {
        let pred = Matrix::from_vec([1, 2], vec![1.0, 2.0]).unwrap();
        let target = Matrix::from_vec([1, 2], vec![0.0, 4.0]).unwrap();

        let mut loss = MseLoss::new();
        let l = loss.forward(&pred, &target).unwrap();
        assert_eq!(l, 2.5);

        let dp = loss.backward().unwrap();
        assert_eq!(dp.get([0, 0]).unwrap(), 1.0);
        assert_eq!(dp.get([0, 1]).unwrap(), -2.0);
    }

    #[test]
    fn test_shape_mismatch() {
        let mut loss = MseLoss::new();
        let result = loss.forward(&Matrix::zeros([2, 1]), &Matrix::zeros([1, 2]));
        assert!(matches!(
            result,
            Err(NnError::InvalidShape {
                layer: "mse_loss",
                ..
            })
        ));
    }

    #[test]
    fn test_backward_requires_forward() {
        assert!(matches!(
            MseLoss::new().backward(),
            Err(NnError::MissingForward { .. })
        ));
    }

    #[test]
    fn test_perfect_prediction() {
        let mut loss = MseLoss::new();
        let t = Matrix::from_vec([3, 1], vec![0.1, 0.2, 0.3]).unwrap();
        assert_eq!(loss.forward(&t, &t).unwrap(), 0.0);
        assert!(loss.backward().unwrap().iter().all(|&g| g == 0.0));
    }
}
