// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Elementwise activation layers.

use crate::{Layer, Matrix, NnError};
use std::str::FromStr;

/// Rectified linear unit: `max(x, 0)`.
#[derive(Debug, Clone, Default)]
pub struct ReLU {
    mask: Option<Matrix>,
}

impl ReLU {
    /// Creates a ReLU with no cached mask.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layer for ReLU {
    fn name(&self) -> &'static str {
        "relu"
    }

    fn forward(&mut self, input: &Matrix) -> Result<Matrix, NnError> {
        let mask = input.map(|x| if x > 0.0 { 1.0 } else { 0.0 });
        let output = (input * &mask)?;
        self.mask = Some(mask);
        Ok(output)
    }

    fn backward(&mut self, grad: &Matrix) -> Result<Matrix, NnError> {
        let mask = self
            .mask
            .as_ref()
            .ok_or(NnError::MissingForward { layer: "relu" })?;
        Ok((grad * mask)?)
    }
}

/// Logistic sigmoid: `1 / (1 + e^-x)`.
#[derive(Debug, Clone, Default)]
pub struct Sigmoid {
    output: Option<Matrix>,
}

impl Sigmoid {
    /// Creates a sigmoid with no cached output.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Layer for Sigmoid {
    fn name(&self) -> &'static str {
        "sigmoid"
    }

    fn forward(&mut self, input: &Matrix) -> Result<Matrix, NnError> {
        let output = input.map(|x| 1.0 / (1.0 + (-x).exp()));
        self.output = Some(output.clone());
        Ok(output)
    }

    fn backward(&mut self, grad: &Matrix) -> Result<Matrix, NnError> {
        let output = self
            .output
            .as_ref()
            .ok_or(NnError::MissingForward { layer: "sigmoid" })?;
        let slope = output.map(|s| s * (1.0 - s));
        Ok((grad * &slope)?)
    }
}

/// Activation selected by name in a [`crate::TrainConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Relu,
    Sigmoid,
}

impl Activation {
    /// Builds a fresh layer for this activation.
    pub fn layer(self) -> Box<dyn Layer> {
        match self {
            Activation::Relu => Box::new(ReLU::new()),
            Activation::Sigmoid => Box::new(Sigmoid::new()),
        }
    }

    /// Configuration name of this activation.
    pub fn as_str(self) -> &'static str {
        match self {
            Activation::Relu => "relu",
            Activation::Sigmoid => "sigmoid",
        }
    }
}

impl FromStr for Activation {
    type Err = NnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relu" => Ok(Activation::Relu),
            "sigmoid" | "logistic" => Ok(Activation::Sigmoid),
            other => Err(NnError::ConfigError(format!(
                "unknown activation '{other}'; expected 'relu' or 'sigmoid'"
            ))),
        }
    }
}
