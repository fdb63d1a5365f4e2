// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Training configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! layers = [8]
//! activation = "relu"
//! epochs = 1000
//! learning_rate = 0.05
//! seed = 42
//! log_every = 100
//! ```

use crate::{Activation, NnError};
use std::path::Path;

/// Configuration for building and training a [`crate::NeuralNetwork`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrainConfig {
    /// Widths of the hidden dense layers, input side first.
    #[serde(default = "default_layers")]
    pub layers: Vec<usize>,
    /// Activation after every hidden layer: `"relu"` or `"sigmoid"`.
    #[serde(default = "default_activation")]
    pub activation: String,
    /// Number of passes over the training set.
    pub epochs: usize,
    /// SGD step size.
    pub learning_rate: f32,
    /// Seed for weight initialisation. Layer `i` uses `seed + i`.
    pub seed: Option<u64>,
    /// Emit a progress event every this many epochs (0 disables).
    #[serde(default)]
    pub log_every: usize,
}

fn default_layers() -> Vec<usize> {
    vec![8]
}

fn default_activation() -> String {
    "relu".to_string()
}

impl TrainConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, NnError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            NnError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, NnError> {
        toml::from_str(toml_str)
            .map_err(|e| NnError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, NnError> {
        toml::to_string_pretty(self)
            .map_err(|e| NnError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Parses the activation name.
    pub fn parse_activation(&self) -> Result<Activation, NnError> {
        self.activation.parse()
    }

    /// Checks that the configuration describes a trainable network.
    pub fn validate(&self) -> Result<(), NnError> {
        if self.epochs == 0 {
            return Err(NnError::ConfigError("epochs must be at least 1".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NnError::ConfigError(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if let Some(pos) = self.layers.iter().position(|&w| w == 0) {
            return Err(NnError::ConfigError(format!(
                "hidden layer {pos} has zero width"
            )));
        }
        self.parse_activation()?;
        Ok(())
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            layers: default_layers(),
            activation: default_activation(),
            epochs: 1000,
            learning_rate: 0.05,
            seed: Some(42),
            log_every: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = TrainConfig::default();
        assert_eq!(c.layers, vec![8]);
        assert_eq!(c.activation, "relu");
        assert_eq!(c.seed, Some(42));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
layers = [4, 4]
activation = "sigmoid"
epochs = 50
learning_rate = 0.5
seed = 7
"#;
        let c = TrainConfig::from_toml(toml).unwrap();
        assert_eq!(c.layers, vec![4, 4]);
        assert_eq!(c.parse_activation().unwrap(), Activation::Sigmoid);
        assert_eq!(c.epochs, 50);
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.log_every, 0);
    }

    #[test]
    fn test_from_toml_defaults_layers() {
        let c = TrainConfig::from_toml("epochs = 3\nlearning_rate = 0.1\n").unwrap();
        assert_eq!(c.layers, vec![8]);
        assert_eq!(c.activation, "relu");
        assert_eq!(c.seed, None);
    }

    #[test]
    fn test_from_toml_missing_epochs() {
        assert!(matches!(
            TrainConfig::from_toml("learning_rate = 0.1\n"),
            Err(NnError::ConfigError(_))
        ));
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = TrainConfig::default();
        let toml = c.to_toml().unwrap();
        let back = TrainConfig::from_toml(&toml).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_validate_rejects() {
        let zero_epochs = TrainConfig {
            epochs: 0,
            ..Default::default()
        };
        assert!(zero_epochs.validate().is_err());

        let bad_lr = TrainConfig {
            learning_rate: -0.1,
            ..Default::default()
        };
        assert!(bad_lr.validate().is_err());

        let bad_activation = TrainConfig {
            activation: "bogus".into(),
            ..Default::default()
        };
        assert!(bad_activation.validate().is_err());

        let zero_width = TrainConfig {
            layers: vec![4, 0],
            ..Default::default()
        };
        assert!(zero_width.validate().is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = TrainConfig::from_file(Path::new("/nonexistent/train.toml")).unwrap_err();
        assert!(err.to_string().contains("cannot read config"));
    }
}
