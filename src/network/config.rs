use serde::{Deserialize, Serialize};

use crate::dataset::error::DatasetError;

/// Sizing and training hyperparameters of a three-layer network.
///
/// Fields:
/// - `input_nodes`  : one node per feature
/// - `hidden_nodes` : width of the single hidden layer
/// - `output_nodes` : one node per class
/// - `epochs`       : full passes over the training source
/// - `learning_rate`: step size of every online update; must be positive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub input_nodes: usize,
    pub hidden_nodes: usize,
    pub output_nodes: usize,
    pub epochs: usize,
    pub learning_rate: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            input_nodes: 784,
            hidden_nodes: 200,
            output_nodes: 10,
            epochs: 1,
            learning_rate: 0.2,
        }
    }
}

impl NetworkConfig {
    pub fn new(input_nodes: usize, hidden_nodes: usize, output_nodes: usize, epochs: usize, learning_rate: f64) -> Self {
        NetworkConfig {
            input_nodes,
            hidden_nodes,
            output_nodes,
            epochs,
            learning_rate,
        }
    }

    /// Rejects empty layers and a learning rate that is not a positive real.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let layers = [
            ("network.input_nodes", self.input_nodes),
            ("network.hidden_nodes", self.hidden_nodes),
            ("network.output_nodes", self.output_nodes),
        ];
        for (field, nodes) in layers {
            if nodes == 0 {
                return Err(DatasetError::InvalidConfig { field, reason: "a layer needs at least one node".into() });
            }
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(DatasetError::InvalidConfig {
                field: "network.learning_rate",
                reason: format!("must be a positive real, got {}", self.learning_rate),
            });
        }
        Ok(())
    }
}
