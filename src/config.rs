use serde::{Deserialize, Serialize};

use crate::dataset::config::DatasetConfig;
use crate::dataset::data_set::check_layout;
use crate::dataset::error::DatasetError;
use crate::network::config::NetworkConfig;

/// Run configuration file format. Every field may be omitted.
///
/// ```json
/// {
///   "network": { "hidden_nodes": 100, "epochs": 5 },
///   "dataset": { "path_name": "data/", "test_file_name": "mnist_test_10.csv" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub network: NetworkConfig,
    pub dataset: DatasetConfig,
}

impl RunConfig {
    /// Deserializes a `RunConfig` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Checks both halves and that the network fits the records.
    pub fn validate(&self) -> Result<(), DatasetError> {
        self.network.validate()?;
        self.dataset.validate()?;
        check_layout(self.network.input_nodes, self.network.output_nodes, &self.dataset.layout())
    }
}
