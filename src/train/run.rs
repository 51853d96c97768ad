use tracing::info;

use crate::dataset::config::DatasetConfig;
use crate::dataset::data_set::{check_layout, DataSet, Phase};
use crate::dataset::error::DatasetError;
use crate::dataset::mnist::MnistDataSet;
use crate::network::config::NetworkConfig;
use crate::network::network::Network;
use crate::train::epoch_stats::{EpochStats, Score};
use crate::train::evaluate::{evaluate, validate};
use crate::train::loop_fn::train_loop;

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub epochs: Vec<EpochStats>,
    /// Validation accuracy, when a validation phase was run.
    pub validation_accuracy: Option<f64>,
    /// Successes and failures on the test source.
    pub test_score: Score,
    /// Test accuracy in [0, 1].
    pub accuracy: f64,
}

/// Builds a fresh network and an MNIST CSV source from the two configs,
/// trains, and returns the test accuracy.
///
/// Validation runs between training and testing when the dataset config
/// names a validation file; its accuracy is logged only.
pub fn train_and_test(nn_config: &NetworkConfig, ds_config: &DatasetConfig) -> Result<f64, DatasetError> {
    nn_config.validate()?;
    ds_config.validate()?;
    check_shapes(nn_config, ds_config)?;

    let mut network = Network::new(nn_config.clone());
    let mut data_set = MnistDataSet::new(ds_config.clone())?;

    train_and_test_with(&mut network, &mut data_set, ds_config.has_validation())
        .map(|report| report.accuracy)
}

/// Trains `network` on `data_set`, optionally validates, then tests.
///
/// When the source reports its layout up front, a width or class count the
/// network cannot hold is a `ShapeMismatch` before any phase is opened.
pub fn train_and_test_with<D: DataSet + ?Sized>(
    network: &mut Network,
    data_set: &mut D,
    with_validation: bool,
) -> Result<RunReport, DatasetError> {
    if let Some(layout) = data_set.layout() {
        let config = network.config();
        check_layout(config.input_nodes, config.output_nodes, &layout)?;
    }

    let epochs = train_loop(network, data_set)?;

    let validation_accuracy = if with_validation {
        let accuracy = validate(network, data_set)?;
        info!(accuracy, "validation accuracy");
        Some(accuracy)
    } else {
        None
    };

    let test_score = evaluate(network, data_set, Phase::Test)?;
    let accuracy = test_score.accuracy();
    info!(accuracy, "test accuracy");

    Ok(RunReport {
        epochs,
        validation_accuracy,
        test_score,
        accuracy,
    })
}

/// Rejects a dataset whose record width or class count does not fit the network.
pub fn check_shapes(nn_config: &NetworkConfig, ds_config: &DatasetConfig) -> Result<(), DatasetError> {
    check_layout(nn_config.input_nodes, nn_config.output_nodes, &ds_config.layout())
}
