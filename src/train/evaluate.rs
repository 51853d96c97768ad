use tracing::info;

use crate::dataset::data_set::{DataSet, Phase, PhaseScope};
use crate::dataset::error::DatasetError;
use crate::network::network::Network;
use crate::train::epoch_stats::Score;

/// Runs forward passes over every record of `phase` and counts how many
/// predictions match their label. Weights are not touched.
pub fn evaluate<D: DataSet + ?Sized>(
    network: &mut Network,
    data_set: &mut D,
    phase: Phase,
) -> Result<Score, DatasetError> {
    let mut score = Score::default();
    let mut source = PhaseScope::enter(data_set, phase)?;

    loop {
        let record = match source.read_next() {
            Ok(record) => record,
            Err(e) if e.is_end_of_data() => break,
            Err(e) => return Err(e),
        };

        source.input_nodes(&record, network.input_mut())?;
        let output = network.forward();
        if source.matches_label(&record, output) {
            score.successes += 1;
        } else {
            score.failures += 1;
        }
    }

    info!(
        %phase,
        successes = score.successes,
        failures = score.failures,
        accuracy = score.accuracy(),
        "evaluation finished"
    );
    Ok(score)
}

/// Accuracy on the test source.
pub fn test<D: DataSet + ?Sized>(network: &mut Network, data_set: &mut D) -> Result<f64, DatasetError> {
    evaluate(network, data_set, Phase::Test).map(|score| score.accuracy())
}

/// Accuracy on the validation source.
pub fn validate<D: DataSet + ?Sized>(network: &mut Network, data_set: &mut D) -> Result<f64, DatasetError> {
    evaluate(network, data_set, Phase::Validation).map(|score| score.accuracy())
}
