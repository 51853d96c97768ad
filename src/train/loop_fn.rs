use std::time::Instant;

use tracing::info;

use crate::dataset::data_set::{DataSet, Phase, PhaseScope};
use crate::dataset::error::DatasetError;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;

/// Trains `network` for `network.config().epochs` epochs over the training
/// source of `data_set`, one online update per record.
///
/// The source is released and reopened between epochs, so each epoch starts
/// again from the first record. `EndOfData` ends an epoch; every other error,
/// including a record that does not fit the network's input or output width,
/// aborts the run and is returned unchanged. The source is released on every
/// exit path.
///
/// Returns the statistics of every completed epoch.
pub fn train_loop<D: DataSet + ?Sized>(
    network: &mut Network,
    data_set: &mut D,
) -> Result<Vec<EpochStats>, DatasetError> {
    let total_epochs = network.config().epochs;
    let mut history = Vec::with_capacity(total_epochs);
    let mut source = PhaseScope::enter(data_set, Phase::Training)?;

    for epoch in 1..=total_epochs {
        let t_start = Instant::now();
        let mut records = 0usize;
        let mut total_loss = 0.0;

        loop {
            let record = match source.read_next() {
                Ok(record) => record,
                Err(e) if e.is_end_of_data() => break,
                Err(e) => return Err(e),
            };

            source.input_nodes(&record, network.input_mut())?;
            network.forward();
            source.target_nodes(&record, network.target_mut())?;
            total_loss += network.backward();
            records += 1;
        }

        let stats = EpochStats {
            epoch,
            total_epochs,
            records,
            train_loss: if records > 0 { total_loss / records as f64 } else { 0.0 },
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            epoch = stats.epoch,
            total = stats.total_epochs,
            records = stats.records,
            loss = stats.train_loss,
            elapsed_ms = stats.elapsed_ms,
            "epoch finished"
        );
        history.push(stats);

        if epoch < total_epochs {
            source.release();
            source.open(Phase::Training)?;
        }
    }

    Ok(history)
}
