use serde::{Deserialize, Serialize};

/// Per-epoch training statistics produced by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Records trained on during this epoch.
    pub records: usize,
    /// Mean over records of the per-record mean squared output error.
    pub train_loss: f64,
    /// Wall-clock duration of this epoch in milliseconds.
    pub elapsed_ms: u64,
}

/// Successes and failures of a forward-only evaluation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub successes: usize,
    pub failures: usize,
}

impl Score {
    pub fn total(&self) -> usize {
        self.successes + self.failures
    }

    /// `successes / (successes + failures)`, or 0.0 when nothing succeeded.
    pub fn accuracy(&self) -> f64 {
        if self.successes > 0 {
            let s = self.successes as f64;
            s / (s + self.failures as f64)
        } else {
            0.0
        }
    }
}
