pub mod epoch_stats;
pub mod evaluate;
pub mod loop_fn;
pub mod run;

pub use epoch_stats::{EpochStats, Score};
pub use evaluate::{evaluate, test, validate};
pub use loop_fn::train_loop;
pub use run::{check_shapes, train_and_test, train_and_test_with, RunReport};
