pub mod math;
pub mod activation;
pub mod network;
pub mod dataset;
pub mod train;
pub mod config;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::sigmoid;
pub use network::{Network, NetworkConfig};
pub use dataset::{DataSet, DatasetConfig, DatasetError, DatasetRecord, FormatErrorKind, MnistDataSet, Phase};
pub use train::{train_and_test, train_and_test_with, train_loop, EpochStats, RunReport, Score};
pub use config::RunConfig;
