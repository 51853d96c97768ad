pub mod config;
pub mod data_set;
pub mod error;
pub mod mnist;
pub mod record;

pub use config::DatasetConfig;
pub use data_set::{check_layout, decode_label, encode_target, scale_pixel, DataSet, Phase, PhaseScope};
pub use error::{DatasetError, FormatErrorKind};
pub use mnist::MnistDataSet;
pub use record::{DatasetRecord, RecordLayout};
