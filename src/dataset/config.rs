use serde::{Deserialize, Serialize};

use crate::dataset::data_set::Phase;
use crate::dataset::error::DatasetError;
use crate::dataset::record::RecordLayout;

/// Where the record files live and how wide each record is.
///
/// `validation_file_name` may be empty, which disables the validation phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Directory prefix joined with each file name.
    pub path_name: String,
    pub training_file_name: String,
    pub validation_file_name: String,
    pub test_file_name: String,
    /// Feature tokens per record.
    pub input_data: usize,
    /// Label tokens per record; the first one is the class index.
    pub output_data: usize,
    /// Number of label classes. A label outside `[0, classes)` is a format error.
    pub classes: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            path_name: "mnist_dataset/".into(),
            training_file_name: "mnist_train.csv".into(),
            validation_file_name: String::new(),
            test_file_name: "mnist_test.csv".into(),
            input_data: 784,
            output_data: 1,
            classes: 10,
        }
    }
}

impl DatasetConfig {
    /// File name registered for `phase`, or `None` when it is empty.
    pub fn file_name(&self, phase: Phase) -> Option<&str> {
        let name = match phase {
            Phase::Training => &self.training_file_name,
            Phase::Validation => &self.validation_file_name,
            Phase::Test => &self.test_file_name,
        };
        if name.is_empty() {
            None
        } else {
            Some(name.as_str())
        }
    }

    pub fn has_validation(&self) -> bool {
        self.file_name(Phase::Validation).is_some()
    }

    /// Record layout described by this config.
    pub fn layout(&self) -> RecordLayout {
        RecordLayout {
            label_fields: self.output_data,
            feature_fields: self.input_data,
            classes: self.classes,
        }
    }

    /// Rejects layouts no record can satisfy.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let checks = [
            ("dataset.output_data", self.output_data, "a record needs at least one label field"),
            ("dataset.input_data", self.input_data, "a record needs at least one feature"),
            ("dataset.classes", self.classes, "at least one class is required"),
        ];
        for (field, value, reason) in checks {
            if value == 0 {
                return Err(DatasetError::InvalidConfig { field, reason: reason.into() });
            }
        }
        Ok(())
    }
}
