use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::dataset::error::DatasetError;
use crate::dataset::record::{DatasetRecord, RecordLayout};

/// Target value for the true class.
pub const TARGET_ON: f64 = 0.99;
/// Target value for every other class.
pub const TARGET_OFF: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Training,
    Validation,
    Test,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Training => "training",
            Phase::Validation => "validation",
            Phase::Test => "test",
        };
        f.write_str(name)
    }
}

/// The capabilities the training and test drivers need from a record source.
///
/// Only `open`, `read_next` and `release` touch the underlying format; the
/// conversions have defaults that fit any integer-pixel dataset.
pub trait DataSet {
    /// Opens the source for `phase` and positions it at the first record.
    fn open(&mut self, phase: Phase) -> Result<(), DatasetError>;

    /// Next record, or `Err(DatasetError::EndOfData)` once the source is exhausted.
    fn read_next(&mut self) -> Result<DatasetRecord, DatasetError>;

    /// Closes the current source. Must be a no-op when nothing is open.
    fn release(&mut self);

    /// Record layout every record of this source follows, when known up front.
    fn layout(&self) -> Option<RecordLayout> {
        None
    }

    /// Writes the scaled features of `record` into `nodes`. Every node is
    /// written; a feature count other than `nodes.len()` is a `ShapeMismatch`.
    fn input_nodes(&self, record: &DatasetRecord, nodes: &mut [f64]) -> Result<(), DatasetError> {
        if record.features.len() != nodes.len() {
            return Err(DatasetError::ShapeMismatch {
                what: "input nodes",
                expected: nodes.len(),
                found: record.features.len(),
            });
        }
        for (node, &raw) in nodes.iter_mut().zip(record.features.iter()) {
            *node = scale_pixel(raw);
        }
        Ok(())
    }

    /// Writes the target encoding of `record.label` into `nodes`. A label
    /// with no node is a `ShapeMismatch`.
    fn target_nodes(&self, record: &DatasetRecord, nodes: &mut [f64]) -> Result<(), DatasetError> {
        if record.label >= nodes.len() {
            return Err(DatasetError::ShapeMismatch {
                what: "output nodes",
                expected: nodes.len(),
                found: record.label + 1,
            });
        }
        encode_target(record.label, nodes);
        Ok(())
    }

    fn decode_label(&self, output: &[f64]) -> usize {
        decode_label(output)
    }

    fn matches_label(&self, record: &DatasetRecord, output: &[f64]) -> bool {
        record.label == self.decode_label(output)
    }
}

/// Checks a record layout against the network's input and output widths.
pub fn check_layout(input_nodes: usize, output_nodes: usize, layout: &RecordLayout) -> Result<(), DatasetError> {
    if input_nodes != layout.feature_fields {
        return Err(DatasetError::ShapeMismatch {
            what: "input nodes",
            expected: input_nodes,
            found: layout.feature_fields,
        });
    }
    if output_nodes != layout.classes {
        return Err(DatasetError::ShapeMismatch {
            what: "output nodes",
            expected: output_nodes,
            found: layout.classes,
        });
    }
    Ok(())
}

/// Maps a raw pixel in [0, 255] onto [0.01, 1.0].
pub fn scale_pixel(raw: i64) -> f64 {
    raw as f64 / 255.0 * 0.99 + 0.01
}

/// Fills `nodes` with `TARGET_OFF` and puts `TARGET_ON` at `label`.
///
/// # Panics
/// Panics if `label >= nodes.len()`; `DataSet::target_nodes` checks this first.
pub fn encode_target(label: usize, nodes: &mut [f64]) {
    for node in nodes.iter_mut() {
        *node = TARGET_OFF;
    }
    nodes[label] = TARGET_ON;
}

/// Index of the first strictly greatest activation.
///
/// The scan starts from a 0.0 floor, so a vector with no positive entry
/// decodes to index 0.
pub fn decode_label(output: &[f64]) -> usize {
    let mut max = 0.0;
    let mut max_idx = 0;
    for (o, &out) in output.iter().enumerate() {
        if out > max {
            max = out;
            max_idx = o;
        }
    }
    max_idx
}

/// Holds a data set open for one phase and releases it when dropped.
pub struct PhaseScope<'a, D: DataSet + ?Sized> {
    data_set: &'a mut D,
}

impl<'a, D: DataSet + ?Sized> PhaseScope<'a, D> {
    pub fn enter(data_set: &'a mut D, phase: Phase) -> Result<Self, DatasetError> {
        if let Err(e) = data_set.open(phase) {
            data_set.release();
            return Err(e);
        }
        Ok(PhaseScope { data_set })
    }
}

impl<D: DataSet + ?Sized> Deref for PhaseScope<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        &*self.data_set
    }
}

impl<D: DataSet + ?Sized> DerefMut for PhaseScope<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        &mut *self.data_set
    }
}

impl<D: DataSet + ?Sized> Drop for PhaseScope<'_, D> {
    fn drop(&mut self) {
        self.data_set.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_vector_for_label_three() {
        let mut nodes = [0.0; 10];
        encode_target(3, &mut nodes);
        assert_eq!(nodes, [0.01, 0.01, 0.01, 0.99, 0.01, 0.01, 0.01, 0.01, 0.01, 0.01]);
    }

    #[test]
    fn pixel_scaling_boundaries() {
        assert_eq!(scale_pixel(0), 0.01);
        assert!((scale_pixel(255) - 1.0).abs() < 1e-15);
        assert!(scale_pixel(128) > 0.5 && scale_pixel(128) < 0.51);
    }

    #[test]
    fn decode_picks_first_of_equal_maxima() {
        assert_eq!(decode_label(&[0.5, 0.5, 0.1, 0.2]), 0);
        assert_eq!(decode_label(&[0.1, 0.7, 0.7, 0.2]), 1);
        assert_eq!(decode_label(&[0.1, 0.2, 0.3, 0.9]), 3);
    }

    #[test]
    fn decode_without_positive_entry_is_zero() {
        assert_eq!(decode_label(&[0.0, 0.0, 0.0]), 0);
        assert_eq!(decode_label(&[-0.3, -0.1, -0.2]), 0);
        assert_eq!(decode_label(&[]), 0);
    }

    struct Plain;

    impl DataSet for Plain {
        fn open(&mut self, _phase: Phase) -> Result<(), DatasetError> {
            Ok(())
        }

        fn read_next(&mut self) -> Result<DatasetRecord, DatasetError> {
            Err(DatasetError::EndOfData)
        }

        fn release(&mut self) {}
    }

    fn record(label: usize, features: &[i64]) -> DatasetRecord {
        DatasetRecord { label, features: features.to_vec(), line: 1 }
    }

    #[test]
    fn input_nodes_rejects_unfilled_nodes() {
        let mut nodes = [7.0; 3];
        match Plain.input_nodes(&record(0, &[0, 255]), &mut nodes) {
            Err(DatasetError::ShapeMismatch { what, expected, found }) => {
                assert_eq!((what, expected, found), ("input nodes", 3, 2));
            }
            other => panic!("expected ShapeMismatch, got {:?}", other),
        }

        let mut exact = [7.0; 2];
        Plain.input_nodes(&record(0, &[0, 255]), &mut exact).unwrap();
        assert_eq!(exact[0], 0.01);
    }

    #[test]
    fn target_nodes_rejects_label_without_node() {
        let mut nodes = [0.0; 1];
        match Plain.target_nodes(&record(1, &[]), &mut nodes) {
            Err(DatasetError::ShapeMismatch { what, expected, found }) => {
                assert_eq!((what, expected, found), ("output nodes", 1, 2));
            }
            other => panic!("expected ShapeMismatch, got {:?}", other),
        }
        assert_eq!(nodes, [0.0]);
    }

    #[test]
    fn layout_check_covers_both_directions() {
        let layout = RecordLayout { label_fields: 1, feature_fields: 2, classes: 2 };
        assert!(check_layout(2, 2, &layout).is_ok());
        assert!(matches!(
            check_layout(3, 2, &layout),
            Err(DatasetError::ShapeMismatch { what: "input nodes", expected: 3, found: 2 })
        ));
        assert!(matches!(
            check_layout(2, 1, &layout),
            Err(DatasetError::ShapeMismatch { what: "output nodes", expected: 1, found: 2 })
        ));
    }

    #[test]
    fn phase_names() {
        assert_eq!(Phase::Training.to_string(), "training");
        assert_eq!(Phase::Validation.to_string(), "validation");
        assert_eq!(Phase::Test.to_string(), "test");
    }
}
