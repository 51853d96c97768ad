use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use tracing::{debug, trace};

use crate::dataset::config::DatasetConfig;
use crate::dataset::data_set::{DataSet, Phase};
use crate::dataset::error::DatasetError;
use crate::dataset::record::{parse_line, DatasetRecord, RecordLayout};

/// Open file plus the position inside it.
struct Source {
    reader: BufReader<File>,
    /// Directory and file name joined, as reported in every error.
    file_name: String,
    line: usize,
}

/// Streams MNIST-style CSV records (label first, then 784 pixels) one line
/// at a time. Nothing is buffered beyond the current line.
pub struct MnistDataSet {
    config: DatasetConfig,
    layout: RecordLayout,
    source: Option<Source>,
    buffer: String,
}

impl MnistDataSet {
    /// Fails with `InvalidConfig` when the layout admits no record.
    pub fn new(config: DatasetConfig) -> Result<MnistDataSet, DatasetError> {
        config.validate()?;
        let layout = config.layout();
        Ok(MnistDataSet {
            config,
            layout,
            source: None,
            buffer: String::new(),
        })
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Path of the file currently open, if any.
    pub fn current_file(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.file_name.as_str())
    }

    fn path_for(&self, file_name: &str) -> PathBuf {
        PathBuf::from(&self.config.path_name).join(file_name)
    }
}

impl DataSet for MnistDataSet {
    fn open(&mut self, phase: Phase) -> Result<(), DatasetError> {
        self.release();

        let path = match self.config.file_name(phase) {
            Some(name) => self.path_for(name),
            None => return Err(DatasetError::NotConfigured { phase }),
        };
        let file_name = path.display().to_string();

        let file = File::open(&path).map_err(|source| DatasetError::Io {
            file: file_name.clone(),
            source,
        })?;
        debug!(%phase, file = %file_name, "opened data file");

        self.source = Some(Source {
            reader: BufReader::new(file),
            file_name,
            line: 0,
        });
        Ok(())
    }

    fn read_next(&mut self) -> Result<DatasetRecord, DatasetError> {
        let source = match self.source.as_mut() {
            Some(source) => source,
            None => return Err(DatasetError::EndOfData),
        };

        loop {
            self.buffer.clear();
            let n = source.reader.read_line(&mut self.buffer).map_err(|e| DatasetError::Io {
                file: source.file_name.clone(),
                source: e,
            })?;
            if n == 0 {
                return Err(DatasetError::EndOfData);
            }
            source.line += 1;

            let text = self.buffer.trim();
            if text.is_empty() {
                continue;
            }

            let record = parse_line(text, source.line, &self.layout).map_err(|kind| {
                DatasetError::Format {
                    file: source.file_name.clone(),
                    line: source.line,
                    kind,
                }
            })?;
            trace!(line = record.line, label = record.label, "read record");
            return Ok(record);
        }
    }

    fn layout(&self) -> Option<RecordLayout> {
        Some(self.layout)
    }

    fn release(&mut self) {
        if let Some(source) = self.source.take() {
            debug!(file = %source.file_name, lines = source.line, "released data file");
        }
    }
}
