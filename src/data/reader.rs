//! Delimited-file loader producing a [`Dataset`].

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::data::dataset::Dataset;
use crate::error::TreeError;

/// Reads a header-first delimited file into a [`Dataset`].
///
/// Expected format:
/// - Header row required, one name per column
/// - One row per example, every row as wide as the header
/// - Cells are trimmed; a column whose cells all parse as finite numbers is continuous
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`TreeError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`TreeError::CsvParse`] | Malformed record |
/// | [`TreeError::InconsistentRowLength`] | Row has a different cell count than the header |
/// | [`TreeError::MissingTargetColumn`] | Target column not in the header |
/// | [`TreeError::EmptyDataset`] | Zero data rows after the header |
pub struct DatasetReader {
    path: PathBuf,
    delimiter: u8,
}

impl DatasetReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
        }
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the file and reads it with `target` as the class column.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self, target: &str) -> Result<Dataset, TreeError> {
        let file = File::open(&self.path).map_err(|source| TreeError::FileNotFound {
            path: self.path.clone(),
            source,
        })?;
        let dataset = self.read_from(file, target)?;
        info!(
            rows = dataset.n_rows(),
            attributes = dataset.n_attributes(),
            classes = dataset.n_classes(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Reads from any byte source; `path` is only used in error messages.
    pub fn read_from<R: Read>(&self, source: R, target: &str) -> Result<Dataset, TreeError> {
        // flexible so that ragged rows surface as InconsistentRowLength
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .delimiter(self.delimiter)
            .from_reader(source);

        let header = rdr
            .headers()
            .map_err(|source| self.csv_error(source))?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        debug!(columns = header.len(), "read header");
        if header.iter().all(String::is_empty) {
            return Err(TreeError::EmptyHeader);
        }

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|source| self.csv_error(source))?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }
        debug!(rows = rows.len(), "read records");

        Dataset::from_records(header, rows, target)
    }

    fn csv_error(&self, source: csv::Error) -> TreeError {
        TreeError::CsvParse {
            path: self.path.clone(),
            source,
        }
    }
}
