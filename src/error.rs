use std::path::PathBuf;

/// Errors from dataset loading, configuration and tree assembly.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Returned when the input file cannot be opened.
    #[error("failed to open {path}")]
    FileNotFound {
        /// Path that could not be opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the delimited input is malformed.
    #[error("malformed delimited input in {path}")]
    CsvParse {
        /// Path of the offending file (`<memory>` for in-memory sources).
        path: PathBuf,
        /// The underlying csv error.
        source: csv::Error,
    },

    /// Returned when the table has a header but no data rows.
    #[error("dataset has zero rows")]
    EmptyDataset,

    /// Returned when the table has no columns at all.
    #[error("dataset header is empty")]
    EmptyHeader,

    /// Returned when two columns share a name.
    #[error("column `{name}` appears more than once in the header")]
    DuplicateColumn {
        /// The repeated column name.
        name: String,
    },

    /// Returned when the designated target column is not in the header.
    #[error("target column `{target}` not found in header")]
    MissingTargetColumn {
        /// The requested target column.
        target: String,
    },

    /// Returned when a row has a different number of cells than the header.
    #[error("row {row} has {got} cells, expected {expected}")]
    InconsistentRowLength {
        /// Zero-based data row index.
        row: usize,
        /// Number of columns in the header.
        expected: usize,
        /// Number of cells in the row.
        got: usize,
    },

    /// Returned when min_samples_split is less than 2.
    #[error("min_samples_split must be at least 2, got {min_samples_split}")]
    InvalidMinSamplesSplit {
        /// The rejected value.
        min_samples_split: u16,
    },

    /// Returned when max_depth is zero.
    #[error("max_depth must be at least 1, got {max_depth}")]
    InvalidMaxDepth {
        /// The rejected value.
        max_depth: u16,
    },

    /// Returned when an algorithm name cannot be parsed.
    #[error("unknown algorithm `{name}`, expected one of: id3, c45, cart")]
    UnknownAlgorithm {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when a decision node would have no branches.
    #[error("decision `{test}` has no branches")]
    EmptyDecision {
        /// Test description of the offending node.
        test: String,
    },

    /// Returned when a decision node would carry the same branch key twice.
    #[error("decision `{test}` has duplicate branch `{key}`")]
    DuplicateBranch {
        /// Test description of the offending node.
        test: String,
        /// The repeated branch key.
        key: String,
    },

    /// Returned when a tree is requested before `fit` has run.
    #[error("tree wasn't built yet")]
    TreeNotBuilt,

    /// Returned when exporting the tree as JSON fails.
    #[error("failed to serialize tree")]
    Serialize {
        /// The underlying serde_json error.
        source: serde_json::Error,
    },

    /// Returned when writing Graphviz output fails.
    #[error("failed to render tree as DOT")]
    Render {
        /// The underlying formatting error.
        source: std::fmt::Error,
    },
}
