//! Error types for u-cba.
//!
//! Input validation happens before any mining or building starts, so the
//! core algorithms themselves are infallible on a validated [`Dataset`].
//!
//! [`Dataset`]: crate::data::Dataset

use thiserror::Error;

/// Errors raised by dataset validation and configuration checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CbaError {
    /// The dataset has no rows.
    #[error("dataset is empty")]
    EmptyDataset,

    /// A row has no attribute columns in front of its class label.
    #[error("row {row} has {found} column(s); at least one attribute and a class label are required")]
    MissingAttributes {
        /// Index of the offending row.
        row: usize,
        /// Number of columns found.
        found: usize,
    },

    /// A row's length differs from the first row's.
    #[error("row {row} has {found} columns, expected {expected}")]
    InconsistentRow {
        /// Index of the offending row.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of this row.
        found: usize,
    },

    /// A configuration failed its `validate()` check.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The fold count does not fit the dataset.
    #[error("cannot split {rows} rows into {folds} folds")]
    InvalidFolds {
        /// Requested fold count.
        folds: usize,
        /// Rows available.
        rows: usize,
    },
}
