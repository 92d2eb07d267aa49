//! Error types for table loading and rule rendering

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or addressing a [`Table`](crate::table::Table)
#[derive(Debug, Error)]
pub enum TableError {
    /// The source does not exist or has zero bytes. Callers treat this as "skip".
    #[error("{0} is missing or empty")]
    NotFoundOrEmpty(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// `column` is 1-based, `row` is 0-based (row 0 is the header)
    #[error("no cell at column {column} of row {row}")]
    IndexOutOfRange { row: usize, column: usize },
}

impl TableError {
    /// Whether this error only means "there is nothing to convert"
    pub fn is_skip(&self) -> bool {
        matches!(self, TableError::NotFoundOrEmpty(_))
    }
}

/// Errors raised while turning a table into configuration blocks and files
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("row {row} is malformed: expected at least {expected} columns, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("unknown rule kind '{0}'")]
    UnknownKind(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
