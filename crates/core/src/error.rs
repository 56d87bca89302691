//! Error types for the gridsim workspace.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the gridsim workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// Grid shape error (label count vs. value dimensions).
    #[error("Shape error: {0}")]
    Shape(String),

    /// Row labels do not match the canonical time index.
    #[error("Index mismatch: {0}")]
    IndexMismatch(String),

    /// Column labels do not match the canonical security set.
    #[error("Column mismatch: {0}")]
    ColumnMismatch(String),

    /// A named auxiliary series was never posted.
    #[error("Unknown series: {0}")]
    UnknownSeries(String),

    /// A named scratch variable was never stored.
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    /// Strategy hook failure (aborts the run).
    #[error("Strategy error: {0}")]
    Strategy(String),

    /// Signal generation failure (aborts the run).
    #[error("Signal error: {0}")]
    Signal(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a shape error.
    pub fn shape(msg: impl Into<String>) -> Self {
        Error::Shape(msg.into())
    }

    /// Create an index-mismatch error.
    pub fn index_mismatch(msg: impl Into<String>) -> Self {
        Error::IndexMismatch(msg.into())
    }

    /// Create a column-mismatch error.
    pub fn column_mismatch(msg: impl Into<String>) -> Self {
        Error::ColumnMismatch(msg.into())
    }

    /// Create an unknown-series error.
    pub fn unknown_series(msg: impl Into<String>) -> Self {
        Error::UnknownSeries(msg.into())
    }

    /// Create an unknown-variable error.
    pub fn unknown_variable(msg: impl Into<String>) -> Self {
        Error::UnknownVariable(msg.into())
    }

    /// Create a strategy error.
    pub fn strategy(msg: impl Into<String>) -> Self {
        Error::Strategy(msg.into())
    }

    /// Create a signal error.
    pub fn signal(msg: impl Into<String>) -> Self {
        Error::Signal(msg.into())
    }
}
