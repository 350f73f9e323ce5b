//! Error types for export operations

use std::io;
use thiserror::Error;

/// Errors raised while rendering or saving an export
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV writer rejected a record
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the export file failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The rendered bytes could not be taken back from the writer
    #[error("Export buffer error: {0}")]
    Buffer(String),
}

impl<W> From<csv::IntoInnerError<W>> for ExportError {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        Self::Buffer(err.error().to_string())
    }
}
