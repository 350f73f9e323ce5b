//! Storedesk - data core for an online store's back office
//!
//! This library turns JSON fetched from a store API into the views an admin
//! dashboard shows: category trees, searchable and paged record lists, SEO
//! tag suggestions, and CSV exports. Every transform is pure and synchronous;
//! I/O lives in the binary.

use std::path::Path;
use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod config;
pub mod export;
pub mod listing;
pub mod output;
pub mod records;
pub mod tags;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum StoredeskError {
    /// Export error
    #[error("Export error: {0}")]
    ExportError(#[from] export::ExportError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Input file is not valid JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Read and parse a JSON input file
///
/// # Errors
/// Returns `StoredeskError::IoError` if the file cannot be read, or
/// `StoredeskError::JsonError` if it is not valid JSON.
pub fn read_json(path: &Path) -> Result<serde_json::Value, StoredeskError> {
    let text = std::fs::read_to_string(path)?;
    let value = serde_json::from_str(&text)?;
    tracing::debug!(path = %path.display(), "input loaded");
    Ok(value)
}
