//! Tabular export of list views
//!
//! Rows are rendered through an ordered list of [`Column`]s into one of two
//! formats:
//!
//! - [`ExportFormat::Csv`]: comma separated, values written verbatim. Values
//!   containing commas, quotes or newlines are NOT escaped, so such rows
//!   will not round-trip through a CSV reader.
//! - [`ExportFormat::Spreadsheet`]: semicolon separated with a UTF-8 byte
//!   order mark and standard quoting, which spreadsheet applications open
//!   with the right encoding.
//!
//! An empty row set produces no file at all.
//!
//! # Examples
//!
//! ```
//! use storedesk::export::{ExportOptions, export_rows, order_columns};
//! use storedesk::records::Order;
//! use serde_json::json;
//!
//! let orders: Vec<Order> = serde_json::from_value(json!([
//!     { "_id": "o1", "customerName": "Ravi", "total": 120, "status": "paid" }
//! ])).unwrap();
//!
//! let file = export_rows(&orders, &order_columns(), &ExportOptions::default())
//!     .unwrap()
//!     .expect("one row gives a file");
//! assert!(file.filename.starts_with("orders_"));
//! assert_eq!(file.mime, "text/csv;charset=utf-8");
//! ```

pub mod columns;
pub mod error;

pub use columns::{Column, order_columns};
pub use error::ExportError;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use heck::ToKebabCase;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, ExportError>;

const BOM: &str = "\u{feff}";
const FILENAME_TIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Output format of an export
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Plain comma separated values, unescaped
    #[default]
    Csv,
    /// Semicolon separated, quoted, with a byte order mark
    Spreadsheet,
}

impl ExportFormat {
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Csv => "text/csv;charset=utf-8",
            Self::Spreadsheet => "application/vnd.ms-excel",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}

/// How and under which name to export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Filename stem, kebab-cased before use
    pub stem: String,
    /// Timestamp embedded in the filename; the current time when `None`
    pub at: Option<DateTime<Utc>>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            stem: "orders".to_string(),
            at: None,
        }
    }
}

impl ExportOptions {
    #[must_use]
    pub fn new(format: ExportFormat, stem: impl Into<String>) -> Self {
        Self {
            format,
            stem: stem.into(),
            at: None,
        }
    }

    #[must_use]
    pub fn at(mut self, at: DateTime<Utc>) -> Self {
        self.at = Some(at);
        self
    }

    /// `{stem}_{YYYY-MM-DD_HH-MM-SS}.csv`
    #[must_use]
    pub fn filename(&self) -> String {
        let stem = match self.stem.to_kebab_case() {
            s if s.is_empty() => "export".to_string(),
            s => s,
        };
        let at = self.at.unwrap_or_else(Utc::now);
        format!("{stem}_{}.csv", at.format(FILENAME_TIME_FORMAT))
    }
}

/// A rendered export ready to be saved or downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Write the file into `dir`, creating the directory if needed
    ///
    /// # Errors
    /// Returns `ExportError::Io` if the directory or file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.bytes)?;
        tracing::debug!(path = %path.display(), bytes = self.bytes.len(), "export written");
        Ok(path)
    }
}

/// Render `rows` through `columns`
///
/// Returns `Ok(None)` when there are no rows.
///
/// # Errors
/// Returns `ExportError` if the spreadsheet writer fails.
pub fn export_rows<T>(
    rows: &[T],
    columns: &[Column<T>],
    options: &ExportOptions,
) -> Result<Option<ExportFile>> {
    if rows.is_empty() {
        tracing::debug!("nothing to export");
        return Ok(None);
    }

    let bytes = match options.format {
        ExportFormat::Csv => render_plain(rows, columns).into_bytes(),
        ExportFormat::Spreadsheet => render_spreadsheet(rows, columns)?,
    };

    Ok(Some(ExportFile {
        filename: options.filename(),
        mime: options.format.mime(),
        bytes,
    }))
}

fn render_plain<T>(rows: &[T], columns: &[Column<T>]) -> String {
    let header = columns.iter().map(Column::header).collect::<Vec<_>>().join(",");
    let lines = rows
        .iter()
        .map(|row| columns.iter().map(|c| c.cell(row)).collect::<Vec<_>>().join(","));

    std::iter::once(header).chain(lines).collect::<Vec<_>>().join("\n")
}

fn render_spreadsheet<T>(rows: &[T], columns: &[Column<T>]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .terminator(csv::Terminator::CRLF)
        .from_writer(BOM.as_bytes().to_vec());

    writer.write_record(columns.iter().map(Column::header))?;
    for row in rows {
        writer.write_record(columns.iter().map(|c| c.cell(row)))?;
    }

    Ok(writer.into_inner()?)
}
