//! Table export port.

use phenoscope_domain::TidyRow;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write CSV to {path}: {message}")]
    Io { path: PathBuf, message: String },
}

/// Writer for the tidy result table.
pub trait TableExportPort: Send + Sync {
    /// Write all rows to `path`, returning the path actually written.
    fn write_csv(&self, rows: &[TidyRow], path: &Path) -> Result<PathBuf, ExportError>;
}
