//! CSV file writer for the tidy result table.
//!
//! Row formatting (including RFC 4180 quoting) lives on
//! [`TidyRow`]; this adapter owns the filesystem side.

use phenoscope_application::ports::table_export::{ExportError, TableExportPort};
use phenoscope_domain::TidyRow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct CsvTableWriter;

impl CsvTableWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvTableWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExportPort for CsvTableWriter {
    fn write_csv(&self, rows: &[TidyRow], path: &Path) -> Result<PathBuf, ExportError> {
        let io_err = |e: std::io::Error| ExportError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "{}", TidyRow::CSV_HEADER).map_err(io_err)?;
        for row in rows {
            writeln!(writer, "{}", row.to_csv_line()).map_err(io_err)?;
        }
        writer.flush().map_err(io_err)?;

        Ok(path.to_path_buf())
    }
}
