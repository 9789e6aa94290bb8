//! Export Table use case.
//!
//! Writes the combined tidy table (all rows of the last query, ignoring
//! display limits) through the export port.

use crate::ports::table_export::{ExportError, TableExportPort};
use phenoscope_domain::ResultTable;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// What the export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// File written; the message names the path.
    Written(PathBuf),
    /// Nothing to export — no file was created.
    NoData,
}

impl ExportOutcome {
    /// User-facing notice for the log pane / console.
    pub fn notice(&self) -> String {
        match self {
            Self::Written(path) => format!("Saved CSV to {}", path.display()),
            Self::NoData => "No data to download.".to_string(),
        }
    }
}

pub struct ExportTableUseCase {
    exporter: Arc<dyn TableExportPort>,
}

impl ExportTableUseCase {
    pub fn new(exporter: Arc<dyn TableExportPort>) -> Self {
        Self { exporter }
    }

    pub fn execute(&self, table: &ResultTable, path: &Path) -> Result<ExportOutcome, ExportError> {
        if table.is_empty() {
            return Ok(ExportOutcome::NoData);
        }
        let rows = table.tidy();
        let written = self.exporter.write_csv(&rows, path)?;
        info!("Exported {} rows to {}", rows.len(), written.display());
        Ok(ExportOutcome::Written(written))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phenoscope_domain::{AnalysisKind, Association, TidyRow};
    use std::sync::Mutex;

    struct RecordingExporter {
        written: Mutex<Vec<TidyRow>>,
    }

    impl RecordingExporter {
        fn new() -> Self {
            Self {
                written: Mutex::new(Vec::new()),
            }
        }
    }

    impl TableExportPort for RecordingExporter {
        fn write_csv(&self, rows: &[TidyRow], path: &Path) -> Result<PathBuf, ExportError> {
            self.written.lock().unwrap().extend(rows.iter().cloned());
            Ok(path.to_path_buf())
        }
    }

    fn one_row_table() -> ResultTable {
        ResultTable::from_rows(vec![Association {
            gene: "PCSK9".into(),
            outcome_id: "O1".into(),
            kind: Some(AnalysisKind::ContinuousVariable),
            outcome_string: None,
            label: Some("HDL cholesterol".into()),
            p: Some(0.01),
            q: Some(0.02),
        }])
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        let exporter = Arc::new(RecordingExporter::new());
        let use_case = ExportTableUseCase::new(exporter.clone());

        let outcome = use_case
            .execute(&ResultTable::new(), Path::new("out.csv"))
            .unwrap();

        assert_eq!(outcome, ExportOutcome::NoData);
        assert_eq!(outcome.notice(), "No data to download.");
        assert!(exporter.written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_export_passes_tidy_rows() {
        let exporter = Arc::new(RecordingExporter::new());
        let use_case = ExportTableUseCase::new(exporter.clone());

        let outcome = use_case
            .execute(&one_row_table(), Path::new("out.csv"))
            .unwrap();

        assert!(matches!(outcome, ExportOutcome::Written(_)));
        assert!(outcome.notice().contains("out.csv"));
        let written = exporter.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].description, "HDL cholesterol");
    }
}
