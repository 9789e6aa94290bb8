//! Console output formatter for one-shot query results

use colored::Colorize;
use phenoscope_application::{QueryParams, QueryReport};
use phenoscope_domain::{AnalysisKind, ResultTable, TidyRow};

/// Formats query reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Colored per-category tables plus the per-gene notices.
    pub fn format_table(report: &QueryReport, params: &QueryParams) -> String {
        let mut output = String::new();

        for notice in report.notices() {
            output.push_str(&format!("{}\n", notice.dimmed()));
        }
        output.push('\n');

        if report.is_upstream_failure() {
            output.push_str(&format!(
                "{}\n",
                "Upstream error: no gene could be loaded.".red().bold()
            ));
            return output;
        }
        if report.is_empty_result() {
            output.push_str(&format!("{}\n", "No data.".yellow()));
            return output;
        }

        let visible = report.table.apply_threshold(params.metric, params.threshold);
        for kind in AnalysisKind::ORDER {
            output.push_str(&Self::section(&visible, kind, params));
        }

        output.push_str(&format!(
            "\n{} {} rows total ({} < {})\n",
            "Shown:".cyan().bold(),
            visible.len(),
            params.metric.column(),
            params.threshold,
        ));
        output
    }

    fn section(visible: &ResultTable, kind: AnalysisKind, params: &QueryParams) -> String {
        let mut output = String::new();
        let rows = visible.top_n_per_gene(kind, params.limit).tidy();

        output.push_str(&format!("\n{}\n", format!("── {} ──", kind.label()).yellow().bold()));
        if rows.is_empty() {
            output.push_str(&format!("  {}\n", "(no rows)".dimmed()));
            return output;
        }
        for row in rows {
            output.push_str(&format!(
                "  {:<10} {:<12} {:<48} {}\n",
                row.gene.green(),
                row.outcome_id,
                row.description,
                format_stats(&row).dimmed(),
            ));
        }
        output
    }

    /// JSON array of thresholded tidy rows.
    pub fn format_json(report: &QueryReport, params: &QueryParams) -> String {
        let rows = report
            .table
            .apply_threshold(params.metric, params.threshold)
            .tidy();
        serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
    }

    /// CSV of the full combined table (all rows, like the file export).
    pub fn format_csv(report: &QueryReport) -> String {
        let mut output = String::from(TidyRow::CSV_HEADER);
        output.push('\n');
        for row in report.table.tidy() {
            output.push_str(&row.to_csv_line());
            output.push('\n');
        }
        output
    }
}

fn format_stats(row: &TidyRow) -> String {
    match (row.p, row.q) {
        (Some(p), Some(q)) => format!("p={p:.3e} q={q:.3e}"),
        (Some(p), None) => format!("p={p:.3e}"),
        (None, Some(q)) => format!("q={q:.3e}"),
        (None, None) => String::new(),
    }
}
