//! Association row entities.

use crate::analysis::{AnalysisKind, Metric};
use serde::{Deserialize, Serialize};

/// One gene/phenotype association row, mirroring the upstream response
/// shape plus the display symbol of the gene it was fetched for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    /// Display symbol of the requested gene.
    pub gene: String,
    /// Upstream outcome id (phenotype key).
    pub outcome_id: String,
    /// Category; `None` for rows whose `analysis_type` this build does not know.
    pub kind: Option<AnalysisKind>,
    /// Raw outcome string carried on the results row, when present.
    pub outcome_string: Option<String>,
    /// Enriched human-readable label, filled from the outcome catalog.
    pub label: Option<String>,
    pub p: Option<f64>,
    pub q: Option<f64>,
}

impl Association {
    /// The selected statistic for this row, if present.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::P => self.p,
            Metric::Q => self.q,
        }
    }

    /// Best available label: enriched label, else the row's own outcome
    /// string, else the outcome id. Never empty for a row with an id.
    pub fn display_label(&self) -> &str {
        if let Some(label) = self.label.as_deref()
            && !label.is_empty()
        {
            return label;
        }
        if let Some(raw) = self.outcome_string.as_deref()
            && !raw.is_empty()
        {
            return raw;
        }
        &self.outcome_id
    }
}

/// Display-ready row: the tidy table shape shown in the UI and exported
/// to CSV/JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TidyRow {
    #[serde(rename = "Gene")]
    pub gene: String,
    #[serde(rename = "Outcome ID")]
    pub outcome_id: String,
    #[serde(rename = "Description")]
    pub description: String,
    pub p: Option<f64>,
    pub q: Option<f64>,
}

impl From<&Association> for TidyRow {
    fn from(row: &Association) -> Self {
        Self {
            gene: row.gene.clone(),
            outcome_id: row.outcome_id.clone(),
            description: row.display_label().to_string(),
            p: row.p,
            q: row.q,
        }
    }
}

impl TidyRow {
    /// CSV column header matching [`TidyRow::to_csv_line`].
    pub const CSV_HEADER: &'static str = "Gene,Outcome ID,Description,p,q";

    /// One CSV line, quoted per RFC 4180. Phenotype labels routinely
    /// contain commas, so quoting is not optional. Missing statistics
    /// become empty cells, not zeros.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            csv_field(&self.gene),
            csv_field(&self.outcome_id),
            csv_field(&self.description),
            self.p.map(|v| v.to_string()).unwrap_or_default(),
            self.q.map(|v| v.to_string()).unwrap_or_default(),
        )
    }
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
