//! Outcome catalog: phenotype labels and per-category label lists.
//!
//! The upstream `/outcome` endpoint describes every phenotype once. The
//! catalog is fetched a single time per process and used to enrich result
//! rows, whose own label fields are frequently missing or sparse.

use crate::analysis::AnalysisKind;
use crate::association::table::ResultTable;
use std::collections::BTreeMap;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeInfo {
    pub outcome_id: String,
    /// Best label the upstream row offered (may be empty for sparse rows).
    pub label: String,
    pub kind: Option<AnalysisKind>,
}

/// Outcome id → catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeCatalog {
    entries: BTreeMap<String, OutcomeInfo>,
}

impl OutcomeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later duplicates of an outcome id are ignored; the first entry wins.
    pub fn from_entries(entries: Vec<OutcomeInfo>) -> Self {
        let mut map = BTreeMap::new();
        for entry in entries {
            map.entry(entry.outcome_id.clone()).or_insert(entry);
        }
        Self { entries: map }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-empty catalog label for an outcome, if known.
    pub fn label_for(&self, outcome_id: &str) -> Option<&str> {
        self.entries
            .get(outcome_id)
            .map(|e| e.label.as_str())
            .filter(|l| !l.is_empty())
    }

    /// Unique labels of one category, sorted case-insensitively.
    /// Drives the per-category phenotype filter choices.
    pub fn labels_for_kind(&self, kind: AnalysisKind) -> Vec<String> {
        let mut labels: Vec<String> = self
            .entries
            .values()
            .filter(|e| e.kind == Some(kind) && !e.label.is_empty())
            .map(|e| e.label.clone())
            .collect();
        labels.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
        labels.dedup();
        labels
    }

    /// Fill every row's label: catalog label, else the row's own outcome
    /// string, else the outcome id. Total — no row is left unlabeled.
    pub fn enrich(&self, table: &mut ResultTable) {
        for row in table.rows_mut() {
            let label = self
                .label_for(&row.outcome_id)
                .map(str::to_string)
                .or_else(|| row.outcome_string.clone().filter(|s| !s.is_empty()))
                .unwrap_or_else(|| row.outcome_id.clone());
            row.label = Some(label);
        }
    }
}
