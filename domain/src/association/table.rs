//! Combined result table and its filter/sort/limit operations.
//!
//! All operations are pure: they return a new table and leave the input
//! untouched, so the renderer can re-derive views (per-category tabs,
//! thresholded chart data) from one loaded table.

use super::entities::{Association, TidyRow};
use crate::analysis::{AnalysisKind, Metric};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// Association rows combined across the genes of one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<Association>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Association>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Association] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Association] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append the rows fetched for one gene.
    pub fn extend(&mut self, rows: Vec<Association>) {
        self.rows.extend(rows);
    }

    /// Gene symbols present, unique, in first-appearance order.
    pub fn genes(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for row in &self.rows {
            if seen.insert(row.gene.as_str()) {
                out.push(row.gene.clone());
            }
        }
        out
    }

    /// Restrict to the given categories.
    ///
    /// An empty set is the identity: the full unfiltered table comes back.
    /// Filtering twice by the same set equals filtering once.
    pub fn filter_by_categories(&self, categories: &BTreeSet<AnalysisKind>) -> Self {
        if categories.is_empty() {
            return self.clone();
        }
        Self::from_rows(
            self.rows
                .iter()
                .filter(|row| row.kind.is_some_and(|k| categories.contains(&k)))
                .cloned()
                .collect(),
        )
    }

    /// Restrict to rows whose display label is one of `labels`.
    /// `None` means no label filter.
    pub fn filter_by_labels(&self, labels: Option<&[String]>) -> Self {
        let Some(labels) = labels else {
            return self.clone();
        };
        Self::from_rows(
            self.rows
                .iter()
                .filter(|row| labels.iter().any(|l| l == row.display_label()))
                .cloned()
                .collect(),
        )
    }

    /// Keep rows with `metric < cutoff`. Rows missing the metric are dropped.
    pub fn apply_threshold(&self, metric: Metric, cutoff: f64) -> Self {
        Self::from_rows(
            self.rows
                .iter()
                .filter(|row| row.metric(metric).is_some_and(|v| v < cutoff))
                .cloned()
                .collect(),
        )
    }

    /// Whole-table sort by (q, p) ascending, missing values last.
    pub fn sorted_by_significance(&self) -> Self {
        let mut rows = self.rows.clone();
        rows.sort_by(compare_significance);
        Self::from_rows(rows)
    }

    /// Rows of one category, most significant first, at most `n` per gene.
    ///
    /// `n` is clamped to at least 1 so a zero limit still shows the top hit.
    pub fn top_n_per_gene(&self, kind: AnalysisKind, n: usize) -> Self {
        let n = n.max(1);
        let mut rows: Vec<Association> = self
            .rows
            .iter()
            .filter(|row| row.kind == Some(kind))
            .cloned()
            .collect();
        rows.sort_by(compare_significance);

        let mut counts: HashMap<String, usize> = HashMap::new();
        rows.retain(|row| {
            let count = counts.entry(row.gene.clone()).or_insert(0);
            *count += 1;
            *count <= n
        });
        Self::from_rows(rows)
    }

    /// Display rows in current table order.
    pub fn tidy(&self) -> Vec<TidyRow> {
        self.rows.iter().map(TidyRow::from).collect()
    }
}

/// (q, p) ascending; a missing value sorts after any present one.
fn compare_significance(a: &Association, b: &Association) -> Ordering {
    compare_optional(a.q, b.q).then_with(|| compare_optional(a.p, b.p))
}

fn compare_optional(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(gene: &str, kind: AnalysisKind, id: &str, p: Option<f64>, q: Option<f64>) -> Association {
        Association {
            gene: gene.to_string(),
            outcome_id: id.to_string(),
            kind: Some(kind),
            outcome_string: None,
            label: Some(format!("label-{id}")),
            p,
            q,
        }
    }

    fn sample() -> ResultTable {
        ResultTable::from_rows(vec![
            row("PCSK9", AnalysisKind::ContinuousVariable, "O1", Some(0.01), Some(0.02)),
            row("PCSK9", AnalysisKind::ContinuousVariable, "O2", Some(0.20), Some(0.40)),
            row("PCSK9", AnalysisKind::CvEndpoints, "O3", Some(1e-10), Some(5e-8)),
            row("PCSK9", AnalysisKind::SelfReported, "O4", Some(0.03), None),
            row("PCSK9", AnalysisKind::Phecodes, "O5", None, Some(0.001)),
            row("APOB", AnalysisKind::ContinuousVariable, "O1", Some(0.05), Some(0.06)),
            row("APOB", AnalysisKind::CvEndpoints, "O3", Some(0.9), Some(0.9)),
        ])
    }

    #[test]
    fn test_empty_category_filter_is_identity() {
        let table = sample();
        let filtered = table.filter_by_categories(&BTreeSet::new());
        assert_eq!(filtered, table);
    }

    #[test]
    fn test_category_filter_selects_kinds() {
        let mut categories = BTreeSet::new();
        categories.insert(AnalysisKind::CvEndpoints);
        let filtered = sample().filter_by_categories(&categories);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.rows().iter().all(|r| r.kind == Some(AnalysisKind::CvEndpoints)));
    }

    #[test]
    fn test_category_filter_is_idempotent() {
        let mut categories = BTreeSet::new();
        categories.insert(AnalysisKind::ContinuousVariable);
        categories.insert(AnalysisKind::Phecodes);
        let once = sample().filter_by_categories(&categories);
        let twice = once.filter_by_categories(&categories);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_kind_rows_never_match_category_filter() {
        let mut rows = sample().rows().to_vec();
        rows.push(Association {
            kind: None,
            ..row("PCSK9", AnalysisKind::Phecodes, "O9", Some(0.5), None)
        });
        let table = ResultTable::from_rows(rows);
        let mut categories = BTreeSet::new();
        categories.insert(AnalysisKind::Phecodes);
        let filtered = table.filter_by_categories(&categories);
        assert!(filtered.rows().iter().all(|r| r.kind.is_some()));
    }

    #[test]
    fn test_label_filter() {
        let table = sample();
        let labels = vec!["label-O3".to_string()];
        let filtered = table.filter_by_labels(Some(&labels));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.rows().iter().all(|r| r.outcome_id == "O3"));

        // None = no filter
        assert_eq!(table.filter_by_labels(None), table);
    }

    #[test]
    fn test_threshold_drops_missing_metric() {
        let table = sample();
        let p_hits = table.apply_threshold(Metric::P, 0.05);
        // O5 has no p and is dropped; O2, APOB-O1 (0.05 not < 0.05) and APOB-O3 fail
        assert_eq!(p_hits.len(), 3);
        assert!(p_hits.rows().iter().all(|r| r.p.unwrap() < 0.05));
    }

    #[test]
    fn test_threshold_one_keeps_all_with_metric() {
        let table = sample();
        let all = table.apply_threshold(Metric::P, 1.0);
        assert_eq!(all.len(), 6); // only the p-less O5 row drops
    }

    #[test]
    fn test_sort_puts_missing_last() {
        let sorted = sample().sorted_by_significance();
        let last = &sorted.rows()[sorted.len() - 1];
        assert_eq!(last.outcome_id, "O4"); // q missing sorts after all present q
        assert_eq!(sorted.rows()[0].outcome_id, "O3"); // strongest q
    }

    #[test]
    fn test_top_n_limits_per_gene() {
        let top1 = sample().top_n_per_gene(AnalysisKind::ContinuousVariable, 1);
        let mut per_gene: HashMap<&str, usize> = HashMap::new();
        for r in top1.rows() {
            *per_gene.entry(r.gene.as_str()).or_default() += 1;
        }
        assert!(per_gene.values().all(|&c| c <= 1));
        // The PCSK9 row kept must be the more significant one
        let kept: Vec<_> = top1.rows().iter().filter(|r| r.gene == "PCSK9").collect();
        assert_eq!(kept[0].outcome_id, "O1");
    }

    #[test]
    fn test_top_n_larger_than_available() {
        let top5 = sample().top_n_per_gene(AnalysisKind::ContinuousVariable, 5);
        let pcsk9 = top5.rows().iter().filter(|r| r.gene == "PCSK9").count();
        let apob = top5.rows().iter().filter(|r| r.gene == "APOB").count();
        assert_eq!(pcsk9, 2);
        assert_eq!(apob, 1);
    }

    #[test]
    fn test_top_n_zero_clamps_to_one() {
        let top = sample().top_n_per_gene(AnalysisKind::CvEndpoints, 0);
        assert_eq!(top.rows().iter().filter(|r| r.gene == "PCSK9").count(), 1);
    }

    #[test]
    fn test_genes_unique_in_order() {
        assert_eq!(sample().genes(), vec!["PCSK9", "APOB"]);
    }

    #[test]
    fn test_tidy_row_count_matches() {
        let table = sample();
        assert_eq!(table.tidy().len(), table.len());
    }
}
