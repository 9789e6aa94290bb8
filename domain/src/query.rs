//! Phenotype query value object.

use crate::analysis::{AnalysisKind, AnalysisSubset};
use crate::core::error::InputError;
use crate::gene::parse_gene_list;
use std::collections::BTreeSet;

/// One user-initiated query: which genes, which cohort, which categories.
///
/// Constructed fresh per interaction and discarded after the matching
/// request completes. An empty category set means "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhenotypeQuery {
    /// Gene identifiers (symbols or Ensembl ids), upper-cased, in input order.
    pub genes: Vec<String>,
    /// Cohort subset forwarded to the upstream results endpoint.
    pub subset: AnalysisSubset,
    /// Category filter; empty = all categories.
    pub categories: BTreeSet<AnalysisKind>,
}

impl PhenotypeQuery {
    /// Build a query from already-parsed identifiers.
    ///
    /// Fails with [`InputError::EmptyGeneList`] before any request is
    /// attempted when no identifiers are given.
    pub fn new(
        genes: Vec<String>,
        subset: AnalysisSubset,
        categories: BTreeSet<AnalysisKind>,
    ) -> Result<Self, InputError> {
        if genes.is_empty() {
            return Err(InputError::EmptyGeneList);
        }
        Ok(Self {
            genes,
            subset,
            categories,
        })
    }

    /// Build a query from the raw gene text area contents.
    pub fn from_text(
        text: &str,
        subset: AnalysisSubset,
        categories: BTreeSet<AnalysisKind>,
    ) -> Result<Self, InputError> {
        Self::new(parse_gene_list(text), subset, categories)
    }

    /// Short summary for log lines and the query log.
    pub fn describe(&self) -> String {
        let cats = if self.categories.is_empty() {
            "all".to_string()
        } else {
            self.categories
                .iter()
                .map(|k| k.wire_name())
                .collect::<Vec<_>>()
                .join("+")
        };
        format!(
            "{} [{}] ({} genes; categories: {})",
            self.genes.join(","),
            self.subset.wire_name(),
            self.genes.len(),
            cats
        )
    }
}
