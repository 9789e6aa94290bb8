//! Load Phenotypes use case.
//!
//! Executes one phenotype query end to end: validate input, resolve each
//! gene, fetch its association rows, combine into a single table, enrich
//! labels from the outcome catalog, and apply the category filter.
//!
//! Input validation happens before anything touches the gateway — an empty
//! gene list never issues a network call. Per-gene upstream failures are
//! recorded and skipped so one broken lookup does not sink the rest of the
//! query; the caller inspects the [`QueryReport`] to decide how to render.

use crate::ports::phewas_gateway::{PhewasGateway, UpstreamError};
use crate::ports::query_logger::{NoQueryLogger, QueryEvent, QueryLogger};
use crate::ports::query_progress::QueryProgressNotifier;
use phenoscope_domain::{
    AnalysisKind, AnalysisSubset, InputError, OutcomeCatalog, PhenotypeQuery, ResultTable,
    parse_gene_list,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that abort the whole query.
///
/// Per-gene upstream failures do not abort; they are carried in the
/// [`QueryReport`] instead.
#[derive(Error, Debug)]
pub enum LoadPhenotypesError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Query superseded")]
    Cancelled,
}

/// Input for the [`LoadPhenotypesUseCase`].
#[derive(Debug, Clone)]
pub struct LoadPhenotypesInput {
    /// Gene identifiers as entered (symbols or Ensembl ids).
    pub genes: Vec<String>,
    /// Cohort subset for the upstream results endpoint.
    pub subset: AnalysisSubset,
    /// Category filter; empty = no filter.
    pub categories: BTreeSet<AnalysisKind>,
}

impl LoadPhenotypesInput {
    pub fn new(
        genes: Vec<String>,
        subset: AnalysisSubset,
        categories: BTreeSet<AnalysisKind>,
    ) -> Self {
        Self {
            genes,
            subset,
            categories,
        }
    }

    /// Parse the raw gene text area contents into an input.
    pub fn from_text(
        text: &str,
        subset: AnalysisSubset,
        categories: BTreeSet<AnalysisKind>,
    ) -> Self {
        Self::new(parse_gene_list(text), subset, categories)
    }
}

/// What happened to one requested gene.
#[derive(Debug, Clone)]
pub enum GeneOutcome {
    Loaded { symbol: String, rows: usize },
    Unresolved { identifier: String },
    Failed { identifier: String, error: UpstreamError },
}

impl GeneOutcome {
    /// Log-pane line for this outcome, in the style of the results log.
    pub fn notice(&self) -> String {
        match self {
            Self::Loaded { symbol, rows } => format!("{symbol}: {rows} rows."),
            Self::Unresolved { identifier } => {
                format!("! Could not resolve '{identifier}' - skipping.")
            }
            Self::Failed { identifier, error } => format!("{identifier}: ERROR {error}"),
        }
    }
}

/// Result of one executed query.
#[derive(Debug, Clone)]
pub struct QueryReport {
    /// Combined, enriched, category-filtered table.
    pub table: ResultTable,
    /// Per-gene outcomes in request order.
    pub outcomes: Vec<GeneOutcome>,
    /// False when the catalog fetch failed and labels fell back.
    pub catalog_available: bool,
}

impl QueryReport {
    pub fn loaded_genes(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, GeneOutcome::Loaded { .. }))
            .count()
    }

    pub fn failed_genes(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, GeneOutcome::Failed { .. }))
            .count()
    }

    /// Every gene hit an upstream error and nothing was loaded — the
    /// query as a whole counts as an upstream failure.
    pub fn is_upstream_failure(&self) -> bool {
        self.table.is_empty() && self.failed_genes() > 0 && self.loaded_genes() == 0
    }

    /// Nothing matched, but not because of errors — the explicit
    /// "no data" display state.
    pub fn is_empty_result(&self) -> bool {
        self.table.is_empty() && !self.is_upstream_failure()
    }

    /// Log lines for the UI, one per gene plus a total.
    pub fn notices(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.outcomes.iter().map(GeneOutcome::notice).collect();
        if self.table.is_empty() {
            lines.push("No data loaded.".to_string());
        } else {
            lines.push(format!("Total rows combined: {}", self.table.len()));
        }
        lines
    }
}

/// Use case for running one phenotype query.
pub struct LoadPhenotypesUseCase {
    gateway: Arc<dyn PhewasGateway>,
    query_logger: Arc<dyn QueryLogger>,
}

impl Clone for LoadPhenotypesUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            query_logger: self.query_logger.clone(),
        }
    }
}

impl LoadPhenotypesUseCase {
    pub fn new(gateway: Arc<dyn PhewasGateway>) -> Self {
        Self {
            gateway,
            query_logger: Arc::new(NoQueryLogger),
        }
    }

    /// Attach a query logger.
    pub fn with_query_logger(mut self, logger: Arc<dyn QueryLogger>) -> Self {
        self.query_logger = logger;
        self
    }

    /// Execute the query with progress callbacks.
    ///
    /// `cancel` is checked between genes; a cancelled query returns
    /// [`LoadPhenotypesError::Cancelled`] without touching the gateway
    /// again.
    pub async fn execute(
        &self,
        input: LoadPhenotypesInput,
        progress: &dyn QueryProgressNotifier,
        cancel: &CancellationToken,
    ) -> Result<QueryReport, LoadPhenotypesError> {
        // Validation precedes any gateway call
        let query = PhenotypeQuery::new(input.genes, input.subset, input.categories)?;

        info!("Loading phenotypes: {}", query.describe());

        let mut table = ResultTable::new();
        let mut outcomes = Vec::with_capacity(query.genes.len());

        for identifier in &query.genes {
            if cancel.is_cancelled() {
                debug!("Query superseded after {} genes", outcomes.len());
                return Err(LoadPhenotypesError::Cancelled);
            }

            progress.on_gene_started(identifier);

            let resolved = match self.gateway.resolve_gene(identifier).await {
                Ok(Some(resolved)) => resolved,
                Ok(None) => {
                    warn!("Could not resolve '{}'", identifier);
                    progress.on_gene_unresolved(identifier);
                    outcomes.push(GeneOutcome::Unresolved {
                        identifier: identifier.clone(),
                    });
                    continue;
                }
                Err(error) => {
                    warn!("Resolve failed for '{}': {}", identifier, error);
                    progress.on_gene_failed(identifier, &error.to_string());
                    outcomes.push(GeneOutcome::Failed {
                        identifier: identifier.clone(),
                        error,
                    });
                    continue;
                }
            };

            match self
                .gateway
                .gene_results(&resolved.ensembl_id, query.subset)
                .await
            {
                Ok(mut rows) => {
                    for row in &mut rows {
                        row.gene = resolved.symbol.clone();
                    }
                    let count = rows.len();
                    debug!("{}: {} rows", resolved.symbol, count);
                    progress.on_gene_loaded(&resolved.symbol, count);
                    outcomes.push(GeneOutcome::Loaded {
                        symbol: resolved.symbol.clone(),
                        rows: count,
                    });
                    table.extend(rows);
                }
                Err(error) => {
                    warn!("Results fetch failed for '{}': {}", resolved.symbol, error);
                    progress.on_gene_failed(&resolved.symbol, &error.to_string());
                    outcomes.push(GeneOutcome::Failed {
                        identifier: resolved.symbol.clone(),
                        error,
                    });
                }
            }
        }

        // Enrich labels; a missing catalog is not fatal
        let mut catalog_available = true;
        if !table.is_empty() {
            match self.gateway.outcome_catalog().await {
                Ok(catalog) => catalog.enrich(&mut table),
                Err(error) => {
                    warn!("Outcome catalog unavailable: {}", error);
                    progress.on_catalog_unavailable(&error.to_string());
                    OutcomeCatalog::new().enrich(&mut table);
                    catalog_available = false;
                }
            }
        }

        let table = table.filter_by_categories(&query.categories);

        let report = QueryReport {
            table,
            outcomes,
            catalog_available,
        };

        info!(
            "Query finished: {} rows, {} genes loaded, {} failed",
            report.table.len(),
            report.loaded_genes(),
            report.failed_genes()
        );

        self.query_logger.log(QueryEvent::new(
            "query_completed",
            serde_json::json!({
                "query": query.describe(),
                "rows": report.table.len(),
                "genes_loaded": report.loaded_genes(),
                "genes_failed": report.failed_genes(),
                "catalog_available": report.catalog_available,
            }),
        ));

        Ok(report)
    }
}
