//! ExPheWAS gateway port
//!
//! Defines the interface for talking to the upstream association service.

use async_trait::async_trait;
use phenoscope_domain::{AnalysisSubset, Association, OutcomeCatalog, ResolvedGene};
use thiserror::Error;

/// Errors crossing the upstream boundary.
///
/// Never fatal: callers surface these as notices and keep the session
/// running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed upstream response: {0}")]
    Decode(String),

    #[error("Upstream request timed out")]
    Timeout,
}

impl UpstreamError {
    /// Whether retrying the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Decode(_) => false,
        }
    }
}

/// Gateway to the ExPheWAS REST service.
///
/// One resolve call plus one results call per gene; the outcome catalog is
/// fetched once per process and cached by the adapter.
#[async_trait]
pub trait PhewasGateway: Send + Sync {
    /// Resolve a symbol or Ensembl id. `Ok(None)` means the upstream knows
    /// no such gene; `Err` means the lookup itself failed.
    async fn resolve_gene(&self, identifier: &str) -> Result<Option<ResolvedGene>, UpstreamError>;

    /// Fetch all association rows for a resolved gene. Row `gene` fields
    /// are left empty; the caller tags them with the display symbol.
    async fn gene_results(
        &self,
        ensembl_id: &str,
        subset: AnalysisSubset,
    ) -> Result<Vec<Association>, UpstreamError>;

    /// The outcome catalog used for label enrichment.
    async fn outcome_catalog(&self) -> Result<OutcomeCatalog, UpstreamError>;
}
