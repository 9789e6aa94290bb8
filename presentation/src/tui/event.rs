//! TUI event types
//!
//! Commands sent TO the controller task and events coming FROM it.

use phenoscope_application::QueryReport;
use phenoscope_domain::{AnalysisKind, AnalysisSubset};
use std::collections::BTreeSet;

/// Monotonically increasing id per submitted query.
///
/// The state keeps only the newest id and drops events tagged with older
/// ones — the last-request-wins guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryId(pub u64);

/// Commands sent from the TUI event loop to the controller task (actor inbox)
#[derive(Debug)]
pub enum TuiCommand {
    /// Run a query with the current UI inputs; supersedes any in-flight one
    RunQuery {
        genes_text: String,
        subset: AnalysisSubset,
        categories: BTreeSet<AnalysisKind>,
    },
    /// Cancel the in-flight query without starting a new one
    CancelQuery,
    /// Graceful shutdown
    Quit,
}

/// Events emitted by the controller task for rendering
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// A query was accepted and its task spawned
    QueryStarted { id: QueryId, summary: String },
    /// One per-gene progress line
    GeneNotice { id: QueryId, line: String },
    /// The query finished; the report decides Displaying vs ErrorShown
    QueryFinished { id: QueryId, report: QueryReport },
    /// Input validation failed; no request was issued
    QueryInvalid { id: QueryId, message: String },
    /// The query was superseded or cancelled
    QueryCancelled { id: QueryId },
}

impl TuiEvent {
    /// The query this event belongs to.
    pub fn query_id(&self) -> QueryId {
        match self {
            Self::QueryStarted { id, .. }
            | Self::GeneNotice { id, .. }
            | Self::QueryFinished { id, .. }
            | Self::QueryInvalid { id, .. }
            | Self::QueryCancelled { id } => *id,
        }
    }
}
